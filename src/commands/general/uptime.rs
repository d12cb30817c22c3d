use chrono::Utc;

use crate::{CommandResult, Context, context::ContextExt, utils::text::human_duration};

/// Get the bot's uptime
#[poise::command(prefix_command, slash_command, category = "General")]
pub async fn uptime(ctx: Context<'_>) -> CommandResult {
    let elapsed = (Utc::now() - ctx.data().started)
        .to_std()
        .unwrap_or_default();

    ctx.say_redacted(format!("I have an uptime of: **{}**", human_duration(elapsed)))
        .await?;
    Ok(())
}
