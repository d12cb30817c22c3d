use crate::{CommandResult, Context, context::ContextExt, utils::text::char_line};

/// Longest message the platform accepts.
pub const MESSAGE_LIMIT: usize = 2000;

/// Show information about a number of characters
#[poise::command(prefix_command, slash_command, category = "Info")]
pub async fn charinfo(
    ctx: Context<'_>,
    #[description = "The characters to inspect"]
    #[rest]
    characters: String,
) -> CommandResult {
    ctx.say_redacted(charinfo_message(&characters)).await?;
    Ok(())
}

pub fn charinfo_message(characters: &str) -> String {
    let message = characters.chars().map(char_line).collect::<Vec<_>>().join("\n");
    if message.chars().count() > MESSAGE_LIMIT {
        "Output too long to display.".to_string()
    } else {
        message
    }
}
