use super::show_notes;
use crate::{CommandResult, Context, utils::checks::require_guild};

/// View your own notes
#[poise::command(prefix_command, slash_command, guild_only, aliases("mynotes"), category = "Notes")]
pub async fn notes(ctx: Context<'_>) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    show_notes(ctx, guild_id, ctx.author()).await
}
