use poise::{CreateReply, serenity_prelude as serenity};
use serenity::{Colour, CreateEmbed, CreateEmbedAuthor, EditMember, Member};

use crate::{
    CommandResult, Context,
    context::ContextExt,
    utils::{
        checks::require_guild,
        text::{is_cancerous, nick_maker},
    },
};

/// Remove special characters from a member's nickname
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    aliases("dc"),
    required_permissions = "MANAGE_NICKNAMES",
    required_bot_permissions = "MANAGE_NICKNAMES",
    category = "Server"
)]
pub async fn decancer(
    ctx: Context<'_>,
    #[description = "The member to clean up"] member: Member,
) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    let old = member.display_name().to_string();

    let Some(new) = decancered(&old) else {
        let embed = CreateEmbed::new()
            .colour(Colour::RED)
            .description(format!("**{}**'s nickname is already decancered.", member.user.name));
        ctx.send_redacted(CreateReply::default().embed(embed)).await?;
        return Ok(());
    };

    let reason = format!("Decancer command invoked by: {} (ID: {})", ctx.author().name, ctx.author().id);
    guild_id
        .edit_member(
            ctx,
            member.user.id,
            EditMember::new().nickname(new.clone()).audit_log_reason(&reason),
        )
        .await?;

    let embed = CreateEmbed::new()
        .title("Decancer command")
        .colour(Colour::DARK_GREEN)
        .author(CreateEmbedAuthor::new(member.user.name.clone()).icon_url(member.face()))
        .field("Old nick", old, false)
        .field("New nick", new, false);
    ctx.send_redacted(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// The cleaned up name, or `None` when there is nothing to change.
fn decancered(name: &str) -> Option<String> {
    if !is_cancerous(name) {
        return None;
    }
    let new = nick_maker(name);
    (new.to_lowercase() != name.to_lowercase()).then_some(new)
}
