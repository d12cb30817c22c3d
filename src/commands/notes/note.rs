use std::time::Duration;

use poise::{CreateReply, serenity_prelude as serenity};
use serenity::{Colour, CreateEmbed, CreateEmbedFooter, GuildId, User};
use tracing::info;

use super::{show_notes, take_note};
use crate::{
    CommandResult, Context, Error,
    context::{ConfirmOptions, ContextExt},
    error::MetroError,
    utils::checks::require_guild,
};

const CONFIRM_TIMEOUT: Duration = Duration::from_secs(30);

/// Base command for managing notes
///
/// Moderators can add notes to members.
/// Members can view their own notes with `notes`.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    subcommands("note_add", "note_remove", "note_list", "note_clear", "note_redo"),
    subcommand_required,
    category = "Notes"
)]
pub async fn note(_ctx: Context<'_>) -> CommandResult {
    Ok(())
}

/// Add a note to a member's notes
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "add",
    aliases("+"),
    required_permissions = "MANAGE_MESSAGES"
)]
pub async fn note_add(
    ctx: Context<'_>,
    #[description = "The member"] member: User,
    #[description = "The note"]
    #[rest]
    note: String,
) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    add(ctx, guild_id, &member, &note).await
}

/// Remove a note by its id
///
/// Use `note list` to show a member's notes.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "remove",
    aliases("-"),
    required_permissions = "MANAGE_MESSAGES"
)]
pub async fn note_remove(ctx: Context<'_>, #[description = "The note id"] id: i64) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    let db = &ctx.data().db;

    let note = db.note(guild_id, id).map_err(MetroError::from)?.ok_or_else(|| {
        MetroError::bad_argument(format!(
            "A note with that ID was not found. Use `{}note list [member]` to show a member's notes.",
            ctx.prefix()
        ))
    })?;
    db.remove_note(guild_id, id).map_err(MetroError::from)?;
    info!(guild = %guild_id, note = id, "Note removed");

    let embed = CreateEmbed::new()
        .colour(Colour::RED)
        .description(format!("❌ __**Deleted note {id}.**__\n> {}", note.text));
    ctx.send_redacted(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Show a member's notes
///
/// Without a member this shows your own notes.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "list",
    aliases("show"),
    required_permissions = "MANAGE_MESSAGES"
)]
pub async fn note_list(
    ctx: Context<'_>,
    #[description = "The member"] member: Option<User>,
) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    let member = member.unwrap_or_else(|| ctx.author().clone());
    show_notes(ctx, guild_id, &member).await
}

/// Clear a member's notes
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "clear",
    aliases("wipe"),
    required_permissions = "MANAGE_MESSAGES"
)]
pub async fn note_clear(ctx: Context<'_>, #[description = "The member"] member: User) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    if let Some(cleared) = clear(ctx, guild_id, &member).await? {
        ctx.say_redacted(format!(
            "Successfully cleared **{cleared}** notes from {}",
            member.name
        ))
        .await?;
    }
    Ok(())
}

/// Clear a member's notes and replace them with a single note
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "redo",
    aliases("re"),
    required_permissions = "MANAGE_MESSAGES"
)]
pub async fn note_redo(
    ctx: Context<'_>,
    #[description = "The member"] member: User,
    #[description = "The new note"]
    #[rest]
    note: String,
) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    if clear(ctx, guild_id, &member).await?.is_some() {
        add(ctx, guild_id, &member, &note).await?;
    }
    Ok(())
}

async fn add(ctx: Context<'_>, guild_id: GuildId, member: &User, text: &str) -> CommandResult {
    let id = take_note(ctx, guild_id, member, text)?;
    info!(guild = %guild_id, user = %member.id, note = id, "Note taken");

    let embed = CreateEmbed::new()
        .colour(Colour::DARK_GREEN)
        .description(format!("✅ __**Note taken.**__ \n> {text}"))
        .footer(CreateEmbedFooter::new(format!("Note ID: {id}")));
    ctx.send_redacted(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Asks first, then deletes every note about `member`. `None` if nothing was cleared.
async fn clear(ctx: Context<'_>, guild_id: GuildId, member: &User) -> Result<Option<usize>, Error> {
    let db = &ctx.data().db;
    let count = db.notes_for(guild_id, member.id).map_err(MetroError::from)?.len();
    if count == 0 {
        return Err(MetroError::bad_argument(format!(
            "No notes were found for this member. Use `{}note add <member> <note>` to add a note.",
            ctx.prefix()
        ))
        .into());
    }

    let options = ConfirmOptions {
        timeout: CONFIRM_TIMEOUT,
        ..Default::default()
    };
    let prompt = format!(
        "This will clear **{count}** from {}'s notes, are you sure?",
        member.name
    );
    match ctx.confirm(prompt, options).await? {
        Some(true) => {}
        Some(false) => {
            ctx.say_redacted("Canceled.").await?;
            return Ok(None);
        }
        None => {
            ctx.say_redacted("Timed out.").await?;
            return Ok(None);
        }
    }

    let cleared = db.clear_notes(guild_id, member.id).map_err(MetroError::from)?;
    info!(guild = %guild_id, user = %member.id, cleared, "Notes cleared");
    Ok(Some(cleared))
}
