//! Bulk message removal.

pub mod filter;

use std::time::Duration;

use poise::serenity_prelude as serenity;
use serenity::{GetMessages, Member, Message, MessageId, Timestamp};
use tracing::{debug, info};

use crate::{CommandResult, Context, Error, context::ContextExt, error::MetroError};
use filter::{CustomFilter, Filter, MAX_SEARCH, MessageFacts, removal_summary};

/// How long the removal summary stays up.
const SUMMARY_LIFETIME: Duration = Duration::from_secs(7);

/// Bulk deletion only accepts messages younger than this.
const BULK_MAX_AGE_SECS: i64 = 14 * 24 * 60 * 60;

const PAGE_SIZE: u64 = 100;

/// Remove messages that meet a certain criteria
///
/// Without a subcommand this removes every message that is not pinned.
/// Use `purge all <amount>` to include pinned messages.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    aliases("clear", "clean", "remove"),
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES",
    subcommands(
        "purge_embeds",
        "purge_files",
        "purge_images",
        "purge_all",
        "purge_user",
        "purge_contains",
        "purge_bots",
        "purge_emoji",
        "purge_custom"
    ),
    category = "Server"
)]
pub async fn purge(
    ctx: Context<'_>,
    #[description = "Messages to search"] search: Option<u64>,
) -> CommandResult {
    let search = search.ok_or_else(|| {
        MetroError::bad_argument(format!(
            "Tell me how many messages to search, e.g. `{}purge 50`.",
            ctx.prefix()
        ))
    })?;
    do_removal(ctx, search, Filter::NotPinned, None, None).await
}

/// Remove messages that have embeds in them
#[poise::command(
    prefix_command,
    slash_command,
    rename = "embeds",
    aliases("embed"),
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES"
)]
pub async fn purge_embeds(ctx: Context<'_>, #[description = "Messages to search"] search: u64) -> CommandResult {
    do_removal(ctx, search, Filter::Embeds, None, None).await
}

/// Remove messages that have files in them
#[poise::command(
    prefix_command,
    slash_command,
    rename = "files",
    aliases("attachments"),
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES"
)]
pub async fn purge_files(ctx: Context<'_>, #[description = "Messages to search"] search: u64) -> CommandResult {
    do_removal(ctx, search, Filter::Files, None, None).await
}

/// Remove messages that have embeds or attachments
#[poise::command(
    prefix_command,
    slash_command,
    rename = "images",
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES"
)]
pub async fn purge_images(ctx: Context<'_>, #[description = "Messages to search"] search: u64) -> CommandResult {
    do_removal(ctx, search, Filter::Images, None, None).await
}

/// Remove all messages, pinned ones included
#[poise::command(
    prefix_command,
    slash_command,
    rename = "all",
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES"
)]
pub async fn purge_all(ctx: Context<'_>, #[description = "Messages to search"] search: u64) -> CommandResult {
    do_removal(ctx, search, Filter::All, None, None).await
}

/// Remove all messages sent by a member
#[poise::command(
    prefix_command,
    slash_command,
    rename = "user",
    aliases("member"),
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES"
)]
pub async fn purge_user(
    ctx: Context<'_>,
    #[description = "Whose messages to remove"] member: Member,
    #[description = "Messages to search"] search: u64,
) -> CommandResult {
    do_removal(ctx, search, Filter::User(member.user.id), None, None).await
}

/// Remove all messages containing a substring
///
/// The substring must be at least 3 characters long.
#[poise::command(
    prefix_command,
    slash_command,
    rename = "contains",
    aliases("has"),
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES"
)]
pub async fn purge_contains(
    ctx: Context<'_>,
    #[description = "Text to look for"]
    #[rest]
    text: String,
) -> CommandResult {
    if text.chars().count() < 3 {
        return Err(MetroError::bad_argument("The substring must be at least 3 characters.").into());
    }
    do_removal(ctx, PAGE_SIZE, Filter::Contains(text), None, None).await
}

/// Remove bot messages and messages starting with an optional prefix
#[poise::command(
    prefix_command,
    slash_command,
    rename = "bot",
    aliases("bots"),
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES"
)]
pub async fn purge_bots(
    ctx: Context<'_>,
    #[description = "A bot prefix to match"] prefix: Option<String>,
    #[description = "Messages to search"] search: Option<u64>,
) -> CommandResult {
    do_removal(ctx, search.unwrap_or(25), Filter::Bots { prefix }, None, None).await
}

/// Remove all messages containing a custom emoji
#[poise::command(
    prefix_command,
    slash_command,
    rename = "emoji",
    aliases("emojis"),
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES"
)]
pub async fn purge_emoji(ctx: Context<'_>, #[description = "Messages to search"] search: u64) -> CommandResult {
    do_removal(ctx, search, Filter::Emoji, None, None).await
}

/// A more advanced purge with a command-line like syntax
///
/// Most options take several values to mean "any of them". Quote values with spaces.
/// Messages are removed when every option matches, or any of them with `--or`.
///
/// Options:
/// `--user`: mentions or ids of the authors
/// `--contains`: a substring of the message
/// `--starts`: how the message starts
/// `--ends`: how the message ends
/// `--search`: messages to search, default 100, max 2000
/// `--after`: only messages after this id
/// `--before`: only messages before this id
///
/// Flags:
/// `--bot`, `--embeds`, `--files`, `--emoji`, `--reactions`,
/// `--or` (any option may match), `--not` (invert the outcome)
#[poise::command(
    prefix_command,
    slash_command,
    rename = "custom",
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES"
)]
pub async fn purge_custom(
    ctx: Context<'_>,
    #[description = "Options, e.g. --user @someone --contains spam"]
    #[rest]
    args: String,
) -> CommandResult {
    let filter = CustomFilter::parse(&args).map_err(MetroError::bad_argument)?;
    let (search, before, after) = (filter.search_limit(), filter.before, filter.after);
    do_removal(ctx, search, Filter::Custom(Box::new(filter)), before, after).await
}

async fn do_removal(
    ctx: Context<'_>,
    limit: u64,
    filter: Filter,
    before: Option<MessageId>,
    after: Option<MessageId>,
) -> CommandResult {
    if limit > MAX_SEARCH {
        return Err(MetroError::bad_argument(format!(
            "Too many messages to search. ({limit}/{MAX_SEARCH})"
        ))
        .into());
    }

    ctx.defer().await?;

    // The invocation id is a snowflake too, so it marks "now" for slash invocations as well.
    let before = before.unwrap_or_else(|| MessageId::new(ctx.id()));
    let candidates = history(ctx, limit, before, after).await?;

    let (doomed, facts): (Vec<MessageId>, Vec<MessageFacts>) = candidates
        .iter()
        .map(|message| (message.id, MessageFacts::from(message)))
        .filter(|(_, facts)| filter.matches(facts))
        .unzip();

    delete_all(ctx, &doomed).await?;
    info!(
        channel = %ctx.channel_id(),
        searched = candidates.len(),
        removed = doomed.len(),
        "Purged messages"
    );

    let summary = ctx
        .say_redacted(removal_summary(&facts))
        .await?
        .into_message()
        .await?;
    let http = ctx.serenity_context().http.clone();
    tokio::spawn(async move {
        tokio::time::sleep(SUMMARY_LIFETIME).await;
        if let Err(why) = summary.delete(&*http).await {
            debug!("Failed to delete purge summary: {why}");
        }
    });

    Ok(())
}

/// Up to `limit` messages before `before`, newest first, stopping at `after`.
async fn history(
    ctx: Context<'_>,
    limit: u64,
    before: MessageId,
    after: Option<MessageId>,
) -> Result<Vec<Message>, Error> {
    let mut found = Vec::new();
    let mut cursor = before;

    while (found.len() as u64) < limit {
        let batch = (limit - found.len() as u64).min(PAGE_SIZE);
        let page = ctx
            .channel_id()
            .messages(ctx, GetMessages::new().before(cursor).limit(batch as u8))
            .await?;
        let exhausted = (page.len() as u64) < batch;

        for message in page {
            if after.is_some_and(|after| message.id <= after) {
                return Ok(found);
            }
            cursor = message.id;
            found.push(message);
        }

        if exhausted {
            break;
        }
    }

    Ok(found)
}

/// Bulk deletes recent messages, one by one for the rest.
async fn delete_all(ctx: Context<'_>, ids: &[MessageId]) -> Result<(), Error> {
    let cutoff = Timestamp::now().unix_timestamp() - BULK_MAX_AGE_SECS;
    let (recent, old): (Vec<MessageId>, Vec<MessageId>) = ids
        .iter()
        .copied()
        .partition(|id| id.created_at().unix_timestamp() > cutoff);

    let channel = ctx.channel_id();
    for chunk in recent.chunks(PAGE_SIZE as usize) {
        match chunk {
            [single] => channel.delete_message(ctx.http(), *single).await?,
            _ => channel.delete_messages(ctx.http(), chunk).await?,
        }
    }
    for id in old {
        channel.delete_message(ctx.http(), id).await?;
    }

    Ok(())
}
