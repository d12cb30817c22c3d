use std::time::Duration;

use poise::serenity_prelude as serenity;
use serenity::{CreateChannel, GuildChannel};
use tracing::{info, warn};

use super::target_channel;
use crate::{
    CommandResult, Context,
    context::{ConfirmOptions, ContextExt},
};

const CONFIRM_TIMEOUT: Duration = Duration::from_secs(30);

/// Nuke a text channel
///
/// Deletes the channel and creates the same channel again.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "nuke-channel",
    aliases("nuke"),
    required_permissions = "MANAGE_CHANNELS",
    required_bot_permissions = "MANAGE_CHANNELS",
    category = "Server"
)]
pub async fn nuke(
    ctx: Context<'_>,
    #[description = "Channel to nuke, defaults to this one"] channel: Option<GuildChannel>,
) -> CommandResult {
    let channel = target_channel(ctx, channel).await?;

    let options = ConfirmOptions {
        timeout: CONFIRM_TIMEOUT,
        ..Default::default()
    };
    match ctx
        .confirm(format!("Are you sure you want to nuke <#{}>", channel.id), options)
        .await?
    {
        Some(true) => {}
        Some(false) => {
            ctx.say_redacted("Canceled.").await?;
            return Ok(());
        }
        None => {
            ctx.say_redacted("Timed out.").await?;
            return Ok(());
        }
    }

    let reason = format!("Nuke command invoked by: {} (ID: {})", ctx.author().name, ctx.author().id);
    let replacement = channel
        .guild_id
        .create_channel(ctx, clone_of(&channel).audit_log_reason(&reason))
        .await?;

    if let Err(why) = channel.delete(ctx).await {
        warn!(channel = %channel.id, "Failed to delete nuked channel: {why}");
        ctx.say_redacted(format!("Had an issue with deleting this channel. {why}"))
            .await?;
        return Ok(());
    }
    info!(old = %channel.id, new = %replacement.id, "Channel nuked");

    replacement
        .say(ctx.http(), format!("Nuke-command ran by: <@{}>", ctx.author().id))
        .await?;
    Ok(())
}

/// A builder recreating `channel` with its name, placement, topic and overwrites.
fn clone_of(channel: &GuildChannel) -> CreateChannel<'_> {
    let mut builder = CreateChannel::new(channel.name.clone())
        .kind(channel.kind)
        .position(channel.position)
        .nsfw(channel.nsfw)
        .permissions(channel.permission_overwrites.clone());
    if let Some(parent) = channel.parent_id {
        builder = builder.category(parent);
    }
    if let Some(topic) = &channel.topic {
        builder = builder.topic(topic.clone());
    }
    builder
}
