use poise::serenity_prelude as serenity;
use serenity::{GuildChannel, PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId};
use tracing::info;

use super::target_channel;
use crate::{CommandResult, Context, Error, context::ContextExt, error::MetroError};

/// What an overwrite says about sending messages: allowed, denied or inherited.
pub fn send_state(overwrite: Option<&PermissionOverwrite>) -> Option<bool> {
    let overwrite = overwrite?;
    if overwrite.deny.contains(Permissions::SEND_MESSAGES) {
        Some(false)
    } else if overwrite.allow.contains(Permissions::SEND_MESSAGES) {
        Some(true)
    } else {
        None
    }
}

/// `allow` and `deny` with SEND_MESSAGES set to `state`, everything else untouched.
pub fn with_send_state(
    allow: Permissions,
    deny: Permissions,
    state: Option<bool>,
) -> (Permissions, Permissions) {
    let allow = allow - Permissions::SEND_MESSAGES;
    let deny = deny - Permissions::SEND_MESSAGES;
    match state {
        Some(true) => (allow | Permissions::SEND_MESSAGES, deny),
        Some(false) => (allow, deny | Permissions::SEND_MESSAGES),
        None => (allow, deny),
    }
}

fn role_overwrite(channel: &GuildChannel, role: RoleId) -> Option<&PermissionOverwrite> {
    channel
        .permission_overwrites
        .iter()
        .find(|o| o.kind == PermissionOverwriteType::Role(role))
}

/// Writes the SEND_MESSAGES state of `kind`, dropping the overwrite once it is empty.
async fn set_send_state(
    ctx: Context<'_>,
    channel: &GuildChannel,
    kind: PermissionOverwriteType,
    state: Option<bool>,
) -> Result<(), Error> {
    let current = channel.permission_overwrites.iter().find(|o| o.kind == kind);
    let (allow, deny) = with_send_state(
        current.map_or(Permissions::empty(), |o| o.allow),
        current.map_or(Permissions::empty(), |o| o.deny),
        state,
    );

    if allow.is_empty() && deny.is_empty() {
        if current.is_some() {
            channel.id.delete_permission(ctx.http(), kind).await?;
        }
    } else {
        channel
            .id
            .create_permission(ctx.http(), PermissionOverwrite { allow, deny, kind })
            .await?;
    }
    Ok(())
}

/// The bot must see and talk in `channel` to lock it.
async fn ensure_bot_can_speak(ctx: Context<'_>, channel: &GuildChannel) -> Result<(), Error> {
    let bot = channel.guild_id.member(ctx, ctx.framework().bot_id).await?;
    let permissions = {
        let guild = ctx.guild().ok_or(MetroError::NotInGuild)?;
        guild.user_permissions_in(channel, &bot)
    };

    if !permissions.view_channel() {
        return Err(MetroError::bad_argument(format!(
            "I need to be able to read messages in <#{}>",
            channel.id
        ))
        .into());
    }
    if !permissions.send_messages() {
        return Err(MetroError::bad_argument(format!(
            "I need to be able to send messages in <#{}>",
            channel.id
        ))
        .into());
    }
    Ok(())
}

/// Lock down a channel
///
/// Denies sending messages to the default role. This will not work
/// if your server relies on other roles to grant that permission.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    aliases("lock"),
    required_permissions = "SEND_MESSAGES | MANAGE_CHANNELS",
    required_bot_permissions = "SEND_MESSAGES | MANAGE_CHANNELS",
    category = "Server"
)]
pub async fn lockdown(
    ctx: Context<'_>,
    #[description = "Channel to lock, defaults to this one"] channel: Option<GuildChannel>,
) -> CommandResult {
    let channel = target_channel(ctx, channel).await?;
    ensure_bot_can_speak(ctx, &channel).await?;

    let everyone = channel.guild_id.everyone_role();
    let previous = send_state(role_overwrite(&channel, everyone));
    if previous == Some(false) || ctx.data().lockdowns.contains_key(&channel.id) {
        return Err(
            MetroError::bad_argument(format!("❌ Channel <#{}> is already locked.", channel.id)).into(),
        );
    }

    let bot = PermissionOverwriteType::Member(ctx.framework().bot_id);
    let bot_state = send_state(channel.permission_overwrites.iter().find(|o| o.kind == bot));
    if bot_state != Some(true) {
        set_send_state(ctx, &channel, bot, Some(true)).await?;
    }

    set_send_state(ctx, &channel, PermissionOverwriteType::Role(everyone), Some(false)).await?;
    ctx.data().lockdowns.insert(channel.id, previous);
    info!(channel = %channel.id, ?previous, "Channel locked");

    ctx.say_redacted(format!("✅ Channel <#{}> locked", channel.id)).await?;
    Ok(())
}

/// Unlock a channel
///
/// Restores the default role's permission to send messages as it was before the lockdown.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    aliases("unlock"),
    required_permissions = "MANAGE_CHANNELS",
    required_bot_permissions = "SEND_MESSAGES | MANAGE_CHANNELS",
    category = "Server"
)]
pub async fn unlockdown(
    ctx: Context<'_>,
    #[description = "Channel to unlock, defaults to this one"] channel: Option<GuildChannel>,
) -> CommandResult {
    let channel = target_channel(ctx, channel).await?;
    ensure_bot_can_speak(ctx, &channel).await?;

    let everyone = channel.guild_id.everyone_role();
    let remembered = ctx.data().lockdowns.remove(&channel.id).map(|(_, state)| state);
    if remembered.is_none() && send_state(role_overwrite(&channel, everyone)) != Some(false) {
        ctx.say_redacted(format!("Channel <#{}> is already unlocked.", channel.id))
            .await?;
        return Ok(());
    }

    let restored = remembered.flatten();
    set_send_state(ctx, &channel, PermissionOverwriteType::Role(everyone), restored).await?;
    info!(channel = %channel.id, ?restored, "Channel unlocked");

    ctx.say_redacted(format!("✅ Channel <#{}> unlocked.", channel.id)).await?;
    Ok(())
}
