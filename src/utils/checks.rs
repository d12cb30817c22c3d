//! Role hierarchy rules for moderation commands.

use std::collections::HashSet;

use poise::serenity_prelude as serenity;
use serenity::{Guild, GuildId, Member, Role, RoleId, UserId};

use crate::{Context, Error, error::MetroError};

/// A member reduced to what the hierarchy rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    pub user_id: UserId,
    pub top_position: u16,
}

/// The actor may act on the target if they own the bot, own the guild, or sit strictly
/// higher in the role list.
pub fn can_execute_action(
    actor: Standing,
    target: Standing,
    guild_owner: UserId,
    bot_owners: &HashSet<UserId>,
) -> bool {
    bot_owners.contains(&actor.user_id)
        || actor.user_id == guild_owner
        || actor.top_position > target.top_position
}

/// The platform only lets the bot manage roles strictly below its own top role.
pub fn bot_outranks(bot_top: u16, role_position: u16) -> bool {
    bot_top > role_position
}

pub fn bot_hierarchy_message(role_name: &str, bot_top: u16, role_position: u16) -> String {
    format!(
        "I am unable to edit `@{role_name}` because my top role is not above it.\n\n\
         My top role position: {bot_top} • `@{role_name}` position: {role_position}\n\
         Please move my top role higher to make this command work!"
    )
}

/// Highest position among `roles`, 0 (`@everyone`) if none are known.
pub fn top_position(guild: &Guild, roles: &[RoleId]) -> u16 {
    roles
        .iter()
        .filter_map(|id| guild.roles.get(id))
        .map(|role| role.position)
        .max()
        .unwrap_or(0)
}

pub fn require_guild(ctx: Context<'_>) -> Result<GuildId, MetroError> {
    ctx.guild_id().ok_or(MetroError::NotInGuild)
}

/// Fails unless the invoker may moderate `target`.
pub async fn ensure_can_act(ctx: Context<'_>, target: &Member, action: &str) -> Result<(), Error> {
    let guild_id = require_guild(ctx)?;
    let actor = guild_id.member(ctx, ctx.author().id).await?;

    let allowed = {
        let guild = ctx.guild().ok_or(MetroError::NotInGuild)?;
        let actor = Standing {
            user_id: actor.user.id,
            top_position: top_position(&guild, &actor.roles),
        };
        let target = Standing {
            user_id: target.user.id,
            top_position: top_position(&guild, &target.roles),
        };
        can_execute_action(actor, target, guild.owner_id, &ctx.framework().options().owners)
    };

    if allowed {
        Ok(())
    } else {
        Err(MetroError::Hierarchy(format!(
            "You are not high enough in role hierarchy to {action} {}.",
            target.user.name
        ))
        .into())
    }
}

/// Fails unless the bot's top role is above `role`.
pub async fn ensure_bot_can_manage(ctx: Context<'_>, role: &Role) -> Result<(), Error> {
    let guild_id = require_guild(ctx)?;
    let bot = guild_id.member(ctx, ctx.framework().bot_id).await?;

    let bot_top = {
        let guild = ctx.guild().ok_or(MetroError::NotInGuild)?;
        top_position(&guild, &bot.roles)
    };

    if bot_outranks(bot_top, role.position) {
        Ok(())
    } else {
        Err(MetroError::Hierarchy(bot_hierarchy_message(&role.name, bot_top, role.position)).into())
    }
}
