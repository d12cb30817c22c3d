use poise::{CreateReply, serenity_prelude as serenity};
use serenity::{EditRole, Role};

use super::{RoleSummary, info::info_embed, member_count, parse_colour};
use crate::{
    CommandResult, Context,
    context::ContextExt,
    error::MetroError,
    utils::checks::{ensure_bot_can_manage, require_guild},
};

/// Most roles a server may have.
pub const MAX_ROLES: usize = 250;

fn reason(ctx: Context<'_>, action: &str) -> String {
    format!("Role {action} command invoked by: {} (ID: {})", ctx.author().name, ctx.author().id)
}

async fn reply_with_info(ctx: Context<'_>, content: String, role: &Role) -> CommandResult {
    let summary = RoleSummary::new(role, member_count(ctx, role.id));
    ctx.send_redacted(
        CreateReply::default()
            .content(content)
            .embed(info_embed(&summary, role)),
    )
    .await?;
    Ok(())
}

/// Change a role's colour
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "color",
    aliases("colour"),
    required_permissions = "MANAGE_ROLES",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn role_color(
    ctx: Context<'_>,
    #[description = "The role"] role: Role,
    #[description = "Hex colour like #1abc9c"] colour: String,
) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    ensure_bot_can_manage(ctx, &role).await?;
    let colour = parse_colour(&colour)?;

    let role = guild_id
        .edit_role(
            ctx,
            role.id,
            EditRole::new().colour(colour).audit_log_reason(&reason(ctx, "color")),
        )
        .await?;

    let content = format!("Changed **{}**'s color to **#{}**", role.name, colour.hex());
    reply_with_info(ctx, content, &role).await
}

/// Toggle whether a role is shown separately
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "hoist",
    required_permissions = "MANAGE_ROLES",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn role_hoist(
    ctx: Context<'_>,
    #[description = "The role"] role: Role,
    #[description = "Hoist or not, toggles when omitted"] hoisted: Option<bool>,
) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    ensure_bot_can_manage(ctx, &role).await?;

    let hoisted = hoisted.unwrap_or(!role.hoist);
    guild_id
        .edit_role(
            ctx,
            role.id,
            EditRole::new().hoist(hoisted).audit_log_reason(&reason(ctx, "hoist")),
        )
        .await?;

    let term = if hoisted { "now" } else { "no longer" };
    ctx.say_redacted(format!("**{}** is {term} hoisted.", role.name)).await?;
    Ok(())
}

/// Rename a role
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "rename",
    aliases("name"),
    required_permissions = "MANAGE_ROLES",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn role_rename(
    ctx: Context<'_>,
    #[description = "The role"] role: Role,
    #[description = "The new name"]
    #[rest]
    name: String,
) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    ensure_bot_can_manage(ctx, &role).await?;

    let old = role.name.clone();
    let role = guild_id
        .edit_role(
            ctx,
            role.id,
            EditRole::new().name(name.trim()).audit_log_reason(&reason(ctx, "rename")),
        )
        .await?;

    let content = format!("Renamed from **{old}** to **{}**.", role.name);
    reply_with_info(ctx, content, &role).await
}

/// Create a new role
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "create",
    required_permissions = "MANAGE_ROLES",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn role_create(
    ctx: Context<'_>,
    #[description = "Name of the role, quote it if it has spaces"] name: String,
    #[description = "Hex colour like #1abc9c"] colour: Option<String>,
    #[description = "Show the role separately"] hoist: Option<bool>,
) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    let count = ctx.guild().map(|guild| guild.roles.len()).unwrap_or_default();
    if count >= MAX_ROLES {
        return Err(MetroError::bad_argument(format!(
            "This server has reached the maximum role limit: [{MAX_ROLES}/{MAX_ROLES}]"
        ))
        .into());
    }

    let colour = match colour {
        Some(colour) => parse_colour(&colour)?,
        None => Default::default(),
    };
    let role = guild_id
        .create_role(
            ctx,
            EditRole::new()
                .name(name)
                .colour(colour)
                .hoist(hoist.unwrap_or(false))
                .audit_log_reason(&reason(ctx, "create")),
        )
        .await?;

    let content = format!("**{}** created.", role.name);
    reply_with_info(ctx, content, &role).await
}
