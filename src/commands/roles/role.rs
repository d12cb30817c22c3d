use poise::serenity_prelude as serenity;
use serenity::{Member, Role};
use tracing::info;

use super::{
    edit::{role_color, role_create, role_hoist, role_rename},
    info::{role_info, role_list},
};
use crate::{
    CommandResult, Context,
    context::ContextExt,
    error::MetroError,
    utils::checks::{ensure_bot_can_manage, ensure_can_act},
};

/// Base command for modifying roles
///
/// Without a subcommand this adds the role to the member,
/// or removes it if they already have it.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_ROLES",
    required_bot_permissions = "MANAGE_ROLES",
    subcommands(
        "role_add",
        "role_remove",
        "role_info",
        "role_list",
        "role_color",
        "role_hoist",
        "role_rename",
        "role_create"
    ),
    category = "Roles"
)]
pub async fn role(
    ctx: Context<'_>,
    #[description = "The member"] member: Member,
    #[description = "The role to toggle"]
    #[rest]
    role: Role,
) -> CommandResult {
    if member.roles.contains(&role.id) {
        remove(ctx, &member, &role).await
    } else {
        add(ctx, &member, &role).await
    }
}

/// Add a role to a member
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "add",
    required_permissions = "MANAGE_ROLES",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn role_add(
    ctx: Context<'_>,
    #[description = "The member"] member: Member,
    #[description = "The role to add"]
    #[rest]
    role: Role,
) -> CommandResult {
    add(ctx, &member, &role).await
}

/// Remove a role from a member
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "remove",
    required_permissions = "MANAGE_ROLES",
    required_bot_permissions = "MANAGE_ROLES"
)]
pub async fn role_remove(
    ctx: Context<'_>,
    #[description = "The member"] member: Member,
    #[description = "The role to remove"]
    #[rest]
    role: Role,
) -> CommandResult {
    remove(ctx, &member, &role).await
}

async fn add(ctx: Context<'_>, member: &Member, role: &Role) -> CommandResult {
    if member.roles.contains(&role.id) {
        return Err(MetroError::bad_argument(format!(
            "**{}** already has that role. Try removing it instead.",
            member.user.name
        ))
        .into());
    }
    ensure_can_act(ctx, member, "give roles to").await?;
    ensure_bot_can_manage(ctx, role).await?;

    member.add_role(ctx.http(), role.id).await?;
    info!(member = %member.user.id, role = %role.id, "Role added");

    ctx.say_redacted(format!("Added **{}** to **{}**", role.name, member.user.name))
        .await?;
    Ok(())
}

async fn remove(ctx: Context<'_>, member: &Member, role: &Role) -> CommandResult {
    if !member.roles.contains(&role.id) {
        return Err(MetroError::bad_argument(format!(
            "**{}** doesn't have that role. Try adding it instead.",
            member.user.name
        ))
        .into());
    }
    ensure_can_act(ctx, member, "remove roles from").await?;
    ensure_bot_can_manage(ctx, role).await?;

    member.remove_role(ctx.http(), role.id).await?;
    info!(member = %member.user.id, role = %role.id, "Role removed");

    ctx.say_redacted(format!("Removed **{}** from **{}**", role.name, member.user.name))
        .await?;
    Ok(())
}
