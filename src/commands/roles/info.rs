use poise::{CreateReply, serenity_prelude as serenity};
use serenity::{CreateEmbed, CreateEmbedFooter, Role};

use super::{RoleSummary, member_count};
use crate::{CommandResult, Context, context::ContextExt, error::MetroError};

const ROLES_PER_PAGE: usize = 15;

/// The role info embed.
pub fn info_embed(summary: &RoleSummary, role: &Role) -> CreateEmbed {
    CreateEmbed::new()
        .title(summary.name.clone())
        .colour(summary.colour)
        .description(summary.description())
        .timestamp(role.id.created_at())
        .footer(CreateEmbedFooter::new(format!("ID: {}", summary.id)))
}

/// Show a role's information
#[poise::command(prefix_command, slash_command, guild_only, rename = "info")]
pub async fn role_info(
    ctx: Context<'_>,
    #[description = "The role"]
    #[rest]
    role: Role,
) -> CommandResult {
    let summary = RoleSummary::new(&role, member_count(ctx, role.id));
    ctx.send_redacted(CreateReply::default().embed(info_embed(&summary, &role)))
        .await?;
    Ok(())
}

/// List all the roles of this server
#[poise::command(prefix_command, slash_command, guild_only, rename = "list")]
pub async fn role_list(ctx: Context<'_>) -> CommandResult {
    let mut roles: Vec<(u16, String)> = {
        let guild = ctx.guild().ok_or(MetroError::NotInGuild)?;
        guild
            .roles
            .values()
            .map(|role| (role.position, format!("<@&{}> - {}", role.id, role.id)))
            .collect()
    };
    roles.sort_by(|a, b| b.0.cmp(&a.0));

    let lines: Vec<String> = roles.into_iter().map(|(_, line)| line).collect();
    ctx.paginate(lines, ROLES_PER_PAGE).await?;
    Ok(())
}
