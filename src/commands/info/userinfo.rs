use poise::{CreateReply, serenity_prelude as serenity};
use serenity::{CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, RoleId, Timestamp, User};

use crate::{CommandResult, Context, context::ContextExt, utils::text::discord_timestamp};

/// Roles listed before the field is cut off.
pub const MAX_LISTED_ROLES: usize = 29;

/// Show information about a user
///
/// Defaults to yourself.
#[poise::command(
    prefix_command,
    slash_command,
    aliases("ui", "whois"),
    category = "Info"
)]
pub async fn userinfo(
    ctx: Context<'_>,
    #[description = "The user to look up"] user: Option<User>,
) -> CommandResult {
    let user = user.unwrap_or_else(|| ctx.author().clone());

    let member = match ctx.guild_id() {
        Some(guild_id) => guild_id.member(ctx, user.id).await.ok(),
        None => None,
    };

    let mut embed = CreateEmbed::new()
        .description(format!("<@{}>", user.id))
        .author(CreateEmbedAuthor::new(user.name.clone()).icon_url(user.face()))
        .thumbnail(user.face())
        .footer(CreateEmbedFooter::new(format!("User ID: {}", user.id)))
        .timestamp(Timestamp::now());

    let joined = member
        .as_ref()
        .and_then(|m| m.joined_at)
        .map(|t| format_time(t.unix_timestamp()))
        .unwrap_or_else(|| "N/A".to_string());
    embed = embed
        .field("Joined at", joined, true)
        .field("Created at", format_time(user.created_at().unix_timestamp()), true);

    if let Some(member) = member {
        let mut roles: Vec<(u16, RoleId)> = match ctx.guild() {
            Some(guild) => member
                .roles
                .iter()
                .filter_map(|id| guild.roles.get(id).map(|role| (role.position, *id)))
                .collect(),
            None => member.roles.iter().map(|id| (0, *id)).collect(),
        };
        roles.sort_by(|a, b| b.0.cmp(&a.0));
        let ids: Vec<RoleId> = roles.into_iter().map(|(_, id)| id).collect();

        let (name, value) = roles_field(&ids);
        embed = embed.field(name, value, false);
    }

    ctx.send_redacted(CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn format_time(unix: i64) -> String {
    format!("{}\n({})", discord_timestamp(unix, 'f'), discord_timestamp(unix, 'R'))
}

/// Field listing up to [`MAX_LISTED_ROLES`] role mentions, highest first.
pub fn roles_field(roles: &[RoleId]) -> (String, String) {
    let name = format!("Roles [{}]", roles.len());
    if roles.is_empty() {
        return (name, "This member has no roles".to_string());
    }
    let value = roles
        .iter()
        .take(MAX_LISTED_ROLES)
        .map(|id| format!("<@&{id}>"))
        .collect::<Vec<_>>()
        .join(" ");
    (name, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_field_caps_mentions() {
        let roles: Vec<RoleId> = (1..=40).map(RoleId::new).collect();
        let (name, value) = roles_field(&roles);
        assert_eq!(name, "Roles [40]");
        assert_eq!(value.split(' ').count(), MAX_LISTED_ROLES);
        assert!(value.starts_with("<@&1>"));
    }

    #[test]
    fn test_roles_field_empty() {
        assert_eq!(
            roles_field(&[]),
            ("Roles [0]".to_string(), "This member has no roles".to_string())
        );
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "<t:0:f>\n(<t:0:R>)");
    }
}
