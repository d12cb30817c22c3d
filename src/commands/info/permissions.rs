use poise::{CreateReply, serenity_prelude as serenity};
use serenity::{CreateEmbed, CreateEmbedAuthor, GuildChannel, Member, Permissions};

use crate::{CommandResult, Context, context::ContextExt, error::MetroError};

/// Show a member's permissions in a channel
///
/// Defaults to your own permissions in the current channel.
#[poise::command(prefix_command, slash_command, guild_only, category = "Info")]
pub async fn permissions(
    ctx: Context<'_>,
    #[description = "The member to inspect"] member: Option<Member>,
    #[description = "The channel to check in"] channel: Option<GuildChannel>,
) -> CommandResult {
    let member = match member {
        Some(member) => member,
        None => ctx.author_member().await.ok_or(MetroError::NotInGuild)?.into_owned(),
    };

    let permissions = {
        let guild = ctx.guild().ok_or(MetroError::NotInGuild)?;
        let channel = match &channel {
            Some(channel) => Some(channel),
            None => guild.channels.get(&ctx.channel_id()),
        };
        match channel {
            Some(channel) => guild.user_permissions_in(channel, &member),
            None => guild.member_permissions(&member),
        }
    };

    let (allowed, denied) = split_permissions(permissions);
    let embed = CreateEmbed::new()
        .author(CreateEmbedAuthor::new(member.user.name.clone()).icon_url(member.face()))
        .field("Allowed", list_or_none(&allowed), true)
        .field("Denied", list_or_none(&denied), true);

    ctx.send_redacted(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Names of the granted and the missing permissions.
pub fn split_permissions(permissions: Permissions) -> (Vec<&'static str>, Vec<&'static str>) {
    (
        permissions.get_permission_names(),
        Permissions::all().difference(permissions).get_permission_names(),
    )
}

fn list_or_none(names: &[&str]) -> String {
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join("\n")
    }
}
