use poise::{CreateReply, serenity_prelude as serenity};
use serenity::{CreateEmbed, CreateEmbedAuthor, EditMember, Member};

use crate::{
    CommandResult, Context,
    context::ContextExt,
    utils::checks::{ensure_can_act, require_guild},
};

/// Change a member's nickname
///
/// Passing no member changes my nickname.
/// Passing no nickname removes the current one.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    aliases("nick"),
    required_permissions = "MANAGE_NICKNAMES",
    required_bot_permissions = "MANAGE_NICKNAMES",
    category = "Server"
)]
pub async fn nickname(
    ctx: Context<'_>,
    #[description = "Whose nickname to change, defaults to mine"] member: Option<Member>,
    #[description = "The new nickname"]
    #[rest]
    nickname: Option<String>,
) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    let bot_id = ctx.framework().bot_id;
    let member = match member {
        Some(member) => member,
        None => guild_id.member(ctx, bot_id).await?,
    };
    let is_self = member.user.id == bot_id;
    if !is_self && member.user.id != ctx.author().id {
        ensure_can_act(ctx, &member, "change the nickname of").await?;
    }

    let nickname = nickname.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    let reason = format!("Nickname command invoked by: {} (ID: {})", ctx.author().name, ctx.author().id);
    let member = guild_id
        .edit_member(
            ctx,
            member.user.id,
            EditMember::new()
                .nickname(nickname.clone().unwrap_or_default())
                .audit_log_reason(&reason),
        )
        .await?;

    let embed = CreateEmbed::new()
        .author(CreateEmbedAuthor::new(member.user.name.clone()).icon_url(member.face()))
        .description(nickname_message(is_self, member.user.id.get(), nickname.as_deref()));
    ctx.send_redacted(CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn nickname_message(is_self: bool, user_id: u64, nickname: Option<&str>) -> String {
    let whose = if is_self {
        "my".to_string()
    } else {
        format!("<@{user_id}>'s")
    };
    match nickname {
        Some(nickname) => format!("Changed {whose} nickname to **{nickname}**."),
        None => format!("Reset {whose} nickname."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nickname_message() {
        assert_eq!(nickname_message(true, 1, Some("Metro")), "Changed my nickname to **Metro**.");
        assert_eq!(nickname_message(false, 42, None), "Reset <@42>'s nickname.");
    }
}
