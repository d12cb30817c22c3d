use poise::{CreateReply, serenity_prelude as serenity};
use serenity::{
    CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, CreateMessage, GuildId, ReactionType, Timestamp,
    User, UserId,
};
use tracing::info;

use super::{in_support, support_config};
use crate::{
    CommandResult, Context,
    context::{ConfirmOptions, ContextExt},
    error::MetroError,
};

pub const TERMS: &str = "This server's moderators have the right to kick or reject your bot for any reason.\
\nYou also agree that your bot does not have the following prefixes: `?`,`!`\
\nYour bot cannot have an avatar that might be considered NSFW, ping users when they join, \
post NSFW messages in not NSFW marked channels.\
\nRules that may apply to users should also be applied to bots.\
\n\nHit the **Confirm** button below to submit your request and agree to these terms.";

/// Request to add your bot to the server
///
/// You need your bot's user ID and a reason.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    check = "in_support",
    category = "Support"
)]
pub async fn addbot(
    ctx: Context<'_>,
    #[description = "Your bot"] bot: User,
    #[description = "Why it should be added"]
    #[rest]
    reason: String,
) -> CommandResult {
    let support = support_config(ctx)?;
    if !bot.bot {
        return Err(MetroError::bad_argument("That is not a bot.").into());
    }

    match ctx.confirm(TERMS, ConfirmOptions::default()).await? {
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

    let embed = CreateEmbed::new()
        .title("Bot Request")
        .description(request_description(&reason, bot.id, support.guild_id))
        .field(
            "Author",
            format!("{} (ID: {})", ctx.author().name, ctx.author().id),
            false,
        )
        .field("Bot", format!("{} (ID: {})", bot.name, bot.id), false)
        .author(CreateEmbedAuthor::new(bot.id.to_string()).icon_url(bot.face()))
        .footer(CreateEmbedFooter::new(ctx.author().id.to_string()))
        .timestamp(Timestamp::now());

    let request = match support
        .bot_requests_channel
        .send_message(ctx, CreateMessage::new().embed(embed))
        .await
    {
        Ok(message) => message,
        Err(why) => {
            ctx.say_redacted(format!("Failed to add your bot.\n{why}")).await?;
            return Ok(());
        }
    };
    request.react(ctx, ReactionType::from('✅')).await?;
    request.react(ctx, ReactionType::from('❌')).await?;
    info!(bot = %bot.id, author = %ctx.author().id, "Bot request submitted");

    ctx.send_redacted(CreateReply::default().content(
        "Your bot request has been submitted to the moderators. I will DM you about the status of your request.",
    ))
    .await?;
    Ok(())
}

fn request_description(reason: &str, bot: UserId, guild: GuildId) -> String {
    format!(
        "{reason}\n\n[Invite URL](https://discord.com/oauth2/authorize?client_id={bot}&scope=bot&guild_id={guild})"
    )
}
