use poise::serenity_prelude as serenity;
use serenity::{CreateAllowedMentions, CreateMessage, ReactionType};
use tracing::debug;

use crate::{CommandResult, Context};

const UPVOTE: char = '👍';
const DOWNVOTE: char = '👎';

/// Simple yes/no poll with reactions
#[poise::command(prefix_command, slash_command, guild_only, category = "Extras")]
pub async fn poll(
    ctx: Context<'_>,
    #[description = "The question to ask"]
    #[rest]
    question: String,
) -> CommandResult {
    if let poise::Context::Prefix(prefix) = ctx {
        if let Err(why) = prefix.msg.delete(ctx).await {
            debug!("Could not delete poll invocation: {why}");
        }
    }

    let content = poll_message(&ctx.author().name, &question);
    let message = match ctx {
        poise::Context::Prefix(_) => {
            ctx.channel_id()
                .send_message(
                    ctx,
                    CreateMessage::new()
                        .content(content)
                        .allowed_mentions(CreateAllowedMentions::new()),
                )
                .await?
        }
        poise::Context::Application(_) => {
            ctx.say(content).await?.into_message().await?
        }
    };

    message.react(ctx, ReactionType::from(UPVOTE)).await?;
    message.react(ctx, ReactionType::from(DOWNVOTE)).await?;

    Ok(())
}

fn poll_message(author: &str, question: &str) -> String {
    let quoted = question
        .trim()
        .lines()
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("**{author}** is asking a question: \n{quoted}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_message_quotes_every_line() {
        assert_eq!(
            poll_message("kal", "pizza?\nor pasta?"),
            "**kal** is asking a question: \n> pizza?\n> or pasta?"
        );
    }
}
