//! User-facing command errors and the framework error hook.

use poise::{CreateReply, FrameworkError, serenity_prelude as serenity};
use serenity::CreateAllowedMentions;
use thiserror::Error;
use tracing::{debug, error};

use crate::{Data, Error, context::ContextExt};

/// Errors a command raises on purpose. Their message is shown to the invoker as is.
#[derive(Error, Debug)]
pub enum MetroError {
    #[error("{0}")]
    BadArgument(String),

    #[error("This command can only be used in a server.")]
    NotInGuild,

    /// The invoker or the bot is not allowed to act on the target.
    #[error("{0}")]
    Hierarchy(String),

    #[error("This command is not configured on this bot (missing `{0}`).")]
    MissingConfig(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl MetroError {
    pub fn bad_argument(message: impl Into<String>) -> Self {
        MetroError::BadArgument(message.into())
    }

    /// Whether the error was caused by the invocation rather than by the bot.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, MetroError::Database(_))
    }
}

/// Framework error hook. Command errors are reported back to the invoker, everything else
/// goes through poise's default handling.
pub async fn on_error(error: FrameworkError<'_, Data, Error>) {
    match error {
        FrameworkError::Command { error, ctx, .. } => {
            let user_error = error
                .downcast_ref::<MetroError>()
                .is_some_and(MetroError::is_user_error);
            if user_error {
                debug!(command = %ctx.command().qualified_name, "{error}");
            } else {
                error!(command = %ctx.command().qualified_name, "Command failed: {error}");
            }

            let mentions = CreateAllowedMentions::new()
                .everyone(false)
                .all_roles(false)
                .all_users(false);
            let reply = CreateReply::default()
                .content(error.to_string())
                .allowed_mentions(mentions)
                .ephemeral(true);
            if let Err(why) = ctx.send_redacted(reply).await {
                error!("Failed to report command error: {why}");
            }
        }
        other => {
            if let Err(why) = poise::builtins::on_error(other).await {
                error!("Error while handling framework error: {why}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors() {
        assert!(MetroError::bad_argument("nope").is_user_error());
        assert!(MetroError::NotInGuild.is_user_error());
        assert!(!MetroError::Database(rusqlite::Error::QueryReturnedNoRows).is_user_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(MetroError::bad_argument("Invalid prefix").to_string(), "Invalid prefix");
        assert_eq!(
            MetroError::MissingConfig("BITLY_TOKEN").to_string(),
            "This command is not configured on this bot (missing `BITLY_TOKEN`)."
        );
    }
}
