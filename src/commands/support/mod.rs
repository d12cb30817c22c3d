//! Commands and persistent buttons of the bot's own support server.

pub mod addbot;
/// The self-role and verification panels.
pub mod panels;

use crate::{Context, Error, config::SupportConfig, error::MetroError};

fn support_config(ctx: Context<'_>) -> Result<SupportConfig, MetroError> {
    ctx.data()
        .config
        .support
        .ok_or(MetroError::MissingConfig("SUPPORT_GUILD_ID"))
}

/// Passes only inside the configured support server.
pub async fn in_support(ctx: Context<'_>) -> Result<bool, Error> {
    let support = support_config(ctx)?;
    Ok(ctx.guild_id() == Some(support.guild_id))
}
