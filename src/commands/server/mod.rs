//! Server management: purging, lockdowns, nukes and nicknames.

pub mod decancer;
/// Channel lockdowns.
pub mod lockdown;
pub mod nickname;
pub mod nuke;
pub mod purge;

use poise::serenity_prelude as serenity;
use serenity::GuildChannel;

use crate::{Context, Error, error::MetroError};

/// The given channel, or the one the command was used in.
async fn target_channel(ctx: Context<'_>, channel: Option<GuildChannel>) -> Result<GuildChannel, Error> {
    if let Some(channel) = channel {
        return Ok(channel);
    }
    ctx.channel_id()
        .to_channel(ctx)
        .await?
        .guild()
        .ok_or_else(|| MetroError::NotInGuild.into())
}
