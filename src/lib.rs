//! Metro: a general purpose Discord bot built on poise.
//!
//! The interactive [`views`] and the [`context`] helpers are the core every command module
//! builds on. [`commands::all`] lists every registered command.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use serenity::ChannelId;

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod utils;
pub mod views;

use config::Config;
use utils::database::Database;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// State shared by every command invocation.
pub struct Data {
    pub config: Config,
    pub db: Database,
    pub http: reqwest::Client,
    pub started: DateTime<Utc>,
    /// `@everyone` send permission of each locked channel before the lockdown:
    /// `Some(true)` allowed, `Some(false)` denied, `None` inherited.
    pub lockdowns: DashMap<ChannelId, Option<bool>>,
}

impl Data {
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            config,
            db,
            http: reqwest::Client::new(),
            started: Utc::now(),
            lockdowns: DashMap::new(),
        }
    }
}
