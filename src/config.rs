//! Runtime configuration read from the environment (optionally seeded from `.env`).

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use poise::serenity_prelude as serenity;
use serenity::{ChannelId, GuildId, RoleId, UserId};
use thiserror::Error;

pub const DEFAULT_PREFIX: &str = "m.";
pub const DEFAULT_DATABASE: &str = "metro.db";

const SUPPORT_KEYS: [&str; 6] = [
    "SUPPORT_GUILD_ID",
    "SUPPORT_UPDATES_ROLE_ID",
    "SUPPORT_ANNOUNCEMENTS_ROLE_ID",
    "SUPPORT_TESTER_ROLE_ID",
    "SUPPORT_UNVERIFIED_ROLE_ID",
    "SUPPORT_BOT_REQUESTS_CHANNEL_ID",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable '{0}'")]
    Missing(&'static str),

    #[error("Environment variable '{key}' is not a valid id: '{value}'")]
    Malformed { key: &'static str, value: String },

    #[error("Support server configuration is incomplete, '{0}' is not set")]
    IncompleteSupport(&'static str),
}

/// Ids of the bot's own support server. Present only when every id is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportConfig {
    pub guild_id: GuildId,
    pub updates_role: RoleId,
    pub announcements_role: RoleId,
    pub tester_role: RoleId,
    pub unverified_role: RoleId,
    pub bot_requests_channel: ChannelId,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub prefix: String,
    pub owners: HashSet<UserId>,
    pub database: PathBuf,
    pub bitly_token: Option<String>,
    pub support: Option<SupportConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let token = get("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        let owners = match get("METRO_OWNER_IDS") {
            Some(raw) => parse_ids("METRO_OWNER_IDS", &raw)?
                .into_iter()
                .map(UserId::new)
                .collect(),
            None => HashSet::new(),
        };

        let support_values: Vec<Option<String>> = SUPPORT_KEYS.into_iter().map(|key| get(key)).collect();
        let support = if support_values.iter().all(Option::is_none) {
            None
        } else {
            let mut ids = Vec::with_capacity(SUPPORT_KEYS.len());
            for (key, value) in SUPPORT_KEYS.into_iter().zip(support_values) {
                let value = value.ok_or(ConfigError::IncompleteSupport(key))?;
                ids.push(parse_id(key, &value)?);
            }
            Some(SupportConfig {
                guild_id: GuildId::new(ids[0]),
                updates_role: RoleId::new(ids[1]),
                announcements_role: RoleId::new(ids[2]),
                tester_role: RoleId::new(ids[3]),
                unverified_role: RoleId::new(ids[4]),
                bot_requests_channel: ChannelId::new(ids[5]),
            })
        };

        Ok(Self {
            token,
            prefix: get("METRO_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            owners,
            database: get("METRO_DATABASE")
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
                .into(),
            bitly_token: get("BITLY_TOKEN"),
            support,
        })
    }
}

fn parse_id(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| ConfigError::Malformed {
            key,
            value: value.to_string(),
        })
}

fn parse_ids(key: &'static str, value: &str) -> Result<Vec<u64>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_id(key, part))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DISCORD_TOKEN", "abc")])).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.prefix, DEFAULT_PREFIX);
        assert_eq!(config.database, PathBuf::from(DEFAULT_DATABASE));
        assert!(config.owners.is_empty());
        assert!(config.bitly_token.is_none());
        assert!(config.support.is_none());
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(
            Config::from_lookup(lookup(&[("METRO_PREFIX", "!")])).unwrap_err(),
            ConfigError::Missing("DISCORD_TOKEN")
        );
    }

    #[test]
    fn test_owner_ids() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "abc"),
            ("METRO_OWNER_IDS", "10, 20,"),
        ]))
        .unwrap();
        assert_eq!(config.owners, HashSet::from([UserId::new(10), UserId::new(20)]));

        let malformed = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "abc"),
            ("METRO_OWNER_IDS", "10,me"),
        ]));
        assert_matches!(malformed, Err(ConfigError::Malformed { key: "METRO_OWNER_IDS", .. }));
    }

    #[test]
    fn test_support_requires_every_id() {
        let partial = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "abc"),
            ("SUPPORT_GUILD_ID", "1"),
        ]));
        assert_matches!(partial, Err(ConfigError::IncompleteSupport("SUPPORT_UPDATES_ROLE_ID")));

        let full = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "abc"),
            ("SUPPORT_GUILD_ID", "1"),
            ("SUPPORT_UPDATES_ROLE_ID", "2"),
            ("SUPPORT_ANNOUNCEMENTS_ROLE_ID", "3"),
            ("SUPPORT_TESTER_ROLE_ID", "4"),
            ("SUPPORT_UNVERIFIED_ROLE_ID", "5"),
            ("SUPPORT_BOT_REQUESTS_CHANNEL_ID", "6"),
        ]))
        .unwrap();
        let support = full.support.unwrap();
        assert_eq!(support.guild_id, GuildId::new(1));
        assert_eq!(support.bot_requests_channel, ChannelId::new(6));
    }
}
