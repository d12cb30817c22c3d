//! This module aggregates all the command modules for the bot.

use crate::{Data, Error};

/// Extra utilities (e.g., calculate, shorten, repl).
pub mod extras;
/// General purpose commands (e.g., ping, help).
pub mod general;
/// Commands showing information about users and text.
pub mod info;
/// Mojang and Hypixel lookups.
pub mod minecraft;
/// Moderator notes persisted in the database.
pub mod notes;
/// The `role` group.
pub mod roles;
/// Server management (e.g., purge, lockdown).
pub mod server;
/// Support server only commands.
pub mod support;

/// Every top level command, subcommands are reached through their group.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        // General
        general::help::help(),
        general::ping::ping(),
        general::prefix::prefix(),
        general::register::register(),
        general::uptime::uptime(),
        general::whatcog::whatcog(),
        // Info
        info::charinfo::charinfo(),
        info::permissions::permissions(),
        info::userinfo::userinfo(),
        // Extras
        extras::calculate::calculate(),
        extras::length::length(),
        extras::poll::poll(),
        extras::repl::repl(),
        extras::shorten::shorten(),
        // Minecraft
        minecraft::bazaar::bazaar(),
        minecraft::uuid::uuid(),
        // Server
        server::decancer::decancer(),
        server::lockdown::lockdown(),
        server::lockdown::unlockdown(),
        server::nickname::nickname(),
        server::nuke::nuke(),
        server::purge::purge(),
        // Roles
        roles::role::role(),
        // Notes
        notes::note::note(),
        notes::notes::notes(),
        // Support
        support::addbot::addbot(),
        support::panels::support_roles(),
    ]
}
