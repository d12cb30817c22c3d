//! This module aggregates various utility submodules used throughout the application.

/// Link shortening through the Bitly API.
pub mod bitly;
/// A formula evaluator for the `calculate` command.
pub mod calc;
/// Role hierarchy checks for moderation commands.
pub mod checks;
/// Remote compilation through Coliru.
pub mod coliru;
/// Utilities for interacting with the application's SQLite database.
pub mod database;
/// Mojang and Hypixel lookups.
pub mod minecraft;
/// Text helpers for charinfo, decancer and durations.
pub mod text;
