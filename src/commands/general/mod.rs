//! Commands about the bot itself.

/// Paginated help.
pub mod help;
/// Latency report.
pub mod ping;
/// Per-guild prefix.
pub mod prefix;
/// Application command registration.
pub mod register;
pub mod uptime;
pub mod whatcog;
