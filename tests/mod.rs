//! Integration tests for the metro bot.
//! View sessions are driven end to end through a scripted transport.

pub mod common;
pub mod views;
