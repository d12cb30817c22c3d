//! Informational commands about users, permissions and text.

pub mod charinfo;
pub mod permissions;
/// User and member profiles.
pub mod userinfo;
