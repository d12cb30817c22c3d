//! Small utilities: text length, a calculator, polls, link shortening and a remote repl.

/// Evaluate a formula.
pub mod calculate;
pub mod length;
pub mod poll;
/// Compile code through Coliru.
pub mod repl;
/// Shorten links through Bitly.
pub mod shorten;
