//! The `role` command group.

/// Role edits: colour, hoist, name and creation.
pub mod edit;
pub mod info;
pub mod role;

use poise::serenity_prelude as serenity;
use serenity::{Colour, Role, RoleId};

use crate::{Context, error::MetroError};

/// What `role info` shows about a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSummary {
    pub id: RoleId,
    pub name: String,
    pub members: usize,
    pub position: u16,
    pub colour: Colour,
    pub hoist: bool,
    pub mentionable: bool,
    pub managed: bool,
}

impl RoleSummary {
    pub fn new(role: &Role, members: usize) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            members,
            position: role.position,
            colour: role.colour,
            hoist: role.hoist,
            mentionable: role.mentionable,
            managed: role.managed,
        }
    }

    pub fn description(&self) -> String {
        let mut lines = vec![
            format!("<@&{}>", self.id),
            format!("Members: {} | Position: {}", self.members, self.position),
            format!("Colour: #{}", self.colour.hex()),
            format!("Hoisted: {}", self.hoist),
            format!("Mentionable: {}", self.mentionable),
        ];
        if self.managed {
            lines.push("Managed: true".to_string());
        }
        lines.join("\n")
    }
}

/// Cached members holding `role`.
fn member_count(ctx: Context<'_>, role: RoleId) -> usize {
    ctx.guild()
        .map(|guild| guild.members.values().filter(|m| m.roles.contains(&role)).count())
        .unwrap_or(0)
}

/// Accepts `#rrggbb`, `0xrrggbb`, `rrggbb` and `default`.
pub fn parse_colour(raw: &str) -> Result<Colour, MetroError> {
    let raw = raw.trim().to_lowercase();
    if raw == "default" {
        return Ok(Colour::default());
    }
    let hex = raw
        .strip_prefix('#')
        .or_else(|| raw.strip_prefix("0x"))
        .unwrap_or(&raw);
    match u32::from_str_radix(hex, 16) {
        Ok(value) if hex.len() == 6 => Ok(Colour::new(value)),
        _ => Err(MetroError::bad_argument(format!(
            "Colour \"{raw}\" is invalid. Use a hex code like `#1abc9c`."
        ))),
    }
}
