use tracing::info;

use crate::{
    CommandResult, Context,
    context::ContextExt,
    error::MetroError,
    utils::checks::require_guild,
};

pub const MAX_PREFIX_LEN: usize = 10;

/// Set the prefix for this server
///
/// The default prefix keeps working alongside the one set here.
/// Needs the Manage Server permission.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "General"
)]
pub async fn prefix(
    ctx: Context<'_>,
    #[description = "The new prefix"] prefix: String,
) -> CommandResult {
    let guild_id = require_guild(ctx)?;
    let prefix = validate_prefix(&prefix)?;

    ctx.data().db.set_guild_prefix(guild_id, &prefix)?;
    info!(%guild_id, %prefix, "Guild prefix updated");

    let guild_name = ctx
        .guild()
        .map(|guild| guild.name.clone())
        .unwrap_or_else(|| "this server".to_string());
    ctx.say_redacted(format!("Set the prefix for **{guild_name}** to `{prefix}`"))
        .await?;
    Ok(())
}

pub fn validate_prefix(prefix: &str) -> Result<String, MetroError> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Err(MetroError::bad_argument("Prefixes cannot be empty."));
    }
    if prefix.chars().count() > MAX_PREFIX_LEN {
        return Err(MetroError::bad_argument(format!(
            "Prefixes must be shorter than {MAX_PREFIX_LEN} characters."
        )));
    }
    Ok(prefix.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_validate_prefix() {
        assert_eq!(validate_prefix(" ?? ").unwrap(), "??");
        assert_eq!(validate_prefix("abcdefghij").unwrap(), "abcdefghij");
        assert_matches!(validate_prefix("abcdefghijk"), Err(MetroError::BadArgument(_)));
        assert_matches!(validate_prefix("   "), Err(MetroError::BadArgument(_)));
    }
}
