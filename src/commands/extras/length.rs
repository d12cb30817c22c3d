use crate::{CommandResult, Context, context::ContextExt};

/// Get the length of a string
#[poise::command(prefix_command, slash_command, category = "Extras")]
pub async fn length(
    ctx: Context<'_>,
    #[description = "The text to measure"]
    #[rest]
    text: String,
) -> CommandResult {
    ctx.say_redacted(length_message(&text)).await?;
    Ok(())
}

fn length_message(text: &str) -> String {
    format!("That string is `{}` characters long.", text.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(length_message("héllo"), "That string is `5` characters long.");
    }
}
