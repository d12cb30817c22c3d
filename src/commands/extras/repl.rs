use crate::{
    CommandResult, Context,
    context::ContextExt,
    error::MetroError,
    utils::coliru::{self, COLIRU_API, CodeBlock},
};

/// Output longer than this does not fit in a message once fenced.
const MAX_OUTPUT: usize = 1992;

/// Compile code through coliru
///
/// Wrap the code in a fenced block tagged with its language:
/// cpp, c, py/python or haskell.
#[poise::command(prefix_command, slash_command, aliases("coliru"), category = "Extras")]
pub async fn repl(
    ctx: Context<'_>,
    #[description = "A fenced code block"]
    #[rest]
    code: String,
) -> CommandResult {
    let block = CodeBlock::parse(&code).map_err(|why| MetroError::bad_argument(why.to_string()))?;

    ctx.defer().await?;
    let output = coliru::compile(&ctx.data().http, COLIRU_API, &block).await?;

    ctx.say_redacted(format_output(&output)).await?;
    Ok(())
}

fn format_output(output: &str) -> String {
    if output.chars().count() < MAX_OUTPUT {
        format!("```\n{output}\n```")
    } else {
        "Output was too long to display.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_output() {
        assert_eq!(format_output("hi\n"), "```\nhi\n\n```");
        assert_eq!(format_output(&"a".repeat(MAX_OUTPUT)), "Output was too long to display.");
    }
}
