use crate::{
    CommandResult, Context, commands::general::help::find_command, context::ContextExt,
    error::MetroError,
};

/// Show what category a command belongs to
#[poise::command(prefix_command, slash_command, category = "General")]
pub async fn whatcog(
    ctx: Context<'_>,
    #[description = "The command to look up"]
    #[rest]
    command: String,
) -> CommandResult {
    let (path, found) = find_command(&ctx.framework().options().commands, &command)
        .ok_or_else(|| MetroError::bad_argument(format!("No command called \"{command}\" found.")))?;

    let category = found.category.as_deref().unwrap_or("No Category");
    ctx.say_redacted(format!("`{path}` is in the **{category}** category."))
        .await?;
    Ok(())
}
