use std::time::Instant;

use poise::{CreateReply, serenity_prelude as serenity};
use serenity::{CreateEmbed, CreateEmbedFooter};

use crate::{
    CommandResult, Context,
    context::ContextExt,
    error::MetroError,
    utils::calc::{evaluate, format_answer},
};

/// Calculate an equation
///
/// **Keys:**
///     exponentiation: `^`
///     multiplication: `x` | `*`
///     division: `/`
///     addition: `+` | `-`
///     suffixes: `k` (thousand) | `m` (million)
///     constants: `PI` | `E`
///
/// **Functions:**
///     sqrt, log, sin, cos, tan, arcsin, arccos,
///     arctan, sinh, cosh, tanh, arcsinh, arccosh,
///     arctanh, abs, trunc, round, sgn
#[poise::command(prefix_command, slash_command, aliases("calc"), category = "Extras")]
pub async fn calculate(
    ctx: Context<'_>,
    #[description = "The formula to evaluate"]
    #[rest]
    formula: String,
) -> CommandResult {
    let start = Instant::now();
    let answer = evaluate(&formula).map_err(|why| MetroError::bad_argument(why.to_string()))?;
    let elapsed = start.elapsed();

    ctx.tick().await;

    let embed = CreateEmbed::new()
        .description(format!(
            "Input: `{}`\nOutput: `{}`",
            formula.trim(),
            format_answer(answer)
        ))
        .footer(CreateEmbedFooter::new(format!(
            "Calculated in {:.1}ms",
            elapsed.as_secs_f64() * 1000.0
        )));

    ctx.send_redacted(CreateReply::default().embed(embed)).await?;
    Ok(())
}
