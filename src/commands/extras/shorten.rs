use poise::{CreateReply, serenity_prelude as serenity};
use serenity::{Colour, CreateEmbed, CreateEmbedAuthor};

use crate::{
    CommandResult, Context,
    context::ContextExt,
    error::MetroError,
    utils::bitly::{self, BITLY_API},
};

/// Shorten a long url
///
/// Powered by the [Bitly API](https://dev.bitly.com/)
#[poise::command(
    prefix_command,
    slash_command,
    rename = "shorten_url",
    aliases("shorten"),
    category = "Extras"
)]
pub async fn shorten(
    ctx: Context<'_>,
    #[description = "The url to shorten"] url: String,
) -> CommandResult {
    let token = ctx
        .data()
        .config
        .bitly_token
        .as_deref()
        .ok_or(MetroError::MissingConfig("BITLY_TOKEN"))?;

    bitly::validate_url(&url).map_err(|why| MetroError::bad_argument(why.to_string()))?;

    ctx.defer().await?;
    let short = bitly::shorten(&ctx.data().http, BITLY_API, token, &url).await?;

    let embed = CreateEmbed::new()
        .colour(Colour::ORANGE)
        .author(CreateEmbedAuthor::new("URL Shortener"))
        .description(format!("Your shortened url: {short}\nOriginal url: {url}"));

    ctx.send_redacted(CreateReply::default().embed(embed)).await?;
    Ok(())
}
