use poise::{CreateReply, serenity_prelude as serenity};
use serenity::CreateEmbed;

use crate::{
    CommandResult, Context,
    context::ContextExt,
    utils::minecraft::{self, MOJANG_API},
};

/// Get the UUID and avatar of a minecraft username
#[poise::command(
    prefix_command,
    slash_command,
    rename = "mc_uuid",
    aliases("uuid"),
    category = "Minecraft"
)]
pub async fn uuid(
    ctx: Context<'_>,
    #[description = "Minecraft username"] username: String,
) -> CommandResult {
    let profile = minecraft::profile(&ctx.data().http, MOJANG_API, &username)
        .await
        .map_err(super::user_facing)?;

    let embed = CreateEmbed::new()
        .field(
            format!("Username: {}", profile.name),
            format!("**UUID:** `{}`", profile.id),
            false,
        )
        .image(profile.avatar_url());

    ctx.send_redacted(CreateReply::default().embed(embed)).await?;
    Ok(())
}
