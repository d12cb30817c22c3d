use poise::{CreateReply, serenity_prelude as serenity};
use serenity::{CreateEmbed, CreateEmbedFooter};
use thousands::Separable;

use crate::{
    CommandResult, Context,
    context::ContextExt,
    utils::minecraft::{self, HYPIXEL_API, QuickStatus},
};

/// Get data about an item in the skyblock bazaar
///
/// Powered by the Hypixel API. Capitalization and underscores may be omitted,
/// so `enchanted diamond` finds `ENCHANTED_DIAMOND`.
#[poise::command(prefix_command, slash_command, aliases("bz", "bazzar"), category = "Minecraft")]
pub async fn bazaar(
    ctx: Context<'_>,
    #[description = "The item to look up"]
    #[rest]
    item: String,
) -> CommandResult {
    ctx.defer().await?;
    let status = minecraft::bazaar_item(&ctx.data().http, HYPIXEL_API, &item)
        .await
        .map_err(super::user_facing)?;

    let (sell, buy) = market_fields(&status);
    let embed = CreateEmbed::new()
        .title(status.product_id.clone())
        .field("Sell Stats", sell, false)
        .field("Buy Stats", buy, false)
        .footer(CreateEmbedFooter::new("Powered by Hypixel API."));

    ctx.send_redacted(CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn price(value: f64) -> String {
    ((value * 10.0).round() / 10.0).separate_with_commas()
}

/// Sell and buy summaries.
fn market_fields(status: &QuickStatus) -> (String, String) {
    let sell = format!(
        "Sell Price: `{}`\nSell Volume: `{}`\nSell Orders: `{}`\nSell Moving Weekly: `{}`",
        price(status.sell_price),
        status.sell_volume.separate_with_commas(),
        status.sell_orders,
        status.sell_moving_week.separate_with_commas(),
    );
    let buy = format!(
        "Buy Price: `{}`\nBuy Volume: `{}`\nBuy Orders: `{}`\nBuy Moving Weekly: `{}`",
        price(status.buy_price),
        status.buy_volume.separate_with_commas(),
        status.buy_orders,
        status.buy_moving_week.separate_with_commas(),
    );
    (sell, buy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_market_fields() {
        let status = QuickStatus {
            product_id: "ENCHANTED_DIAMOND".into(),
            sell_price: 1234.56,
            sell_volume: 1_000_000,
            sell_orders: 12,
            sell_moving_week: 5_000,
            buy_price: 1300.0,
            buy_volume: 42,
            buy_orders: 3,
            buy_moving_week: 70_000,
        };
        let (sell, buy) = market_fields(&status);
        assert_eq!(
            sell,
            "Sell Price: `1,234.6`\nSell Volume: `1,000,000`\nSell Orders: `12`\nSell Moving Weekly: `5,000`"
        );
        assert!(buy.starts_with("Buy Price: `1,300`"));
    }
}
