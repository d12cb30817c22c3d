use std::time::{Duration, Instant};

use poise::{CreateReply, serenity_prelude as serenity};
use serenity::CreateEmbed;

use crate::{CommandResult, Context, context::ContextExt};

/// Ping the bot to check its latency
#[poise::command(prefix_command, slash_command, category = "General")]
pub async fn ping(ctx: Context<'_>) -> CommandResult {
    let websocket = get_shard_latency(ctx).await;

    let start = Instant::now();
    ctx.data().db.ping()?;
    let database = start.elapsed();

    let start = Instant::now();
    let handle = ctx.say_redacted("Pinging...").await?;
    let typing = start.elapsed();

    let embed = CreateEmbed::new()
        .title("Pong!")
        .field("Typing", format_latency(Some(typing)), true)
        .field("Database", format_latency(Some(database)), true)
        .field("Websocket", format_latency(websocket), true);

    handle
        .edit(ctx, CreateReply::default().content("").embed(embed))
        .await?;

    Ok(())
}

fn format_latency(latency: Option<Duration>) -> String {
    match latency {
        Some(latency) => format!("{:.2} ms", latency.as_secs_f64() * 1000.0),
        None => "N/A".to_string(),
    }
}

async fn get_shard_latency(ctx: Context<'_>) -> Option<Duration> {
    // Heartbeat latency is tracked by the runner of the shard this command arrived on.
    let manager = ctx.framework().shard_manager();
    let runners = manager.runners.lock().await;
    let runner = runners.get(&ctx.serenity_context().shard_id)?;

    runner.latency
}
