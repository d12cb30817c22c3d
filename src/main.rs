use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use serenity::ClientBuilder;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use metro::{
    Data, Error, commands,
    config::Config,
    error::on_error,
    events::Handler,
    utils::database::Database,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize logging with debug level for our crate
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("metro=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    dotenv().ok();

    let config = Config::from_env()?;
    let db = Database::open(&config.database)?;
    info!(path = %config.database.display(), "Database ready");

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let token = config.token.clone();
    let handler = Handler {
        support: config.support,
    };

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            owners: config.owners.clone(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.prefix.clone()),
                dynamic_prefix: Some(|ctx| {
                    Box::pin(async move {
                        let Some(guild_id) = ctx.guild_id else {
                            return Ok(None);
                        };
                        Ok(ctx.data.db.guild_prefix(guild_id)?)
                    })
                }),
                mention_as_prefix: true,
                case_insensitive_commands: true,
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} commands as {}", framework.options().commands.len(), ready.user.name);
                Ok(Data::new(config, db))
            })
        });

    let mut client = ClientBuilder::new(token, intents)
        .framework(framework.build())
        .event_handler(handler)
        .await?;

    client.start().await.map_err(Into::into)
}
