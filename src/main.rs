mod models;
mod commands;
mod services;
mod error;
#[cfg(test)]
mod test_utils;

use std::env;
use std::error as std_error;
use std::sync::Arc;
use commands::get_framework;
use models::config::Config;
use models::settings::Settings;
use serenity::{
    client::ClientBuilder,
    model::{gateway::GatewayIntents, id::{ChannelId, RoleId}}
};
use services::{bot_init, discord::{GuildGateway, SerenityGateway}, ranking::{BeatLeaderClient, PlayerLookup}};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

type Error = Box<dyn std_error::Error + Send + Sync>;
type BotContext<'a> = poise::Context<'a, Bot, Error>;

/// Shared state handed to every command and event.
pub struct Bot {
    pub config: Config,
    pub settings: Settings,
    pub ranking: Arc<dyn PlayerLookup>,
    pub gateway: Arc<dyn GuildGateway>,
}

impl Bot {
    pub fn new(config: Config, ranking: Arc<dyn PlayerLookup>, gateway: Arc<dyn GuildGateway>) -> Bot {
        Bot {
            config,
            settings: Settings::new(),
            ranking,
            gateway,
        }
    }

    pub fn verify_channel(&self) -> ChannelId {
        ChannelId::new(self.config.verify_channel_id)
    }

    pub fn region_role(&self) -> RoleId {
        RoleId::new(self.config.region_role_id)
    }
}

// The returned guard flushes the file writer; keep it alive for the whole run.
fn init_logger() -> Result<WorkerGuard, Error> {
    let file_appender = tracing_appender::rolling::hourly("logs", "tourney.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing::subscriber::set_global_default(
        fmt::Subscriber::builder()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_span_events(fmt::format::FmtSpan::CLOSE)
            .with_ansi(true)
            .with_max_level(tracing::Level::DEBUG)
            .finish()
            .with(fmt::Layer::default().with_writer(non_blocking))
    )?;

    const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");
    info!("Initializing tourney v{}", VERSION.unwrap_or("<unknown>"));
    info!("Reading from {}", env::current_dir()?.display());

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let _guard = match init_logger() {
        Ok(guard) => Some(guard),
        Err(ex) => {
            eprintln!("Failed to initialize logger: {ex}");
            None
        }
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(ex) => {
            error!("Failed to load configuration: {}", ex);
            return Err(ex.into());
        }
    };

    let token = config.token.clone();
    let ranking = Arc::new(BeatLeaderClient::new(&config.ranking_api_url)?);

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS;

    let framework = poise::Framework::builder()
        .options(get_framework())
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                if let Err(ex) = bot_init::register_commands(ctx, framework, config.guild_id).await {
                    error!("Failed to create slash commands: {}", ex);
                }

                let gateway = Arc::new(SerenityGateway::new(ctx.http.clone()));
                Ok(Bot::new(config, ranking, gateway))
            })
        })
        .build();

    let mut client = ClientBuilder::new(&token, intents)
        .framework(framework)
        .await?;

    if let Err(ex) = client.start().await {
        error!("Discord bot client error: {:?}", ex);
    }

    Ok(())
}
