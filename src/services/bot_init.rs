use serenity::{
    client::Context,
    model::{
        gateway::Ready,
        id::GuildId
    }
};
use tracing::info;
use crate::{Bot, Error};

pub async fn ready(_ctx: &Context, ready: &Ready) {
    info!("Logged in as {} ({} guilds)", ready.user.name, ready.guilds.len());
}

// Guild registration shows up immediately; global registration can take a while to propagate.
pub async fn register_commands(ctx: &Context, framework: &poise::Framework<Bot, Error>, guild_id: Option<u64>) -> Result<(), Error> {
    let commands = &framework.options().commands;

    match guild_id {
        Some(guild_id) => {
            poise::builtins::register_in_guild(ctx, commands, GuildId::new(guild_id)).await?;
            info!("Registered {} commands in guild {}", commands.len(), guild_id);
        }
        None => {
            poise::builtins::register_globally(ctx, commands).await?;
            info!("Registered {} commands globally", commands.len());
        }
    }

    Ok(())
}
