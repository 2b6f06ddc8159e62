use serenity::model::channel::GuildChannel;
use serenity::model::guild::Role;
use serenity::model::id::{ChannelId, RoleId};
use tracing::{info, warn};
use crate::{Bot, BotContext, Error};
use crate::error::BotError;
use crate::models::settings::Destinations;
use crate::services::discord::ContextResponder;
use crate::services::reporting::{publish, Report, Responder};
use super::explain;

/// Set up the tournament verification bot
#[poise::command(slash_command, guild_only, default_member_permissions = "ADMINISTRATOR")]
pub async fn setup(
    ctx: BotContext<'_>,
    #[rename = "log-channel"] #[description = "Channel for bot logs"] log_channel: GuildChannel,
    #[rename = "verified-role"] #[description = "Role given to verified players"] verified_role: Role)
-> Result<(), Error> {
    let responder = ContextResponder::new(ctx);

    if let Err(ex) = apply_setup(&responder, ctx.data(), caller_is_admin(ctx), log_channel.id, verified_role.id).await {
        explain(&responder, "Setup failed", ex).await?;
    }

    Ok(())
}

// Interaction payloads carry the caller's resolved permissions.
fn caller_is_admin(ctx: BotContext<'_>) -> bool {
    match ctx {
        poise::Context::Application(app) => app.interaction.member.as_ref()
            .and_then(|o| o.permissions)
            .map(|o| o.administrator())
            .unwrap_or(false),
        _ => false,
    }
}

pub async fn apply_setup(responder: &dyn Responder, bot: &Bot, is_admin: bool, log_channel: ChannelId, verified_role: RoleId) -> Result<Destinations, BotError> {
    if !is_admin {
        warn!("Rejected setup from a non-administrator");
        return Err(BotError::Unauthorized);
    }

    let destinations = bot.settings.configure(log_channel, verified_role).await;
    info!("Configured log channel {} and verified role {}", log_channel, verified_role);

    publish(responder, bot.gateway.as_ref(), &bot.settings, Report::setup(log_channel, verified_role), true).await?;

    Ok(destinations)
}
