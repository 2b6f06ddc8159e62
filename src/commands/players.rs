use serenity::model::id::{GuildId, RoleId, UserId};
use serenity::model::user::User;
use tracing::warn;
use crate::{Bot, BotContext, Error};
use crate::error::BotError;
use crate::models::player::PlayerRecord;
use crate::services::discord::ContextResponder;
use crate::services::ranking::PlayerSelector;
use crate::services::reporting::{publish, Reply, Report, Responder};
use super::explain;

/// Check a player's BeatLeader information
#[poise::command(slash_command, guild_only, rename = "check-player")]
pub async fn check_player(
    ctx: BotContext<'_>,
    #[description = "Discord user to check"] discord: Option<User>,
    #[rename = "beatleader-id"] #[description = "BeatLeader ID to check"] beatleader_id: Option<String>,
    #[rename = "beatleader-name"] #[description = "BeatLeader username to check"] beatleader_name: Option<String>)
-> Result<(), Error> {
    ctx.defer().await?;

    let responder = ContextResponder::new(ctx);
    let discord = discord.map(|o| o.id);

    if let Err(ex) = lookup_player(&responder, ctx.data(), discord, beatleader_id, beatleader_name).await {
        explain(&responder, "Error retrieving player information", ex).await?;
    }

    Ok(())
}

/// Check all players with the region role
#[poise::command(slash_command, guild_only, rename = "check-all")]
pub async fn check_all(ctx: BotContext<'_>) -> Result<(), Error> {
    // guild_only keeps this from running in DMs.
    let guild_id = ctx.guild_id().ok_or("check-all ran outside a guild")?;

    ctx.defer().await?;

    let responder = ContextResponder::new(ctx);
    let bot = ctx.data();

    if let Err(ex) = check_region_role(&responder, bot, guild_id, bot.region_role()).await {
        explain(&responder, "Error checking players", ex).await?;
    }

    Ok(())
}

pub async fn lookup_player(responder: &dyn Responder, bot: &Bot, discord: Option<UserId>, ranking_id: Option<String>, ranking_name: Option<String>) -> Result<PlayerRecord, BotError> {
    let selector = PlayerSelector::pick(discord, ranking_id, ranking_name)?;
    let player = bot.ranking.lookup(&selector).await?;

    publish(responder, bot.gateway.as_ref(), &bot.settings, Report::player(&player), false).await?;

    Ok(player)
}

/// Looks up every holder of the region role, one at a time, in the order Discord lists them.
/// A failed lookup becomes an "Error checking" line instead of failing the command.
pub async fn check_region_role(responder: &dyn Responder, bot: &Bot, guild: GuildId, region_role: RoleId) -> Result<Vec<String>, BotError> {
    let Some(members) = bot.gateway.role_holders(guild, region_role).await? else {
        responder.reply(Reply::Text("Region role not found.".to_string()), false).await?;
        return Ok(Vec::new());
    };

    let mut lines = Vec::with_capacity(members.len());

    for member in members {
        match bot.ranking.by_discord(member).await {
            Ok(player) => lines.push(format!("<@{}> : {} : {}", member.get(), player.name, player.in_region)),
            Err(ex) => {
                warn!("Failed to check {} for the region role: {}", member, ex);
                lines.push(format!("<@{}> : Unknown : Error checking", member.get()));
            }
        }
    }

    publish(responder, bot.gateway.as_ref(), &bot.settings, Report::roster(&lines), false).await?;

    Ok(lines)
}
