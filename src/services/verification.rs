use serenity::model::channel::{Reaction, ReactionType};
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use tracing::{info, warn};
use crate::error::BotError;
use crate::models::settings::{Destinations, Settings};
use crate::services::discord::GuildGateway;
use crate::services::reporting::{mirror, Report};

pub const APPROVAL_EMOJI: &str = "✅";

/// The parts of a reaction the verification gate looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
    pub user_id: Option<UserId>,
    pub emoji: Option<String>,
    pub by_bot: bool,
}

impl From<&Reaction> for ReactionEvent {
    fn from(reaction: &Reaction) -> Self {
        let emoji = match &reaction.emoji {
            ReactionType::Unicode(text) => Some(text.clone()),
            _ => None,
        };

        ReactionEvent {
            channel_id: reaction.channel_id,
            guild_id: reaction.guild_id,
            user_id: reaction.user_id,
            emoji,
            by_bot: reaction.member.as_ref().map(|o| o.user.bot).unwrap_or(false),
        }
    }
}

/// What a reaction does to the reacting member: unverified stays unverified, or moves to verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Wrong channel, wrong emoji, or nobody to verify.
    Ignore,
    /// A valid approval, but `/setup` hasn't picked a verified role yet.
    Unconfigured { user: UserId },
    Verify { guild: GuildId, user: UserId, role: RoleId },
}

pub fn evaluate(reaction: &ReactionEvent, verify_channel: ChannelId, destinations: Option<Destinations>) -> Transition {
    if reaction.channel_id != verify_channel || reaction.emoji.as_deref() != Some(APPROVAL_EMOJI) || reaction.by_bot {
        return Transition::Ignore;
    }

    let (Some(guild), Some(user)) = (reaction.guild_id, reaction.user_id) else {
        return Transition::Ignore;
    };

    match destinations {
        Some(destinations) => Transition::Verify { guild, user, role: destinations.verified_role },
        None => Transition::Unconfigured { user },
    }
}

pub async fn on_reaction(reaction: &ReactionEvent, verify_channel: ChannelId, settings: &Settings, gateway: &dyn GuildGateway) -> Result<Transition, BotError> {
    let transition = evaluate(reaction, verify_channel, settings.current().await);

    match transition {
        Transition::Ignore => {}
        Transition::Unconfigured { user } => {
            warn!("Approval for {} ignored, no verified role is set up yet", user);
        }
        Transition::Verify { guild, user, role } => {
            gateway.grant_role(guild, user, role).await?;
            info!("Verified {} with role {}", user, role);

            mirror(gateway, settings, &Report::verified(user)).await;
        }
    }

    Ok(transition)
}
