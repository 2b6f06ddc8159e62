use std::sync::Arc;
use async_trait::async_trait;
use poise::CreateReply;
use serenity::builder::CreateMessage;
use serenity::http::Http;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use crate::error::BotError;
use crate::services::reporting::{Reply, Report, Responder};
use crate::BotContext;

// Discord caps member pages at 1000.
const MEMBER_PAGE: u64 = 1000;

/// The few guild operations the bot needs: grant a role, list a role, post a report.
#[async_trait]
pub trait GuildGateway: Send + Sync {
    async fn grant_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<(), BotError>;
    /// `None` when the role doesn't exist in the guild.
    async fn role_holders(&self, guild: GuildId, role: RoleId) -> Result<Option<Vec<UserId>>, BotError>;
    async fn post(&self, channel: ChannelId, report: &Report) -> Result<(), BotError>;
}

pub struct SerenityGateway {
    http: Arc<Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>) -> SerenityGateway {
        SerenityGateway { http }
    }
}

#[async_trait]
impl GuildGateway for SerenityGateway {
    async fn grant_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<(), BotError> {
        let member = guild.member(&*self.http, user).await?;
        member.add_role(&*self.http, role).await?;

        Ok(())
    }

    async fn role_holders(&self, guild: GuildId, role: RoleId) -> Result<Option<Vec<UserId>>, BotError> {
        let roles = guild.roles(&*self.http).await?;
        if !roles.contains_key(&role) {
            return Ok(None);
        }

        let mut holders = Vec::new();
        let mut after: Option<UserId> = None;

        loop {
            let page = guild.members(&*self.http, Some(MEMBER_PAGE), after).await?;
            let done = (page.len() as u64) < MEMBER_PAGE;
            after = page.last().map(|o| o.user.id);

            holders.extend(page.into_iter().filter(|o| o.roles.contains(&role)).map(|o| o.user.id));

            if done || after.is_none() {
                break;
            }
        }

        Ok(Some(holders))
    }

    async fn post(&self, channel: ChannelId, report: &Report) -> Result<(), BotError> {
        channel.send_message(&*self.http, CreateMessage::new().embed(report.to_embed())).await?;

        Ok(())
    }
}

/// Replies through the poise context of the running slash command.
pub struct ContextResponder<'a> {
    ctx: BotContext<'a>,
}

impl<'a> ContextResponder<'a> {
    pub fn new(ctx: BotContext<'a>) -> ContextResponder<'a> {
        ContextResponder { ctx }
    }
}

#[async_trait]
impl<'a> Responder for ContextResponder<'a> {
    async fn reply(&self, reply: Reply, private: bool) -> Result<(), BotError> {
        let message = match reply {
            Reply::Text(text) => CreateReply::default().content(text),
            Reply::Report(report) => CreateReply::default().embed(report.to_embed()),
        };

        self.ctx.send(message.ephemeral(private)).await?;

        Ok(())
    }
}
