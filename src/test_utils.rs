// Recording fakes for the Discord and ranking seams.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use crate::Bot;
use crate::error::BotError;
use crate::models::config::{Config, DEFAULT_RANKING_URL};
use crate::models::player::PlayerRecord;
use crate::services::discord::GuildGateway;
use crate::services::ranking::PlayerLookup;
use crate::services::reporting::{Reply, Report, Responder};

#[derive(Default)]
pub struct RecordingResponder {
    replies: Mutex<Vec<(Reply, bool)>>,
}

impl RecordingResponder {
    pub fn replies(&self) -> Vec<(Reply, bool)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.replies().into_iter().filter_map(|(reply, _)| match reply {
            Reply::Report(report) => Some(report),
            Reply::Text(_) => None,
        }).collect()
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn reply(&self, reply: Reply, private: bool) -> Result<(), BotError> {
        self.replies.lock().unwrap().push((reply, private));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeGateway {
    pub holders: Option<Vec<UserId>>,
    pub fail_posts: bool,
    pub grants: Mutex<Vec<(GuildId, UserId, RoleId)>>,
    pub posts: Mutex<Vec<(ChannelId, Report)>>,
}

impl FakeGateway {
    pub fn grants(&self) -> Vec<(GuildId, UserId, RoleId)> {
        self.grants.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<(ChannelId, Report)> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GuildGateway for FakeGateway {
    async fn grant_role(&self, guild: GuildId, user: UserId, role: RoleId) -> Result<(), BotError> {
        self.grants.lock().unwrap().push((guild, user, role));
        Ok(())
    }

    async fn role_holders(&self, _guild: GuildId, _role: RoleId) -> Result<Option<Vec<UserId>>, BotError> {
        Ok(self.holders.clone())
    }

    async fn post(&self, channel: ChannelId, report: &Report) -> Result<(), BotError> {
        if self.fail_posts {
            return Err(BotError::UpstreamUnavailable("Unknown Channel".to_string()));
        }

        self.posts.lock().unwrap().push((channel, report.clone()));
        Ok(())
    }
}

/// Answers from a fixed table; anyone missing from it fails like a 404 would.
#[derive(Default)]
pub struct FakeLookup {
    pub by_user: HashMap<UserId, PlayerRecord>,
    pub by_id: HashMap<String, PlayerRecord>,
    pub by_name: HashMap<String, PlayerRecord>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeLookup {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn record(name: &str, country: &str, in_region: bool) -> PlayerRecord {
    PlayerRecord {
        name: name.to_string(),
        avatar_url: format!("https://cdn.example/{name}.png"),
        global_rank: 10,
        country_rank: 2,
        country_code: country.to_string(),
        in_region,
    }
}

fn found(record: Option<&PlayerRecord>) -> Result<PlayerRecord, BotError> {
    record.cloned().ok_or_else(|| BotError::UpstreamUnavailable("404 Not Found".to_string()))
}

#[async_trait]
impl PlayerLookup for FakeLookup {
    async fn by_discord(&self, user: UserId) -> Result<PlayerRecord, BotError> {
        self.calls.lock().unwrap().push(format!("discord:{user}"));
        found(self.by_user.get(&user))
    }

    async fn by_ranking_id(&self, id: &str) -> Result<PlayerRecord, BotError> {
        self.calls.lock().unwrap().push(format!("id:{id}"));
        found(self.by_id.get(id))
    }

    async fn by_name(&self, name: &str) -> Result<PlayerRecord, BotError> {
        self.calls.lock().unwrap().push(format!("name:{name}"));
        self.by_name.get(name).cloned().ok_or(BotError::NotFound)
    }
}

pub fn bot(gateway: Arc<FakeGateway>, lookup: Arc<FakeLookup>) -> Bot {
    let config = Config {
        token: "token".to_string(),
        region_role_id: 70,
        verify_channel_id: 100,
        guild_id: None,
        ranking_api_url: DEFAULT_RANKING_URL.to_string(),
    };

    Bot::new(config, lookup, gateway)
}
