use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serenity::model::id::UserId;
use tracing::{debug, error};
use crate::error::BotError;
use crate::models::player::{PlayerRecord, PlayerSearch, RankedPlayer};

/// Which player `/check-player` should look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSelector {
    Discord(UserId),
    RankingId(String),
    RankingName(String),
}

impl PlayerSelector {
    // If several are given, the Discord user wins, then the id, then the name.
    pub fn pick(discord: Option<UserId>, ranking_id: Option<String>, ranking_name: Option<String>) -> Result<PlayerSelector, BotError> {
        let filled = |o: Option<String>| o.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        if let Some(user) = discord {
            Ok(PlayerSelector::Discord(user))
        } else if let Some(id) = filled(ranking_id) {
            Ok(PlayerSelector::RankingId(id))
        } else if let Some(name) = filled(ranking_name) {
            Ok(PlayerSelector::RankingName(name))
        } else {
            Err(BotError::MissingInput)
        }
    }
}

#[async_trait]
pub trait PlayerLookup: Send + Sync {
    async fn by_discord(&self, user: UserId) -> Result<PlayerRecord, BotError>;
    async fn by_ranking_id(&self, id: &str) -> Result<PlayerRecord, BotError>;
    async fn by_name(&self, name: &str) -> Result<PlayerRecord, BotError>;

    async fn lookup(&self, selector: &PlayerSelector) -> Result<PlayerRecord, BotError> {
        match selector {
            PlayerSelector::Discord(user) => self.by_discord(*user).await,
            PlayerSelector::RankingId(id) => self.by_ranking_id(id).await,
            PlayerSelector::RankingName(name) => self.by_name(name).await,
        }
    }
}

/// Read-only client for the BeatLeader API. One attempt per lookup, no retries.
pub struct BeatLeaderClient {
    client: Client,
    base_url: Url,
}

impl BeatLeaderClient {
    pub fn new(base_url: &str) -> Result<BeatLeaderClient, BotError> {
        let base_url = Url::parse(base_url)
            .map_err(|ex| BotError::UpstreamUnavailable(format!("bad ranking service url: {ex}")))?;

        if base_url.cannot_be_a_base() {
            return Err(BotError::UpstreamUnavailable(format!("bad ranking service url: {base_url}")));
        }

        Ok(BeatLeaderClient {
            client: Client::new(),
            base_url,
        })
    }

    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in new(), this cannot fail.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, BotError> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await.map_err(|ex| {
            error!("Failed to reach the ranking service: {}", ex);
            BotError::UpstreamUnavailable(ex.to_string())
        })?;

        check_status(response.status())?;

        let body = response.bytes().await.map_err(|ex| BotError::UpstreamUnavailable(ex.to_string()))?;
        parse(&body)
    }
}

pub fn check_status(status: StatusCode) -> Result<(), BotError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(BotError::UpstreamUnavailable(status.to_string()))
    }
}

pub fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, BotError> {
    serde_json::from_slice(body).map_err(|ex| BotError::MalformedResponse(ex.to_string()))
}

pub fn first_result(search: PlayerSearch) -> Result<PlayerRecord, BotError> {
    search.data.into_iter().next().map(PlayerRecord::from).ok_or(BotError::NotFound)
}

#[async_trait]
impl PlayerLookup for BeatLeaderClient {
    async fn by_discord(&self, user: UserId) -> Result<PlayerRecord, BotError> {
        let url = self.endpoint(&["player", "discord", &user.get().to_string()]);
        self.fetch::<RankedPlayer>(url).await.map(PlayerRecord::from)
    }

    async fn by_ranking_id(&self, id: &str) -> Result<PlayerRecord, BotError> {
        let url = self.endpoint(&["player", id]);
        self.fetch::<RankedPlayer>(url).await.map(PlayerRecord::from)
    }

    async fn by_name(&self, name: &str) -> Result<PlayerRecord, BotError> {
        let mut url = self.endpoint(&["players"]);
        url.query_pairs_mut().append_pair("search", name);
        first_result(self.fetch::<PlayerSearch>(url).await?)
    }
}
