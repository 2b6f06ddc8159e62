use serenity::model::id::{ChannelId, RoleId};
use tokio::sync::RwLock;

/// Where setup pointed the bot. Both halves are always set together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destinations {
    pub log_channel: ChannelId,
    pub verified_role: RoleId,
}

/// Runtime settings chosen through `/setup`; empty until an administrator runs it.
#[derive(Debug, Default)]
pub struct Settings {
    destinations: RwLock<Option<Destinations>>,
}

impl Settings {
    pub fn new() -> Settings {
        Settings::default()
    }

    pub async fn configure(&self, log_channel: ChannelId, verified_role: RoleId) -> Destinations {
        let destinations = Destinations { log_channel, verified_role };
        *self.destinations.write().await = Some(destinations);
        destinations
    }

    pub async fn current(&self) -> Option<Destinations> {
        *self.destinations.read().await
    }

    pub async fn log_channel(&self) -> Option<ChannelId> {
        self.current().await.map(|o| o.log_channel)
    }
}
