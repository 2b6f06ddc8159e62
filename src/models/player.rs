use serde::{Deserialize, Serialize};
use crate::services::region::is_in_region;

// Shape of a player on the BeatLeader API. Only the fields we render are kept.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlayer {
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub rank: i64,
    pub country_rank: i64,
    pub country: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerSearch {
    pub data: Vec<RankedPlayer>,
}

/// One lookup's worth of player data, built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub name: String,
    pub avatar_url: String,
    pub global_rank: i64,
    pub country_rank: i64,
    pub country_code: String,
    pub in_region: bool,
}

impl From<RankedPlayer> for PlayerRecord {
    fn from(player: RankedPlayer) -> Self {
        let in_region = is_in_region(&player.country);

        PlayerRecord {
            name: player.name,
            avatar_url: player.avatar.unwrap_or_default(),
            global_rank: player.rank,
            country_rank: player.country_rank,
            country_code: player.country,
            in_region,
        }
    }
}
