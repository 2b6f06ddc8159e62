use async_trait::async_trait;
use serenity::builder::CreateEmbed;
use serenity::model::{Colour, Timestamp};
use serenity::model::id::{ChannelId, RoleId, UserId};
use tracing::warn;
use crate::error::BotError;
use crate::models::player::PlayerRecord;
use crate::models::settings::Settings;
use crate::services::discord::GuildGateway;

pub const SUCCESS: Colour = Colour(0x00FF00);
pub const FAILURE: Colour = Colour(0xFF0000);
pub const NEUTRAL: Colour = Colour(0x0099FF);

const DESCRIPTION_LIMIT: usize = 4096;
const TRUNCATED: &str = "\n…";

/// A rendered outcome. Converted to an embed only at the Discord boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<(String, String, bool)>,
    pub thumbnail: Option<String>,
    pub colour: Colour,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Report {
        Report {
            title: title.into(),
            description: None,
            fields: Vec::new(),
            thumbnail: None,
            colour: NEUTRAL,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Report {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Report {
        self.fields.push((name.into(), value.into(), inline));
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Report {
        let url = url.into();
        if !url.is_empty() {
            self.thumbnail = Some(url);
        }
        self
    }

    pub fn colour(mut self, colour: Colour) -> Report {
        self.colour = colour;
        self
    }

    pub fn player(player: &PlayerRecord) -> Report {
        Report::new("BeatLeader Player Information")
            .thumbnail(&player.avatar_url)
            .field("Name", &player.name, true)
            .field("Global Rank", format!("#{}", player.global_rank), true)
            .field("Country Rank", format!("#{}", player.country_rank), true)
            .field("Country", &player.country_code, true)
            .field("In Region", if player.in_region { "✅ Yes" } else { "❌ No" }, true)
            .colour(if player.in_region { SUCCESS } else { FAILURE })
    }

    pub fn setup(log_channel: ChannelId, verified_role: RoleId) -> Report {
        Report::new("Tournament Bot Setup")
            .description("Bot configuration updated successfully")
            .field("Log Channel", format!("<#{}>", log_channel.get()), true)
            .field("Verified Role", format!("<@&{}>", verified_role.get()), true)
            .colour(SUCCESS)
    }

    pub fn verified(user: UserId) -> Report {
        Report::new("Player Verified")
            .description(format!("<@{}> verified successfully", user.get()))
            .colour(SUCCESS)
    }

    pub fn roster(lines: &[String]) -> Report {
        let description = if lines.is_empty() {
            "No members hold the region role.".to_string()
        } else {
            lines.join("\n")
        };

        Report::new("Region Role Player Check")
            .description(description)
            .colour(NEUTRAL)
    }

    pub fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .title(&self.title)
            .colour(self.colour)
            .timestamp(Timestamp::now());

        if let Some(description) = &self.description {
            embed = embed.description(truncate(description));
        }

        if let Some(thumbnail) = &self.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }

        embed.fields(self.fields.iter().map(|(name, value, inline)| (name.as_str(), value.as_str(), *inline)))
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_LIMIT {
        return text.to_string();
    }

    let keep = DESCRIPTION_LIMIT - TRUNCATED.chars().count();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(TRUNCATED);
    out
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Report(Report),
}

/// Answers whoever invoked the current command.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn reply(&self, reply: Reply, private: bool) -> Result<(), BotError>;
}

/// Sends the report to the caller, then copies it to the log channel if one is set.
pub async fn publish(responder: &dyn Responder, gateway: &dyn GuildGateway, settings: &Settings, report: Report, private: bool) -> Result<(), BotError> {
    responder.reply(Reply::Report(report.clone()), private).await?;
    mirror(gateway, settings, &report).await;

    Ok(())
}

// The caller already has their answer, so a dead log channel only gets logged.
pub async fn mirror(gateway: &dyn GuildGateway, settings: &Settings, report: &Report) {
    if let Some(log_channel) = settings.log_channel().await {
        if let Err(ex) = gateway.post(log_channel, report).await {
            warn!("Failed to mirror \"{}\" to log channel {}: {}", report.title, log_channel, ex);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakeGateway, RecordingResponder};

    fn player(in_region: bool) -> PlayerRecord {
        PlayerRecord {
            name: "Zatler".to_string(),
            avatar_url: "u.png".to_string(),
            global_rank: 12,
            country_rank: 1,
            country_code: "DE".to_string(),
            in_region,
        }
    }

    #[test]
    fn player_report_is_colour_coded() {
        let inside = Report::player(&player(true));
        assert_eq!(inside.colour, SUCCESS);
        assert_eq!(inside.thumbnail.as_deref(), Some("u.png"));
        assert!(inside.fields.contains(&("Global Rank".to_string(), "#12".to_string(), true)));
        assert!(inside.fields.contains(&("In Region".to_string(), "✅ Yes".to_string(), true)));

        let outside = Report::player(&player(false));
        assert_eq!(outside.colour, FAILURE);
        assert!(outside.fields.contains(&("In Region".to_string(), "❌ No".to_string(), true)));
    }

    #[test]
    fn empty_roster_says_so() {
        assert_eq!(Report::roster(&[]).description.as_deref(), Some("No members hold the region role."));
    }

    #[test]
    fn long_descriptions_are_cut() {
        let long = "a".repeat(DESCRIPTION_LIMIT + 50);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), DESCRIPTION_LIMIT);
        assert!(cut.ends_with(TRUNCATED));
        assert_eq!(truncate("short"), "short");
    }

    #[tokio::test]
    async fn publish_without_log_channel_only_replies() {
        let responder = RecordingResponder::default();
        let gateway = FakeGateway::default();
        let settings = Settings::new();

        publish(&responder, &gateway, &settings, Report::verified(UserId::new(1)), false).await.unwrap();

        assert_eq!(responder.replies().len(), 1);
        assert!(gateway.posts().is_empty());
    }

    #[tokio::test]
    async fn publish_mirrors_to_log_channel() {
        let responder = RecordingResponder::default();
        let gateway = FakeGateway::default();
        let settings = Settings::new();
        settings.configure(ChannelId::new(10), RoleId::new(20)).await;

        let report = Report::verified(UserId::new(1));
        publish(&responder, &gateway, &settings, report.clone(), false).await.unwrap();

        assert_eq!(gateway.posts(), vec![(ChannelId::new(10), report)]);
    }

    #[tokio::test]
    async fn broken_log_channel_does_not_fail_the_command() {
        let responder = RecordingResponder::default();
        let gateway = FakeGateway { fail_posts: true, ..Default::default() };
        let settings = Settings::new();
        settings.configure(ChannelId::new(10), RoleId::new(20)).await;

        let result = publish(&responder, &gateway, &settings, Report::verified(UserId::new(1)), true).await;

        assert!(result.is_ok());
        assert_eq!(responder.replies().len(), 1);
        assert!(responder.replies()[0].1);
    }
}
