use thiserror::Error;

/// Everything a command, the verification gate or a ranking lookup can fail with.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Only administrators can use this command.")]
    Unauthorized,
    #[error("Please provide at least one player identifier.")]
    MissingInput,
    #[error("No player matched that search.")]
    NotFound,
    #[error("The ranking service is unavailable ({0}).")]
    UpstreamUnavailable(String),
    #[error("The ranking service sent data we couldn't read ({0}).")]
    MalformedResponse(String),
    #[error("Discord request failed: {0}")]
    Discord(#[from] serenity::Error),
}

impl BotError {
    // Denials are only shown to the caller.
    pub fn is_private(&self) -> bool {
        matches!(self, BotError::Unauthorized)
    }

    /// The plain-text reply sent back to whoever invoked the failing command.
    pub fn reply_text(&self, lead: &str) -> String {
        match self {
            BotError::Unauthorized | BotError::MissingInput => self.to_string(),
            _ => format!("{lead}: {self}"),
        }
    }
}
