mod setup;
mod players;

use tracing::{error, warn};
use setup::*;
use players::*;
use crate::{Bot, Error};
use crate::error::BotError;
use crate::services::event_handler;
use crate::services::reporting::{Reply, Responder};

type Command = poise::Command<Bot, Error>;

pub fn commands() -> Vec<Command> {
    vec![
        setup(),
        check_player(),
        check_all(),
    ]
}

// Anything not in the table is dropped by poise without a reply.
pub fn route<'a>(commands: &'a [Command], name: &str) -> Option<&'a Command> {
    commands.iter().find(|o| o.name == name)
}

/// Turns a failed command into the plain-text reply its caller sees.
async fn explain(responder: &dyn Responder, lead: &str, ex: BotError) -> Result<(), Error> {
    match &ex {
        BotError::Discord(inner) => error!("{}: {}", lead, inner),
        _ => warn!("{}: {}", lead, ex),
    }

    responder.reply(Reply::Text(ex.reply_text(lead)), ex.is_private()).await?;
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Bot, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Command {} failed: {}", ctx.command().name, error);
        }
        other => {
            if let Err(ex) = poise::builtins::on_error(other).await {
                error!("Failed to handle framework error: {}", ex);
            }
        }
    }
}

pub fn get_framework() -> poise::FrameworkOptions<Bot, Error> {
    poise::FrameworkOptions {
        commands: commands(),
        event_handler: |ctx, event, framework, bot| {
            Box::pin(event_handler::dispatch(ctx, event, framework, bot))
        },
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    }
}
