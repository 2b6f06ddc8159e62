use serenity::client::{Context, FullEvent};
use tracing::error;
use crate::{Bot, Error};
use crate::services::bot_init;
use crate::services::verification::{self, ReactionEvent};

pub async fn dispatch(ctx: &Context, event: &FullEvent, _framework: poise::FrameworkContext<'_, Bot, Error>, bot: &Bot) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot } => {
            bot_init::ready(ctx, data_about_bot).await;
        }
        FullEvent::ReactionAdd { add_reaction } => {
            let reaction = ReactionEvent::from(add_reaction);

            if let Err(ex) = verification::on_reaction(&reaction, bot.verify_channel(), &bot.settings, bot.gateway.as_ref()).await {
                error!("Failed to verify {:?}: {}", reaction.user_id, ex);
            }
        }
        _ => {}
    }

    Ok(())
}
