//! Game button handling.
//!
//! Component interactions are resolved into the typed [`GameAction`] set
//! exactly once, here at the boundary; unrecognised custom IDs are ignored
//! so other bots' components pass through untouched. Each press is routed
//! by the *pressing* user's ID and only accepted on the message of that
//! user's own game, so players can neither drive another player's session
//! nor overwrite another player's game message with their own view.

use poise::serenity_prelude as serenity;

use crate::bot::{BotData, view};
use crate::core::casino;
use crate::core::game::GameAction;
use crate::errors::{Error, Result};

/// Serenity event hook wired into the poise framework options.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    if let serenity::FullEvent::InteractionCreate { interaction } = event {
        if let Some(component) = interaction.as_message_component() {
            if let Some(action) = view::parse_action(&component.data.custom_id) {
                handle_game_action(ctx, component, data, action).await?;
            }
        }
    }
    Ok(())
}

async fn handle_game_action(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &BotData,
    action: GameAction,
) -> Result<()> {
    let player_id = component.user.id.to_string();

    // A press on someone else's game message must not advance the presser's
    // own session and overwrite the other player's view
    let dealt_to = component
        .message
        .interaction
        .as_ref()
        .map(|invocation| invocation.user.id);
    if !same_player(dealt_to, component.user.id) {
        return respond_ephemeral(
            ctx,
            component,
            "❌ Those buttons belong to another player's game. Use `/blackjack <bet>` to deal your own.",
        )
        .await;
    }

    let result = match action {
        GameAction::Hit => casino::hit(&data.database, &data.table, &player_id)
            .await
            .map(Some),
        GameAction::Stand => casino::stand(&data.database, &data.table, &player_id)
            .await
            .map(Some),
        GameAction::NewGame => casino::new_game(&data.database, &data.table, &player_id)
            .await
            .map(|()| None),
    };

    match result {
        // Game advanced: swap the original message for the new state
        Ok(Some(game_view)) => {
            let message = serenity::CreateInteractionResponseMessage::new()
                .embed(view::game_embed(&game_view))
                .components(vec![view::game_buttons(&game_view)]);
            component
                .create_response(
                    &ctx.http,
                    serenity::CreateInteractionResponse::UpdateMessage(message),
                )
                .await?;
        }
        // Session cleared: the player deals again via the slash command
        Ok(None) => {
            respond_ephemeral(
                ctx,
                component,
                "🔄 Table cleared. Use `/blackjack <bet>` to deal a new hand.",
            )
            .await?;
        }
        Err(err) if err.is_user_error() => {
            respond_ephemeral(ctx, component, &format!("❌ {err}")).await?;
        }
        Err(err) => return Err(err),
    }

    Ok(())
}

/// Whether the pressing user is the player the game message was dealt to.
/// A message with no recorded invocation matches nobody.
fn same_player(dealt_to: Option<serenity::UserId>, presser: serenity::UserId) -> bool {
    dealt_to == Some(presser)
}

async fn respond_ephemeral(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    content: &str,
) -> Result<()> {
    let message = serenity::CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true);
    component
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Message(message),
        )
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_dealt_player_matches_their_game_message() {
        let owner = serenity::UserId::new(1);
        let other = serenity::UserId::new(2);

        assert!(same_player(Some(owner), owner));
        assert!(!same_player(Some(owner), other));
        // Messages without a recorded invocation match nobody
        assert!(!same_player(None, owner));
    }
}
