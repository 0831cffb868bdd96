//! Blackjack Discord command - `/blackjack`.
//!
//! Placing a bet debits the wallet, deals the opening hands, and posts the
//! game message with hit/stand buttons. Everything after that happens
//! through the button handlers.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, view},
        core::casino,
        errors::{Error, Result},
    };

    /// Deals a blackjack hand against the house for the given bet.
    ///
    /// The bet is debited up front; the payout - if any - is credited back
    /// when the game resolves. Bets must be within the configured table
    /// limits and the player can only have one open game at a time.
    #[poise::command(slash_command)]
    pub async fn blackjack(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Amount to bet"]
        #[min = 5000]
        #[max = 500000]
        bet: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let player_id = ctx.author().id.to_string();

        match casino::place_bet(&data.database, &data.table, &data.config, &player_id, bet).await
        {
            Ok(game_view) => {
                ctx.send(
                    poise::CreateReply::default()
                        .embed(view::game_embed(&game_view))
                        .components(vec![view::game_buttons(&game_view)]),
                )
                .await?;
            }
            Err(err) if err.is_user_error() => {
                ctx.send(
                    poise::CreateReply::default()
                        .content(format!("❌ {err}"))
                        .ephemeral(true),
                )
                .await?;
            }
            Err(err) => return Err(err),
        }

        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
