//! Embed and button rendering for blackjack game views.
//!
//! This is the only place that knows how a [`GameView`] turns into Discord
//! widgets, and the only place that maps button custom IDs to and from the
//! typed [`GameAction`] set. The rest of the bot never touches raw IDs.

use poise::serenity_prelude as serenity;

use crate::core::game::{GameAction, GameView, Outcome};

const HIT_ID: &str = "blackjack_hit";
const STAND_ID: &str = "blackjack_stand";
const NEW_GAME_ID: &str = "blackjack_new";

/// Resolves a component custom ID into a typed game action. Returns `None`
/// for custom IDs this bot does not own.
#[must_use]
pub fn parse_action(custom_id: &str) -> Option<GameAction> {
    match custom_id {
        HIT_ID => Some(GameAction::Hit),
        STAND_ID => Some(GameAction::Stand),
        NEW_GAME_ID => Some(GameAction::NewGame),
        _ => None,
    }
}

/// The custom ID emitted for a game action's button.
#[must_use]
pub const fn custom_id(action: GameAction) -> &'static str {
    match action {
        GameAction::Hit => HIT_ID,
        GameAction::Stand => STAND_ID,
        GameAction::NewGame => NEW_GAME_ID,
    }
}

/// Renders the state of a game as an embed.
#[must_use]
pub fn game_embed(view: &GameView) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::default()
        .title("🃏 Blackjack")
        .colour(embed_colour(view))
        .field(
            "👤 Your Hand",
            format!("{}\n**Score: {}**", view.player_cards, view.player_score),
            true,
        )
        .field(
            "🤖 Dealer",
            format!("{}\n**Score: {}**", view.dealer_cards, view.dealer_score),
            true,
        )
        .field("💰 Bet", format!("${}", format_amount(view.bet)), true)
        .footer(serenity::CreateEmbedFooter::new("CasinoBuddy - Blackjack"));

    if let Some(result) = view.result {
        let value = if result.payout > 0 {
            format!(
                "{}\nPayout: ${}",
                result.outcome.label(),
                format_amount(result.payout)
            )
        } else {
            result.outcome.label().to_string()
        };
        embed = embed.field("🎯 Result", value, false);
    }

    embed
}

/// Renders the action buttons matching the game's phase.
#[must_use]
pub fn game_buttons(view: &GameView) -> serenity::CreateActionRow {
    serenity::CreateActionRow::Buttons(view.actions.iter().copied().map(button).collect())
}

fn button(action: GameAction) -> serenity::CreateButton {
    let base = serenity::CreateButton::new(custom_id(action));
    match action {
        GameAction::Hit => base
            .label("Hit")
            .style(serenity::ButtonStyle::Primary)
            .emoji('🃏'),
        GameAction::Stand => base
            .label("Stand")
            .style(serenity::ButtonStyle::Success)
            .emoji('✋'),
        GameAction::NewGame => base
            .label("New Game")
            .style(serenity::ButtonStyle::Primary)
            .emoji('🔄'),
    }
}

fn embed_colour(view: &GameView) -> serenity::Colour {
    let colour = match view.result.map(|r| r.outcome) {
        Some(Outcome::PlayerBlackjack | Outcome::PlayerWin | Outcome::DealerBust) => 0x09_7b_5a,
        Some(Outcome::DealerWin | Outcome::PlayerBust) => 0x00ff_4444,
        Some(Outcome::Push) => 0x00ff_e417,
        None => 0x0000_7c_5a,
    };
    serenity::Colour::new(colour)
}

/// Formats a whole-dollar amount with thousands separators.
#[must_use]
pub fn format_amount(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(5_000), "5,000");
        assert_eq!(format_amount(500_000), "500,000");
        assert_eq!(format_amount(1_234_567), "1,234,567");
        assert_eq!(format_amount(-25_000), "-25,000");
    }

    #[test]
    fn test_action_ids_round_trip() {
        for action in [GameAction::Hit, GameAction::Stand, GameAction::NewGame] {
            assert_eq!(parse_action(custom_id(action)), Some(action));
        }
        assert_eq!(parse_action("some_other_button"), None);
    }
}
