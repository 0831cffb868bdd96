//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions outside the slash
//! command flow, currently the blackjack game buttons.

/// Button press routing for hit/stand/new-game
pub mod buttons;
