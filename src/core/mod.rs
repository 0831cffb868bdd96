//! Core casino logic - framework-agnostic and fully testable without Discord.
//!
//! The dependency order is leaves-first: cards know nothing about hands,
//! hands know nothing about games, the game state machine knows nothing
//! about persistence, and only `casino` ties game, table, and wallet
//! together into the operations the bot layer calls.

/// Card ranks, suits, and random draws
pub mod card;
/// Command surface - bet placement, hit/stand routing, settlement
pub mod casino;
/// Blackjack game state machine and view model
pub mod game;
/// Hand value computation with soft-ace adjustment
pub mod hand;
/// Terminal outcome to payout mapping
pub mod payout;
/// Per-player session registry
pub mod table;
/// Wallet balances and the transaction ledger
pub mod wallet;
