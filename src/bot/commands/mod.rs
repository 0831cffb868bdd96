//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Blackjack table commands
pub mod blackjack;

/// General utility commands
pub mod general;

/// Wallet commands
pub mod wallet;

// Export commands
pub use blackjack::*;
pub use general::*;
pub use wallet::*;
