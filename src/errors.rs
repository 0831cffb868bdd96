//! Unified error types for `CasinoBuddy`.
//!
//! Domain errors (bad bets, missing wallets, illegal game transitions) carry
//! enough context to render a user-facing message at the command boundary.
//! Infrastructure errors (database, I/O, framework) are wrapped via `#[from]`.

use thiserror::Error;

/// All errors the bot can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable missing or malformed
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Bet amount outside the configured table limits
    #[error("Bet of ${amount} is outside the table limits (${min} - ${max})")]
    BetOutOfRange {
        /// The rejected bet amount
        amount: i64,
        /// Minimum allowed bet
        min: i64,
        /// Maximum allowed bet
        max: i64,
    },

    /// Wallet balance cannot cover the requested amount
    #[error("Insufficient funds: balance is ${balance}, required ${required}")]
    InsufficientFunds {
        /// Balance at the time of the check
        balance: i64,
        /// Amount that was requested
        required: i64,
    },

    /// No wallet registered for the user
    #[error("No wallet registered for user {user_id}")]
    WalletNotFound {
        /// Discord user ID without a wallet
        user_id: String,
    },

    /// A bet was placed while a game is still being played
    #[error("User {user_id} already has a blackjack game in progress")]
    GameInProgress {
        /// Discord user ID with the open game
        user_id: String,
    },

    /// A game action arrived for a player with no registered session
    #[error("No active blackjack game for user {user_id}")]
    NoActiveGame {
        /// Discord user ID without a session
        user_id: String,
    },

    /// A hit/stand transition was attempted on a finished game
    #[error("That game is already over")]
    InvalidAction,

    /// Serenity/Poise framework error
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Whether this error is the caller's fault and safe to echo back to the
    /// user verbatim, as opposed to an internal failure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::BetOutOfRange { .. }
                | Self::InsufficientFunds { .. }
                | Self::WalletNotFound { .. }
                | Self::GameInProgress { .. }
                | Self::NoActiveGame { .. }
                | Self::InvalidAction
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
