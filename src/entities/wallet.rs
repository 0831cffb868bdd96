//! Wallet entity - one casino wallet per Discord user.
//!
//! Holds the current balance plus a running total of money wagered.
//! Amounts are whole casino dollars stored as integers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wallet database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    /// Unique identifier for the wallet
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user ID owning this wallet - one wallet per user
    #[sea_orm(unique)]
    pub discord_id: String,
    /// Display name captured at wallet creation
    pub username: String,
    /// Current balance
    pub balance: i64,
    /// Lifetime total wagered across all games
    pub total_wagered: i64,
}

/// Defines relationships between Wallet and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One wallet has many ledger entries
    #[sea_orm(has_many = "super::wallet_transaction::Entity")]
    Transactions,
}

impl Related<super::wallet_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
