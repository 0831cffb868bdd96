//! Wallet transaction entity - the append-only ledger.
//!
//! Every balance change writes one row here: `kind` is one of `"deposit"`,
//! `"withdraw"`, `"bet"`, or `"win"`, and `game_type` names the game for
//! bet/win rows (e.g. `"blackjack"`). Rows are never updated or deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ledger entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallet_transactions")]
pub struct Model {
    /// Unique identifier for the ledger entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Wallet this entry belongs to
    pub wallet_id: i64,
    /// Kind of movement: `"deposit"`, `"withdraw"`, `"bet"`, or `"win"`
    pub kind: String,
    /// Amount moved, always positive; `kind` carries the direction
    pub amount: i64,
    /// When the movement happened
    pub timestamp: DateTimeUtc,
    /// Game that produced this movement, None for plain deposits/withdrawals
    pub game_type: Option<String>,
}

/// Defines relationships between WalletTransaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ledger entry belongs to one wallet
    #[sea_orm(
        belongs_to = "super::wallet::Entity",
        from = "Column::WalletId",
        to = "super::wallet::Column::Id"
    )]
    Wallet,
}

impl Related<super::wallet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
