//! Wallet gateway - balances and the append-only ledger.
//!
//! All balance mutations go through atomic column-expression updates so that
//! concurrent interaction handlers cannot lose a write. Debits are checked:
//! the update only matches while `balance >= amount`, and zero affected rows
//! means the funds were not there. Every mutation appends one ledger row in
//! the same database transaction.

use crate::{
    entities::{Wallet, wallet, wallet_transaction},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};

/// Ledger entry kinds.
mod kind {
    pub const DEPOSIT: &str = "deposit";
    pub const WITHDRAW: &str = "withdraw";
    pub const BET: &str = "bet";
    pub const WIN: &str = "win";
}

/// Creates a wallet for a Discord user with an opening balance.
///
/// The opening balance, when positive, is recorded as a deposit so the
/// ledger always sums to the balance.
pub async fn create_wallet(
    db: &DatabaseConnection,
    discord_id: &str,
    username: &str,
    opening_balance: i64,
) -> Result<wallet::Model> {
    let txn = db.begin().await?;

    let model = wallet::ActiveModel {
        discord_id: Set(discord_id.to_string()),
        username: Set(username.to_string()),
        balance: Set(opening_balance),
        total_wagered: Set(0),
        ..Default::default()
    };
    let created = model.insert(&txn).await?;

    if opening_balance > 0 {
        append_ledger(&txn, created.id, kind::DEPOSIT, opening_balance, None).await?;
    }

    txn.commit().await?;
    Ok(created)
}

/// Looks up a wallet by Discord user ID.
pub async fn get_wallet(
    db: &DatabaseConnection,
    discord_id: &str,
) -> Result<Option<wallet::Model>> {
    Wallet::find()
        .filter(wallet::Column::DiscordId.eq(discord_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Looks up a wallet by Discord user ID, failing if it does not exist.
pub async fn require_wallet(db: &DatabaseConnection, discord_id: &str) -> Result<wallet::Model> {
    get_wallet(db, discord_id)
        .await?
        .ok_or_else(|| Error::WalletNotFound {
            user_id: discord_id.to_string(),
        })
}

/// Debits a bet from the wallet and bumps the wagered total.
///
/// The debit is conditional on sufficient balance; on failure nothing is
/// written and [`Error::InsufficientFunds`] is returned with the balance
/// observed at the time of the check.
pub async fn debit_bet(
    db: &DatabaseConnection,
    discord_id: &str,
    amount: i64,
    game_type: &str,
) -> Result<wallet::Model> {
    let txn = db.begin().await?;

    let current = Wallet::find()
        .filter(wallet::Column::DiscordId.eq(discord_id))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::WalletNotFound {
            user_id: discord_id.to_string(),
        })?;

    let updated = Wallet::update_many()
        .col_expr(
            wallet::Column::Balance,
            Expr::col(wallet::Column::Balance).sub(amount),
        )
        .col_expr(
            wallet::Column::TotalWagered,
            Expr::col(wallet::Column::TotalWagered).add(amount),
        )
        .filter(wallet::Column::Id.eq(current.id))
        .filter(wallet::Column::Balance.gte(amount))
        .exec(&txn)
        .await?;

    if updated.rows_affected == 0 {
        return Err(Error::InsufficientFunds {
            balance: current.balance,
            required: amount,
        });
    }

    append_ledger(&txn, current.id, kind::BET, amount, Some(game_type)).await?;
    txn.commit().await?;

    require_wallet(db, discord_id).await
}

/// Credits a payout to the wallet. Unconditional - payouts are never
/// negative.
pub async fn credit_payout(
    db: &DatabaseConnection,
    discord_id: &str,
    amount: i64,
    game_type: &str,
) -> Result<wallet::Model> {
    adjust(db, discord_id, amount, kind::WIN, Some(game_type)).await
}

/// Adds funds to a wallet (admin deposit).
pub async fn deposit(
    db: &DatabaseConnection,
    discord_id: &str,
    amount: i64,
) -> Result<wallet::Model> {
    adjust(db, discord_id, amount, kind::DEPOSIT, None).await
}

/// Removes funds from a wallet (admin withdrawal). Checked like a debit.
pub async fn withdraw(
    db: &DatabaseConnection,
    discord_id: &str,
    amount: i64,
) -> Result<wallet::Model> {
    let txn = db.begin().await?;

    let current = Wallet::find()
        .filter(wallet::Column::DiscordId.eq(discord_id))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::WalletNotFound {
            user_id: discord_id.to_string(),
        })?;

    let updated = Wallet::update_many()
        .col_expr(
            wallet::Column::Balance,
            Expr::col(wallet::Column::Balance).sub(amount),
        )
        .filter(wallet::Column::Id.eq(current.id))
        .filter(wallet::Column::Balance.gte(amount))
        .exec(&txn)
        .await?;

    if updated.rows_affected == 0 {
        return Err(Error::InsufficientFunds {
            balance: current.balance,
            required: amount,
        });
    }

    append_ledger(&txn, current.id, kind::WITHDRAW, amount, None).await?;
    txn.commit().await?;

    require_wallet(db, discord_id).await
}

async fn adjust(
    db: &DatabaseConnection,
    discord_id: &str,
    amount: i64,
    kind: &str,
    game_type: Option<&str>,
) -> Result<wallet::Model> {
    let txn = db.begin().await?;

    let current = Wallet::find()
        .filter(wallet::Column::DiscordId.eq(discord_id))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::WalletNotFound {
            user_id: discord_id.to_string(),
        })?;

    Wallet::update_many()
        .col_expr(
            wallet::Column::Balance,
            Expr::col(wallet::Column::Balance).add(amount),
        )
        .filter(wallet::Column::Id.eq(current.id))
        .exec(&txn)
        .await?;

    append_ledger(&txn, current.id, kind, amount, game_type).await?;
    txn.commit().await?;

    require_wallet(db, discord_id).await
}

async fn append_ledger<C>(
    db: &C,
    wallet_id: i64,
    kind: &str,
    amount: i64,
    game_type: Option<&str>,
) -> Result<wallet_transaction::Model>
where
    C: ConnectionTrait,
{
    let entry = wallet_transaction::ActiveModel {
        wallet_id: Set(wallet_id),
        kind: Set(kind.to_string()),
        amount: Set(amount),
        timestamp: Set(chrono::Utc::now()),
        game_type: Set(game_type.map(ToString::to_string)),
        ..Default::default()
    };
    entry.insert(db).await.map_err(Into::into)
}

/// Retrieves the full ledger for a wallet, newest first.
pub async fn get_ledger(
    db: &DatabaseConnection,
    wallet_id: i64,
) -> Result<Vec<wallet_transaction::Model>> {
    crate::entities::WalletTransaction::find()
        .filter(wallet_transaction::Column::WalletId.eq(wallet_id))
        .order_by_desc(wallet_transaction::Column::Timestamp)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_wallet, setup_test_db};

    #[tokio::test]
    async fn test_create_wallet_records_the_opening_deposit() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_wallet(&db, "user1", "Player One", 50_000).await?;

        assert_eq!(created.balance, 50_000);
        assert_eq!(created.total_wagered, 0);

        let ledger = get_ledger(&db, created.id).await?;
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].kind, "deposit");
        assert_eq!(ledger[0].amount, 50_000);
        assert_eq!(ledger[0].game_type, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_wallet_with_zero_balance_writes_no_ledger_row() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_wallet(&db, "user1", "Player One", 0).await?;

        let ledger = get_ledger(&db, created.id).await?;
        assert!(ledger.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_wallet_by_discord_id() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_wallet(&db, "user1", 50_000).await?;

        let found = get_wallet(&db, "user1").await?.unwrap();
        assert_eq!(found.discord_id, "user1");

        assert!(get_wallet(&db, "nobody").await?.is_none());
        let err = require_wallet(&db, "nobody").await.unwrap_err();
        assert!(matches!(err, Error::WalletNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_debit_bet_moves_balance_and_appends_ledger() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_wallet(&db, "user1", 50_000).await?;

        let after = debit_bet(&db, "user1", 10_000, "blackjack").await?;
        assert_eq!(after.balance, 40_000);
        assert_eq!(after.total_wagered, 10_000);

        let ledger = get_ledger(&db, after.id).await?;
        let bet_row = ledger.iter().find(|row| row.kind == "bet").unwrap();
        assert_eq!(bet_row.amount, 10_000);
        assert_eq!(bet_row.game_type.as_deref(), Some("blackjack"));

        Ok(())
    }

    #[tokio::test]
    async fn test_debit_bet_rejects_insufficient_balance() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_wallet(&db, "user1", 5_000).await?;

        let err = debit_bet(&db, "user1", 10_000, "blackjack").await.unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientFunds {
                balance: 5_000,
                required: 10_000
            }
        ));

        // Nothing changed and nothing was logged
        let wallet = require_wallet(&db, "user1").await?;
        assert_eq!(wallet.balance, 5_000);
        assert_eq!(wallet.total_wagered, 0);
        let ledger = get_ledger(&db, wallet.id).await?;
        assert!(ledger.iter().all(|row| row.kind != "bet"));

        Ok(())
    }

    #[tokio::test]
    async fn test_debit_bet_without_wallet_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let err = debit_bet(&db, "ghost", 10_000, "blackjack").await.unwrap_err();
        assert!(matches!(err, Error::WalletNotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_credit_payout_appends_a_win_row() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_wallet(&db, "user1", 40_000).await?;

        let after = credit_payout(&db, "user1", 25_000, "blackjack").await?;
        assert_eq!(after.balance, 65_000);
        // Credits never touch the wagered total
        assert_eq!(after.total_wagered, 0);

        let ledger = get_ledger(&db, after.id).await?;
        let win_row = ledger.iter().find(|row| row.kind == "win").unwrap();
        assert_eq!(win_row.amount, 25_000);
        assert_eq!(win_row.game_type.as_deref(), Some("blackjack"));

        Ok(())
    }

    #[tokio::test]
    async fn test_withdraw_is_checked_like_a_debit() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_wallet(&db, "user1", 20_000).await?;

        let after = withdraw(&db, "user1", 15_000).await?;
        assert_eq!(after.balance, 5_000);

        let err = withdraw(&db, "user1", 15_000).await.unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_deposit_adds_funds() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_wallet(&db, "user1", 1_000).await?;

        let after = deposit(&db, "user1", 9_000).await?;
        assert_eq!(after.balance, 10_000);

        let ledger = get_ledger(&db, after.id).await?;
        assert_eq!(ledger.iter().filter(|row| row.kind == "deposit").count(), 2);

        Ok(())
    }
}
