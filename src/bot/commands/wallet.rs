//! Wallet Discord commands - `/wallet`, `/wallet-create`, `/deposit`, `/withdraw`.
//!
//! `/wallet` shows the caller their own balance; the other three are
//! administrator tools for provisioning and adjusting player wallets.
//! Every adjustment is written to the append-only ledger.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use poise::serenity_prelude as serenity;

    use crate::{
        bot::{BotData, view},
        core::wallet,
        errors::{Error, Result},
    };

    /// Shows your wallet: balance and lifetime amount wagered.
    #[poise::command(slash_command)]
    pub async fn wallet(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let player_id = ctx.author().id.to_string();

        let Some(found) = wallet::get_wallet(&ctx.data().database, &player_id).await? else {
            ctx.send(
                poise::CreateReply::default()
                    .content("❌ You don't have a wallet yet. Ask an administrator to create one.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        };

        let embed = serenity::CreateEmbed::default()
            .title("🪪 Wallet")
            .colour(serenity::Colour::new(0x007c5a))
            .field("👤 Name", found.username.clone(), true)
            .field(
                "💰 Balance",
                format!("${}", view::format_amount(found.balance)),
                true,
            )
            .field(
                "🎲 Total Wagered",
                format!("${}", view::format_amount(found.total_wagered)),
                true,
            )
            .footer(serenity::CreateEmbedFooter::new("CasinoBuddy"));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Creates a wallet for a user, optionally with an opening balance.
    #[poise::command(
        slash_command,
        rename = "wallet-create",
        required_permissions = "ADMINISTRATOR"
    )]
    pub async fn wallet_create(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to create the wallet for"] user: serenity::User,
        #[description = "Opening balance (default 0)"] opening_balance: Option<i64>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let discord_id = user.id.to_string();
        let opening = opening_balance.unwrap_or(0);

        if opening < 0 {
            ctx.say("❌ Opening balance cannot be negative").await?;
            return Ok(());
        }

        if wallet::get_wallet(db, &discord_id).await?.is_some() {
            ctx.say(format!("❌ {} already has a wallet", user.name))
                .await?;
            return Ok(());
        }

        let created = wallet::create_wallet(db, &discord_id, &user.name, opening).await?;
        tracing::info!(
            discord_id,
            username = %created.username,
            balance = created.balance,
            "wallet created"
        );

        ctx.say(format!(
            "✅ Wallet created for {} with a balance of ${}",
            user.name,
            view::format_amount(created.balance)
        ))
        .await?;
        Ok(())
    }

    /// Adds funds to a user's wallet.
    #[poise::command(slash_command, required_permissions = "ADMINISTRATOR")]
    pub async fn deposit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to credit"] user: serenity::User,
        #[description = "Amount to add"] amount: i64,
    ) -> Result<()> {
        if amount <= 0 {
            ctx.say("❌ Amount must be greater than zero").await?;
            return Ok(());
        }

        let updated = wallet::deposit(&ctx.data().database, &user.id.to_string(), amount).await?;
        tracing::info!(discord_id = %user.id, amount, balance = updated.balance, "deposit");

        ctx.say(format!(
            "✅ Added ${} to {} - new balance ${}",
            view::format_amount(amount),
            user.name,
            view::format_amount(updated.balance)
        ))
        .await?;
        Ok(())
    }

    /// Removes funds from a user's wallet. Fails if the balance is too low.
    #[poise::command(slash_command, required_permissions = "ADMINISTRATOR")]
    pub async fn withdraw(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to debit"] user: serenity::User,
        #[description = "Amount to remove"] amount: i64,
    ) -> Result<()> {
        if amount <= 0 {
            ctx.say("❌ Amount must be greater than zero").await?;
            return Ok(());
        }

        let updated = wallet::withdraw(&ctx.data().database, &user.id.to_string(), amount).await?;
        tracing::info!(discord_id = %user.id, amount, balance = updated.balance, "withdrawal");

        ctx.say(format!(
            "✅ Removed ${} from {} - new balance ${}",
            view::format_amount(amount),
            user.name,
            view::format_amount(updated.balance)
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
