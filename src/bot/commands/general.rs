//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**CasinoBuddy Help**\n\
        Here is a summary of all available commands.\n\n\
        **Playing**\n\
        • `/blackjack <bet>` - Deals a blackjack hand for the given bet. \
        Use the buttons on the game message to hit or stand.\n\
        • `/wallet` - Shows your balance and total amount wagered.\n\n\
        **Administration**\n\
        • `/wallet-create <user> [opening_balance]` - Creates a wallet for a user.\n\
        • `/deposit <user> <amount>` - Adds funds to a user's wallet.\n\
        • `/withdraw <user> <amount>` - Removes funds from a user's wallet.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
