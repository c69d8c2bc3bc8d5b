//! General Discord commands - ping and help.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**Billed Help**\n\
        Submit expense reports and follow their review.\n\n\
        **Employee Commands**\n\
        • `/newbill <type> <date> <amount> <receipt> [name] [vat] [pct] [commentary]` - Submits a new bill. The receipt must be a png, jpg or jpeg image.\n\
        • `/bills` - Lists your bills, newest first.\n\n\
        **Admin Commands**\n\
        • `/dashboard [status]` - Lists bills with the given status (pending by default).\n\
        • `/review <bill_id> <accept|refuse> [comment]` - Reviews a pending bill.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
