//! General Discord commands - ping, help, and profile.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, current_customer},
        core::customer,
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
        let help_text = "**StorefrontBuddy Help**\n\
        Here is a summary of all available commands.\n\n\
        **Shopping**\n\
        • `/catalog` - Lists every product with its price.\n\
        • `/add_to_cart <product> [quantity]` - Puts a product in your cart.\n\
        • `/remove_from_cart <product>` - Takes one unit of a product out of your cart.\n\
        • `/cart` - Shows your cart, its total, and whether it ships.\n\
        • `/checkout <total> [address] [city] [state] [zipcode]` - Places your order.\n\
        • `/orders` - Lists your completed orders.\n\
        • `/profile [name] [email]` - Shows or updates your customer profile.\n\n\
        **Management Commands**\n\
        • `/product_manage <subcommand>` - Manage products (add, list, update, image, delete).\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows your customer profile, or updates its name and email.
    #[poise::command(slash_command)]
    pub async fn profile(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Display name to use on orders"] name: Option<String>,
        #[description = "Contact email"] email: Option<String>,
    ) -> Result<()> {
        let mut current = current_customer(ctx).await?;

        if name.is_some() || email.is_some() {
            let db = &ctx.data().database;
            current = customer::update_customer(
                db,
                current.id,
                name.or(current.name.clone()),
                email.unwrap_or(current.email.clone()),
            )
            .await?;
        }

        let email = if current.email.is_empty() {
            "_not set_"
        } else {
            current.email.as_str()
        };
        ctx.say(format!(
            "👤 **{}** (customer #{})\n📧 {email}",
            current.name.as_deref().unwrap_or("Unnamed"),
            current.id
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
