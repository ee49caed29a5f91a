//! Product Discord commands - `product_manage` and its subcommands.
//!
//! This module contains the shop keeper's commands for maintaining the catalog.
//! They are restricted to members who can manage the server.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{media, product},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for managing the product catalog.
    ///
    /// This command groups subcommands for adding, listing, updating, setting
    /// images on, and deleting products.
    #[poise::command(
        slash_command,
        default_member_permissions = "MANAGE_GUILD",
        subcommands(
            "product_add",
            "product_list",
            "product_update",
            "product_image",
            "product_delete"
        )
    )]
    pub async fn product_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Product management command. Available subcommands:\n\
            `/product_manage add` - Add a new product\n\
            `/product_manage list` - List all products\n\
            `/product_manage update` - Update a product's price or type\n\
            `/product_manage image` - Set or clear a product's image\n\
            `/product_manage delete` - Delete a product";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new product to the catalog.
    #[poise::command(slash_command, rename = "add")]
    pub async fn product_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product (e.g., 'Headphones')"] name: String,
        #[description = "Unit price (e.g., 79.99)"] price: f64,
        #[description = "Digital products never ship. Defaults to false."] digital: Option<bool>,
        #[description = "Image path relative to the media root"] image: Option<String>,
    ) -> Result<()> {
        if name.trim().is_empty() {
            ctx.say("❌ Product name cannot be empty.").await?;
            return Ok(());
        }
        if !price.is_finite() {
            ctx.say("❌ Invalid price: must be a valid number").await?;
            return Ok(());
        }

        let db = &ctx.data().database;
        if product::get_product_by_name(db, name.trim()).await?.is_some() {
            ctx.say(&format!("⚠️ A product named '{name}' already exists."))
                .await?;
            return Ok(());
        }

        let digital = digital.unwrap_or(false);
        match product::create_product(db, name.clone(), price, digital, image).await {
            Ok(created) => {
                let kind = if created.digital { "digital" } else { "physical" };
                ctx.say(&format!(
                    "✅ Product '{}' added at **${:.2}** ({kind}).",
                    created.name, created.price
                ))
                .await?;
            }
            Err(e) => {
                ctx.say(&format!(
                    "❌ Failed to add product '{name}'. Please try again later.",
                ))
                .await?;
                return Err(e);
            }
        }

        Ok(())
    }

    /// Lists all products with their prices, types, and image links.
    #[poise::command(slash_command, rename = "list")]
    pub async fn product_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let products = product::get_all_products(&data.database).await?;

        if products.is_empty() {
            ctx.say("No products have been defined yet. Use `/product_manage add` to create some!")
                .await?;
            return Ok(());
        }

        let embed_fields = products.iter().map(|prod| {
            let kind = if prod.digital { "Digital" } else { "Physical" };
            let image = match media::image_url(prod, &data.media) {
                Ok(Some(url)) => url,
                Ok(None) => "no image".to_string(),
                Err(e) => format!("⚠️ {e}"),
            };
            (
                format!("{} (${:.2})", prod.name, prod.price),
                format!("#{} · {kind} · {image}", prod.id),
                false,
            )
        });

        let list_embed = serenity::CreateEmbed::default()
            .title("**Product List**")
            .color(0x0058_65F2) // Discord purple
            .fields(embed_fields);

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }

    /// Updates the price and/or type of an existing product.
    #[poise::command(slash_command, rename = "update")]
    pub async fn product_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to update"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "New unit price"] price: Option<f64>,
        #[description = "Whether the product is digital"] digital: Option<bool>,
    ) -> Result<()> {
        if price.is_some_and(|p| !p.is_finite()) {
            ctx.say("❌ Invalid price: must be a valid number").await?;
            return Ok(());
        }

        let db = &ctx.data().database;
        let Some(existing) = product::get_product_by_name(db, &name).await? else {
            ctx.say(&format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        let new_price = price.unwrap_or(existing.price);
        let new_digital = digital.unwrap_or(existing.digital);
        let result =
            product::update_product(db, existing.id, existing.name.clone(), new_price, new_digital)
                .await;
        match result {
            Ok(updated) => {
                let kind = if updated.digital { "digital" } else { "physical" };
                ctx.say(&format!(
                    "✅ Product '{name}' is now **${:.2}** ({kind}).",
                    updated.price
                ))
                .await?;
            }
            Err(e) => {
                ctx.say(&format!("❌ Failed to update product '{name}'."))
                    .await?;
                return Err(e);
            }
        }

        Ok(())
    }

    /// Sets a product's image path, or clears it when no path is given.
    #[poise::command(slash_command, rename = "image")]
    pub async fn product_image(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "Image path relative to the media root; omit to clear"] path: Option<
            String,
        >,
    ) -> Result<()> {
        let data = ctx.data();
        let Some(existing) = product::get_product_by_name(&data.database, &name).await? else {
            ctx.say(&format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        let updated = product::set_product_image(&data.database, existing.id, path).await?;
        let message = match media::image_url(&updated, &data.media) {
            Ok(Some(url)) => format!("✅ Image for '{name}' set to {url}"),
            Ok(None) => format!("✅ Image for '{name}' cleared."),
            Err(e) => format!("⚠️ Image for '{name}' saved but it cannot be served: {e}"),
        };
        ctx.say(&message).await?;
        Ok(())
    }

    /// Deletes a product from the catalog by its name.
    ///
    /// Orders that contained the product keep their lines, without a product.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn product_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product to delete"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(existing) = product::get_product_by_name(db, &name).await? else {
            ctx.say(&format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        match product::delete_product(db, existing.id).await {
            Ok(_) => {
                ctx.say(&format!("✅ Product '{name}' has been deleted."))
                    .await?;
            }
            Err(e) => {
                ctx.say(&format!("❌ Failed to delete product '{name}'."))
                    .await?;
                return Err(e);
            }
        }

        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
