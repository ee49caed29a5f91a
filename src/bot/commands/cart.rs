//! Cart Discord commands - `add_to_cart`, `remove_from_cart`, and `cart`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, current_customer, handlers::autocomplete},
        core::{
            cart::{self, Cart},
            order,
            order_item::{self, CartAction},
            product,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Adds a product to your cart.
    #[poise::command(slash_command)]
    pub async fn add_to_cart(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to add"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
        #[description = "How many (defaults to 1)"] quantity: Option<i32>,
    ) -> Result<()> {
        let quantity = quantity.unwrap_or(1);
        if quantity <= 0 {
            ctx.say("❌ Quantity must be a positive number.").await?;
            return Ok(());
        }

        let db = &ctx.data().database;
        let Some(prod) = product::get_product_by_name(db, &name).await? else {
            ctx.say(&format!("❌ Product '{name}' not found. Try `/catalog`."))
                .await?;
            return Ok(());
        };

        let customer = current_customer(ctx).await?;
        let cart_order = order::get_or_create_cart(db, customer.id).await?;
        let line = order_item::add_item(db, cart_order.id, prod.id, quantity).await?;
        let cart = cart::load_cart(db, cart_order.id).await?;

        ctx.say(&format!(
            "✅ Added {quantity} × {} to your cart (now {} on this line). Cart: {} items, ${:.2}.",
            prod.name,
            line.quantity,
            cart.item_count(),
            cart.total()?
        ))
        .await?;
        Ok(())
    }

    /// Removes one unit of a product from your cart.
    #[poise::command(slash_command)]
    pub async fn remove_from_cart(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to remove"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(prod) = product::get_product_by_name(db, &name).await? else {
            ctx.say(&format!("❌ Product '{name}' not found.")).await?;
            return Ok(());
        };

        let customer = current_customer(ctx).await?;
        let cart_order = order::get_or_create_cart(db, customer.id).await?;
        let message =
            match order_item::update_item(db, cart_order.id, prod.id, CartAction::Remove).await? {
                Some(line) => format!("➖ {} × {} left in your cart.", line.quantity, prod.name),
                None => format!("🗑️ {} is no longer in your cart.", prod.name),
            };

        ctx.say(&message).await?;
        Ok(())
    }

    /// Shows the contents of your cart.
    #[poise::command(slash_command)]
    pub async fn cart(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let customer = current_customer(ctx).await?;
        let cart_order = order::get_or_create_cart(db, customer.id).await?;
        let cart = cart::load_cart(db, cart_order.id).await?;

        if cart.is_empty() {
            ctx.say("🛒 Your cart is empty. Browse with `/catalog`.")
                .await?;
            return Ok(());
        }

        ctx.send(poise::CreateReply::default().embed(cart_embed(&cart)?))
            .await?;
        Ok(())
    }

    /// Renders a cart with its lines and derived totals.
    pub(crate) fn cart_embed(cart: &Cart) -> Result<serenity::CreateEmbed> {
        let mut lines = String::new();
        for line in &cart.lines {
            match &line.product {
                Some(prod) => lines.push_str(&format!(
                    "• {} × {} @ ${:.2} = ${:.2}\n",
                    line.item.quantity,
                    prod.name,
                    prod.price,
                    line.item.total(prod)
                )),
                None => lines.push_str(&format!(
                    "• {} × _product no longer available_\n",
                    line.item.quantity
                )),
            }
        }

        let shipping = if cart.requires_shipping()? {
            "📦 Ships to you"
        } else {
            "💾 Digital only, nothing to ship"
        };

        Ok(serenity::CreateEmbed::default()
            .title(format!("🛒 Order #{}", cart.order.id))
            .color(0x0058_65F2)
            .description(lines)
            .field("Items", cart.item_count().to_string(), true)
            .field("Total", format!("${:.2}", cart.total()?), true)
            .field("Shipping", shipping, false))
    }
}

// Re-export all commands
pub use inner::*;
