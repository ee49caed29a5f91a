//! Checkout Discord commands - `checkout` and `orders`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, current_customer},
        core::{
            cart,
            checkout::{self, CheckoutRequest},
            order,
            shipping::NewShippingAddress,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Places your order.
    ///
    /// The total must match the cart total shown by `/cart`. An address is
    /// only needed when the cart holds physical products.
    #[poise::command(slash_command)]
    pub async fn checkout(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The cart total you agree to pay"] total: f64,
        #[description = "Street address"] address: Option<String>,
        #[description = "City"] city: Option<String>,
        #[description = "State or region"] state: Option<String>,
        #[description = "Postal code"] zipcode: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let customer = current_customer(ctx).await?;
        let cart_order = order::get_or_create_cart(db, customer.id).await?;

        let shipping = match (address, city, state, zipcode) {
            (Some(address), Some(city), Some(state), Some(zipcode)) => Some(NewShippingAddress {
                address,
                city,
                state,
                zipcode,
            }),
            (None, None, None, None) => None,
            _ => {
                ctx.say("❌ Please give the full address: address, city, state and zipcode.")
                    .await?;
                return Ok(());
            }
        };

        let request = CheckoutRequest {
            submitted_total: total,
            transaction_id: Some(format!("discord-{}", ctx.id())),
            shipping,
        };

        match checkout::process_order(db, cart_order.id, request).await {
            Ok(receipt) if receipt.is_complete() => {
                let mut embed = serenity::CreateEmbed::default()
                    .title(format!("✅ Order #{} placed", receipt.order.id))
                    .color(0x0057_F287)
                    .field("Items", receipt.item_count.to_string(), true)
                    .field("Paid", format!("${:.2}", receipt.cart_total), true)
                    .field(
                        "Transaction",
                        receipt.order.transaction_id.clone().unwrap_or_default(),
                        false,
                    );
                if let Some(addr) = &receipt.shipping_address {
                    embed = embed.field(
                        "Shipping to",
                        format!(
                            "{}\n{}, {} {}",
                            addr.address, addr.city, addr.state, addr.zipcode
                        ),
                        false,
                    );
                }
                ctx.send(poise::CreateReply::default().embed(embed)).await?;
            }
            Ok(receipt) => {
                ctx.say(&format!(
                    "⚠️ Your cart total is **${:.2}**, not ${total:.2}. Check `/cart` and try again.",
                    receipt.cart_total
                ))
                .await?;
            }
            Err(Error::EmptyCart { .. }) => {
                ctx.say("🛒 Your cart is empty.").await?;
            }
            Err(Error::ShippingAddressRequired { .. }) => {
                ctx.say("📦 Your cart has physical products, please include a shipping address.")
                    .await?;
            }
            Err(Error::Config { message }) => {
                ctx.say(&format!("❌ {message}")).await?;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Lists your completed orders.
    #[poise::command(slash_command)]
    pub async fn orders(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let customer = current_customer(ctx).await?;
        let placed = order::get_completed_orders_for_customer(db, customer.id).await?;

        if placed.is_empty() {
            ctx.say("You have not placed any orders yet.").await?;
            return Ok(());
        }

        let mut fields = Vec::new();
        for placed_order in placed.iter().take(25) {
            let summary = cart::load_cart(db, placed_order.id).await?;
            let total = summary
                .total()
                .map_or_else(|_| "n/a".to_string(), |t| format!("${t:.2}"));
            fields.push((
                format!(
                    "Order #{} · {}",
                    placed_order.id,
                    placed_order.date_ordered.format("%Y-%m-%d")
                ),
                format!("{} items · {total}", summary.item_count()),
                false,
            ));
        }

        let embed = serenity::CreateEmbed::default()
            .title("📜 Your orders")
            .color(0x0058_65F2)
            .fields(fields);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
