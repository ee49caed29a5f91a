//! Catalog Discord command - browsing products.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{media, product},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Lists every product for sale.
    #[poise::command(slash_command)]
    pub async fn catalog(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let products = product::get_all_products(&data.database).await?;

        if products.is_empty() {
            ctx.say("🛒 The shop is empty right now. Check back later!")
                .await?;
            return Ok(());
        }

        // Discord caps embeds at 25 fields
        let mut embed = serenity::CreateEmbed::default()
            .title("🛍️ Catalog")
            .color(0x0057_F287)
            .fields(products.iter().take(25).map(|prod| {
                let tag = if prod.digital { "💾 digital" } else { "📦 ships" };
                (
                    format!("{} · ${:.2}", prod.name, prod.price),
                    tag.to_string(),
                    true,
                )
            }));

        if let Some(url) = products
            .iter()
            .map(|prod| media::image_url_or_empty(prod, &data.media))
            .find(|url| url.starts_with("http"))
        {
            embed = embed.thumbnail(url);
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
