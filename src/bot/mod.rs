//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for StorefrontBuddy: slash
//! commands for the catalog, the cart and checkout, autocomplete handlers,
//! and the shared bot context.

/// Discord command implementations (catalog, cart, checkout, product management, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::media::MediaConfig,
    core::{customer, user},
    entities,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and the media settings used
/// to render product images.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Base URL for product images
    pub media: MediaConfig,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection, media: MediaConfig) -> Self {
        Self { database, media }
    }
}

/// Resolves the command author to a customer, registering them on first contact.
pub async fn current_customer(
    ctx: poise::Context<'_, BotData, Error>,
) -> Result<entities::customer::Model> {
    let db = &ctx.data().database;
    let author = ctx.author();
    let user_id = author.id.to_string();

    user::register_user(db, &user_id, &author.name).await?;
    customer::get_or_create_customer_for_user(db, &user_id, Some(author.name.clone())).await
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error:?}", ctx.command().name);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Connects to Discord and serves commands until the client stops.
///
/// # Errors
/// Returns an error if the client cannot be built or the gateway connection fails.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    // Slash commands only, no privileged intents needed
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}
