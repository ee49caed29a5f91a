//! User operations - Registering and removing the Discord accounts customers link to.

use crate::{
    entities::{Customer, User, customer, user},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Retrieves a user by Discord ID.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: &str) -> Result<Option<user::Model>> {
    User::find_by_id(user_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a user, or returns the existing record if the ID is already known.
///
/// # Errors
/// Returns an error if the ID is blank or the database operation fails.
#[instrument(skip(db))]
pub async fn register_user(
    db: &DatabaseConnection,
    user_id: &str,
    username: &str,
) -> Result<user::Model> {
    if user_id.trim().is_empty() {
        return Err(Error::Config {
            message: "User ID cannot be empty".to_string(),
        });
    }

    if let Some(existing) = get_user_by_id(db, user_id).await? {
        return Ok(existing);
    }

    let user = user::ActiveModel {
        id: Set(user_id.to_string()),
        username: Set(username.to_string()),
        joined_at: Set(chrono::Utc::now()),
    };
    let user = user.insert(db).await?;
    info!("Registered user {} ({})", user.username, user.id);
    Ok(user)
}

/// Deletes a user and the customer profile linked to it.
///
/// The customer's orders and addresses are kept with their customer reference
/// cleared. Returns `false` if no such user exists.
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, user_id: &str) -> Result<bool> {
    let txn = db.begin().await?;

    let Some(user) = User::find_by_id(user_id.to_string()).one(&txn).await? else {
        return Ok(false);
    };

    if let Some(customer) = Customer::find()
        .filter(customer::Column::UserId.eq(user_id))
        .one(&txn)
        .await?
    {
        crate::core::customer::delete_customer_in(&txn, customer.id).await?;
    }

    user.delete(&txn).await?;
    txn.commit().await?;

    info!("Deleted user {user_id}");
    Ok(true)
}
