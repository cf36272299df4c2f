use crate::db::container::{Container, StoreError};
use crate::db::models::{Record, Stored, User};

pub async fn get_user(
    users: &dyn Container,
    email: &str,
) -> Result<Option<Stored<User>>, StoreError> {
    match users.read_item(email, email).await {
        Ok(doc) => Ok(Some(serde_json::from_value(doc)?)),
        Err(StoreError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Fails with [`StoreError::Conflict`] if a user with the same email exists.
pub async fn create_user(users: &dyn Container, user: &User) -> Result<Stored<User>, StoreError> {
    let doc = users
        .create_item(user.id(), user.partition_key(), serde_json::to_value(user)?)
        .await?;

    Ok(serde_json::from_value(doc)?)
}
