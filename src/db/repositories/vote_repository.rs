use crate::db::container::{Container, StoreError};
use crate::db::models::{Record, Stored, Vote};
use serde_json::Value;

pub async fn upsert_vote(votes: &dyn Container, vote: &Vote) -> Result<Stored<Vote>, StoreError> {
    let doc = votes
        .upsert_item(vote.id(), vote.partition_key(), serde_json::to_value(vote)?)
        .await?;

    Ok(serde_json::from_value(doc)?)
}

/// Stored documents are passed through as-is, so a document of another shape
/// written by a different client still lists instead of failing the scan.
pub async fn get_all_votes(votes: &dyn Container) -> Result<Vec<Value>, StoreError> {
    let docs = votes.read_all_items().await?;
    debug!("Scanned {} items from {}", docs.len(), votes.name());

    Ok(docs)
}
