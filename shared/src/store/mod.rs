use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Activity, User};

pub mod dynamo;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Version conflict updating item: {0}")]
    VersionConflict(String),

    #[error("Store error: {0}")]
    InternalError(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistent collection of activity documents.
///
/// `update_activity` is a compare-and-swap: it takes a document carrying the
/// version that was read, persists it with the version bumped, and fails with
/// `StoreError::VersionConflict` if the stored version moved in between.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn get_activity(&self, id: &str) -> StoreResult<Activity>;

    async fn update_activity(&self, activity: Activity) -> StoreResult<Activity>;
}

/// Persistent collection of user documents, point lookup only.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: &str) -> StoreResult<User>;
}
