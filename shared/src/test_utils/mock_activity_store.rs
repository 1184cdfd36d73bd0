use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::Activity;
use crate::store::{ActivityStore, StoreError, StoreResult};

/// In-memory activity store for handler tests. Enforces the same
/// compare-and-swap discipline as the DynamoDB store so version conflicts
/// are exercised in tests.
#[derive(Default)]
pub struct MockActivityStore {
    activities: RwLock<HashMap<String, Activity>>,
}

impl MockActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an activity directly, bypassing the version check.
    pub async fn put_activity(&self, activity: Activity) {
        self.activities
            .write()
            .await
            .insert(activity.id.clone(), activity);
    }
}

#[async_trait]
impl ActivityStore for MockActivityStore {
    async fn get_activity(&self, id: &str) -> StoreResult<Activity> {
        self.activities
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update_activity(&self, mut activity: Activity) -> StoreResult<Activity> {
        let mut activities = self.activities.write().await;

        // Mirrors the DynamoDB condition: a version-0 write lands whether or
        // not the item exists; any later version must match the stored one.
        match activities.get(&activity.id) {
            None if activity.version != 0 => Err(StoreError::VersionConflict(activity.id.clone())),
            Some(current) if current.version != activity.version => {
                Err(StoreError::VersionConflict(activity.id.clone()))
            }
            _ => {
                activity.version += 1;
                activities.insert(activity.id.clone(), activity.clone());
                Ok(activity)
            }
        }
    }
}
