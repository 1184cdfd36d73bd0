use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::User;
use crate::store::{StoreError, StoreResult, UserStore};

/// In-memory user store for handler tests.
#[derive(Default)]
pub struct MockUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_user(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn get_user(&self, id: &str) -> StoreResult<User> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
