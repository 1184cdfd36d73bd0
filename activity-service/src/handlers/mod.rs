use std::sync::Arc;

pub mod activity_handlers;

/// Shared handler state: the activity and user stores.
pub struct AppState<A, U> {
    pub activities: Arc<A>,
    pub users: Arc<U>,
}

// Manual impl so `A`/`U` don't need to be `Clone` themselves.
impl<A, U> Clone for AppState<A, U> {
    fn clone(&self) -> Self {
        Self {
            activities: Arc::clone(&self.activities),
            users: Arc::clone(&self.users),
        }
    }
}
