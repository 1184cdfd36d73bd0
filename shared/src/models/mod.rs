use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Returns the current time as an RFC 3339 string, the format used for all
/// persisted timestamps.
pub fn now_str() -> String {
    Utc::now().to_rfc3339()
}

/// An activity document. Created and deleted elsewhere; the attendance
/// service only reads it and rewrites the membership fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub host: String,
    pub is_private_activity: bool,
    /// Attendee count, kept equal to `attendees_ids.len()` by the mutation
    /// helpers below.
    pub attendees: u32,
    #[serde(default)]
    pub attendees_ids: Vec<String>,
    #[serde(default)]
    pub attendees_requests: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Optimistic concurrency token; bumped by the store on every update.
    #[serde(default)]
    pub version: u64,
}

impl Activity {
    pub fn is_host(&self, user_id: &str) -> bool {
        self.host == user_id
    }

    pub fn is_attending(&self, user_id: &str) -> bool {
        self.attendees_ids.iter().any(|id| id == user_id)
    }

    pub fn has_pending_request(&self, user_id: &str) -> bool {
        self.attendees_requests.iter().any(|id| id == user_id)
    }

    /// Adds a user to the attendee list. Membership is a set: adding an
    /// existing attendee is a no-op. The counter is resynced either way.
    pub fn add_attendee(&mut self, user_id: String) {
        if !self.is_attending(&user_id) {
            self.attendees_ids.push(user_id);
        }
        self.sync_attendee_count();
    }

    pub fn remove_attendee(&mut self, user_id: &str) {
        self.attendees_ids.retain(|id| id != user_id);
        self.sync_attendee_count();
    }

    pub fn add_request(&mut self, user_id: String) {
        if !self.has_pending_request(&user_id) {
            self.attendees_requests.push(user_id);
        }
    }

    pub fn remove_request(&mut self, user_id: &str) {
        self.attendees_requests.retain(|id| id != user_id);
    }

    fn sync_attendee_count(&mut self) {
        self.attendees = self.attendees_ids.len() as u32;
    }
}

/// A user document. The attendance service only checks existence and expands
/// pending requester ids into these records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_activity() -> Activity {
        Activity {
            id: "activity-1".to_string(),
            host: "host-1".to_string(),
            is_private_activity: false,
            attendees: 2,
            attendees_ids: vec!["u1".to_string(), "u2".to_string()],
            attendees_requests: vec!["u5".to_string()],
            created_at: now_str(),
            updated_at: now_str(),
            version: 0,
        }
    }

    #[test]
    fn add_attendee_appends_and_syncs_count() {
        let mut activity = test_activity();
        activity.add_attendee("u3".to_string());

        assert_eq!(activity.attendees_ids, vec!["u1", "u2", "u3"]);
        assert_eq!(activity.attendees, 3);
    }

    #[test]
    fn add_attendee_is_idempotent() {
        let mut activity = test_activity();
        activity.add_attendee("u1".to_string());

        assert_eq!(activity.attendees_ids, vec!["u1", "u2"]);
        assert_eq!(activity.attendees, 2);
    }

    #[test]
    fn remove_attendee_syncs_count() {
        let mut activity = test_activity();
        activity.remove_attendee("u1");

        assert_eq!(activity.attendees_ids, vec!["u2"]);
        assert_eq!(activity.attendees, 1);
    }

    #[test]
    fn remove_attendee_resyncs_stale_counter() {
        // A legacy document whose counter drifted from the list.
        let mut activity = test_activity();
        activity.attendees = 7;

        activity.remove_attendee("u2");

        assert_eq!(activity.attendees, 1);
    }

    #[test]
    fn deserializes_documents_without_version_field() {
        // Documents written before versioning was introduced.
        let json = serde_json::json!({
            "id": "activity-1",
            "host": "host-1",
            "isPrivateActivity": true,
            "attendees": 1,
            "attendeesIds": ["u1"],
            "attendeesRequests": [],
            "createdAt": now_str(),
            "updatedAt": now_str(),
        });

        let activity: Activity = serde_json::from_value(json).unwrap();
        assert_eq!(activity.version, 0);
    }

    #[test]
    fn request_queue_is_a_set() {
        let mut activity = test_activity();
        activity.add_request("u5".to_string());
        activity.add_request("u6".to_string());

        assert_eq!(activity.attendees_requests, vec!["u5", "u6"]);

        activity.remove_request("u5");
        assert_eq!(activity.attendees_requests, vec!["u6"]);
        // Removing a request never touches the attendee side.
        assert_eq!(activity.attendees, 2);
    }
}
