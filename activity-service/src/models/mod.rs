use gather_shared::models::{Activity, User};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Request DTOs

#[derive(Deserialize, Debug)]
pub struct ActivityIdRequest {
    pub id: String,
}

#[derive(Deserialize, Debug)]
pub struct RequestActionRequest {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Parsed into `RequestAction` by the handler so an unknown value maps to
    /// the service's own error instead of a deserialization rejection.
    pub action: String,
}

/// Host decision on a pending join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Accept,
    Reject,
}

impl FromStr for RequestAction {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "accept" => Ok(RequestAction::Accept),
            "reject" => Ok(RequestAction::Reject),
            _ => Err(()),
        }
    }
}

// Response DTOs

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: String,
    pub host: String,
    pub is_private_activity: bool,
    pub attendees: u32,
    pub attendees_ids: Vec<String>,
    pub attendees_requests: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            host: activity.host,
            is_private_activity: activity.is_private_activity,
            attendees: activity.attendees,
            attendees_ids: activity.attendees_ids,
            attendees_requests: activity.attendees_requests,
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
