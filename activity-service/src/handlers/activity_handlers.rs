use axum::{
    extract::{Extension, State},
    Json,
};
use gather_shared::models::{now_str, Activity, User};
use gather_shared::store::{ActivityStore, StoreError, UserStore};
use log::{debug, info};
use serde_json::json;

use crate::error::{AppError, Result};
use crate::handlers::AppState;
use crate::models::{
    ActivityIdRequest, ActivityResponse, RequestAction, RequestActionRequest, UserResponse,
};

// Helper to load an activity, mapping a missing document to the
// caller-facing not-found error.
async fn load_activity<A>(store: &A, id: &str) -> Result<Activity>
where
    A: ActivityStore,
{
    match store.get_activity(id).await {
        Ok(activity) => Ok(activity),
        Err(StoreError::NotFound(_)) => {
            Err(AppError::not_found("Activity not found".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

async fn load_user<U>(store: &U, id: &str) -> Result<User>
where
    U: UserStore,
{
    match store.get_user(id).await {
        Ok(user) => Ok(user),
        Err(StoreError::NotFound(_)) => Err(AppError::not_found("User not found".to_string())),
        Err(e) => Err(e.into()),
    }
}

// POST /activities/attend
pub async fn attend_activity<A, U>(
    State(state): State<AppState<A, U>>,
    Extension(user_id): Extension<String>,
    Json(payload): Json<ActivityIdRequest>,
) -> Result<Json<serde_json::Value>>
where
    A: ActivityStore,
    U: UserStore,
{
    let mut activity = load_activity(&*state.activities, &payload.id).await?;

    // Joining is idempotent: a user already attending or already queued gets
    // a success without touching the document.
    if activity.is_attending(&user_id) || activity.has_pending_request(&user_id) {
        debug!(
            "User {} already joined or requested activity {}",
            user_id, activity.id
        );
        return Ok(Json(json!({
            "success": true,
            "message": "Success",
            "data": {}
        })));
    }

    if activity.is_private_activity {
        activity.add_request(user_id.clone());
        info!(
            "Queued join request from user {} for private activity {}",
            user_id, activity.id
        );
    } else {
        activity.add_attendee(user_id.clone());
        info!("User {} joined activity {}", user_id, activity.id);
    }

    activity.updated_at = now_str();
    state.activities.update_activity(activity).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Success",
        "data": {}
    })))
}

// POST /activities/attend/cancel
pub async fn cancel_attending_activity<A, U>(
    State(state): State<AppState<A, U>>,
    Extension(user_id): Extension<String>,
    Json(payload): Json<ActivityIdRequest>,
) -> Result<Json<serde_json::Value>>
where
    A: ActivityStore,
    U: UserStore,
{
    let mut activity = load_activity(&*state.activities, &payload.id).await?;

    if !activity.is_attending(&user_id) {
        return Err(AppError::bad_request(
            "User is not attending this activity".to_string(),
        ));
    }

    activity.remove_attendee(&user_id);
    activity.updated_at = now_str();

    let updated = state.activities.update_activity(activity).await?;
    info!("User {} canceled attendance on activity {}", user_id, updated.id);

    Ok(Json(json!({
        "success": true,
        "message": "Successfully canceled attendance",
        "data": ActivityResponse::from(updated)
    })))
}

// POST /activities/requests/cancel
pub async fn cancel_request<A, U>(
    State(state): State<AppState<A, U>>,
    Extension(user_id): Extension<String>,
    Json(payload): Json<ActivityIdRequest>,
) -> Result<Json<serde_json::Value>>
where
    A: ActivityStore,
    U: UserStore,
{
    let mut activity = load_activity(&*state.activities, &payload.id).await?;

    if !activity.has_pending_request(&user_id) {
        return Err(AppError::bad_request(
            "User has no pending request for this activity".to_string(),
        ));
    }

    activity.remove_request(&user_id);
    activity.updated_at = now_str();

    state.activities.update_activity(activity).await?;
    info!(
        "User {} canceled join request for activity {}",
        user_id, payload.id
    );

    Ok(Json(json!({
        "success": true,
        "message": "Success",
        "data": {}
    })))
}

// POST /activities/requests
pub async fn get_activity_requests<A, U>(
    State(state): State<AppState<A, U>>,
    Extension(user_id): Extension<String>,
    Json(payload): Json<ActivityIdRequest>,
) -> Result<Json<serde_json::Value>>
where
    A: ActivityStore,
    U: UserStore,
{
    let activity = load_activity(&*state.activities, &payload.id).await?;

    if !activity.is_host(&user_id) {
        return Err(AppError::unauthorized(
            "You are not authorized to do this".to_string(),
        ));
    }

    if activity.attendees_requests.is_empty() {
        return Ok(Json(json!({
            "success": true,
            "message": "No requests for the activity",
            "data": {}
        })));
    }

    // Expand requester ids into full user records. Ids that no longer
    // resolve (deleted accounts) are dropped from the listing.
    let mut requests = Vec::with_capacity(activity.attendees_requests.len());
    for requester_id in &activity.attendees_requests {
        match state.users.get_user(requester_id).await {
            Ok(user) => requests.push(UserResponse::from(user)),
            Err(StoreError::NotFound(_)) => {
                debug!(
                    "Skipping stale requester id {} on activity {}",
                    requester_id, activity.id
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(Json(json!({
        "success": true,
        "message": "Success",
        "data": { "requests": requests }
    })))
}

// POST /activities/requests/action
pub async fn activity_request_action<A, U>(
    State(state): State<AppState<A, U>>,
    Extension(user_id): Extension<String>,
    Json(payload): Json<RequestActionRequest>,
) -> Result<Json<serde_json::Value>>
where
    A: ActivityStore,
    U: UserStore,
{
    let action: RequestAction = payload
        .action
        .parse()
        .map_err(|_| AppError::invalid_action("Invalid action".to_string()))?;

    let mut activity = load_activity(&*state.activities, &payload.id).await?;

    if !activity.is_host(&user_id) {
        return Err(AppError::unauthorized(
            "You are not authorized to do this".to_string(),
        ));
    }

    let target = load_user(&*state.users, &payload.user_id).await?;

    if !activity.has_pending_request(&target.id) {
        return Err(AppError::bad_request(
            "No request found by the user".to_string(),
        ));
    }

    if action == RequestAction::Accept {
        activity.add_attendee(target.id.clone());
    }
    // The request leaves the queue whether accepted or rejected.
    activity.remove_request(&target.id);
    activity.updated_at = now_str();

    state.activities.update_activity(activity).await?;
    info!(
        "Host {} {}ed join request from user {} on activity {}",
        user_id,
        payload.action,
        target.id,
        payload.id
    );

    Ok(Json(json!({
        "success": true,
        "message": "Success",
        "data": {}
    })))
}
