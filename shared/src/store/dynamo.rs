use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use log::debug;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_item};
use std::env;

use crate::models::{Activity, User};
use crate::store::{ActivityStore, StoreError, StoreResult, UserStore};

const DEFAULT_ACTIVITIES_TABLE: &str = "activities";
const DEFAULT_USERS_TABLE: &str = "users";

// Documents written before versioning carry no `version` attribute and
// deserialize as version 0; the first conditional write must accept them.
fn version_condition(expected_version: u64) -> &'static str {
    if expected_version == 0 {
        "attribute_not_exists(#v) OR #v = :expected"
    } else {
        "#v = :expected"
    }
}

/// DynamoDB-backed activity store. One document per activity, whole-document
/// writes guarded by a condition on the `version` attribute.
pub struct DynamoActivityStore {
    client: Client,
    table_name: String,
}

impl DynamoActivityStore {
    pub async fn new() -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        let table_name =
            env::var("ACTIVITIES_TABLE_NAME").unwrap_or_else(|_| DEFAULT_ACTIVITIES_TABLE.into());
        Self {
            client: Client::new(&config),
            table_name,
        }
    }

    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl ActivityStore for DynamoActivityStore {
    async fn get_activity(&self, id: &str) -> StoreResult<Activity> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::InternalError(e.to_string()))?;

        match response.item {
            Some(item) => {
                from_item(item).map_err(|e| StoreError::InternalError(e.to_string()))
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn update_activity(&self, mut activity: Activity) -> StoreResult<Activity> {
        let expected_version = activity.version;
        activity.version += 1;

        let item = to_item(&activity).map_err(|e| StoreError::InternalError(e.to_string()))?;

        debug!(
            "Updating activity id={} version {} -> {}",
            activity.id, expected_version, activity.version
        );

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression(version_condition(expected_version))
            .expression_attribute_names("#v", "version")
            .expression_attribute_values(":expected", AttributeValue::N(expected_version.to_string()))
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    StoreError::VersionConflict(activity.id.clone())
                } else {
                    StoreError::InternalError(service_error.to_string())
                }
            })?;

        Ok(activity)
    }
}

/// DynamoDB-backed user store.
pub struct DynamoUserStore {
    client: Client,
    table_name: String,
}

impl DynamoUserStore {
    pub async fn new() -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        let table_name =
            env::var("USERS_TABLE_NAME").unwrap_or_else(|_| DEFAULT_USERS_TABLE.into());
        Self {
            client: Client::new(&config),
            table_name,
        }
    }

    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl UserStore for DynamoUserStore {
    async fn get_user(&self, id: &str) -> StoreResult<User> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::InternalError(e.to_string()))?;

        match response.item {
            Some(item) => {
                from_item(item).map_err(|e| StoreError::InternalError(e.to_string()))
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_condition_accepts_unversioned_documents() {
        assert_eq!(
            version_condition(0),
            "attribute_not_exists(#v) OR #v = :expected"
        );
    }

    #[test]
    fn later_writes_require_matching_version() {
        assert_eq!(version_condition(1), "#v = :expected");
        assert_eq!(version_condition(42), "#v = :expected");
    }
}
