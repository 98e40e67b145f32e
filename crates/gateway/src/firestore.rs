//! Firestore REST adapter for the user directory.
//!
//! One `documents:runQuery` call per fan-out with a unary `IS_NOT_NULL`
//! filter on the push-token field. The store-side filter excludes documents
//! where the field is null or entirely absent, matching the pipeline's own
//! eligibility rule.

use async_trait::async_trait;
use serde_json::{Value, json};

use ridecast_common::config::AppConfig;
use ridecast_common::error::AppError;
use ridecast_common::types::UserRecord;
use ridecast_notifier::directory::UserDirectory;

/// User directory backed by the Firestore REST API.
pub struct FirestoreDirectory {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    database: String,
    collection: String,
    token_field: String,
    access_token: String,
}

impl FirestoreDirectory {
    pub fn new(http: reqwest::Client, config: &AppConfig) -> Self {
        Self {
            http,
            base_url: config.firestore_base_url.clone(),
            project_id: config.project_id.clone(),
            database: config.firestore_database.clone(),
            collection: config.users_collection.clone(),
            token_field: config.push_token_field.clone(),
            access_token: config.google_access_token.clone(),
        }
    }

    fn run_query_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents:runQuery",
            self.base_url, self.project_id, self.database
        )
    }

    fn query_body(&self) -> Value {
        json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.collection }],
                "where": {
                    "unaryFilter": {
                        "op": "IS_NOT_NULL",
                        "field": { "fieldPath": self.token_field }
                    }
                }
            }
        })
    }
}

#[async_trait]
impl UserDirectory for FirestoreDirectory {
    async fn users_with_push_tokens(&self) -> Result<Vec<UserRecord>, AppError> {
        let response = self
            .http
            .post(self.run_query_url())
            .bearer_auth(&self.access_token)
            .json(&self.query_body())
            .send()
            .await
            .map_err(|e| AppError::Directory(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Directory(format!(
                "runQuery returned {}: {}",
                status, body
            )));
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| AppError::Directory(e.to_string()))?;

        let users = parse_query_response(&rows, &self.token_field);
        tracing::debug!(user_count = users.len(), "User directory scan complete");
        Ok(users)
    }
}

/// Map a `runQuery` response onto user records.
///
/// Each result row wraps a document; the document id (last path segment of
/// `name`) is the user id, and the token is read as a string field. Rows
/// without a document (runQuery emits a trailing readTime-only row) are
/// skipped, and a null token field yields `None`.
pub fn parse_query_response(rows: &[Value], token_field: &str) -> Vec<UserRecord> {
    rows.iter()
        .filter_map(|row| row.get("document"))
        .filter_map(|doc| {
            let name = doc.get("name")?.as_str()?;
            let user_id = name.rsplit('/').next()?.to_string();
            let push_token = doc
                .pointer(&format!("/fields/{}/stringValue", token_field))
                .and_then(Value::as_str)
                .map(str::to_owned);
            Some(UserRecord {
                user_id,
                push_token,
            })
        })
        .collect()
}
