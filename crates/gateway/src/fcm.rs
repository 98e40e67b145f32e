//! FCM HTTP v1 adapter for the push transport.
//!
//! The v1 API has no single multicast call; like the Admin SDK's
//! `sendEachForMulticast`, the client sends one request per token and
//! aggregates the report. A rejected token becomes a failure entry in the
//! report, never an error for the dispatch as a whole.

use async_trait::async_trait;
use serde_json::{Value, json};

use ridecast_common::config::AppConfig;
use ridecast_common::error::AppError;
use ridecast_common::types::{MulticastReport, PushMessage, SendFailure};
use ridecast_notifier::transport::PushTransport;

/// Push transport backed by the FCM HTTP v1 API.
pub struct FcmClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    access_token: String,
}

impl FcmClient {
    pub fn new(http: reqwest::Client, config: &AppConfig) -> Self {
        Self {
            http,
            base_url: config.fcm_base_url.clone(),
            project_id: config.project_id.clone(),
            access_token: config.google_access_token.clone(),
        }
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.base_url, self.project_id
        )
    }
}

/// Request body for one `messages:send` call.
pub fn send_body(token: &str, message: &PushMessage) -> Value {
    json!({
        "message": {
            "token": token,
            "notification": {
                "title": message.title,
                "body": message.body,
            }
        }
    })
}

#[async_trait]
impl PushTransport for FcmClient {
    async fn send_multicast(&self, message: &PushMessage) -> Result<MulticastReport, AppError> {
        let mut report = MulticastReport {
            success_count: 0,
            failures: Vec::new(),
        };

        for token in &message.tokens {
            let result = self
                .http
                .post(self.send_url())
                .bearer_auth(&self.access_token)
                .json(&send_body(token, message))
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    report.success_count += 1;
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    tracing::debug!(%status, "FCM rejected token");
                    report.failures.push(SendFailure {
                        token: token.clone(),
                        reason: format!("{}: {}", status, body),
                    });
                }
                Err(e) => {
                    report.failures.push(SendFailure {
                        token: token.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_body_shape() {
        let message = PushMessage {
            title: "New Ride Available! 🚗".to_string(),
            body: "Destination: Lagos".to_string(),
            tokens: vec!["tokenB".to_string()],
        };
        let body = send_body("tokenB", &message);

        assert_eq!(body["message"]["token"], "tokenB");
        assert_eq!(body["message"]["notification"]["title"], message.title);
        assert_eq!(body["message"]["notification"]["body"], "Destination: Lagos");
    }

    #[test]
    fn test_send_url_includes_project() {
        let config = AppConfig {
            project_id: "rideshare-prod".to_string(),
            firestore_database: "(default)".to_string(),
            firestore_base_url: "https://firestore.googleapis.com".to_string(),
            users_collection: "users".to_string(),
            push_token_field: "pushToken".to_string(),
            fcm_base_url: "https://fcm.googleapis.com".to_string(),
            google_access_token: "test-token".to_string(),
            http_timeout_secs: 10,
            port: 8080,
        };
        let client = FcmClient::new(reqwest::Client::new(), &config);
        assert_eq!(
            client.send_url(),
            "https://fcm.googleapis.com/v1/projects/rideshare-prod/messages:send"
        );
    }
}
