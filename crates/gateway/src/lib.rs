//! Production adapters for the fan-out notifier: a Firestore REST client
//! for the user directory and an FCM HTTP v1 client for push delivery.

pub mod fcm;
pub mod firestore;

/// Build the shared outbound HTTP client.
pub fn http_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
}
