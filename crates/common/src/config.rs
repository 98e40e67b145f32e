use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Google Cloud project that owns the Firestore database and FCM sender
    pub project_id: String,

    /// Firestore database id (default: "(default)")
    pub firestore_database: String,

    /// Firestore REST base URL (override for the emulator)
    pub firestore_base_url: String,

    /// Collection holding user records (default: "users")
    pub users_collection: String,

    /// Document field holding the device push token (default: "pushToken")
    pub push_token_field: String,

    /// FCM HTTP v1 base URL (override for tests)
    pub fcm_base_url: String,

    /// Pre-minted OAuth2 bearer token for Firestore and FCM calls.
    /// Minting and refresh belong to the hosting process, not this service.
    pub google_access_token: String,

    /// Outbound HTTP request timeout in seconds (default: 10)
    pub http_timeout_secs: u64,

    /// Port for the trigger endpoint (default: 8080)
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            project_id: std::env::var("FIRESTORE_PROJECT_ID")
                .map_err(|_| anyhow::anyhow!("FIRESTORE_PROJECT_ID environment variable is required"))?,
            firestore_database: std::env::var("FIRESTORE_DATABASE")
                .unwrap_or_else(|_| "(default)".to_string()),
            firestore_base_url: std::env::var("FIRESTORE_BASE_URL")
                .unwrap_or_else(|_| "https://firestore.googleapis.com".to_string()),
            users_collection: std::env::var("USERS_COLLECTION")
                .unwrap_or_else(|_| "users".to_string()),
            push_token_field: std::env::var("PUSH_TOKEN_FIELD")
                .unwrap_or_else(|_| "pushToken".to_string()),
            fcm_base_url: std::env::var("FCM_BASE_URL")
                .unwrap_or_else(|_| "https://fcm.googleapis.com".to_string()),
            google_access_token: std::env::var("GOOGLE_ACCESS_TOKEN")
                .map_err(|_| anyhow::anyhow!("GOOGLE_ACCESS_TOKEN environment variable is required"))?,
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a valid u64"))?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid u16"))?,
        })
    }
}
