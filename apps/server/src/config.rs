//! Runtime configuration, read once at startup.

/// Server configuration sourced from `PW_*` environment variables (a
/// `.env` file is honored when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let jwt_secret = std::env::var("PW_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("PW_JWT_SECRET not set; using an insecure development secret");
            "pennywise-dev-secret-change-me".to_string()
        });

        Config {
            listen_addr: std::env::var("PW_LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            db_path: std::env::var("PW_DB_PATH")
                .unwrap_or_else(|_| "./data/pennywise.db".to_string()),
            jwt_secret,
            token_ttl_hours: std::env::var("PW_TOKEN_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24 * 7),
        }
    }
}
