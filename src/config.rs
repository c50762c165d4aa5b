use dotenvy::dotenv;
use std::env;

/// Runtime configuration, passed explicitly to the components that need it.
/// Nothing in this crate reads the environment after `from_env` returns.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub admin_api_key: String,
    pub auth_token: Option<String>,
    pub tenant_id: Option<String>,
    pub currency_code: String,
    pub low_stock_threshold: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
            admin_api_key: env::var("ADMIN_API_KEY").unwrap_or_default(),
            auth_token: env::var("AUTH_TOKEN").ok(),
            tenant_id: env::var("TENANT_ID").ok(),
            currency_code: env::var("CURRENCY_CODE").unwrap_or_else(|_| "INR".to_string()),
            low_stock_threshold: env::var("LOW_STOCK_THRESHOLD")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("LOW_STOCK_THRESHOLD must be a number"),
        }
    }

    /// Replace the bearer token after a login or a forced logout.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}
