use std::env;

use crate::models::currency::DEFAULT_RATE;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const CHAT_MODEL: &str = "gemini-3-flash-preview";
const OPTIMIZER_MODEL: &str = "gemini-3-pro-preview";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub chat_model: String,
    pub optimizer_model: String,
    pub default_exchange_rate: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            gemini_api_key: None,
            gemini_api_url: GEMINI_API_URL.to_string(),
            chat_model: CHAT_MODEL.to_string(),
            optimizer_model: OPTIMIZER_MODEL.to_string(),
            default_exchange_rate: DEFAULT_RATE,
        }
    }
}

impl AppConfig {
    /// Reads the process environment; anything missing or unparseable keeps
    /// its default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        let default_exchange_rate = env::var("DEFAULT_EXCHANGE_RATE")
            .ok()
            .and_then(|r| r.trim().parse::<f64>().ok())
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(defaults.default_exchange_rate);

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            gemini_api_key,
            gemini_api_url: env::var("GEMINI_API_URL").unwrap_or(defaults.gemini_api_url),
            chat_model: env::var("GEMINI_CHAT_MODEL").unwrap_or(defaults.chat_model),
            optimizer_model: env::var("GEMINI_OPTIMIZER_MODEL").unwrap_or(defaults.optimizer_model),
            default_exchange_rate,
        }
    }
}
