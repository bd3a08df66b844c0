use std::{env, time::Duration};
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://open.er-api.com/v6/latest";
pub const API_URL_ENV: &str = "EXCHANGE_API_URL";
pub static REQUEST_TIMEOUT: Duration = Duration::new(30, 0);
pub const USER_AGENT: &str = concat!("currency_converter/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    /// Builds the runtime configuration. A command-line override wins over
    /// `EXCHANGE_API_URL`, which wins over the public endpoint.
    pub fn load(api_url_override: Option<&str>) -> Self {
        let from_env = env::var(API_URL_ENV).ok();
        let config = Self::resolve(api_url_override, from_env.as_deref());
        debug!(api_url = %config.api_url, "Resolved configuration");
        config
    }

    pub fn resolve(api_url_override: Option<&str>, from_env: Option<&str>) -> Self {
        let api_url = api_url_override
            .or(from_env)
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        Config { api_url }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}
