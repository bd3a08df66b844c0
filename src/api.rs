use crate::config::{Config, REQUEST_TIMEOUT, USER_AGENT};
use crate::error::ConvertError;
use crate::models::{LatestRates, RateTable};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

/// Anything that can produce the rate table for a base currency.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self, base: &str) -> Result<RateTable, ConvertError>;
}

pub struct ExchangeRateApi {
    base_url: String,
    client: Client,
}

impl ExchangeRateApi {
    pub fn new(base_url: &str) -> Result<Self, ConvertError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(ExchangeRateApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConvertError> {
        Self::new(&config.api_url)
    }

    fn latest_url(&self, base: &str) -> String {
        format!("{}/{}", self.base_url, base)
    }
}

#[async_trait]
impl RateSource for ExchangeRateApi {
    #[instrument(name = "FetchRates", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &str) -> Result<RateTable, ConvertError> {
        let api_url = self.latest_url(base);
        debug!("Requesting exchange rates from {}", api_url);

        let response = self.client.get(&api_url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "Received exchange-rate response");

        match status {
            StatusCode::OK => {
                let latest: LatestRates = serde_json::from_str(&body)?;
                let table = latest.into_rate_table(base)?;
                debug!(rates = table.rates.len(), "Parsed rate table");
                Ok(table)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(ConvertError::RateLimited),
            _ => {
                // Error statuses usually still carry `{"result":"error","error-type":..}`.
                if let Ok(latest) = serde_json::from_str::<LatestRates>(&body) {
                    latest.into_rate_table(base)?;
                }
                Err(ConvertError::Status(status))
            }
        }
    }
}
