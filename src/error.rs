use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a conversion. The result line is only ever
/// printed from the `Ok` side.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid amount '{input}': expected a number")]
    InvalidAmount { input: String },
    #[error("input closed before {field} was entered")]
    InputClosed { field: &'static str },
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("request to exchange-rate service failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("exchange-rate service returned HTTP {0}")]
    Status(StatusCode),
    #[error("exchange-rate service rate limit exceeded")]
    RateLimited,
    #[error("malformed response from exchange-rate service: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Unable to fetch conversion rate for {base} ({reason})")]
    Api { base: String, reason: String },
    #[error("no {currency} rate listed for base currency {base}")]
    MissingRate { base: String, currency: String },
}

impl ConvertError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::InvalidAmount { .. } | ConvertError::InputClosed { .. } => 2,
            _ => 1,
        }
    }
}
