use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

use crate::error::ConvertError;

pub const RESULT_SUCCESS: &str = "success";

/// Body of `GET /v6/latest/{base}`.
#[derive(Serialize, Deserialize, Debug)]
pub struct LatestRates {
    pub result: String,
    #[serde(default)]
    pub base_code: Option<String>,
    #[serde(default)]
    pub rates: HashMap<String, f64>,
    #[serde(rename = "error-type", default)]
    pub error_type: Option<String>,
}

impl LatestRates {
    pub fn into_rate_table(self, requested_base: &str) -> Result<RateTable, ConvertError> {
        if self.result != RESULT_SUCCESS {
            let reason = self
                .error_type
                .unwrap_or_else(|| format!("result: {}", self.result));
            return Err(ConvertError::Api {
                base: requested_base.to_string(),
                reason,
            });
        }
        Ok(RateTable {
            base: self.base_code.unwrap_or_else(|| requested_base.to_string()),
            rates: self.rates,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub base: String,
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(base: &str, rates: HashMap<String, f64>) -> Self {
        RateTable {
            base: base.to_string(),
            rates,
        }
    }

    pub fn rate(&self, currency: &str) -> Result<f64, ConvertError> {
        self.rates
            .get(currency)
            .copied()
            .ok_or_else(|| ConvertError::MissingRate {
                base: self.base.clone(),
                currency: currency.to_string(),
            })
    }

    /// Rates ordered by currency code.
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut rates: Vec<(&str, f64)> = self
            .rates
            .iter()
            .map(|(code, rate)| (code.as_str(), *rate))
            .collect();
        rates.sort_by(|a, b| a.0.cmp(b.0));
        rates
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from_currency: String,
    pub to_currency: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, from_currency: &str, to_currency: &str) -> Self {
        ConversionRequest {
            amount,
            from_currency: normalize_code(from_currency),
            to_currency: normalize_code(to_currency),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub request: ConversionRequest,
    pub rate: f64,
    pub converted_amount: f64,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:?}` keeps the trailing `.0` on whole amounts.
        write!(
            f,
            "{:?} {} is equal to {:.2} {}",
            self.request.amount,
            self.request.from_currency,
            self.converted_amount,
            self.request.to_currency
        )
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

pub fn parse_amount(input: &str) -> Result<f64, ConvertError> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| ConvertError::InvalidAmount {
            input: input.trim().to_string(),
        })
}

pub fn convert(amount: f64, rate: f64) -> f64 {
    amount * rate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd_table() -> RateTable {
        RateTable::new(
            "USD",
            HashMap::from([("EUR".to_string(), 0.92), ("JPY".to_string(), 151.3)]),
        )
    }

    #[test]
    fn test_success_response_becomes_table() {
        let body = r#"{"result":"success","base_code":"USD","rates":{"USD":1,"EUR":0.92}}"#;
        let latest: LatestRates = serde_json::from_str(body).unwrap();
        let table = latest.into_rate_table("USD").unwrap();
        assert_eq!(table.base, "USD");
        assert_eq!(table.rates.len(), 2);
        assert_eq!(table.rate("EUR").unwrap(), 0.92);
    }

    #[test]
    fn test_error_response_is_not_a_table() {
        let latest: LatestRates = serde_json::from_str(r#"{"result":"error"}"#).unwrap();
        match latest.into_rate_table("USD") {
            Err(ConvertError::Api { base, reason }) => {
                assert_eq!(base, "USD");
                assert_eq!(reason, "result: error");
            }
            other => panic!("Expected an API error, got {other:?}"),
        }

        let latest: LatestRates =
            serde_json::from_str(r#"{"result":"error","error-type":"unsupported-code"}"#).unwrap();
        let err = latest.into_rate_table("XYZ").unwrap_err();
        assert!(matches!(err, ConvertError::Api { ref reason, .. } if reason == "unsupported-code"));
    }

    #[test]
    fn test_missing_rate() {
        let err = usd_table().rate("GBP").unwrap_err();
        assert_eq!(err.to_string(), "no GBP rate listed for base currency USD");
    }

    #[test]
    fn test_convert_is_plain_multiplication() {
        for (amount, rate) in [(100.0, 0.92), (0.0, 1.5), (12.34, 151.3), (1e9, 0.0001)] {
            assert_eq!(convert(amount, rate), amount * rate);
        }
    }

    #[test]
    fn test_request_normalizes_codes() {
        let request = ConversionRequest::new(5.0, " usd\n", "eUr");
        assert_eq!(request, ConversionRequest::new(5.0, "USD", "EUR"));
        assert_eq!(request.from_currency, "USD");
        assert_eq!(request.to_currency, "EUR");
    }

    #[test]
    fn test_conversion_line() {
        let request = ConversionRequest::new(100.0, "USD", "EUR");
        let conversion = Conversion {
            converted_amount: convert(request.amount, 0.92),
            rate: 0.92,
            request,
        };
        assert_eq!(conversion.to_string(), "100.0 USD is equal to 92.00 EUR");

        let request = ConversionRequest::new(12.5, "USD", "JPY");
        let conversion = Conversion {
            converted_amount: 0.0,
            rate: 0.0,
            request,
        };
        assert_eq!(conversion.to_string(), "12.5 USD is equal to 0.00 JPY");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 100\n").unwrap(), 100.0);
        assert_eq!(parse_amount("0.5").unwrap(), 0.5);
        let err = parse_amount("ten").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidAmount { ref input } if input == "ten"));
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_sorted_rates() {
        let table = usd_table();
        let sorted = table.sorted();
        assert_eq!(sorted, vec![("EUR", 0.92), ("JPY", 151.3)]);
    }
}
