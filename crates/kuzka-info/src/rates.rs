//! Exchange rates from the CBR daily feed.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{InfoError, Result};

/// One currency in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Quote {
    #[serde(rename = "Value")]
    pub value: f64,
    #[serde(rename = "Previous")]
    pub previous: f64,
}

impl Quote {
    /// Change since the previous trading day.
    pub fn change(&self) -> f64 {
        self.value - self.previous
    }
}

/// The parts of `daily_json.js` the bot uses.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyFeed {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Valute")]
    pub valute: HashMap<String, Quote>,
}

impl DailyFeed {
    fn quote(&self, code: &str) -> Result<Quote> {
        self.valute
            .get(code)
            .copied()
            .ok_or_else(|| InfoError::MissingRate(code.to_string()))
    }
}

/// Dollar and euro rates announced to the group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyRates {
    pub usd: Quote,
    pub eur: Quote,
}

impl TryFrom<DailyFeed> for CurrencyRates {
    type Error = InfoError;

    fn try_from(feed: DailyFeed) -> Result<Self> {
        Ok(Self {
            usd: feed.quote("USD")?,
            eur: feed.quote("EUR")?,
        })
    }
}

/// Formats a rate line: two decimals, `+` when the rate rose.
fn line(symbol: &str, name: &str, quote: &Quote) -> String {
    let sign = if quote.value > quote.previous { "+" } else { "" };
    format!("{symbol} {name}: {:.2} ({sign}{:.2})", quote.value, quote.change())
}

/// Body of the announcement, one line per currency.
pub fn format_rates(rates: &CurrencyRates) -> String {
    format!(
        "{}\n{}",
        line("💵", "Доллар", &rates.usd),
        line("💶", "Евро", &rates.eur)
    )
}

/// Where rates come from.
#[async_trait]
pub trait RatesSource: Send + Sync {
    async fn fetch(&self) -> Result<CurrencyRates>;
}

/// Reads the public CBR mirror.
pub struct CbrClient {
    client: reqwest::Client,
    url: Url,
}

impl CbrClient {
    pub fn new(url: Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl RatesSource for CbrClient {
    async fn fetch(&self) -> Result<CurrencyRates> {
        // The feed is served as application/javascript, so parse the body by hand
        let body = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let feed: DailyFeed = serde_json::from_str(&body)
            .map_err(|e| InfoError::HttpError(format!("unexpected feed format: {}", e)))?;
        debug!(date = ?feed.date, "Fetched CBR feed");
        CurrencyRates::try_from(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Date": "2024-05-17T11:30:00+03:00",
        "PreviousDate": "2024-05-16T11:30:00+03:00",
        "Valute": {
            "USD": {"ID": "R01235", "CharCode": "USD", "Nominal": 1, "Name": "Доллар США",
                    "Value": 92.5058, "Previous": 92.1653},
            "EUR": {"ID": "R01239", "CharCode": "EUR", "Nominal": 1, "Name": "Евро",
                    "Value": 100.0234, "Previous": 100.1441}
        }
    }"#;

    fn sample() -> CurrencyRates {
        let feed: DailyFeed = serde_json::from_str(SAMPLE).unwrap();
        CurrencyRates::try_from(feed).unwrap()
    }

    #[test]
    fn test_parse_feed() {
        let rates = sample();
        assert_eq!(rates.usd.value, 92.5058);
        assert_eq!(rates.eur.previous, 100.1441);
    }

    #[test]
    fn test_format_rates() {
        assert_eq!(
            format_rates(&sample()),
            "💵 Доллар: 92.51 (+0.34)\n💶 Евро: 100.02 (-0.12)"
        );
    }

    #[test]
    fn test_unchanged_rate_has_no_sign() {
        let quote = Quote {
            value: 90.0,
            previous: 90.0,
        };
        assert_eq!(line("💵", "Доллар", &quote), "💵 Доллар: 90.00 (0.00)");
    }

    #[test]
    fn test_missing_currency() {
        let feed: DailyFeed =
            serde_json::from_str(r#"{"Valute": {"USD": {"Value": 1.0, "Previous": 1.0}}}"#)
                .unwrap();
        let err = CurrencyRates::try_from(feed).unwrap_err();
        assert!(matches!(err, InfoError::MissingRate(code) if code == "EUR"));
    }
}
