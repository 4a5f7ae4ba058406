//! External exchange-rate providers and the periodic refresh task.
//!
//! FreeCurrencyAPI is the primary provider, Fixer.io the fallback. A failed
//! refresh is logged and leaves the stored rates untouched; ledger
//! operations keep resolving against whatever is in the table.

use std::collections::HashMap;
use std::time::Duration;

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::{debug, info, warn};

use sarraf_db::ExchangeRateRepository;
use sarraf_db::repositories::ExchangeRateError;
use sarraf_shared::{Currency, config::RatesConfig, types::round_rate};

/// Errors from a provider refresh.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No provider is configured, or every configured provider failed.
    #[error("no exchange-rate provider available")]
    Unavailable,

    /// Provider request failed.
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Storing a fetched rate failed.
    #[error(transparent)]
    Store(#[from] ExchangeRateError),
}

#[derive(Debug, Deserialize)]
struct FreeCurrencyResponse {
    data: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct FixerResponse {
    success: bool,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// Fetches pair rates from the configured providers and upserts them.
pub struct RateProvider {
    http: reqwest::Client,
    config: RatesConfig,
    repo: ExchangeRateRepository,
}

impl RateProvider {
    /// Creates a provider over the given connection and configuration.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: RatesConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            repo: ExchangeRateRepository::new(db),
        }
    }

    /// Runs the refresh loop: one immediate fetch, then one per interval.
    pub async fn run(self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);

        loop {
            ticker.tick().await;
            match self.refresh().await {
                Ok(updated) => info!(updated, "Exchange rates refreshed"),
                Err(e) => warn!(error = %e, "Exchange rate refresh failed"),
            }
        }
    }

    /// Fetches the latest rates, trying each provider in order.
    ///
    /// Returns the number of pairs upserted.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unavailable` if every configured provider
    /// failed, or a store error if an upsert fails.
    pub async fn refresh(&self) -> Result<usize, ProviderError> {
        match self.fetch_free_currency().await {
            Ok(rates) if !rates.is_empty() => {
                let updated = self.store(rates).await?;
                debug!(updated, "Rates updated from FreeCurrencyAPI");
                return Ok(updated);
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "FreeCurrencyAPI fetch failed"),
        }

        match self.fetch_fixer().await {
            Ok(rates) if !rates.is_empty() => {
                let updated = self.store(rates).await?;
                debug!(updated, "Rates updated from Fixer.io");
                Ok(updated)
            }
            Ok(_) => Err(ProviderError::Unavailable),
            Err(e) => {
                warn!(error = %e, "Fixer.io fetch failed");
                Err(ProviderError::Unavailable)
            }
        }
    }

    /// Queries FreeCurrencyAPI for every supported ordered pair.
    async fn fetch_free_currency(
        &self,
    ) -> Result<Vec<(Currency, Currency, Decimal)>, ProviderError> {
        let Some(api_key) = self.config.free_currency_api_key.as_deref() else {
            debug!("FreeCurrencyAPI key not configured, skipping");
            return Ok(Vec::new());
        };

        let pairs: Vec<String> = Currency::ALL
            .into_iter()
            .flat_map(|base| {
                Currency::ALL
                    .into_iter()
                    .filter(move |target| *target != base)
                    .map(move |target| format!("{base}{target}"))
            })
            .collect();

        let url = format!(
            "https://api.freecurrencyapi.com/v1/latest?apikey={}&currencies={}",
            api_key,
            pairs.join(",")
        );

        let response: FreeCurrencyResponse =
            self.http.get(&url).send().await?.error_for_status()?.json().await?;

        let mut rates = Vec::new();
        for (pair, value) in response.data {
            let Some((base, target)) = parse_pair(&pair) else {
                continue;
            };
            if let Ok(rate) = Decimal::try_from(value) {
                if rate > Decimal::ZERO {
                    rates.push((base, target, round_rate(rate)));
                }
            }
        }

        Ok(rates)
    }

    /// Queries Fixer.io and derives pair rates from its base-relative quotes.
    async fn fetch_fixer(&self) -> Result<Vec<(Currency, Currency, Decimal)>, ProviderError> {
        let Some(api_key) = self.config.fixer_api_key.as_deref() else {
            debug!("Fixer.io key not configured, skipping");
            return Ok(Vec::new());
        };

        let symbols: Vec<&str> = Currency::ALL.iter().map(|c| c.code()).collect();
        let url = format!(
            "http://data.fixer.io/api/latest?access_key={}&symbols={}",
            api_key,
            symbols.join(",")
        );

        let response: FixerResponse =
            self.http.get(&url).send().await?.error_for_status()?.json().await?;

        if !response.success {
            return Ok(Vec::new());
        }

        let mut quotes = HashMap::new();
        for currency in Currency::ALL {
            if let Some(value) = response.rates.get(currency.code()) {
                if let Ok(quote) = Decimal::try_from(*value) {
                    if quote > Decimal::ZERO {
                        quotes.insert(currency, quote);
                    }
                }
            }
        }

        Ok(cross_rates(&quotes))
    }

    async fn store(
        &self,
        rates: Vec<(Currency, Currency, Decimal)>,
    ) -> Result<usize, ProviderError> {
        let mut updated = 0;
        for (base, target, rate) in rates {
            self.repo.upsert(base, target, rate).await?;
            updated += 1;
        }

        Ok(updated)
    }
}

/// Splits a six-letter pair code like `USDSAR` into its currencies.
fn parse_pair(pair: &str) -> Option<(Currency, Currency)> {
    if pair.len() != 6 {
        return None;
    }

    let base = pair[..3].parse().ok()?;
    let target = pair[3..].parse().ok()?;
    Some((base, target))
}

/// Derives every ordered pair rate from base-relative quotes.
///
/// With quotes expressed against a common base, the pair rate is simply
/// `target_quote / base_quote`.
fn cross_rates(quotes: &HashMap<Currency, Decimal>) -> Vec<(Currency, Currency, Decimal)> {
    let mut rates = Vec::new();

    for base in Currency::ALL {
        for target in Currency::ALL {
            if base == target {
                continue;
            }
            let (Some(base_quote), Some(target_quote)) = (quotes.get(&base), quotes.get(&target))
            else {
                continue;
            };

            rates.push((base, target, round_rate(target_quote / base_quote)));
        }
    }

    rates
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("USDSAR"),
            Some((Currency::Usd, Currency::Sar))
        );
        assert_eq!(
            parse_pair("YERUSD"),
            Some((Currency::Yer, Currency::Usd))
        );
        assert_eq!(parse_pair("USDEUR"), None);
        assert_eq!(parse_pair("USD"), None);
        assert_eq!(parse_pair(""), None);
    }

    #[test]
    fn test_cross_rates_from_common_base() {
        // Quotes against EUR: 1 EUR = 1.10 USD = 4.125 SAR.
        let mut quotes = HashMap::new();
        quotes.insert(Currency::Usd, dec!(1.10));
        quotes.insert(Currency::Sar, dec!(4.125));

        let rates = cross_rates(&quotes);

        let usd_sar = rates
            .iter()
            .find(|(b, t, _)| *b == Currency::Usd && *t == Currency::Sar)
            .unwrap();
        assert_eq!(usd_sar.2, dec!(3.750000));

        let sar_usd = rates
            .iter()
            .find(|(b, t, _)| *b == Currency::Sar && *t == Currency::Usd)
            .unwrap();
        assert_eq!(sar_usd.2, dec!(0.266667));

        // YER has no quote, so no YER pairs come back.
        assert_eq!(rates.len(), 2);
    }
}
