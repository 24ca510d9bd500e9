//! Simulator configuration loaded from TOML.
//!
//! Every key is optional; an empty document yields the built-in defaults
//! (10 000 starting cash, the five default listings, 2% daily volatility,
//! a 0.50 price floor, data files in the working directory).

use std::path::{Path, PathBuf};

use papertrade_core::domain::{Instrument, Ticker};
use papertrade_core::{Market, PriceModel};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::holdings::CASH_SENTINEL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One listed instrument and its opening price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InstrumentConfig {
    pub ticker: String,
    #[serde(default)]
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Cash for a brand-new portfolio. Ignored once a portfolio is saved.
    pub starting_cash: f64,
    /// Directory holding `portfolio.csv`, `transactions.csv` and `performance.csv`.
    pub data_dir: PathBuf,
    /// Seed for the price walk; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub price_model: PriceModel,
    pub instruments: Vec<InstrumentConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        let instruments = Market::default_listing()
            .instruments()
            .iter()
            .map(|i| InstrumentConfig {
                ticker: i.ticker.to_string(),
                name: i.name.clone(),
                price: i.price(),
            })
            .collect();
        Self {
            starting_cash: 10_000.0,
            data_dir: PathBuf::from("."),
            seed: None,
            price_model: PriceModel::default(),
            instruments,
        }
    }
}

impl SimConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.starting_cash.is_finite() || self.starting_cash < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "starting_cash must be a non-negative number, got {}",
                self.starting_cash
            )));
        }

        let pm = &self.price_model;
        if !pm.volatility.is_finite() || pm.volatility < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "price_model.volatility must be >= 0, got {}",
                pm.volatility
            )));
        }
        if !pm.drift.is_finite() || pm.drift <= -1.0 {
            return Err(ConfigError::Invalid(format!(
                "price_model.drift must be > -1, got {}",
                pm.drift
            )));
        }
        if !pm.price_floor.is_finite() || pm.price_floor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "price_model.price_floor must be > 0, got {}",
                pm.price_floor
            )));
        }

        if self.instruments.is_empty() {
            return Err(ConfigError::Invalid("at least one instrument is required".into()));
        }
        // CASH names the balance line in portfolio.csv
        if let Some(reserved) = self
            .instruments
            .iter()
            .find(|i| Ticker::new(&i.ticker).as_str() == CASH_SENTINEL)
        {
            return Err(ConfigError::Invalid(format!(
                "ticker '{}' is reserved",
                reserved.ticker
            )));
        }
        // Builds the market to catch bad prices, blank and duplicate tickers.
        self.market().map(|_| ())
    }

    /// Build the opening market from the configured instruments.
    pub fn market(&self) -> Result<Market, ConfigError> {
        let instruments = self
            .instruments
            .iter()
            .map(|i| Instrument::new(i.ticker.as_str(), i.name.as_str(), i.price))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Market::new(instruments).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
