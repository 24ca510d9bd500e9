use super::ids::Ticker;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tradable security: ticker, display name, and its current price.
///
/// The price is only moved by [`crate::price_model::PriceModel::tick`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instrument {
    pub ticker: Ticker,
    pub name: String,
    pub(crate) price: f64,
}

impl Instrument {
    /// Create an instrument, rejecting non-positive or non-finite prices.
    pub fn new(
        ticker: impl Into<Ticker>,
        name: impl Into<String>,
        price: f64,
    ) -> Result<Self, InstrumentError> {
        let ticker = ticker.into();
        if ticker.is_empty() {
            return Err(InstrumentError::EmptyTicker);
        }
        if !ticker.is_well_formed() {
            return Err(InstrumentError::MalformedTicker(ticker));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(InstrumentError::InvalidPrice { ticker, price });
        }
        Ok(Self { ticker, name: name.into(), price })
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum InstrumentError {
    #[error("ticker must not be empty")]
    EmptyTicker,

    #[error("ticker {0} may only contain letters, digits, '.' and '-'")]
    MalformedTicker(Ticker),

    #[error("price {price} for {ticker} must be a positive number")]
    InvalidPrice { ticker: Ticker, price: f64 },

    #[error("duplicate ticker {0}")]
    DuplicateTicker(Ticker),
}
