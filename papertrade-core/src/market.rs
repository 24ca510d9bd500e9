//! Market: the listed instruments and their current prices.

use crate::domain::{Instrument, InstrumentError, PriceSource, Ticker};

/// Listing of tradable instruments, kept in listing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    instruments: Vec<Instrument>,
}

impl Market {
    /// Build a market, rejecting duplicate tickers.
    pub fn new(instruments: Vec<Instrument>) -> Result<Self, InstrumentError> {
        for (i, inst) in instruments.iter().enumerate() {
            if instruments[..i].iter().any(|other| other.ticker == inst.ticker) {
                return Err(InstrumentError::DuplicateTicker(inst.ticker.clone()));
            }
        }
        Ok(Self { instruments })
    }

    /// The five large-cap names the simulator starts with.
    pub fn default_listing() -> Self {
        let listing = [
            ("AAPL", "Apple Inc.", 180.00),
            ("GOOG", "Alphabet Inc.", 135.00),
            ("AMZN", "Amazon.com Inc.", 150.00),
            ("TSLA", "Tesla Inc.", 220.00),
            ("NFLX", "Netflix Inc.", 480.00),
        ];
        let instruments = listing
            .into_iter()
            .map(|(ticker, name, price)| Instrument {
                ticker: Ticker::new(ticker),
                name: name.to_string(),
                price,
            })
            .collect();
        Self { instruments }
    }

    pub fn get(&self, ticker: &Ticker) -> Option<&Instrument> {
        self.instruments.iter().find(|i| &i.ticker == ticker)
    }

    /// Look up by user-typed ticker (any case, surrounding whitespace ignored).
    pub fn lookup(&self, raw: &str) -> Option<&Instrument> {
        self.get(&Ticker::new(raw))
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub(crate) fn instruments_mut(&mut self) -> &mut [Instrument] {
        &mut self.instruments
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

impl PriceSource for Market {
    fn price_of(&self, ticker: &Ticker) -> Option<f64> {
        self.get(ticker).map(|i| i.price)
    }
}
