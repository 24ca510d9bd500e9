//! Price lookup capability used to value and trade a portfolio.

use super::ids::Ticker;
use std::collections::HashMap;

/// Anything that can quote the current price of an instrument.
pub trait PriceSource {
    /// Current price for `ticker`, or `None` if the instrument is unknown.
    fn price_of(&self, ticker: &Ticker) -> Option<f64>;
}

impl PriceSource for HashMap<Ticker, f64> {
    fn price_of(&self, ticker: &Ticker) -> Option<f64> {
        self.get(ticker).copied()
    }
}

impl<P: PriceSource + ?Sized> PriceSource for &P {
    fn price_of(&self, ticker: &Ticker) -> Option<f64> {
        (**self).price_of(ticker)
    }
}
