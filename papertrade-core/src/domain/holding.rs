use super::ids::Ticker;
use serde::{Deserialize, Serialize};

/// Quantity and weighted average cost of one owned instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: Ticker,
    pub quantity: u32,
    pub avg_cost: f64,
}

impl Holding {
    pub fn new(ticker: Ticker, quantity: u32, avg_cost: f64) -> Self {
        Self { ticker, quantity, avg_cost }
    }

    /// Cost basis of the whole holding.
    pub fn cost_basis(&self) -> f64 {
        self.quantity as f64 * self.avg_cost
    }

    pub fn market_value(&self, current_price: f64) -> f64 {
        self.quantity as f64 * current_price
    }

    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        self.quantity as f64 * (current_price - self.avg_cost)
    }

    /// Average cost after adding `quantity` units bought at `price`.
    ///
    /// Returns `None` when the combined quantity overflows.
    pub(crate) fn averaged_with(&self, quantity: u32, price: f64) -> Option<(u32, f64)> {
        let new_qty = self.quantity.checked_add(quantity)?;
        let avg = (self.cost_basis() + price * quantity as f64) / new_qty as f64;
        Some((new_qty, avg))
    }
}
