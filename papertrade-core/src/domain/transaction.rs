use super::ids::Ticker;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(format!("unknown side '{other}'")),
        }
    }
}

/// One executed trade. Appended to the portfolio log, never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub side: Side,
    pub ticker: Ticker,
    pub quantity: u32,
    pub price: f64,
    pub total: f64,
}

impl Transaction {
    /// Build a record; `total` is always `price * quantity`.
    pub fn new(date: NaiveDate, side: Side, ticker: Ticker, quantity: u32, price: f64) -> Self {
        Self {
            date,
            side,
            ticker,
            quantity,
            price,
            total: price * quantity as f64,
        }
    }
}
