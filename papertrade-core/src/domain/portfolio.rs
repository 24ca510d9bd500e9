//! Portfolio: cash, holdings, the transaction log and the value history.

use super::holding::Holding;
use super::ids::Ticker;
use super::prices::PriceSource;
use super::transaction::{Side, Transaction};
use super::value_point::ValuePoint;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a buy or sell was refused. A refused trade leaves the portfolio untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TradeError {
    #[error("quantity must be positive")]
    ZeroQuantity,

    #[error("unknown ticker {0}")]
    UnknownInstrument(Ticker),

    #[error("insufficient cash: {ticker} costs {cost:.2}, only {available:.2} available")]
    InsufficientCash {
        ticker: Ticker,
        cost: f64,
        available: f64,
    },

    #[error("no holding in {0}")]
    NoHolding(Ticker),

    #[error("not enough shares of {ticker}: requested {requested}, held {held}")]
    InsufficientShares {
        ticker: Ticker,
        requested: u32,
        held: u32,
    },

    #[error("quantity overflow for {0}")]
    QuantityOverflow(Ticker),
}

/// Aggregate portfolio state.
///
/// Cash never goes negative and every stored holding has a positive quantity.
/// Cash only tracks realized flows, so it is independent of the holdings'
/// cost basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    cash: f64,
    holdings: BTreeMap<Ticker, Holding>,
    transactions: Vec<Transaction>,
    value_history: Vec<ValuePoint>,
}

impl Portfolio {
    pub fn new(initial_cash: f64) -> Self {
        Self {
            cash: initial_cash,
            holdings: BTreeMap::new(),
            transactions: Vec::new(),
            value_history: Vec::new(),
        }
    }

    /// Rebuild a portfolio from previously persisted records.
    ///
    /// Later holdings for the same ticker replace earlier ones; empty
    /// holdings are dropped.
    pub fn from_parts(
        cash: f64,
        holdings: impl IntoIterator<Item = Holding>,
        transactions: Vec<Transaction>,
        value_history: Vec<ValuePoint>,
    ) -> Self {
        let holdings = holdings
            .into_iter()
            .filter(|h| h.quantity > 0)
            .map(|h| (h.ticker.clone(), h))
            .collect();
        Self {
            cash,
            holdings,
            transactions,
            value_history,
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Open holdings, ordered by ticker.
    pub fn holdings(&self) -> impl Iterator<Item = &Holding> {
        self.holdings.values()
    }

    pub fn holding(&self, ticker: &Ticker) -> Option<&Holding> {
        self.holdings.get(ticker)
    }

    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn value_history(&self) -> &[ValuePoint] {
        &self.value_history
    }

    /// Buy `quantity` units of `ticker` at its current price.
    pub fn buy<P: PriceSource + ?Sized>(
        &mut self,
        prices: &P,
        ticker: &Ticker,
        quantity: u32,
        date: NaiveDate,
    ) -> Result<Transaction, TradeError> {
        if quantity == 0 {
            return Err(TradeError::ZeroQuantity);
        }
        let price = prices
            .price_of(ticker)
            .ok_or_else(|| TradeError::UnknownInstrument(ticker.clone()))?;
        let cost = price * quantity as f64;
        if cost > self.cash {
            return Err(TradeError::InsufficientCash {
                ticker: ticker.clone(),
                cost,
                available: self.cash,
            });
        }

        let (new_qty, new_avg) = match self.holdings.get(ticker) {
            Some(existing) => existing.averaged_with(quantity, price),
            None => Holding::new(ticker.clone(), 0, 0.0).averaged_with(quantity, price),
        }
        .ok_or_else(|| TradeError::QuantityOverflow(ticker.clone()))?;

        // All checks passed; mutate.
        self.cash -= cost;
        let holding = self
            .holdings
            .entry(ticker.clone())
            .or_insert_with(|| Holding::new(ticker.clone(), 0, 0.0));
        holding.quantity = new_qty;
        holding.avg_cost = new_avg;

        let tx = Transaction::new(date, Side::Buy, ticker.clone(), quantity, price);
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    /// Sell `quantity` units of `ticker` at its current price.
    ///
    /// The average cost of what remains is unchanged. Selling the last unit
    /// removes the holding.
    pub fn sell<P: PriceSource + ?Sized>(
        &mut self,
        prices: &P,
        ticker: &Ticker,
        quantity: u32,
        date: NaiveDate,
    ) -> Result<Transaction, TradeError> {
        if quantity == 0 {
            return Err(TradeError::ZeroQuantity);
        }
        let held = self
            .holdings
            .get(ticker)
            .map(|h| h.quantity)
            .ok_or_else(|| TradeError::NoHolding(ticker.clone()))?;
        if quantity > held {
            return Err(TradeError::InsufficientShares {
                ticker: ticker.clone(),
                requested: quantity,
                held,
            });
        }
        let price = prices
            .price_of(ticker)
            .ok_or_else(|| TradeError::UnknownInstrument(ticker.clone()))?;

        self.cash += price * quantity as f64;
        if quantity == held {
            self.holdings.remove(ticker);
        } else if let Some(holding) = self.holdings.get_mut(ticker) {
            holding.quantity -= quantity;
        }

        let tx = Transaction::new(date, Side::Sell, ticker.clone(), quantity, price);
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    /// Cash plus every holding marked at its current price.
    ///
    /// Holdings the price source does not know contribute nothing.
    pub fn market_value<P: PriceSource + ?Sized>(&self, prices: &P) -> f64 {
        let position_value: f64 = self
            .holdings
            .values()
            .filter_map(|h| prices.price_of(&h.ticker).map(|p| h.market_value(p)))
            .sum();
        self.cash + position_value
    }

    /// Append a value point for `date`. Calling twice appends twice.
    pub fn record_value<P: PriceSource + ?Sized>(
        &mut self,
        date: NaiveDate,
        prices: &P,
    ) -> ValuePoint {
        let point = ValuePoint::new(date, self.market_value(prices));
        self.value_history.push(point);
        point
    }
}
