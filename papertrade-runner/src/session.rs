//! Trading session: market, portfolio, price model, calendar and store
//! wired together for an interactive front end.
//!
//! Opening a session loads the saved portfolio (or starts a fresh one) and
//! makes sure the value history has at least one point. Each simulated day
//! moves the calendar forward, ticks every price once, and records one value
//! point. Trades are stamped with the session's current date.

use chrono::NaiveDate;
use log::{debug, info};
use papertrade_core::domain::{Portfolio, Ticker, TradeError, Transaction, ValuePoint};
use papertrade_core::{GaussianSource, Market, NormalNoise, PriceModel, SimCalendar};

use crate::config::{ConfigError, SimConfig};
use crate::store::{SaveReport, Store};

pub struct TradingSession<G: GaussianSource = NormalNoise> {
    market: Market,
    portfolio: Portfolio,
    model: PriceModel,
    noise: G,
    calendar: SimCalendar,
    store: Store,
}

impl TradingSession<NormalNoise> {
    /// Open with the production noise source: seeded from the config when a
    /// seed is set, OS entropy otherwise.
    pub fn from_config(config: &SimConfig, today: NaiveDate) -> Result<Self, ConfigError> {
        let noise = match config.seed {
            Some(seed) => NormalNoise::seeded(seed),
            None => NormalNoise::from_entropy(),
        };
        Self::open(config, noise, today)
    }
}

impl<G: GaussianSource> TradingSession<G> {
    pub fn open(config: &SimConfig, noise: G, today: NaiveDate) -> Result<Self, ConfigError> {
        config.validate()?;
        let market = config.market()?;
        let store = Store::new(&config.data_dir);
        let mut portfolio = store.load_or_new(config.starting_cash);

        let last_recorded = portfolio.value_history().last().map(|p| p.date);
        let calendar = SimCalendar::resume(today, last_recorded);
        if portfolio.value_history().is_empty() {
            portfolio.record_value(calendar.today(), &market);
        }
        info!(
            "session opened on {} with {} instruments, cash {:.2}",
            calendar.today(),
            market.len(),
            portfolio.cash()
        );

        Ok(Self {
            market,
            portfolio,
            model: config.price_model,
            noise,
            calendar,
            store,
        })
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn today(&self) -> NaiveDate {
        self.calendar.today()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Cash plus holdings marked at today's prices.
    pub fn market_value(&self) -> f64 {
        self.portfolio.market_value(&self.market)
    }

    /// Buy at the current price. `ticker` may be in any case.
    pub fn buy(&mut self, ticker: &str, quantity: u32) -> Result<Transaction, TradeError> {
        let tx = self
            .portfolio
            .buy(&self.market, &Ticker::new(ticker), quantity, self.calendar.today())?;
        debug!("bought {} {} @ {}", tx.quantity, tx.ticker, tx.price);
        Ok(tx)
    }

    /// Sell at the current price. `ticker` may be in any case.
    pub fn sell(&mut self, ticker: &str, quantity: u32) -> Result<Transaction, TradeError> {
        let tx = self
            .portfolio
            .sell(&self.market, &Ticker::new(ticker), quantity, self.calendar.today())?;
        debug!("sold {} {} @ {}", tx.quantity, tx.ticker, tx.price);
        Ok(tx)
    }

    /// Advance one simulated day: new date, new prices, one value point.
    pub fn advance_day(&mut self) -> ValuePoint {
        let date = self.calendar.advance();
        self.model.tick(&mut self.market, &mut self.noise);
        let point = self.portfolio.record_value(date, &self.market);
        debug!("advanced to {date}, portfolio value {:.2}", point.value);
        point
    }

    /// Write all three data files. Never fails as a whole; see [`SaveReport`].
    pub fn save(&self) -> SaveReport {
        self.store.save(&self.portfolio)
    }
}
