//! Domain types for the trading simulator

pub mod holding;
pub mod ids;
pub mod instrument;
pub mod portfolio;
pub mod prices;
pub mod transaction;
pub mod value_point;

pub use holding::Holding;
pub use ids::Ticker;
pub use instrument::{Instrument, InstrumentError};
pub use portfolio::{Portfolio, TradeError};
pub use prices::PriceSource;
pub use transaction::{Side, Transaction};
pub use value_point::ValuePoint;
