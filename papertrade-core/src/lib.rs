//! papertrade core: domain types and bookkeeping for the trading simulator.
//!
//! This crate contains the pure, I/O-free parts of the simulator:
//! - Domain types (tickers, instruments, holdings, transactions, value points)
//! - Portfolio bookkeeping: weighted average cost, cash-constrained buy/sell
//! - The market listing and the daily random-walk price model
//! - Injectable Gaussian noise sources
//! - The simulated calendar
//! - The student gradebook used by the grade tracker

pub mod calendar;
pub mod domain;
pub mod gradebook;
pub mod market;
pub mod price_model;
pub mod rng;

pub use calendar::SimCalendar;
pub use gradebook::{GradeError, GradeSummary, Gradebook, Student};
pub use market::Market;
pub use price_model::PriceModel;
pub use rng::{GaussianSource, NormalNoise, ScriptedNoise};
