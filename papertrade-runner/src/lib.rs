//! papertrade runner: session orchestration, persistence, configuration.
//!
//! This crate builds on `papertrade-core` to provide:
//! - TOML configuration with validated defaults
//! - Best-effort CSV persistence of cash, holdings, transactions and value history
//! - A trading session that ties market, portfolio, price model and calendar together

pub mod config;
pub mod session;
pub mod store;

pub use config::{ConfigError, InstrumentConfig, SimConfig};
pub use session::TradingSession;
pub use store::{DataFile, LoadReport, Parsed, SaveReport, SkippedLine, Store, StoreError};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<SimConfig>();
        assert_sync::<SimConfig>();
        assert_send::<ConfigError>();
        assert_sync::<ConfigError>();
    }

    #[test]
    fn store_types_are_send_sync() {
        assert_send::<Store>();
        assert_sync::<Store>();
        assert_send::<StoreError>();
        assert_sync::<StoreError>();
        assert_send::<SaveReport>();
        assert_sync::<SaveReport>();
    }

    #[test]
    fn session_is_send() {
        assert_send::<TradingSession>();
    }
}
