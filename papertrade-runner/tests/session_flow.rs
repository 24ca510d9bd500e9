use chrono::NaiveDate;
use papertrade_core::{NormalNoise, ScriptedNoise};
use papertrade_runner::{SimConfig, TradingSession};
use tempfile::TempDir;

fn config(dir: &TempDir, toml: &str) -> SimConfig {
    let mut config = SimConfig::from_toml(toml).unwrap();
    config.data_dir = dir.path().to_path_buf();
    config
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

#[test]
fn buy_sell_walkthrough_persists_across_sessions() {
    let tmp = TempDir::new().unwrap();
    let config = config(
        &tmp,
        r#"
starting_cash = 10000.0

[[instruments]]
ticker = "ACME"
name = "Acme Corp."
price = 100.0
"#,
    );

    // +20% on the only tick
    let mut session = TradingSession::open(&config, ScriptedNoise::constant(10.0), start()).unwrap();
    session.buy("acme", 10).unwrap();
    assert_eq!(session.portfolio().cash(), 9_000.0);

    session.advance_day();
    let price = session.market().lookup("ACME").unwrap().price();
    assert!((price - 120.0).abs() < 1e-9);
    session.sell("ACME", 4).unwrap();
    assert!((session.portfolio().cash() - 9_480.0).abs() < 1e-9);
    assert!(session.save().all_succeeded());

    let reopened = TradingSession::open(&config, ScriptedNoise::default(), start()).unwrap();
    let p = reopened.portfolio();
    assert!((p.cash() - 9_480.0).abs() < 1e-9);
    let acme = p.holdings().next().unwrap();
    assert_eq!((acme.quantity, acme.avg_cost), (6, 100.0));
    assert_eq!(p.transactions().len(), 2);
    assert_eq!(p.value_history().len(), 2);
    // prices restart from the configured listing
    assert_eq!(reopened.market().lookup("ACME").unwrap().price(), 100.0);
    assert_eq!(reopened.today(), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
}

#[test]
fn same_seed_same_walk() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let mut first =
        TradingSession::open(&config(&a, ""), NormalNoise::seeded(42), start()).unwrap();
    let mut second =
        TradingSession::open(&config(&b, ""), NormalNoise::seeded(42), start()).unwrap();

    for _ in 0..30 {
        first.advance_day();
        second.advance_day();
    }
    assert_eq!(first.market(), second.market());
    for i in first.market().instruments() {
        assert!(i.price() >= 0.5);
    }
}

#[test]
fn selling_everything_drops_the_holding() {
    let tmp = TempDir::new().unwrap();
    let mut session =
        TradingSession::open(&config(&tmp, ""), ScriptedNoise::default(), start()).unwrap();
    session.buy("TSLA", 3).unwrap();
    session.sell("TSLA", 3).unwrap();

    assert_eq!(session.portfolio().holding_count(), 0);
    assert_eq!(session.portfolio().cash(), 10_000.0);
    assert_eq!(session.portfolio().transactions().len(), 2);
}

#[test]
fn from_config_uses_configured_seed() {
    let tmp = TempDir::new().unwrap();
    let config = config(&tmp, "seed = 7");
    let mut seeded = TradingSession::from_config(&config, start()).unwrap();
    let mut manual = TradingSession::open(&config, NormalNoise::seeded(7), start()).unwrap();

    seeded.advance_day();
    manual.advance_day();
    assert_eq!(seeded.market(), manual.market());
}
