//! Interactive trading menu.
//!
//! Entries 1-8: market, portfolio, buy, sell, advance one day, transactions,
//! performance, save & exit. End of input behaves like save & exit.

use std::io::{BufRead, Write};

use anyhow::Result;
use papertrade_core::domain::Side;
use papertrade_core::GaussianSource;
use papertrade_runner::TradingSession;

use crate::console::{fmt_money, Console};

const CHOICE_PROMPT: &str = "Enter choice: ";
const NUMBER_RETRY: &str = "Enter a valid number: ";

pub fn run<G, R, W>(session: &mut TradingSession<G>, console: &mut Console<R, W>) -> Result<()>
where
    G: GaussianSource,
    R: BufRead,
    W: Write,
{
    loop {
        let out = console.out();
        writeln!(out, "\n=== STOCK TRADING PLATFORM ===")?;
        writeln!(out, "Date         : {}", session.today())?;
        writeln!(out, "Cash Balance : ${}", fmt_money(session.portfolio().cash()))?;
        writeln!(out, "1) View Market")?;
        writeln!(out, "2) View Portfolio")?;
        writeln!(out, "3) Buy Stock")?;
        writeln!(out, "4) Sell Stock")?;
        writeln!(out, "5) Advance 1 Day (simulate prices)")?;
        writeln!(out, "6) View Transactions")?;
        writeln!(out, "7) View Performance History")?;
        writeln!(out, "8) Save & Exit")?;

        let Some(choice) = console.read_number::<i64>(CHOICE_PROMPT, CHOICE_PROMPT)? else {
            writeln!(console.out())?;
            return save_and_exit(session, console);
        };
        match choice {
            1 => show_market(session, console.out())?,
            2 => show_portfolio(session, console.out())?,
            3 => trade(session, console, Side::Buy)?,
            4 => trade(session, console, Side::Sell)?,
            5 => {
                let point = session.advance_day();
                writeln!(
                    console.out(),
                    "Advanced one day. Prices updated. Date: {}",
                    point.date
                )?;
            }
            6 => show_transactions(session, console.out())?,
            7 => show_performance(session, console.out())?,
            8 => return save_and_exit(session, console),
            _ => writeln!(console.out(), "Invalid option.")?,
        }
    }
}

fn show_market<G: GaussianSource, W: Write>(session: &TradingSession<G>, out: &mut W) -> Result<()> {
    writeln!(out, "\n--- MARKET ---")?;
    writeln!(out, "{:<8} {:<24} {:>12}", "Ticker", "Name", "Price ($)")?;
    for i in session.market().instruments() {
        writeln!(out, "{:<8} {:<24} {:>12}", i.ticker, i.name, fmt_money(i.price()))?;
    }
    Ok(())
}

fn show_portfolio<G: GaussianSource, W: Write>(
    session: &TradingSession<G>,
    out: &mut W,
) -> Result<()> {
    let portfolio = session.portfolio();
    writeln!(out, "\n--- PORTFOLIO ---")?;
    writeln!(out, "Cash: ${}", fmt_money(portfolio.cash()))?;
    if portfolio.holding_count() == 0 {
        writeln!(out, "(No holdings)")?;
    } else {
        writeln!(
            out,
            "{:<8} {:>8} {:>12} {:>12} {:>12}",
            "Ticker", "Qty", "Avg Cost", "Last Price", "Position($)"
        )?;
        for h in portfolio.holdings() {
            // a saved holding may no longer be listed
            let (last, position) = match session.market().get(&h.ticker) {
                Some(i) => (fmt_money(i.price()), fmt_money(h.market_value(i.price()))),
                None => ("-".to_string(), "-".to_string()),
            };
            writeln!(
                out,
                "{:<8} {:>8} {:>12} {:>12} {:>12}",
                h.ticker,
                h.quantity,
                fmt_money(h.avg_cost),
                last,
                position
            )?;
        }
    }
    writeln!(out, "Total Portfolio Value: ${}", fmt_money(session.market_value()))?;
    Ok(())
}

fn trade<G, R, W>(session: &mut TradingSession<G>, console: &mut Console<R, W>, side: Side) -> Result<()>
where
    G: GaussianSource,
    R: BufRead,
    W: Write,
{
    let Some(raw) = console.read_line(&format!("Enter ticker to {side}: "))? else {
        return Ok(());
    };
    if session.market().lookup(&raw).is_none() {
        writeln!(console.out(), "Unknown ticker.")?;
        return Ok(());
    }
    let Some(requested) = console.read_number::<i64>("Enter quantity: ", NUMBER_RETRY)? else {
        return Ok(());
    };
    let quantity = match u32::try_from(requested) {
        Ok(q) if q > 0 => q,
        _ => {
            writeln!(console.out(), "Invalid quantity.")?;
            return Ok(());
        }
    };

    let result = match side {
        Side::Buy => session.buy(&raw, quantity),
        Side::Sell => session.sell(&raw, quantity),
    };
    match (result, side) {
        (Ok(tx), Side::Buy) => writeln!(
            console.out(),
            "Bought {} {} @ ${}",
            tx.quantity,
            tx.ticker,
            fmt_money(tx.price)
        )?,
        (Ok(tx), Side::Sell) => writeln!(
            console.out(),
            "Sold {} {} @ ${}",
            tx.quantity,
            tx.ticker,
            fmt_money(tx.price)
        )?,
        (Err(e), Side::Buy) => writeln!(console.out(), "Purchase failed: {e}.")?,
        (Err(e), Side::Sell) => writeln!(console.out(), "Sell failed: {e}.")?,
    }
    Ok(())
}

fn show_transactions<G: GaussianSource, W: Write>(
    session: &TradingSession<G>,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "\n--- TRANSACTIONS ---")?;
    let transactions = session.portfolio().transactions();
    if transactions.is_empty() {
        writeln!(out, "(No transactions)")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<12} {:<6} {:<8} {:>8} {:>12} {:>12}",
        "Date", "Type", "Ticker", "Qty", "Price", "Total"
    )?;
    for t in transactions {
        writeln!(
            out,
            "{:<12} {:<6} {:<8} {:>8} {:>12} {:>12}",
            t.date.to_string(),
            t.side.as_str(),
            t.ticker.as_str(),
            t.quantity,
            fmt_money(t.price),
            fmt_money(t.total)
        )?;
    }
    Ok(())
}

fn show_performance<G: GaussianSource, W: Write>(
    session: &TradingSession<G>,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "\n--- PERFORMANCE (Portfolio Value Over Time) ---")?;
    let history = session.portfolio().value_history();
    if history.is_empty() {
        writeln!(out, "(No data)")?;
        return Ok(());
    }
    writeln!(out, "{:<12} {:>14}", "Date", "Value ($)")?;
    for p in history {
        writeln!(out, "{:<12} {:>14}", p.date.to_string(), fmt_money(p.value))?;
    }
    Ok(())
}

fn save_and_exit<G, R, W>(session: &TradingSession<G>, console: &mut Console<R, W>) -> Result<()>
where
    G: GaussianSource,
    R: BufRead,
    W: Write,
{
    let report = session.save();
    let out = console.out();
    for (file, err) in &report.failures {
        writeln!(out, "Could not save {file}: {err}")?;
    }
    if report.all_succeeded() {
        writeln!(out, "Data saved to {}. Goodbye!", session.store().dir().display())?;
    } else {
        writeln!(out, "Some data could not be saved. Goodbye!")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use papertrade_core::ScriptedNoise;
    use papertrade_runner::SimConfig;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> TradingSession<ScriptedNoise> {
        let config = SimConfig {
            data_dir: dir.path().to_path_buf(),
            ..SimConfig::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        TradingSession::open(&config, ScriptedNoise::default(), today).unwrap()
    }

    fn drive(session: &mut TradingSession<ScriptedNoise>, input: &str) -> String {
        let mut console = Console::new(input.as_bytes(), Vec::new());
        run(session, &mut console).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn buy_then_save_and_exit() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);
        let out = drive(&mut session, "3\naapl\n10\n8\n");

        assert!(out.contains("Bought 10 AAPL @ $180.00"), "{out}");
        assert!(out.contains("Goodbye!"));
        assert_eq!(session.portfolio().cash(), 8_200.0);
        assert!(tmp.path().join("portfolio.csv").exists());
        assert!(tmp.path().join("transactions.csv").exists());
        assert!(tmp.path().join("performance.csv").exists());
    }

    #[test]
    fn invalid_and_non_numeric_choices() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);
        let out = drive(&mut session, "abc\n9\n0\n8\n");

        assert_eq!(out.matches("Invalid option.").count(), 2);
        // "abc" re-prompts without printing the menu again
        assert_eq!(out.matches("=== STOCK TRADING PLATFORM ===").count(), 3);
    }

    #[test]
    fn end_of_input_saves() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);
        let out = drive(&mut session, "5\n");

        assert!(out.contains("Advanced one day. Prices updated. Date: 2024-06-04"));
        assert!(out.contains("Goodbye!"));
        let saved = std::fs::read_to_string(tmp.path().join("performance.csv")).unwrap();
        assert_eq!(saved.lines().count(), 3);
    }

    #[test]
    fn trade_rejections_are_reported() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);
        let out = drive(
            &mut session,
            "3\nMSFT\n3\nNFLX\n-2\n3\nNFLX\nlots\n100\n4\nTSLA\n1\n8\n",
        );

        assert!(out.contains("Unknown ticker."));
        assert!(out.contains("Invalid quantity."));
        assert!(out.contains("Enter a valid number: "));
        assert!(out.contains("Purchase failed: insufficient cash"));
        assert!(out.contains("Sell failed: no holding in TSLA"));
        assert!(session.portfolio().transactions().is_empty());
    }

    #[test]
    fn views_render_tables() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);
        let out = drive(&mut session, "6\n7\n1\n3\nGOOG\n2\n2\n6\n8\n");

        assert!(out.contains("(No transactions)"));
        assert!(out.contains("10,000.00"));
        assert!(out.contains("Amazon.com Inc."));
        assert!(out.contains("Total Portfolio Value: $10,000.00"));
        assert!(out.contains("BUY    GOOG"));
    }
}
