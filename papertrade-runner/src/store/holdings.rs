//! `portfolio.csv`: cash balance and open holdings.

use std::io;

use papertrade_core::domain::Holding;

use super::{line_of, line_of_error, parse_amount, parse_field, parse_ticker};
use super::{reader_builder, writer_builder};
use super::{Parsed, SkippedLine};

pub const FILE_NAME: &str = "portfolio.csv";

/// First field of the line carrying the cash balance.
pub const CASH_SENTINEL: &str = "CASH";

/// Contents of a holdings file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingsSnapshot {
    /// Cash from the last well-formed `CASH` line, if any.
    pub cash: Option<f64>,
    pub holdings: Parsed<Holding>,
}

pub fn write<'a, W: io::Write>(
    out: W,
    cash: f64,
    holdings: impl Iterator<Item = &'a Holding>,
) -> csv::Result<()> {
    let mut wtr = writer_builder().from_writer(out);
    wtr.write_record([CASH_SENTINEL, cash.to_string().as_str()])?;
    for h in holdings {
        wtr.write_record([
            h.ticker.as_str(),
            h.quantity.to_string().as_str(),
            h.avg_cost.to_string().as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parse a holdings file. There is no header; every line is either the
/// cash line or a holding, anything else is skipped.
pub fn read<R: io::Read>(input: R) -> HoldingsSnapshot {
    let mut snapshot = HoldingsSnapshot::default();
    for result in reader_builder(false).from_reader(input).records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                snapshot.holdings.skipped.push(SkippedLine {
                    line: line_of_error(&e),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let line = line_of(&record);
        let first = record.get(0).unwrap_or_default();

        if first.eq_ignore_ascii_case(CASH_SENTINEL) && record.len() >= 2 {
            match parse_cash(&record) {
                Ok(cash) => snapshot.cash = Some(cash),
                Err(reason) => snapshot.holdings.skipped.push(SkippedLine { line, reason }),
            }
        } else if record.len() >= 3 {
            match parse_holding(&record) {
                Ok(holding) => snapshot.holdings.records.push(holding),
                Err(reason) => snapshot.holdings.skipped.push(SkippedLine { line, reason }),
            }
        } else if !(record.len() == 1 && first.is_empty()) {
            snapshot.holdings.skipped.push(SkippedLine {
                line,
                reason: format!("expected at least 3 fields, found {}", record.len()),
            });
        }
    }
    snapshot
}

fn parse_cash(record: &csv::StringRecord) -> Result<f64, String> {
    let cash = parse_amount(record, 1, "cash")?;
    if cash < 0.0 {
        return Err(format!("negative cash {cash}"));
    }
    Ok(cash)
}

fn parse_holding(record: &csv::StringRecord) -> Result<Holding, String> {
    let ticker = parse_ticker(record, 0)?;
    let quantity: u32 = parse_field(record, 1, "quantity")?;
    if quantity == 0 {
        return Err("quantity must be positive".into());
    }
    let avg_cost = parse_amount(record, 2, "average cost")?;
    if avg_cost < 0.0 {
        return Err(format!("negative average cost {avg_cost}"));
    }
    Ok(Holding::new(ticker, quantity, avg_cost))
}
