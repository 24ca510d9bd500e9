//! `transactions.csv`: the full transaction log.

use std::io;

use chrono::NaiveDate;
use papertrade_core::domain::{Side, Transaction};

use super::{line_of, line_of_error, parse_amount, parse_field, parse_ticker};
use super::{reader_builder, writer_builder};
use super::{Parsed, SkippedLine};

pub const FILE_NAME: &str = "transactions.csv";

pub const HEADER: [&str; 6] = ["date", "type", "ticker", "qty", "price", "total"];

pub fn write<W: io::Write>(out: W, transactions: &[Transaction]) -> csv::Result<()> {
    let mut wtr = writer_builder().from_writer(out);
    wtr.write_record(HEADER)?;
    for t in transactions {
        wtr.write_record([
            t.date.to_string().as_str(),
            t.side.as_str(),
            t.ticker.as_str(),
            t.quantity.to_string().as_str(),
            t.price.to_string().as_str(),
            t.total.to_string().as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parse a transaction log. The first line is a header and is skipped.
///
/// The `total` column is not trusted; it is recomputed as price × quantity.
pub fn read<R: io::Read>(input: R) -> Parsed<Transaction> {
    let mut parsed = Parsed::default();
    for result in reader_builder(true).from_reader(input).records() {
        match result {
            Ok(record) => match parse_transaction(&record) {
                Ok(tx) => parsed.records.push(tx),
                Err(reason) => parsed.skipped.push(SkippedLine {
                    line: line_of(&record),
                    reason,
                }),
            },
            Err(e) => parsed.skipped.push(SkippedLine {
                line: line_of_error(&e),
                reason: e.to_string(),
            }),
        }
    }
    parsed
}

fn parse_transaction(record: &csv::StringRecord) -> Result<Transaction, String> {
    if record.len() < HEADER.len() {
        return Err(format!(
            "expected {} fields, found {}",
            HEADER.len(),
            record.len()
        ));
    }
    let raw_date = record.get(0).unwrap_or_default();
    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{raw_date}'"))?;
    let side: Side = record.get(1).unwrap_or_default().parse()?;
    let ticker = parse_ticker(record, 2)?;
    let quantity: u32 = parse_field(record, 3, "quantity")?;
    if quantity == 0 {
        return Err("quantity must be positive".into());
    }
    let price = parse_amount(record, 4, "price")?;
    if price <= 0.0 {
        return Err(format!("non-positive price {price}"));
    }
    Ok(Transaction::new(date, side, ticker, quantity, price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use papertrade_core::domain::Ticker;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let txs = vec![
            Transaction::new(d(2024, 3, 1), Side::Buy, Ticker::new("AAPL"), 10, 100.0),
            Transaction::new(d(2024, 3, 2), Side::Sell, Ticker::new("AAPL"), 4, 120.5),
        ];
        let mut buf = Vec::new();
        write(&mut buf, &txs).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "date,type,ticker,qty,price,total\n\
             2024-03-01,BUY,AAPL,10,100,1000\n\
             2024-03-02,SELL,AAPL,4,120.5,482\n"
        );
    }

    #[test]
    fn header_only_file_is_empty() {
        let parsed = read("date,type,ticker,qty,price,total\n".as_bytes());
        assert!(parsed.records.is_empty());
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn reads_rows_and_recomputes_total() {
        let parsed = read(
            "date,type,ticker,qty,price,total\n2024-03-01,buy,aapl,10,100.0,999999\n".as_bytes(),
        );
        assert_eq!(
            parsed.records,
            vec![Transaction::new(d(2024, 3, 1), Side::Buy, Ticker::new("AAPL"), 10, 100.0)]
        );
        assert_eq!(parsed.records[0].total, 1_000.0);
    }

    #[test]
    fn skips_short_and_malformed_rows() {
        let input = "date,type,ticker,qty,price,total\n\
                     2024-03-01,BUY,AAPL,10,100\n\
                     03/01/2024,BUY,AAPL,10,100,1000\n\
                     2024-03-01,HOLD,AAPL,10,100,1000\n\
                     2024-03-01,SELL,AAPL,0,100,0\n\
                     2024-03-01,SELL,AAPL,1,abc,0\n\
                     2024-03-01,SELL,AAPL,1,-3,-3\n\
                     2024-03-04,SELL,GOOG,2,140,280\n";
        let parsed = read(input.as_bytes());
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].ticker, Ticker::new("GOOG"));
        let lines: Vec<u64> = parsed.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn stray_quote_only_loses_its_own_row() {
        let input = "date,type,ticker,qty,price,total\n\
                     2024-03-01,BUY,\"AAPL,1,100,100\n\
                     2024-03-02,BUY,GOOG,1,135,135\n\
                     2024-03-03,SELL,GOOG,1,140,140\n";
        let parsed = read(input.as_bytes());
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].line, 2);
    }
}
