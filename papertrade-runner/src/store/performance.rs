//! `performance.csv`: portfolio value over time.

use std::io;

use chrono::NaiveDate;
use papertrade_core::domain::ValuePoint;

use super::{line_of, line_of_error, parse_amount, reader_builder, writer_builder};
use super::{Parsed, SkippedLine};

pub const FILE_NAME: &str = "performance.csv";

pub const HEADER: [&str; 2] = ["date", "value"];

pub fn write<W: io::Write>(out: W, points: &[ValuePoint]) -> csv::Result<()> {
    let mut wtr = writer_builder().from_writer(out);
    wtr.write_record(HEADER)?;
    for p in points {
        wtr.write_record([p.date.to_string().as_str(), p.value.to_string().as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read<R: io::Read>(input: R) -> Parsed<ValuePoint> {
    let mut parsed = Parsed::default();
    for result in reader_builder(true).from_reader(input).records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                parsed.skipped.push(SkippedLine {
                    line: line_of_error(&e),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        match parse_point(&record) {
            Ok(point) => parsed.records.push(point),
            Err(reason) => parsed.skipped.push(SkippedLine {
                line: line_of(&record),
                reason,
            }),
        }
    }
    parsed
}

fn parse_point(record: &csv::StringRecord) -> Result<ValuePoint, String> {
    if record.len() < HEADER.len() {
        return Err(format!("expected 2 fields, found {}", record.len()));
    }
    let raw_date = record.get(0).unwrap_or_default();
    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{raw_date}'"))?;
    let value = parse_amount(record, 1, "value")?;
    Ok(ValuePoint::new(date, value))
}
