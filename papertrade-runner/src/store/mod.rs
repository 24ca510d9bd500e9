//! Flat-file persistence for the trading simulator.
//!
//! A portfolio is stored as three independent CSV files in one directory:
//! - `portfolio.csv`: `CASH,<amount>` then one `<TICKER>,<qty>,<avgCost>` line per holding
//! - `transactions.csv`: header, then the full transaction log
//! - `performance.csv`: header, then the full value history
//!
//! Each file is written and read on its own. A failure on one file is logged
//! and reported but never stops the other two, and a malformed line is
//! skipped without affecting the lines around it.

pub mod holdings;
pub mod performance;
pub mod transactions;

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{error, info, warn};
use papertrade_core::domain::{Portfolio, Ticker};
use thiserror::Error;

/// Errors from reading or writing one data file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error on {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// The three files that make up a saved portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFile {
    Holdings,
    Transactions,
    Performance,
}

impl DataFile {
    pub const ALL: [DataFile; 3] = [
        DataFile::Holdings,
        DataFile::Transactions,
        DataFile::Performance,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            DataFile::Holdings => holdings::FILE_NAME,
            DataFile::Transactions => transactions::FILE_NAME,
            DataFile::Performance => performance::FILE_NAME,
        }
    }
}

impl fmt::Display for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A line that was dropped while loading.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    pub line: u64,
    pub reason: String,
}

/// Records parsed from one file plus the lines that had to be skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedLine>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Outcome of [`Store::save`]. Saving never fails as a whole.
#[derive(Debug, Default)]
pub struct SaveReport {
    pub written: Vec<DataFile>,
    pub failures: Vec<(DataFile, StoreError)>,
}

impl SaveReport {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of [`Store::load`].
#[derive(Debug)]
pub struct LoadReport {
    pub portfolio: Portfolio,
    /// Files that existed and were read.
    pub found: Vec<DataFile>,
    /// Skipped lines per file.
    pub skipped: Vec<(DataFile, SkippedLine)>,
}

impl LoadReport {
    pub fn is_fresh(&self) -> bool {
        self.found.is_empty()
    }
}

/// Directory holding the three data files.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file: DataFile) -> PathBuf {
        self.dir.join(file.file_name())
    }

    /// Overwrite all three files. Each file is attempted regardless of how
    /// the others went.
    pub fn save(&self, portfolio: &Portfolio) -> SaveReport {
        let mut report = SaveReport::default();
        for file in DataFile::ALL {
            match self.write_file(file, portfolio) {
                Ok(()) => report.written.push(file),
                Err(e) => {
                    error!("failed to save {file}: {e}");
                    report.failures.push((file, e));
                }
            }
        }
        info!(
            "saved {}/{} data files to {}",
            report.written.len(),
            DataFile::ALL.len(),
            self.dir.display()
        );
        report
    }

    fn write_file(&self, file: DataFile, portfolio: &Portfolio) -> Result<(), StoreError> {
        let path = self.path(file);
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let out = File::create(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let written = match file {
            DataFile::Holdings => holdings::write(out, portfolio.cash(), portfolio.holdings()),
            DataFile::Transactions => transactions::write(out, portfolio.transactions()),
            DataFile::Performance => performance::write(out, portfolio.value_history()),
        };
        written.map_err(|source| StoreError::Csv { path, source })
    }

    /// Load whatever files exist, skipping malformed lines. Missing or
    /// unreadable files leave the matching part of the portfolio empty
    /// (and cash at `default_cash`).
    pub fn load(&self, default_cash: f64) -> LoadReport {
        let mut found = Vec::new();
        let mut skipped = Vec::new();

        let mut cash = default_cash;
        let mut holdings = Vec::new();
        if let Some(input) = self.open(DataFile::Holdings) {
            found.push(DataFile::Holdings);
            let snapshot = holdings::read(input);
            if let Some(saved) = snapshot.cash {
                cash = saved;
            }
            holdings = snapshot.holdings.records;
            skipped.extend(snapshot.holdings.skipped.into_iter().map(|s| (DataFile::Holdings, s)));
        }

        let mut history = Vec::new();
        if let Some(input) = self.open(DataFile::Transactions) {
            found.push(DataFile::Transactions);
            let parsed = transactions::read(input);
            history = parsed.records;
            skipped.extend(parsed.skipped.into_iter().map(|s| (DataFile::Transactions, s)));
        }

        let mut values = Vec::new();
        if let Some(input) = self.open(DataFile::Performance) {
            found.push(DataFile::Performance);
            let parsed = performance::read(input);
            values = parsed.records;
            skipped.extend(parsed.skipped.into_iter().map(|s| (DataFile::Performance, s)));
        }

        for (file, s) in &skipped {
            warn!("{file} line {}: skipped ({})", s.line, s.reason);
        }

        let portfolio = Portfolio::from_parts(cash, holdings, history, values);
        if found.is_empty() {
            info!(
                "no saved portfolio in {}, starting with {default_cash:.2} cash",
                self.dir.display()
            );
        } else {
            info!(
                "loaded portfolio from {}: {} holdings, {} transactions, {} value points",
                self.dir.display(),
                portfolio.holding_count(),
                portfolio.transactions().len(),
                portfolio.value_history().len()
            );
        }

        LoadReport {
            portfolio,
            found,
            skipped,
        }
    }

    /// The saved portfolio, or a fresh one seeded with `default_cash`.
    pub fn load_or_new(&self, default_cash: f64) -> Portfolio {
        self.load(default_cash).portfolio
    }

    fn open(&self, file: DataFile) -> Option<File> {
        let path = self.path(file);
        match File::open(&path) {
            Ok(f) => Some(f),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(source) => {
                let err = StoreError::Io { path, source };
                error!("failed to load {file}: {err}");
                None
            }
        }
    }
}

// ─── Field parsing helpers ──────────────────────────────────────────

/// 1-based line number of a record, 0 if unknown.
pub(crate) fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

pub(crate) fn line_of_error(err: &csv::Error) -> u64 {
    err.position().map_or(0, |p| p.line())
}

pub(crate) fn parse_field<T: FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<T, String> {
    let raw = record
        .get(index)
        .ok_or_else(|| format!("missing {name}"))?;
    raw.trim()
        .parse()
        .map_err(|_| format!("invalid {name} '{raw}'"))
}

pub(crate) fn parse_ticker(record: &csv::StringRecord, index: usize) -> Result<Ticker, String> {
    let raw = record.get(index).unwrap_or_default();
    let ticker = Ticker::new(raw);
    if ticker.is_empty() {
        return Err("empty ticker".into());
    }
    if !ticker.is_well_formed() {
        return Err(format!("malformed ticker '{raw}'"));
    }
    Ok(ticker)
}

pub(crate) fn parse_amount(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<f64, String> {
    let value: f64 = parse_field(record, index, name)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{name} is not a finite number"))
    }
}

pub(crate) fn reader_builder(has_headers: bool) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(has_headers)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All);
    builder
}

pub(crate) fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.flexible(true);
    builder
}
