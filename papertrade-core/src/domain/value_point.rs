use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Total portfolio value (cash + marked holdings) on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuePoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl ValuePoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}
