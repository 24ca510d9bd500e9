//! Simulated trading date.

use chrono::NaiveDate;

/// The session's current date. Moves forward one calendar day per
/// simulated day and never goes backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimCalendar {
    today: NaiveDate,
}

impl SimCalendar {
    pub fn starting(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Continue a saved session: start from whichever is later, the real
    /// date or the last date already recorded.
    pub fn resume(today: NaiveDate, last_recorded: Option<NaiveDate>) -> Self {
        let start = last_recorded.map_or(today, |last| last.max(today));
        Self { today: start }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Move to the next day and return it.
    pub fn advance(&mut self) -> NaiveDate {
        if let Some(next) = self.today.succ_opt() {
            self.today = next;
        }
        self.today
    }
}
