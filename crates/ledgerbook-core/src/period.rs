//! Inclusive date ranges used to filter postings

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Inclusive range; an open end includes everything on that side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Unchecked wire shape, validated through [`DateRange::new`]
#[derive(Deserialize)]
struct RawDateRange {
    #[serde(default)]
    start: Option<NaiveDate>,
    #[serde(default)]
    end: Option<NaiveDate>,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = CoreError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Range covering the whole ledger
    pub fn all() -> Self {
        Self::default()
    }

    /// Everything up to and including `end`
    pub fn through(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        Self::new(Some(start), Some(end))
    }

    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> CoreResult<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(CoreError::ValidationError {
                    message: format!("date range start {} is after end {}", s, e),
                });
            }
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        match (self.start, self.end) {
            (None, None) => true,
            (Some(s), None) => *date >= s,
            (None, Some(e)) => *date <= e,
            (Some(s), Some(e)) => *date >= s && *date <= e,
        }
    }

    /// Last day before the range starts, `None` for an open start
    pub fn day_before_start(&self) -> Option<NaiveDate> {
        self.start.and_then(|s| s.pred_opt())
    }

    /// Fiscal year-to-date range ending on `end`.
    ///
    /// `start_month` is the first month of the fiscal year (1-12).
    pub fn fiscal_year_to_date(end: NaiveDate, start_month: u32) -> CoreResult<Self> {
        let year = if end.month() >= start_month {
            end.year()
        } else {
            end.year() - 1
        };
        let start = NaiveDate::from_ymd_opt(year, start_month, 1).ok_or_else(|| {
            CoreError::ValidationError {
                message: format!("invalid fiscal year start month {}", start_month),
            }
        })?;
        Self::between(start, end)
    }

    pub fn description(&self) -> String {
        match (self.start, self.end) {
            (None, None) => "All time".to_string(),
            (Some(s), None) => format!("From {}", s),
            (None, Some(e)) => format!("As of {}", e),
            (Some(s), Some(e)) => format!("{} to {}", s, e),
        }
    }
}
