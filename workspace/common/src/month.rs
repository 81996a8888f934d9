use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MONTH_LABELS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMonth {
    #[error("Month must be between 1 and 12, got {0}")]
    OutOfRange(i64),
    #[error("Month must be a number between 1 and 12, got '{0}'")]
    NotANumber(String),
}

/// Calendar month, always within `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Month(u8);

impl Month {
    pub fn new(number: u8) -> Result<Self, InvalidMonth> {
        if (1..=12).contains(&number) {
            Ok(Self(number))
        } else {
            Err(InvalidMonth::OutOfRange(number.into()))
        }
    }

    /// Current month in the local calendar.
    pub fn current() -> Self {
        let month = chrono::Local::now().month();
        tracing::trace!(month, "Resolved current calendar month");
        // chrono guarantees 1..=12
        Self(month as u8)
    }

    pub fn all() -> impl Iterator<Item = Month> {
        (1..=12).map(Month)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Human-readable name (`July`).
    pub fn label(self) -> &'static str {
        MONTH_LABELS[usize::from(self.0 - 1)]
    }

    /// Three-letter chip label (`Jul`).
    pub fn short_label(self) -> &'static str {
        &self.label()[..3]
    }
}

impl TryFrom<i64> for Month {
    type Error = InvalidMonth;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(|n| Month::new(n).ok())
            .ok_or(InvalidMonth::OutOfRange(value))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Month {
    type Err = InvalidMonth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| InvalidMonth::NotANumber(s.to_string()))?;
        Month::try_from(value)
    }
}
