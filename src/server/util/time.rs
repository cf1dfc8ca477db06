//! Clock helpers.
//!
//! All timestamps are stored as naive UTC values.

use chrono::{NaiveDate, NaiveDateTime, Utc};

/// The current time as a naive UTC timestamp.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// The current UTC calendar date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
