//! Tolerant parsing for Text-encoded columns.
//!
//! Rows written by this crate always round-trip cleanly; these helpers only
//! log and fall back when a row was edited out-of-band.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

pub(crate) fn parse_decimal(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(e_decimal) => match Decimal::from_scientific(value) {
            Ok(d) => d,
            Err(e_scientific) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as scientific (err: {}). Falling back to ZERO.",
                    field_name, value, e_decimal, e_scientific
                );
                Decimal::ZERO
            }
        },
    }
}

pub(crate) fn parse_date(value: &str, field_name: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_else(|e| {
        log::error!("Failed to parse {} '{}': {}", field_name, value, e);
        NaiveDate::default()
    })
}

pub(crate) fn parse_timestamp(value: &str, field_name: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            log::error!("Failed to parse {} '{}': {}", field_name, value, e);
            Utc::now()
        })
}
