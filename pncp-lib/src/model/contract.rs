//! Normalized contract row with derived columns

use std::str::FromStr;

use chrono::DateTime;
use chrono::Datelike;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;

use super::Record;
use super::fields;

/// One million, the divisor for the per-million value column.
const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d"];

/// A search record together with the columns derived from it.
///
/// Derivation never fails: an unparseable signing date becomes `None` (and so
/// does the year) and an unparseable global value becomes zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    record: Record,
    signing_date: Option<NaiveDateTime>,
    global_value: Decimal,
}

impl Contract {
    /// Derives the computed columns from a record.
    pub fn from_record(record: Record) -> Self {
        let signing_date = record.get(fields::SIGNING_DATE).and_then(parse_signing_date);
        let global_value = record
            .get(fields::GLOBAL_VALUE)
            .map(parse_global_value)
            .unwrap_or(Decimal::ZERO);

        Self {
            record,
            signing_date,
            global_value,
        }
    }

    /// Returns the underlying record.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Parsed signing date, if the raw value was a recognizable date.
    pub fn signing_date(&self) -> Option<NaiveDateTime> {
        self.signing_date
    }

    /// Year of the signing date.
    pub fn year(&self) -> Option<i32> {
        self.signing_date.map(|d| d.year())
    }

    /// Global value, zero when absent or unparseable.
    pub fn global_value(&self) -> Decimal {
        self.global_value
    }

    /// Global value expressed in millions.
    pub fn global_value_millions(&self) -> Decimal {
        self.global_value / MILLION
    }

    pub fn body_name(&self) -> Option<&str> {
        self.record.text(fields::BODY_NAME)
    }

    pub fn municipality_name(&self) -> Option<&str> {
        self.record.text(fields::MUNICIPALITY_NAME)
    }

    pub fn uf(&self) -> Option<&str> {
        self.record.text(fields::UF)
    }

    pub fn modality_name(&self) -> Option<&str> {
        self.record.text(fields::MODALITY_NAME)
    }

    pub fn description(&self) -> Option<&str> {
        self.record.text(fields::DESCRIPTION)
    }
}

/// Parses a signing date, returning `None` for anything unrecognized.
///
/// Offsets are dropped after converting to UTC. A bare date is taken as
/// midnight.
pub fn parse_signing_date(value: &Value) -> Option<NaiveDateTime> {
    let raw = value.as_str()?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parses a global value, coercing anything unparseable to zero.
///
/// Accepts JSON numbers and numeric strings in plain or scientific notation.
/// Finite numbers beyond the `Decimal` range saturate to `Decimal::MAX` or
/// `Decimal::MIN`.
pub fn parse_global_value(value: &Value) -> Decimal {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Decimal::ZERO,
    };

    if let Ok(value) = Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)) {
        return value;
    }

    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n.abs() > 1.0 => {
            let bound = if n.is_sign_negative() { Decimal::MIN } else { Decimal::MAX };
            Decimal::from_f64(n).unwrap_or(bound)
        }
        Ok(n) if n.is_finite() => Decimal::from_f64(n).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}
