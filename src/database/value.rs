//! DuckDB value conversion

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, NaiveDate};
use duckdb::types::{TimeUnit, Value as DbValue};
use serde_json::Value;

/// Days between 0001-01-01 and 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Convert a column value to JSON for a record's payload
///
/// Integers that fit a key are emitted as numbers. Wider integers fall back
/// to their decimal text, as do values with no JSON counterpart.
pub fn duckdb_value_to_json(value: DbValue) -> Value {
    if let Some(n) = duckdb_value_to_key(&value) {
        return Value::from(n);
    }
    match value {
        DbValue::Null => Value::Null,
        DbValue::Boolean(b) => Value::Bool(b),
        DbValue::UBigInt(n) => Value::from(n),
        DbValue::HugeInt(n) => Value::String(n.to_string()),
        DbValue::Float(f) => float_to_json(f64::from(f)),
        DbValue::Double(f) => float_to_json(f),
        DbValue::Text(s) => Value::String(s),
        DbValue::Blob(bytes) => Value::String(STANDARD.encode(bytes)),
        DbValue::Timestamp(unit, raw) => timestamp_to_json(unit, raw),
        DbValue::Date32(days) => {
            NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
                .map_or(Value::from(days), |date| {
                    Value::String(date.format("%Y-%m-%d").to_string())
                })
        }
        other => Value::String(format!("{other:?}")),
    }
}

/// Read a key column value, accepting any integral type
pub fn duckdb_value_to_key(value: &DbValue) -> Option<i64> {
    match *value {
        DbValue::TinyInt(i) => Some(i.into()),
        DbValue::SmallInt(i) => Some(i.into()),
        DbValue::Int(i) => Some(i.into()),
        DbValue::BigInt(i) => Some(i),
        DbValue::UTinyInt(i) => Some(i.into()),
        DbValue::USmallInt(i) => Some(i.into()),
        DbValue::UInt(i) => Some(i.into()),
        DbValue::UBigInt(i) => i64::try_from(i).ok(),
        DbValue::HugeInt(i) => i64::try_from(i).ok(),
        _ => None,
    }
}

/// NaN and infinities have no JSON form
fn float_to_json(f: f64) -> Value {
    serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
}

/// Render a timestamp as RFC 3339 UTC with microsecond precision
fn timestamp_to_json(unit: TimeUnit, raw: i64) -> Value {
    let micros = match unit {
        TimeUnit::Second => raw.checked_mul(1_000_000),
        TimeUnit::Millisecond => raw.checked_mul(1_000),
        TimeUnit::Microsecond => Some(raw),
        TimeUnit::Nanosecond => Some(raw / 1_000),
    };
    micros
        .and_then(DateTime::from_timestamp_micros)
        .map_or(Value::from(raw), |dt| {
            Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string())
        })
}
