//! A small, engine-agnostic value type.
//!
//! Every other crate in the workspace trades in [`Value`], never in the
//! embedded engine's own dynamic value type. That keeps the choice of engine
//! an implementation detail of this one crate.

use chrono::{NaiveDate, NaiveDateTime};
use duckdb::types::Value as DuckValue;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Blob(Vec<u8>),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&Value> for DuckValue {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => DuckValue::Null,
            Value::Bool(b) => DuckValue::Boolean(*b),
            Value::Int(i) => DuckValue::BigInt(*i),
            Value::Float(f) => DuckValue::Double(*f),
            Value::Text(s) => DuckValue::Text(s.clone()),
            Value::Date(d) => DuckValue::Date32(
                d.signed_duration_since(
                    NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date"),
                )
                .num_days() as i32,
            ),
            Value::Timestamp(ts) => DuckValue::Timestamp(
                duckdb::types::TimeUnit::Microsecond,
                ts.and_utc().timestamp_micros(),
            ),
            Value::Blob(b) => DuckValue::Blob(b.clone()),
        }
    }
}

impl From<DuckValue> for Value {
    fn from(v: DuckValue) -> Self {
        match v {
            DuckValue::Null => Value::Null,
            DuckValue::Boolean(b) => Value::Bool(b),
            DuckValue::TinyInt(i) => Value::Int(i as i64),
            DuckValue::SmallInt(i) => Value::Int(i as i64),
            DuckValue::Int(i) => Value::Int(i as i64),
            DuckValue::BigInt(i) => Value::Int(i),
            DuckValue::HugeInt(i) => Value::Int(i as i64),
            DuckValue::UTinyInt(i) => Value::Int(i as i64),
            DuckValue::USmallInt(i) => Value::Int(i as i64),
            DuckValue::UInt(i) => Value::Int(i as i64),
            DuckValue::UBigInt(i) => Value::Int(i as i64),
            DuckValue::Float(f) => Value::Float(f as f64),
            DuckValue::Double(f) => Value::Float(f),
            DuckValue::Decimal(d) => Value::Text(d.to_string()),
            DuckValue::Text(s) => Value::Text(s),
            DuckValue::Blob(b) => Value::Blob(b),
            DuckValue::Date32(days) => Value::Date(
                NaiveDate::from_ymd_opt(1970, 1, 1)
                    .expect("valid epoch date")
                    + chrono::Duration::days(days as i64),
            ),
            DuckValue::Timestamp(unit, v) => {
                let micros = match unit {
                    duckdb::types::TimeUnit::Second => v.saturating_mul(1_000_000),
                    duckdb::types::TimeUnit::Millisecond => v.saturating_mul(1_000),
                    duckdb::types::TimeUnit::Microsecond => v,
                    duckdb::types::TimeUnit::Nanosecond => v / 1_000,
                };
                match chrono::DateTime::from_timestamp_micros(micros) {
                    Some(dt) => Value::Timestamp(dt.naive_utc()),
                    None => Value::Null,
                }
            }
            other => Value::Text(format!("{other:?}")),
        }
    }
}
