//! Converts the REST statements v2 binding map into positional engine
//! parameters, in order `"1", "2", …`.

use chrono::{NaiveDate, NaiveDateTime};
use snowduck_api::statements::Binding;
use snowduck_common::{SdError, SdResult};
use snowduck_engine::Value;
use snowduck_sql::{validate_binding, BindingKind};
use std::collections::HashMap;

pub fn bindings_to_params(bindings: &HashMap<String, Binding>) -> SdResult<Vec<Value>> {
    let mut indices: Vec<u32> = bindings
        .keys()
        .map(|k| k.parse::<u32>().map_err(|_| SdError::validation(format!("invalid binding index: {k}"))))
        .collect::<SdResult<Vec<_>>>()?;
    indices.sort_unstable();

    indices
        .into_iter()
        .map(|i| {
            let binding = &bindings[&i.to_string()];
            let kind = BindingKind::parse(&binding.type_name)?;
            let normalized = validate_binding(kind, &binding.value)?;
            to_value(kind, &normalized)
        })
        .collect()
}

fn to_value(kind: BindingKind, normalized: &str) -> SdResult<Value> {
    match kind {
        BindingKind::Date => NaiveDate::parse_from_str(normalized, "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|e| SdError::validation(format!("invalid date binding: {e}"))),
        BindingKind::Timestamp => parse_timestamp(normalized),
        BindingKind::Fixed => normalized
            .parse::<i64>()
            .map(Value::Int)
            .or_else(|_| normalized.parse::<f64>().map(|f| Value::Int(f as i64)))
            .map_err(|e| SdError::validation(format!("invalid fixed binding: {e}"))),
        BindingKind::Real => normalized
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| SdError::validation(format!("invalid real binding: {e}"))),
        BindingKind::Boolean => Ok(Value::Bool(normalized == "true")),
        BindingKind::Text | BindingKind::Time => Ok(Value::Text(normalized.to_string())),
    }
}

fn parse_timestamp(normalized: &str) -> SdResult<Value> {
    chrono::DateTime::parse_from_rfc3339(normalized)
        .map(|dt| Value::Timestamp(dt.naive_utc()))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(normalized, "%Y-%m-%dT%H:%M:%S").map(Value::Timestamp)
        })
        .map_err(|e| SdError::validation(format!("invalid timestamp binding: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(type_name: &str, value: &str) -> Binding {
        serde_json::from_value(serde_json::json!({"type": type_name, "value": value})).unwrap()
    }

    #[test]
    fn orders_positional_bindings_by_numeric_index() {
        let mut map = HashMap::new();
        map.insert("2".to_string(), binding("TEXT", "second"));
        map.insert("1".to_string(), binding("TEXT", "first"));
        let params = bindings_to_params(&map).unwrap();
        assert_eq!(params, vec![Value::text("first"), Value::text("second")]);
    }

    #[test]
    fn rejects_sql_injection_in_a_date_binding() {
        let mut map = HashMap::new();
        map.insert("1".to_string(), binding("DATE", "2024-01-15'; DROP TABLE X;--"));
        assert!(bindings_to_params(&map).is_err());
    }

    #[test]
    fn fixed_binding_parses_to_an_integer_value() {
        let mut map = HashMap::new();
        map.insert("1".to_string(), binding("FIXED", "42"));
        let params = bindings_to_params(&map).unwrap();
        assert_eq!(params, vec![Value::Int(42)]);
    }
}
