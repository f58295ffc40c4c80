//! Parameter binding validation (§4.4): the first line of defense against
//! SQL injection through binding payloads. A binding's value is validated
//! and normalized here, then passed to the engine as a parameter — never
//! concatenated into SQL text.

use regex::Regex;
use snowduck_common::{SdError, SdResult};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Date,
    Time,
    Timestamp,
    Fixed,
    Real,
    Text,
    Boolean,
}

impl BindingKind {
    pub fn parse(type_tag: &str) -> SdResult<Self> {
        match type_tag.to_uppercase().as_str() {
            "DATE" => Ok(BindingKind::Date),
            "TIME" => Ok(BindingKind::Time),
            "TIMESTAMP" => Ok(BindingKind::Timestamp),
            "FIXED" => Ok(BindingKind::Fixed),
            "REAL" => Ok(BindingKind::Real),
            "TEXT" => Ok(BindingKind::Text),
            "BOOLEAN" => Ok(BindingKind::Boolean),
            other => Err(SdError::validation(format!("unsupported binding type: {other}"))),
        }
    }
}

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}(\.\d+)?$").unwrap());
static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})$").unwrap()
});
static FIXED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?\d+(\.\d+)?$").unwrap());
static REAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+(\.\d+)?([eE][+-]?\d+)?$").unwrap());

/// Validates `value` against `kind`'s acceptance rule, returning the
/// engine-ready normalized string. Rejection is always a `ValidationFailed`
/// error, the wire-level `ValidationFailed` response code.
pub fn validate_binding(kind: BindingKind, value: &str) -> SdResult<String> {
    let ok = match kind {
        BindingKind::Date => DATE_RE.is_match(value) && chrono_date_is_valid(value),
        BindingKind::Time => TIME_RE.is_match(value),
        BindingKind::Timestamp => TIMESTAMP_RE.is_match(value),
        BindingKind::Fixed => FIXED_RE.is_match(value),
        BindingKind::Real => REAL_RE.is_match(value),
        BindingKind::Text => true,
        BindingKind::Boolean => matches!(value.to_ascii_lowercase().as_str(), "true" | "false"),
    };

    if ok {
        Ok(normalize(kind, value))
    } else {
        Err(SdError::validation(format!(
            "binding value {value:?} is not a valid {kind:?}"
        )))
    }
}

fn normalize(kind: BindingKind, value: &str) -> String {
    match kind {
        BindingKind::Boolean => value.to_ascii_lowercase(),
        _ => value.to_string(),
    }
}

fn chrono_date_is_valid(value: &str) -> bool {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_well_formed_date() {
        assert!(validate_binding(BindingKind::Date, "2024-01-15").is_ok());
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(validate_binding(BindingKind::Date, "invalid").is_err());
        assert!(validate_binding(BindingKind::Date, "2024-01-15 ").is_err());
        assert!(validate_binding(BindingKind::Date, "2024-13-40").is_err());
    }

    #[test]
    fn rejects_injection_attempts_through_date_binding() {
        let err = validate_binding(BindingKind::Date, "2024-01-15'; DROP TABLE X;--").unwrap_err();
        assert_eq!(err.kind(), snowduck_common::ErrorKind::ValidationFailed);
    }

    #[test]
    fn accepts_timestamps_with_explicit_zone() {
        assert!(validate_binding(BindingKind::Timestamp, "2024-01-15T10:00:00Z").is_ok());
        assert!(validate_binding(BindingKind::Timestamp, "2024-01-15T10:00:00+02:00").is_ok());
        assert!(validate_binding(BindingKind::Timestamp, "2024-01-15T10:00:00").is_err());
    }

    #[test]
    fn boolean_is_case_insensitive() {
        assert_eq!(validate_binding(BindingKind::Boolean, "TRUE").unwrap(), "true");
        assert!(validate_binding(BindingKind::Boolean, "yes").is_err());
    }
}
