//! Small helpers shared by every object-kind module for turning a
//! [`RowSet`] row into a typed struct.

use snowduck_common::{SdError, SdResult};
use snowduck_engine::{RowSet, Value};

pub fn row_opt<T>(rows: RowSet, f: impl Fn(&[Value]) -> SdResult<T>) -> SdResult<Option<T>> {
    match rows.rows.first() {
        Some(row) => Ok(Some(f(row)?)),
        None => Ok(None),
    }
}

pub fn text(row: &[Value], idx: usize) -> SdResult<String> {
    row[idx]
        .as_text()
        .map(str::to_string)
        .ok_or_else(|| SdError::execution("expected text column"))
}

pub fn opt_text(row: &[Value], idx: usize) -> Option<String> {
    row[idx].as_text().map(str::to_string)
}

pub fn int(row: &[Value], idx: usize) -> SdResult<i64> {
    row[idx]
        .as_int()
        .ok_or_else(|| SdError::execution("expected integer column"))
}

pub fn opt_int(row: &[Value], idx: usize) -> Option<i64> {
    row[idx].as_int()
}
