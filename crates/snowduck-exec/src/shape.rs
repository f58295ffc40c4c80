//! Result-set shaping into the wire format (§4.5): column metadata plus
//! JSON-safe cells.

use snowduck_engine::{RowSet, Value};

#[derive(Debug, Clone)]
pub struct ColumnMeta {
    pub name: String,
    pub type_tag: String,
    pub nullable: bool,
}

#[derive(Debug, Clone)]
pub struct ShapedResult {
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// Shapes a raw engine rowset. Column type tags are inferred from the
/// first non-null cell seen in each column, since the connection manager
/// doesn't carry engine-side static type metadata across its boundary;
/// an all-null column defaults to `TEXT`.
pub fn shape_rowset(rowset: &RowSet) -> ShapedResult {
    let mut type_tags = vec![None; rowset.columns.len()];
    for row in &rowset.rows {
        for (idx, cell) in row.iter().enumerate() {
            if type_tags[idx].is_none() && !cell.is_null() {
                type_tags[idx] = Some(type_tag_for(cell));
            }
        }
    }

    let columns = rowset
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| ColumnMeta {
            // Wire compatibility: unquoted identifiers are uppercased
            // throughout the emulated service, including result column
            // names, even though the embedded engine preserves the
            // lowercase spelling of an unquoted alias verbatim.
            name: name.to_uppercase(),
            type_tag: type_tags[idx].clone().unwrap_or_else(|| "TEXT".to_string()),
            nullable: true,
        })
        .collect();

    let rows = rowset
        .rows
        .iter()
        .map(|row| row.iter().map(cell_to_json).collect())
        .collect();

    ShapedResult { columns, rows }
}

fn type_tag_for(value: &Value) -> String {
    match value {
        Value::Null => "TEXT",
        Value::Bool(_) => "BOOLEAN",
        Value::Int(_) => "FIXED",
        Value::Float(_) => "REAL",
        Value::Text(_) => "TEXT",
        Value::Date(_) => "DATE",
        Value::Timestamp(_) => "TIMESTAMP",
        Value::Blob(_) => "BINARY",
    }
    .to_string()
}

/// Coerces one cell to its JSON-safe wire representation: integers as
/// decimal strings, floats as strings (still integer-shaped when the
/// value has no fractional part, matching the reference service's wire
/// quirk of not distinguishing `1` from `1.0` on the way out), dates as
/// `YYYY-MM-DD`, timestamps as ISO-8601, NULLs as JSON null.
pub fn cell_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::String(b.to_string()),
        Value::Int(i) => serde_json::Value::String(i.to_string()),
        Value::Float(f) => serde_json::Value::String(format_float(*f)),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
        Value::Timestamp(ts) => serde_json::Value::String(ts.and_utc().to_rfc3339()),
        Value::Blob(b) => serde_json::Value::String(hex_encode(b)),
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn integers_become_decimal_strings() {
        assert_eq!(cell_to_json(&Value::Int(42)), serde_json::Value::String("42".to_string()));
    }

    #[test]
    fn whole_floats_drop_the_fractional_part() {
        assert_eq!(cell_to_json(&Value::Float(9.0)), serde_json::Value::String("9".to_string()));
        assert_eq!(cell_to_json(&Value::Float(9.5)), serde_json::Value::String("9.5".to_string()));
    }

    #[test]
    fn dates_format_as_plain_iso_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(cell_to_json(&Value::Date(d)), serde_json::Value::String("2024-01-15".to_string()));
    }

    #[test]
    fn null_becomes_json_null() {
        assert_eq!(cell_to_json(&Value::Null), serde_json::Value::Null);
    }

    #[test]
    fn shape_rowset_infers_column_type_tags() {
        let rowset = RowSet {
            columns: vec!["n".to_string()],
            rows: vec![vec![Value::Int(1)], vec![Value::Int(2)]],
        };
        let shaped = shape_rowset(&rowset);
        assert_eq!(shaped.columns[0].type_tag, "FIXED");
        assert_eq!(shaped.rows[0][0], serde_json::Value::String("1".to_string()));
    }
}
