//! Round-trip serialization of a table's column list into the delimited
//! string stored in `_metadata_tables.columns`.
//!
//! Format: `name:type:nullable:primarykey:default;name:type:...`. A missing
//! default is encoded as an empty field, so every field position is always
//! present and parsing never needs to guess arity.

use snowduck_common::SdError;

use crate::models::ColumnDef;

pub fn serialize_columns(columns: &[ColumnDef]) -> String {
    columns
        .iter()
        .map(|c| {
            format!(
                "{}:{}:{}:{}:{}",
                escape(&c.name),
                escape(&c.data_type),
                c.nullable,
                c.primary_key,
                c.default.as_deref().map(escape).unwrap_or_default(),
            )
        })
        .collect::<Vec<_>>()
        .join(";")
}

pub fn deserialize_columns(raw: &str) -> Result<Vec<ColumnDef>, SdError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(';').map(deserialize_one).collect()
}

fn deserialize_one(field: &str) -> Result<ColumnDef, SdError> {
    let parts: Vec<&str> = field.split(':').collect();
    if parts.len() != 5 {
        return Err(SdError::execution(format!(
            "malformed column definition: {field}"
        )));
    }
    let nullable = parts[2]
        .parse::<bool>()
        .map_err(|_| SdError::execution(format!("malformed nullable flag: {field}")))?;
    let primary_key = parts[3]
        .parse::<bool>()
        .map_err(|_| SdError::execution(format!("malformed primary-key flag: {field}")))?;
    let default = if parts[4].is_empty() {
        None
    } else {
        Some(unescape(parts[4]))
    };
    Ok(ColumnDef {
        name: unescape(parts[0]),
        data_type: unescape(parts[1]),
        nullable,
        primary_key,
        default,
    })
}

/// `:` and `;` never occur in identifiers or the type names the translator
/// produces, but defaults could in principle contain them, so both
/// delimiters are escaped defensively.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace(':', "\\c").replace(';', "\\s")
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('c') => out.push(':'),
                Some('s') => out.push(';'),
                Some('\\') => out.push('\\'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_column_list() {
        let cols = vec![
            ColumnDef {
                name: "ID".into(),
                data_type: "INTEGER".into(),
                nullable: false,
                primary_key: true,
                default: None,
            },
            ColumnDef {
                name: "NAME".into(),
                data_type: "VARCHAR".into(),
                nullable: true,
                primary_key: false,
                default: Some("'unknown'".into()),
            },
        ];
        let raw = serialize_columns(&cols);
        assert_eq!(deserialize_columns(&raw).unwrap(), cols);
    }

    #[test]
    fn empty_column_list_round_trips() {
        assert_eq!(deserialize_columns(&serialize_columns(&[])).unwrap(), Vec::new());
    }

    #[test]
    fn escapes_delimiters_inside_defaults() {
        let cols = vec![ColumnDef {
            name: "X".into(),
            data_type: "VARCHAR".into(),
            nullable: true,
            primary_key: false,
            default: Some("a:b;c".into()),
        }];
        let raw = serialize_columns(&cols);
        assert_eq!(deserialize_columns(&raw).unwrap(), cols);
    }
}
