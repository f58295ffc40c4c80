//! Source-dialect to engine-dialect type name mapping (§4.3a).

/// Splits a type spelling like `NUMBER(10,2)` into its base name and the
/// verbatim parenthesized argument list, then maps the base name through
/// the fixed table. Unknown base names default to `VARCHAR`. Arguments are
/// carried through unchanged since the engine accepts the same precision/
/// scale and length syntax for the mapped targets that take arguments.
pub fn map_type(source: &str) -> String {
    let trimmed = source.trim();
    let (base, args) = match trimmed.find('(') {
        Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
        None => (trimmed, ""),
    };

    let mapped = mapped_base(&base.trim().to_uppercase());
    format!("{mapped}{args}")
}

fn mapped_base(base: &str) -> &'static str {
    match base {
        "NUMBER" | "NUMERIC" | "DECIMAL" => "DECIMAL",
        "INT" | "INTEGER" | "BIGINT" | "SMALLINT" | "TINYINT" => "INTEGER",
        "FLOAT" | "FLOAT4" | "FLOAT8" | "DOUBLE" | "DOUBLE PRECISION" | "REAL" => "DOUBLE",
        "VARCHAR" | "CHAR" | "CHARACTER" | "TEXT" | "STRING" => "VARCHAR",
        "TIMESTAMP_LTZ" | "TIMESTAMP_TZ" => "TIMESTAMP WITH TIME ZONE",
        "TIMESTAMP_NTZ" | "DATETIME" | "TIMESTAMP" => "TIMESTAMP",
        "BINARY" | "VARBINARY" => "BLOB",
        "VARIANT" | "OBJECT" | "ARRAY" => "JSON",
        "GEOGRAPHY" | "GEOMETRY" => "VARCHAR",
        "BOOLEAN" => "BOOLEAN",
        "DATE" => "DATE",
        "TIME" => "TIME",
        _ => "VARCHAR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_types() {
        assert_eq!(map_type("NUMBER"), "DECIMAL");
        assert_eq!(map_type("number(10,2)"), "DECIMAL(10,2)");
        assert_eq!(map_type("VARCHAR(16)"), "VARCHAR(16)");
        assert_eq!(map_type("TIMESTAMP_NTZ"), "TIMESTAMP");
        assert_eq!(map_type("TIMESTAMP_LTZ"), "TIMESTAMP WITH TIME ZONE");
        assert_eq!(map_type("VARIANT"), "JSON");
    }

    #[test]
    fn unknown_types_default_to_varchar() {
        assert_eq!(map_type("SOME_MADE_UP_TYPE"), "VARCHAR");
    }
}
