//! Logical-name normalization and the physical name mangling rule.
//!
//! Every site that builds SQL text against the embedded engine, or looks up
//! a logical name in the catalog, goes through these two functions. Keeping
//! them in one place is what makes the physical naming invariant (§3 of the
//! data model) a total, pure function rather than something re-derived
//! ad hoc at each call site.

/// Upper-cases a logical identifier the way unquoted Snowflake identifiers
/// are normalized. Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(name: &str) -> String {
    name.to_uppercase()
}

/// The engine-local identifier for a table within its database's engine
/// schema: `<SCHEMA>_<TABLE>`, both normalized first.
///
/// This is the `SCHEMA_TABLE` half of the `DB.SCHEMA_TABLE` physical name;
/// the `DB` half is simply the normalized database name, since a logical
/// database already materializes 1:1 as an engine schema.
pub fn mangle_table_name(schema: &str, table: &str) -> String {
    format!("{}_{}", normalize(schema), normalize(table))
}

/// The fully qualified `DB.SCHEMA_TABLE` engine entity name for a logical
/// `database.schema.table` triple.
pub fn qualified_table_name(database: &str, schema: &str, table: &str) -> String {
    format!(
        "{}.{}",
        normalize(database),
        mangle_table_name(schema, table)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("MixedCase");
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn mangling_is_a_pure_function_of_its_inputs() {
        assert_eq!(mangle_table_name("public", "users"), "PUBLIC_USERS");
        assert_eq!(mangle_table_name("PUBLIC", "USERS"), "PUBLIC_USERS");
        assert_eq!(
            qualified_table_name("test_db", "public", "users"),
            "TEST_DB.PUBLIC_USERS"
        );
    }

    #[test]
    fn distinct_databases_never_collide_on_the_same_mangled_table() {
        let a = qualified_table_name("db1", "public", "data");
        let b = qualified_table_name("db2", "public", "data");
        assert_ne!(a, b);
        assert_eq!(a, "DB1.PUBLIC_DATA");
        assert_eq!(b, "DB2.PUBLIC_DATA");
    }
}
