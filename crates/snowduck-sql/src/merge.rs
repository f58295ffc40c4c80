//! The MERGE rewrite (§4.3c): a small dedicated parser, not a general SQL
//! grammar. It recognizes exactly the one-matched-branch,
//! one-not-matched-branch shape:
//!
//! ```text
//! MERGE INTO target [AS alias] USING source [AS alias] ON cond
//! WHEN MATCHED THEN UPDATE SET col = expr, ...
//! WHEN NOT MATCHED THEN INSERT (col, ...) VALUES (expr, ...)
//! ```
//!
//! and decomposes it into an `UPDATE ... FROM` and an `INSERT ... SELECT
//! ... WHERE NOT EXISTS`, run inside a single transaction by the caller.

use regex::Regex;
use snowduck_common::SdError;

use crate::sqltext::split_top_level;

#[derive(Debug, Clone, PartialEq)]
pub struct MergePlan {
    pub update_sql: String,
    pub insert_sql: String,
}

pub fn parse_merge(sql: &str) -> Result<MergePlan, SdError> {
    let pattern = Regex::new(
        r#"(?is)^\s*MERGE\s+INTO\s+(?P<target>[\w."]+)(?:\s+(?:AS\s+)?(?P<talias>\w+))?\s+USING\s+(?P<source>[\w."]+)(?:\s+(?:AS\s+)?(?P<salias>\w+))?\s+ON\s+(?P<cond>.+?)\s+WHEN\s+MATCHED\s+THEN\s+UPDATE\s+SET\s+(?P<set>.+?)\s+WHEN\s+NOT\s+MATCHED\s+THEN\s+INSERT\s*\((?P<icols>[^)]*)\)\s*VALUES\s*\((?P<ivals>.+?)\)\s*;?\s*$"#,
    )
    .expect("valid MERGE regex");

    let caps = pattern
        .captures(sql.trim())
        .ok_or_else(|| SdError::compilation("unsupported MERGE statement shape"))?;

    let target = caps.name("target").unwrap().as_str().to_string();
    let source = caps.name("source").unwrap().as_str().to_string();
    let cond = caps.name("cond").unwrap().as_str().trim().to_string();
    let set_clause = caps.name("set").unwrap().as_str();
    let insert_cols = caps.name("icols").unwrap().as_str().trim().to_string();
    let insert_vals = caps.name("ivals").unwrap().as_str().trim().to_string();

    let talias = caps
        .name("talias")
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| target.clone());
    let salias = caps
        .name("salias")
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| source.clone());

    let set_stripped = strip_target_alias_from_set(set_clause, &talias)?;

    let update_sql = format!(
        "UPDATE {target} AS {talias} SET {set_stripped} FROM {source} AS {salias} WHERE {cond}"
    );
    let insert_sql = format!(
        "INSERT INTO {target} ({insert_cols}) SELECT {insert_vals} FROM {source} AS {salias} \
         WHERE NOT EXISTS (SELECT 1 FROM {target} AS {talias} WHERE {cond})"
    );

    Ok(MergePlan { update_sql, insert_sql })
}

/// The engine requires bare column names on the SET-side of `UPDATE ...
/// FROM`; this strips a leading `<alias>.` from each assignment's
/// left-hand side only, leaving the right-hand side (which may legitimately
/// reference the source alias) untouched.
fn strip_target_alias_from_set(set_clause: &str, talias: &str) -> Result<String, SdError> {
    let prefix = format!("{talias}.");
    let assignments = split_top_level(set_clause);
    if assignments.is_empty() {
        return Err(SdError::compilation("MERGE UPDATE SET clause is empty"));
    }

    let rewritten: Vec<String> = assignments
        .iter()
        .map(|assignment| {
            let eq_idx = assignment
                .find('=')
                .ok_or_else(|| SdError::compilation(format!("malformed SET assignment: {assignment}")))?;
            let (lhs, rhs) = assignment.split_at(eq_idx);
            let lhs = lhs.trim();
            let lhs = lhs.strip_prefix(&prefix).unwrap_or(lhs);
            Ok(format!("{lhs} {rhs}", rhs = rhs.trim()))
        })
        .collect::<Result<_, SdError>>()?;

    Ok(rewritten.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_basic_merge() {
        let sql = "MERGE INTO target t USING source s ON t.id = s.id \
                    WHEN MATCHED THEN UPDATE SET t.name = s.name, t.amount = s.amount \
                    WHEN NOT MATCHED THEN INSERT (id, name, amount) VALUES (s.id, s.name, s.amount)";
        let plan = parse_merge(sql).unwrap();
        assert_eq!(
            plan.update_sql,
            "UPDATE target AS t SET name = s.name, amount = s.amount FROM source AS s WHERE t.id = s.id"
        );
        assert_eq!(
            plan.insert_sql,
            "INSERT INTO target (id, name, amount) SELECT s.id, s.name, s.amount FROM source AS s \
             WHERE NOT EXISTS (SELECT 1 FROM target AS t WHERE t.id = s.id)"
        );
    }

    #[test]
    fn rejects_statements_that_are_not_merge() {
        assert!(parse_merge("SELECT 1").is_err());
    }
}
