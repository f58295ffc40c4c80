//! Statement classification by leading keyword (§4.5).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Read,
    Write,
    Ddl,
    TransactionControl,
    Merge,
    Use,
}

/// Strips leading `--` line comments and `/* */` block comments and
/// surrounding whitespace, then classifies by the first keyword.
pub fn classify(sql: &str) -> StatementKind {
    let trimmed = strip_leading_comments(sql);
    let first_word = trimmed
        .split(|c: char| c.is_whitespace())
        .next()
        .unwrap_or("")
        .to_uppercase();

    match first_word.as_str() {
        "SELECT" | "WITH" | "SHOW" | "DESCRIBE" => StatementKind::Read,
        "INSERT" | "UPDATE" | "DELETE" => StatementKind::Write,
        "MERGE" => StatementKind::Merge,
        "CREATE" | "DROP" | "ALTER" => StatementKind::Ddl,
        "BEGIN" | "COMMIT" | "ROLLBACK" => StatementKind::TransactionControl,
        "USE" => StatementKind::Use,
        _ => StatementKind::Read,
    }
}

fn strip_leading_comments(sql: &str) -> &str {
    let mut rest = sql.trim_start();
    loop {
        if let Some(stripped) = rest.strip_prefix("--") {
            rest = match stripped.find('\n') {
                Some(idx) => stripped[idx + 1..].trim_start(),
                None => "",
            };
        } else if let Some(stripped) = rest.strip_prefix("/*") {
            rest = match stripped.find("*/") {
                Some(idx) => stripped[idx + 2..].trim_start(),
                None => "",
            };
        } else {
            break;
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_reads_writes_and_ddl() {
        assert_eq!(classify("SELECT 1"), StatementKind::Read);
        assert_eq!(classify("  with x as (select 1) select * from x"), StatementKind::Read);
        assert_eq!(classify("INSERT INTO t VALUES (1)"), StatementKind::Write);
        assert_eq!(classify("CREATE TABLE t (id INT)"), StatementKind::Ddl);
        assert_eq!(classify("MERGE INTO t USING s ON 1=1"), StatementKind::Merge);
        assert_eq!(classify("BEGIN"), StatementKind::TransactionControl);
    }

    #[test]
    fn skips_leading_comments_before_classifying() {
        assert_eq!(classify("-- a comment\nSELECT 1"), StatementKind::Read);
        assert_eq!(classify("/* block */ DROP TABLE t"), StatementKind::Ddl);
    }
}
