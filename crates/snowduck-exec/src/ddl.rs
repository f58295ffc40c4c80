//! Minimal parsing of the DDL statements the executor must translate into
//! catalog calls: `CREATE`/`DROP {DATABASE,SCHEMA,TABLE}` and
//! `USE {DATABASE,SCHEMA}`. This is deliberately not a general SQL
//! grammar — only the shapes the catalog's object model actually needs.

use regex::Regex;
use snowduck_catalog::{ColumnDef, TableType};
use snowduck_common::SdError;
use std::sync::LazyLock;

pub enum DdlStatement {
    CreateDatabase { name: String },
    DropDatabase { name: String },
    CreateSchema { database: Option<String>, name: String },
    DropSchema { database: Option<String>, name: String },
    CreateTable { database: Option<String>, schema: Option<String>, name: String, columns: Vec<ColumnDef> },
    DropTable { database: Option<String>, schema: Option<String>, name: String },
    UseDatabase { name: String },
    UseSchema { name: String },
}

static CREATE_DATABASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^CREATE\s+DATABASE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?P<name>[\w"]+)\s*;?\s*$"#).unwrap());
static DROP_DATABASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^DROP\s+DATABASE\s+(?:IF\s+EXISTS\s+)?(?P<name>[\w"]+)\s*;?\s*$"#).unwrap());
static CREATE_SCHEMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^CREATE\s+SCHEMA\s+(?:IF\s+NOT\s+EXISTS\s+)?(?P<path>[\w".]+)\s*;?\s*$"#).unwrap());
static DROP_SCHEMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^DROP\s+SCHEMA\s+(?:IF\s+EXISTS\s+)?(?P<path>[\w".]+)\s*;?\s*$"#).unwrap());
static CREATE_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)^CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?P<path>[\w".]+)\s*\((?P<body>.*)\)\s*;?\s*$"#)
        .unwrap()
});
static DROP_TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^DROP\s+TABLE\s+(?:IF\s+EXISTS\s+)?(?P<path>[\w".]+)\s*;?\s*$"#).unwrap());
static USE_DATABASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^USE\s+DATABASE\s+(?P<name>[\w"]+)\s*;?\s*$"#).unwrap());
static USE_SCHEMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^USE\s+SCHEMA\s+(?P<name>[\w"]+)\s*;?\s*$"#).unwrap());

pub fn parse_ddl(sql: &str) -> Result<DdlStatement, SdError> {
    let sql = sql.trim();

    if let Some(c) = CREATE_DATABASE_RE.captures(sql) {
        return Ok(DdlStatement::CreateDatabase { name: unquote(&c["name"]) });
    }
    if let Some(c) = DROP_DATABASE_RE.captures(sql) {
        return Ok(DdlStatement::DropDatabase { name: unquote(&c["name"]) });
    }
    if let Some(c) = CREATE_SCHEMA_RE.captures(sql) {
        let (database, name) = split_path(&c["path"]);
        return Ok(DdlStatement::CreateSchema { database, name });
    }
    if let Some(c) = DROP_SCHEMA_RE.captures(sql) {
        let (database, name) = split_path(&c["path"]);
        return Ok(DdlStatement::DropSchema { database, name });
    }
    if let Some(c) = CREATE_TABLE_RE.captures(sql) {
        let (database, schema, name) = split_table_path(&c["path"]);
        let columns = parse_columns(&c["body"])?;
        return Ok(DdlStatement::CreateTable { database, schema, name, columns });
    }
    if let Some(c) = DROP_TABLE_RE.captures(sql) {
        let (database, schema, name) = split_table_path(&c["path"]);
        return Ok(DdlStatement::DropTable { database, schema, name });
    }
    if let Some(c) = USE_DATABASE_RE.captures(sql) {
        return Ok(DdlStatement::UseDatabase { name: unquote(&c["name"]) });
    }
    if let Some(c) = USE_SCHEMA_RE.captures(sql) {
        return Ok(DdlStatement::UseSchema { name: unquote(&c["name"]) });
    }

    Err(SdError::compilation(format!("unsupported DDL statement: {sql}")))
}

fn unquote(token: &str) -> String {
    token.trim_matches('"').to_string()
}

fn split_path(path: &str) -> (Option<String>, String) {
    let parts: Vec<String> = path.split('.').map(unquote).collect();
    match parts.as_slice() {
        [schema] => (None, schema.clone()),
        [database, schema, ..] => (Some(database.clone()), schema.clone()),
        [] => (None, String::new()),
    }
}

fn split_table_path(path: &str) -> (Option<String>, Option<String>, String) {
    let parts: Vec<String> = path.split('.').map(unquote).collect();
    match parts.as_slice() {
        [table] => (None, None, table.clone()),
        [schema, table] => (None, Some(schema.clone()), table.clone()),
        [database, schema, table, ..] => (Some(database.clone()), Some(schema.clone()), table.clone()),
        [] => (None, None, String::new()),
    }
}

fn parse_columns(body: &str) -> Result<Vec<ColumnDef>, SdError> {
    split_top_level(body)
        .iter()
        .map(|def| parse_column(def))
        .collect()
}

fn parse_column(def: &str) -> Result<ColumnDef, SdError> {
    let def = def.trim();
    let upper = def.to_uppercase();

    let name_end = def
        .find(char::is_whitespace)
        .ok_or_else(|| SdError::compilation(format!("malformed column definition: {def}")))?;
    let name = unquote(def[..name_end].trim());
    let mut rest = def[name_end..].trim();

    let primary_key = upper.contains("PRIMARY KEY");
    let not_null = upper.contains("NOT NULL");

    let default = upper.find("DEFAULT").map(|idx| {
        let default_start = idx + "DEFAULT".len();
        def[default_start..].trim().split_whitespace().next().unwrap_or("").to_string()
    });

    for marker in ["NOT NULL", "PRIMARY KEY", "DEFAULT"] {
        if let Some(idx) = rest.to_uppercase().find(marker) {
            rest = rest[..idx].trim();
        }
    }

    let data_type = snowduck_sql::map_type(rest);

    Ok(ColumnDef {
        name,
        data_type,
        nullable: !not_null && !primary_key,
        primary_key,
        default,
    })
}

fn split_top_level(args: &str) -> Vec<String> {
    let bytes = args.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (idx, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b',' if depth == 0 => {
                parts.push(args[start..idx].trim().to_string());
                start = idx + 1;
            }
            _ => {}
        }
    }
    let tail = args[start..].trim();
    if !tail.is_empty() {
        parts.push(tail.to_string());
    }
    parts
}

pub fn default_table_type() -> TableType {
    TableType::BaseTable
}
