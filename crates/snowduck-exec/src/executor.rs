//! The query executor (L4): translate → validate → dispatch → record
//! history → shape, per statement.

use snowduck_catalog::Catalog;
use snowduck_common::{ident, SdResult};
use snowduck_engine::Value;

use crate::classify::{classify, StatementKind};
use crate::ddl::{default_table_type, parse_ddl, DdlStatement};
use crate::shape::{shape_rowset, ShapedResult};

/// The session cursor the executor resolves unqualified object names
/// against, and that `USE DATABASE`/`USE SCHEMA` statements update.
pub struct ExecContext {
    pub session_id: String,
    pub database: String,
    pub schema: String,
}

#[derive(Debug, Default)]
pub struct Outcome {
    pub shaped: Option<ShapedResult>,
    pub rows_affected: u64,
    pub new_database: Option<String>,
    pub new_schema: Option<String>,
}

pub fn execute(
    catalog: &Catalog,
    ctx: &ExecContext,
    handle_id: &str,
    sql: &str,
    params: &[Value],
) -> SdResult<Outcome> {
    tracing::debug!(handle_id, session_id = %ctx.session_id, "dispatching statement");
    let history_id = catalog.record_query_start(&ctx.session_id, handle_id, sql)?;
    let started_at = snowduck_common::time::now_millis();

    let outcome = dispatch(catalog, ctx, sql, params);

    let elapsed = snowduck_common::time::now_millis() - started_at;
    match &outcome {
        Ok(result) => {
            catalog.record_query_success(&history_id, result.rows_affected as i64, elapsed)?;
            tracing::debug!(handle_id, elapsed, rows_affected = result.rows_affected, "statement dispatched");
        }
        Err(err) => {
            catalog.record_query_failure(&history_id, &err.to_string(), elapsed)?;
            tracing::debug!(handle_id, elapsed, error = %err, "statement dispatch failed");
        }
    }
    outcome
}

fn dispatch(catalog: &Catalog, ctx: &ExecContext, sql: &str, params: &[Value]) -> SdResult<Outcome> {
    match classify(sql) {
        StatementKind::Read => {
            let translated = snowduck_sql::rewrite_functions(sql);
            let rows = catalog.engine().query(&translated, params)?;
            let rows_affected = rows.len() as u64;
            Ok(Outcome {
                shaped: Some(shape_rowset(&rows)),
                rows_affected,
                ..Outcome::default()
            })
        }
        StatementKind::Write => {
            let translated = snowduck_sql::rewrite_functions(sql);
            let result = catalog.engine().exec(&translated, params)?;
            Ok(Outcome {
                rows_affected: result.rows_affected,
                ..Outcome::default()
            })
        }
        StatementKind::Merge => {
            let translated = snowduck_sql::rewrite_functions(sql);
            let plan = snowduck_sql::parse_merge(&translated)?;
            let rows_affected = catalog.engine().transaction(|txn| {
                let updated = txn.exec(&plan.update_sql, &[])?;
                let inserted = txn.exec(&plan.insert_sql, &[])?;
                Ok(updated.rows_affected + inserted.rows_affected)
            })?;
            Ok(Outcome {
                rows_affected,
                ..Outcome::default()
            })
        }
        StatementKind::TransactionControl => {
            catalog.engine().exec(sql, &[])?;
            Ok(Outcome::default())
        }
        StatementKind::Ddl => dispatch_ddl(catalog, ctx, sql),
        StatementKind::Use => dispatch_use(sql),
    }
}

fn dispatch_ddl(catalog: &Catalog, ctx: &ExecContext, sql: &str) -> SdResult<Outcome> {
    match parse_ddl(sql)? {
        DdlStatement::CreateDatabase { name } => {
            catalog.create_database(&name, "system", None)?;
            Ok(Outcome::default())
        }
        DdlStatement::DropDatabase { name } => {
            catalog.drop_database(&name)?;
            Ok(Outcome::default())
        }
        DdlStatement::CreateSchema { database, name } => {
            let database = database.unwrap_or_else(|| ctx.database.clone());
            catalog.create_schema(&database, &name, "system", None)?;
            Ok(Outcome::default())
        }
        DdlStatement::DropSchema { database, name } => {
            let database = database.unwrap_or_else(|| ctx.database.clone());
            catalog.drop_schema(&database, &name)?;
            Ok(Outcome::default())
        }
        DdlStatement::CreateTable { database, schema, name, columns } => {
            let database = database.unwrap_or_else(|| ctx.database.clone());
            let schema = schema.unwrap_or_else(|| ctx.schema.clone());
            catalog.create_table(&database, &schema, &name, "system", default_table_type(), columns, None)?;
            Ok(Outcome::default())
        }
        DdlStatement::DropTable { database, schema, name } => {
            let database = database.unwrap_or_else(|| ctx.database.clone());
            let schema = schema.unwrap_or_else(|| ctx.schema.clone());
            catalog.drop_table(&database, &schema, &name)?;
            Ok(Outcome::default())
        }
        DdlStatement::UseDatabase { name } => Ok(Outcome {
            new_database: Some(ident::normalize(&name)),
            ..Outcome::default()
        }),
        DdlStatement::UseSchema { name } => Ok(Outcome {
            new_schema: Some(ident::normalize(&name)),
            ..Outcome::default()
        }),
    }
}

fn dispatch_use(sql: &str) -> SdResult<Outcome> {
    match parse_ddl(sql)? {
        DdlStatement::UseDatabase { name } => Ok(Outcome {
            new_database: Some(ident::normalize(&name)),
            ..Outcome::default()
        }),
        DdlStatement::UseSchema { name } => Ok(Outcome {
            new_schema: Some(ident::normalize(&name)),
            ..Outcome::default()
        }),
        _ => unreachable!("classify only routes USE statements here"),
    }
}
