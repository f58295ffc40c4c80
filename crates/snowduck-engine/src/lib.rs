//! The connection manager: the only crate in the workspace that imports
//! `duckdb` directly. Everything above this layer talks in terms of
//! [`Engine`], [`RowSet`] and [`Value`], never in terms of the embedded
//! engine's own connection or row types.
//!
//! The manager enforces the single-writer, many-readers discipline: one
//! connection serializes every `exec`/`transaction` call behind a mutex,
//! while a round-robin pool of independent connections to the same
//! database serve `query` calls without contending on that mutex.

mod value;

pub use value::Value;

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use duckdb::Connection;
use parking_lot::Mutex;
use snowduck_common::{EmulatorConfig, SdError, SdResult};

/// A materialized result set: column names in projection order, plus every
/// row as a vector of [`Value`] in the same order.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// The outcome of a statement that does not produce a result set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecResult {
    pub rows_affected: u64,
}

struct ReaderPool {
    conns: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReaderPool {
    /// Builds the pool by cloning `seed`, never by reopening `db_path`
    /// independently. For an on-disk database a second `Connection::open`
    /// against the same path happens to land on the same instance, but for
    /// an anonymous `:memory:` database it does not — each independent open
    /// call creates its own private instance. `try_clone` shares the
    /// originating instance unconditionally, so readers always see writes
    /// made through `seed` regardless of whether the engine is file-backed
    /// or in-memory.
    fn open(seed: &Connection, size: usize) -> SdResult<Self> {
        let size = size.max(1);
        let mut conns = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = seed
                .try_clone()
                .map_err(|e| SdError::execution("clone reader connection").with_source(e.to_string()))?;
            conns.push(Mutex::new(conn));
        }
        Ok(ReaderPool {
            conns,
            next: AtomicUsize::new(0),
        })
    }

    fn acquire(&self) -> parking_lot::MutexGuard<'_, Connection> {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.conns.len();
        self.conns[idx].lock()
    }
}

/// Mediates every access to the embedded engine.
///
/// Cloning is cheap and intentional: an `Engine` is meant to be held behind
/// an `Arc` and shared across the session layer and every request task.
pub struct Engine {
    write: Mutex<Connection>,
    readers: ReaderPool,
}

impl Engine {
    /// Opens the engine database named by `cfg.db_file`, or an anonymous
    /// in-memory database when unset. The reader pool is cloned from the
    /// write connection rather than independently reopened, so it always
    /// shares the same instance (see [`ReaderPool::open`]).
    pub fn open(cfg: &EmulatorConfig) -> SdResult<Self> {
        let db_path = match &cfg.db_file {
            Some(path) => path_to_str(path)?,
            None => ":memory:".to_string(),
        };

        let write = Connection::open(&db_path)
            .map_err(|e| SdError::execution("open write connection").with_source(e.to_string()))?;
        let readers = ReaderPool::open(&write, cfg.reader_pool_size)?;

        tracing::info!(db_path, reader_pool_size = cfg.reader_pool_size, "engine opened");

        Ok(Engine {
            write: Mutex::new(write),
            readers,
        })
    }

    /// Runs a read-only statement against the reader pool. Never blocks on
    /// the write lock, so concurrent queries never serialize against each
    /// other or against an in-flight exec/transaction.
    pub fn query(&self, sql: &str, params: &[Value]) -> SdResult<RowSet> {
        let conn = self.readers.acquire();
        run_query(&conn, sql, params)
    }

    /// Runs a single statement that mutates state, holding the exclusive
    /// write lock for the duration.
    pub fn exec(&self, sql: &str, params: &[Value]) -> SdResult<ExecResult> {
        let conn = self.write.lock();
        run_exec(&conn, sql, params)
    }

    /// Runs `f` inside an engine transaction, holding the write lock for
    /// the whole closure. `f` returning `Err` rolls back; `f` panicking
    /// also rolls back, since the transaction's drop glue runs during
    /// unwinding before the lock is released.
    pub fn transaction<F, R>(&self, f: F) -> SdResult<R>
    where
        F: FnOnce(&TxnHandle<'_>) -> SdResult<R>,
    {
        let conn = self.write.lock();
        let txn = conn
            .unchecked_transaction()
            .map_err(|e| SdError::execution("begin transaction").with_source(e.to_string()))?;

        let handle = TxnHandle { conn: &txn };
        let result = f(&handle).inspect_err(|e| tracing::debug!(error = %e, "transaction rolled back"))?;

        txn.commit()
            .map_err(|e| SdError::execution("commit transaction").with_source(e.to_string()))?;
        Ok(result)
    }

    /// Escape hatch for callers (catalog bootstrap) that need a raw
    /// connection under the write lock without the transaction wrapper.
    pub fn raw_write(&self) -> parking_lot::MutexGuard<'_, Connection> {
        self.write.lock()
    }
}

/// A handle to the connection inside an in-flight [`Engine::transaction`]
/// closure. Exposes the same `query`/`exec` surface as [`Engine`] so callers
/// don't need to learn a second API for transactional code.
pub struct TxnHandle<'a> {
    conn: &'a duckdb::Transaction<'a>,
}

impl TxnHandle<'_> {
    pub fn query(&self, sql: &str, params: &[Value]) -> SdResult<RowSet> {
        run_query(self.conn, sql, params)
    }

    pub fn exec(&self, sql: &str, params: &[Value]) -> SdResult<ExecResult> {
        run_exec(self.conn, sql, params)
    }
}

fn path_to_str(path: &Path) -> SdResult<String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| SdError::execution("database path is not valid UTF-8"))
}

fn run_query(conn: &Connection, sql: &str, params: &[Value]) -> SdResult<RowSet> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| snowduck_common::translate_engine_error("prepare", e.to_string()))?;

    let columns: Vec<String> = stmt.column_names();
    let bound: Vec<duckdb::types::Value> = params.iter().map(duckdb::types::Value::from).collect();

    let mut rows_out = Vec::new();
    let mut rows = stmt
        .query(duckdb::params_from_iter(bound.iter()))
        .map_err(|e| snowduck_common::translate_engine_error("execute query", e.to_string()))?;

    while let Some(row) = rows
        .next()
        .map_err(|e| snowduck_common::translate_engine_error("fetch row", e.to_string()))?
    {
        let mut out_row = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            let cell: duckdb::types::Value = row
                .get(idx)
                .map_err(|e| snowduck_common::translate_engine_error("read column", e.to_string()))?;
            out_row.push(Value::from(cell));
        }
        rows_out.push(out_row);
    }

    Ok(RowSet {
        columns,
        rows: rows_out,
    })
}

fn run_exec(conn: &Connection, sql: &str, params: &[Value]) -> SdResult<ExecResult> {
    let bound: Vec<duckdb::types::Value> = params.iter().map(duckdb::types::Value::from).collect();
    let affected = conn
        .execute(sql, duckdb::params_from_iter(bound.iter()))
        .map_err(|e| snowduck_common::translate_engine_error("execute statement", e.to_string()))?;
    Ok(ExecResult {
        rows_affected: affected as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EmulatorConfig {
        EmulatorConfig {
            db_file: None,
            reader_pool_size: 2,
            ..Default::default()
        }
    }

    #[test]
    fn exec_then_query_round_trips_through_the_reader_pool() {
        let engine = Engine::open(&test_config()).unwrap();
        engine
            .exec("CREATE TABLE t (id BIGINT, name TEXT)", &[])
            .unwrap();
        engine
            .exec(
                "INSERT INTO t VALUES (?, ?)",
                &[Value::Int(1), Value::text("alice")],
            )
            .unwrap();

        let rows = engine.query("SELECT id, name FROM t ORDER BY id", &[]).unwrap();
        assert_eq!(rows.columns, vec!["id".to_string(), "name".to_string()]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.rows[0][0], Value::Int(1));
        assert_eq!(rows.rows[0][1], Value::text("alice"));
    }

    #[test]
    fn transaction_rolls_back_on_error() {
        let engine = Engine::open(&test_config()).unwrap();
        engine.exec("CREATE TABLE t (id BIGINT)", &[]).unwrap();

        let result: SdResult<()> = engine.transaction(|txn| {
            txn.exec("INSERT INTO t VALUES (1)", &[])?;
            Err(SdError::validation("force rollback"))
        });
        assert!(result.is_err());

        let rows = engine.query("SELECT id FROM t", &[]).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn transaction_commits_on_success() {
        let engine = Engine::open(&test_config()).unwrap();
        engine.exec("CREATE TABLE t (id BIGINT)", &[]).unwrap();

        engine
            .transaction(|txn| {
                txn.exec("INSERT INTO t VALUES (1)", &[])?;
                txn.exec("INSERT INTO t VALUES (2)", &[])?;
                Ok(())
            })
            .unwrap();

        let rows = engine.query("SELECT id FROM t ORDER BY id", &[]).unwrap();
        assert_eq!(rows.len(), 2);
    }
}
