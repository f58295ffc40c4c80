//! The metadata catalog (L2): a persistent logical-object registry layered
//! atop the same embedded engine instance that stores user data.

mod bootstrap;
mod columns;
mod databases;
mod fileformats;
mod history;
mod models;
mod row;
mod schemas;
mod stages;
mod tables;
pub mod warehouse;

pub use columns::{deserialize_columns, serialize_columns};
pub use models::{
    ColumnDef, Database, FileFormat, FileFormatType, QueryHistoryEntry, QueryStatus, Schema, Stage,
    StageType, Table, TableType,
};
pub use tables::physical_table_name;
pub use warehouse::{Warehouse, WarehouseManager, WarehouseSize, WarehouseState};

use std::sync::Arc;

use snowduck_common::SdResult;
use snowduck_engine::Engine;

/// Owns the engine handle and fronts every L2 operation. Construction
/// bootstraps the `_metadata_*` tables, so a `Catalog` is always ready to
/// use once `new` returns.
pub struct Catalog {
    engine: Arc<Engine>,
    pub warehouses: WarehouseManager,
}

impl Catalog {
    pub fn new(engine: Arc<Engine>) -> SdResult<Self> {
        bootstrap::init_metadata_tables(&engine)?;
        Ok(Catalog {
            engine,
            warehouses: WarehouseManager::new(),
        })
    }

    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    pub fn create_database(&self, name: &str, owner: &str, comment: Option<&str>) -> SdResult<Database> {
        databases::create_database(&self.engine, name, owner, comment)
    }

    pub fn drop_database(&self, name: &str) -> SdResult<()> {
        databases::drop_database(&self.engine, name)
    }

    pub fn get_database_by_id(&self, id: &str) -> SdResult<Database> {
        databases::get_database_by_id(&self.engine, id)
    }

    pub fn get_database_by_name(&self, name: &str) -> SdResult<Database> {
        databases::get_database_by_name(&self.engine, name)
    }

    pub fn list_databases(&self) -> SdResult<Vec<Database>> {
        databases::list_databases(&self.engine)
    }

    pub fn create_schema(
        &self,
        database: &str,
        name: &str,
        owner: &str,
        comment: Option<&str>,
    ) -> SdResult<Schema> {
        schemas::create_schema(&self.engine, database, name, owner, comment)
    }

    pub fn drop_schema(&self, database: &str, name: &str) -> SdResult<()> {
        schemas::drop_schema(&self.engine, database, name)
    }

    pub fn get_schema_by_id(&self, id: &str) -> SdResult<Schema> {
        schemas::get_schema_by_id(&self.engine, id)
    }

    pub fn get_schema_by_name(&self, database: &str, name: &str) -> SdResult<Schema> {
        schemas::get_schema_by_name(&self.engine, database, name)
    }

    pub fn list_schemas(&self, database: &str) -> SdResult<Vec<Schema>> {
        schemas::list_schemas(&self.engine, database)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_table(
        &self,
        database: &str,
        schema: &str,
        name: &str,
        owner: &str,
        table_type: TableType,
        columns: Vec<ColumnDef>,
        clustering_key: Option<&str>,
    ) -> SdResult<Table> {
        tables::create_table(
            &self.engine,
            database,
            schema,
            name,
            owner,
            table_type,
            columns,
            clustering_key,
        )
    }

    pub fn drop_table(&self, database: &str, schema: &str, name: &str) -> SdResult<()> {
        tables::drop_table(&self.engine, database, schema, name)
    }

    pub fn get_table_by_id(&self, id: &str) -> SdResult<Table> {
        tables::get_table_by_id(&self.engine, id)
    }

    pub fn get_table_by_name(&self, database: &str, schema: &str, name: &str) -> SdResult<Table> {
        tables::get_table_by_name(&self.engine, database, schema, name)
    }

    pub fn list_tables(&self, database: &str, schema: &str) -> SdResult<Vec<Table>> {
        tables::list_tables(&self.engine, database, schema)
    }

    pub fn update_table_comment(
        &self,
        database: &str,
        schema: &str,
        name: &str,
        comment: Option<&str>,
    ) -> SdResult<()> {
        tables::update_table_comment(&self.engine, database, schema, name, comment)
    }

    pub fn create_stage(
        &self,
        database: &str,
        schema: &str,
        name: &str,
        owner: &str,
        stage_type: StageType,
        url: Option<&str>,
    ) -> SdResult<Stage> {
        stages::create_stage(&self.engine, database, schema, name, owner, stage_type, url)
    }

    pub fn drop_stage(&self, database: &str, schema: &str, name: &str) -> SdResult<()> {
        stages::drop_stage(&self.engine, database, schema, name)
    }

    pub fn get_stage_by_name(&self, database: &str, schema: &str, name: &str) -> SdResult<Stage> {
        stages::get_stage_by_name(&self.engine, database, schema, name)
    }

    pub fn list_stages(&self, database: &str, schema: &str) -> SdResult<Vec<Stage>> {
        stages::list_stages(&self.engine, database, schema)
    }

    pub fn create_file_format(
        &self,
        database: &str,
        schema: &str,
        name: &str,
        owner: &str,
        format_type: FileFormatType,
        options: &str,
    ) -> SdResult<FileFormat> {
        fileformats::create_file_format(&self.engine, database, schema, name, owner, format_type, options)
    }

    pub fn drop_file_format(&self, database: &str, schema: &str, name: &str) -> SdResult<()> {
        fileformats::drop_file_format(&self.engine, database, schema, name)
    }

    pub fn list_file_formats(&self, database: &str, schema: &str) -> SdResult<Vec<FileFormat>> {
        fileformats::list_file_formats(&self.engine, database, schema)
    }

    pub fn record_query_start(&self, session_id: &str, handle_id: &str, sql_text: &str) -> SdResult<String> {
        history::record_query_start(&self.engine, session_id, handle_id, sql_text)
    }

    pub fn record_query_success(&self, id: &str, rows_affected: i64, execution_time_ms: i64) -> SdResult<()> {
        history::record_query_success(&self.engine, id, rows_affected, execution_time_ms)
    }

    pub fn record_query_failure(&self, id: &str, error: &str, execution_time_ms: i64) -> SdResult<()> {
        history::record_query_failure(&self.engine, id, error, execution_time_ms)
    }

    pub fn get_query_history(&self, limit: u32) -> SdResult<Vec<QueryHistoryEntry>> {
        history::get_query_history(&self.engine, limit)
    }

    pub fn get_query_history_by_session(&self, session_id: &str, limit: u32) -> SdResult<Vec<QueryHistoryEntry>> {
        history::get_query_history_by_session(&self.engine, session_id, limit)
    }

    pub fn clear_query_history(&self, older_than_ms: i64) -> SdResult<u64> {
        history::clear_query_history(&self.engine, older_than_ms)
    }
}
