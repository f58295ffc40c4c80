use snowduck_common::SdError;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub default: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableType {
    BaseTable,
    View,
    Temporary,
    External,
}

impl TableType {
    pub fn as_str(self) -> &'static str {
        match self {
            TableType::BaseTable => "BASE TABLE",
            TableType::View => "VIEW",
            TableType::Temporary => "TEMPORARY",
            TableType::External => "EXTERNAL",
        }
    }

    pub fn parse(s: &str) -> Result<Self, SdError> {
        match s {
            "BASE TABLE" => Ok(TableType::BaseTable),
            "VIEW" => Ok(TableType::View),
            "TEMPORARY" => Ok(TableType::Temporary),
            "EXTERNAL" => Ok(TableType::External),
            other => Err(SdError::validation(format!("unknown table type: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageType {
    Internal,
    External,
}

impl StageType {
    pub fn as_str(self) -> &'static str {
        match self {
            StageType::Internal => "INTERNAL",
            StageType::External => "EXTERNAL",
        }
    }

    pub fn parse(s: &str) -> Result<Self, SdError> {
        match s {
            "INTERNAL" => Ok(StageType::Internal),
            "EXTERNAL" => Ok(StageType::External),
            other => Err(SdError::validation(format!("unknown stage type: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormatType {
    Csv,
    Json,
    Parquet,
}

impl FileFormatType {
    pub fn as_str(self) -> &'static str {
        match self {
            FileFormatType::Csv => "CSV",
            FileFormatType::Json => "JSON",
            FileFormatType::Parquet => "PARQUET",
        }
    }

    pub fn parse(s: &str) -> Result<Self, SdError> {
        match s {
            "CSV" => Ok(FileFormatType::Csv),
            "JSON" => Ok(FileFormatType::Json),
            "PARQUET" => Ok(FileFormatType::Parquet),
            other => Err(SdError::validation(format!("unknown file format type: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Running,
    Success,
    Failed,
    Canceled,
}

impl QueryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryStatus::Running => "RUNNING",
            QueryStatus::Success => "SUCCESS",
            QueryStatus::Failed => "FAILED",
            QueryStatus::Canceled => "CANCELED",
        }
    }

    pub fn parse(s: &str) -> Result<Self, SdError> {
        match s {
            "RUNNING" => Ok(QueryStatus::Running),
            "SUCCESS" => Ok(QueryStatus::Success),
            "FAILED" => Ok(QueryStatus::Failed),
            "CANCELED" => Ok(QueryStatus::Canceled),
            other => Err(SdError::validation(format!("unknown query status: {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Database {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub comment: Option<String>,
    pub account_id: String,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct Schema {
    pub id: String,
    pub database_id: String,
    pub name: String,
    pub owner: String,
    pub comment: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct Table {
    pub id: String,
    pub schema_id: String,
    pub name: String,
    pub owner: String,
    pub comment: Option<String>,
    pub table_type: TableType,
    pub columns: Vec<ColumnDef>,
    pub clustering_key: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct Stage {
    pub id: String,
    pub schema_id: String,
    pub name: String,
    pub owner: String,
    pub stage_type: StageType,
    pub url: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct FileFormat {
    pub id: String,
    pub schema_id: String,
    pub name: String,
    pub owner: String,
    pub format_type: FileFormatType,
    pub options: String,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct QueryHistoryEntry {
    pub id: String,
    pub session_id: String,
    pub handle_id: String,
    pub sql_text: String,
    pub status: QueryStatus,
    pub rows_affected: i64,
    pub execution_time_ms: i64,
    pub error: Option<String>,
    pub started_at: i64,
    pub completed_at: Option<i64>,
}
