//! `/api/v2/statements[...]`.

use serde::{Deserialize, Serialize};
use snowduck_exec::ShapedResult;
use std::collections::HashMap;

use crate::codes::SUCCESS;

#[derive(Debug, Deserialize)]
pub struct StatementSubmitRequest {
    pub statement: String,
    #[serde(default)]
    pub bindings: HashMap<String, Binding>,
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub warehouse: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Binding {
    #[serde(rename = "type")]
    pub type_name: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct StatementResponse {
    pub code: String,
    pub message: String,
    #[serde(rename = "statementHandle")]
    pub statement_handle: String,
    #[serde(rename = "statementStatusUrl")]
    pub statement_status_url: String,
    #[serde(rename = "createdOn")]
    pub created_on: i64,
    #[serde(skip_serializing_if = "Option::is_none", rename = "resultSetMetaData")]
    pub result_set_meta_data: Option<ResultSetMetaData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Vec<serde_json::Value>>>,
}

#[derive(Debug, Serialize)]
pub struct ResultSetMetaData {
    #[serde(rename = "numRows")]
    pub num_rows: u64,
    pub format: String,
    #[serde(rename = "rowType")]
    pub row_type: Vec<RowTypeMeta>,
    #[serde(rename = "partitionInfo")]
    pub partition_info: Vec<PartitionInfo>,
}

#[derive(Debug, Serialize)]
pub struct RowTypeMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub nullable: bool,
}

#[derive(Debug, Serialize)]
pub struct PartitionInfo {
    #[serde(rename = "rowCount")]
    pub row_count: u64,
}

impl StatementResponse {
    pub fn succeeded(
        handle_id: String,
        created_on: i64,
        shaped: Option<ShapedResult>,
        rows_affected: u64,
    ) -> Self {
        let status_url = format!("/api/v2/statements/{handle_id}");
        match shaped {
            Some(shaped) => {
                let num_rows = shaped.rows.len() as u64;
                StatementResponse {
                    code: SUCCESS.to_string(),
                    message: "Statement executed successfully.".to_string(),
                    statement_handle: handle_id,
                    statement_status_url: status_url,
                    created_on,
                    result_set_meta_data: Some(ResultSetMetaData {
                        num_rows,
                        format: "json".to_string(),
                        row_type: shaped
                            .columns
                            .into_iter()
                            .map(|c| RowTypeMeta {
                                name: c.name,
                                type_tag: c.type_tag,
                                nullable: c.nullable,
                            })
                            .collect(),
                        partition_info: vec![PartitionInfo { row_count: num_rows }],
                    }),
                    data: Some(shaped.rows),
                }
            }
            None => StatementResponse {
                code: SUCCESS.to_string(),
                message: "Statement executed successfully.".to_string(),
                statement_handle: handle_id,
                statement_status_url: status_url,
                created_on,
                result_set_meta_data: Some(ResultSetMetaData {
                    num_rows: rows_affected,
                    format: "json".to_string(),
                    row_type: vec![RowTypeMeta {
                        name: "number of rows affected".to_string(),
                        type_tag: "FIXED".to_string(),
                        nullable: false,
                    }],
                    partition_info: vec![PartitionInfo { row_count: 1 }],
                }),
                data: Some(vec![vec![serde_json::Value::String(rows_affected.to_string())]]),
            },
        }
    }

    pub fn failed(code: &str, message: impl Into<String>, handle_id: String, created_on: i64) -> Self {
        StatementResponse {
            code: code.to_string(),
            message: message.into(),
            statement_handle: handle_id.clone(),
            statement_status_url: format!("/api/v2/statements/{handle_id}"),
            created_on,
            result_set_meta_data: None,
            data: None,
        }
    }
}
