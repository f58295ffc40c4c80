//! `/queries/v1/query-request`.

use serde::{Deserialize, Serialize};
use snowduck_exec::ShapedResult;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(rename = "sqlText")]
    pub sql_text: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<QueryResponseData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QueryResponseData {
    pub rowtype: Vec<RowTypeEntry>,
    pub rowset: Vec<Vec<serde_json::Value>>,
    pub total: u64,
    pub returned: u64,
    #[serde(rename = "queryId")]
    pub query_id: String,
}

#[derive(Debug, Serialize)]
pub struct RowTypeEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub nullable: bool,
}

impl QueryResponse {
    pub fn ok(query_id: String, shaped: ShapedResult) -> Self {
        let total = shaped.rows.len() as u64;
        QueryResponse {
            success: true,
            data: Some(QueryResponseData {
                rowtype: shaped
                    .columns
                    .into_iter()
                    .map(|c| RowTypeEntry {
                        name: c.name,
                        type_tag: c.type_tag,
                        nullable: c.nullable,
                    })
                    .collect(),
                rowset: shaped.rows,
                total,
                returned: total,
                query_id,
            }),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        QueryResponse {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}
