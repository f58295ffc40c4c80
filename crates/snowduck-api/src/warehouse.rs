//! `/api/v2/warehouses[/{w}][:resume|:suspend]`.

use serde::{Deserialize, Serialize};
use snowduck_catalog::Warehouse;

#[derive(Debug, Deserialize)]
pub struct CreateWarehouseRequest {
    pub name: String,
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default = "default_true")]
    pub auto_resume: bool,
    #[serde(default)]
    pub auto_suspend_secs: Option<u64>,
}

fn default_size() -> String {
    "X-SMALL".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct WarehouseDto {
    pub name: String,
    pub state: String,
    pub size: String,
    pub auto_resume: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_suspend_secs: Option<u64>,
    #[serde(rename = "createdOn")]
    pub created_on: i64,
}

impl From<Warehouse> for WarehouseDto {
    fn from(w: Warehouse) -> Self {
        WarehouseDto {
            name: w.name,
            state: w.state.as_str().to_string(),
            size: w.size.as_str().to_string(),
            auto_resume: w.auto_resume,
            auto_suspend_secs: w.auto_suspend_secs,
            created_on: w.created_at,
        }
    }
}
