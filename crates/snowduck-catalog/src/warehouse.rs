//! The warehouse registry: unlike every other catalog object, warehouses
//! have no engine-side twin and no metadata table. They are pure
//! bookkeeping, held in an in-memory map guarded by the same read-write
//! discipline as the session and statement maps, per the concurrency model.

use std::collections::HashMap;

use parking_lot::RwLock;
use snowduck_common::{ident, SdError, SdResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseState {
    Suspended,
    Resuming,
    Active,
    Suspending,
}

impl WarehouseState {
    pub fn as_str(self) -> &'static str {
        match self {
            WarehouseState::Suspended => "SUSPENDED",
            WarehouseState::Resuming => "RESUMING",
            WarehouseState::Active => "ACTIVE",
            WarehouseState::Suspending => "SUSPENDING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseSize {
    XSmall,
    Small,
    Medium,
    Large,
    XLarge,
    XXLarge,
    XXXLarge,
    X4Large,
    X5Large,
    X6Large,
}

impl WarehouseSize {
    pub fn as_str(self) -> &'static str {
        match self {
            WarehouseSize::XSmall => "X-SMALL",
            WarehouseSize::Small => "SMALL",
            WarehouseSize::Medium => "MEDIUM",
            WarehouseSize::Large => "LARGE",
            WarehouseSize::XLarge => "X-LARGE",
            WarehouseSize::XXLarge => "2X-LARGE",
            WarehouseSize::XXXLarge => "3X-LARGE",
            WarehouseSize::X4Large => "4X-LARGE",
            WarehouseSize::X5Large => "5X-LARGE",
            WarehouseSize::X6Large => "6X-LARGE",
        }
    }

    pub fn parse(s: &str) -> SdResult<Self> {
        match s {
            "X-SMALL" => Ok(WarehouseSize::XSmall),
            "SMALL" => Ok(WarehouseSize::Small),
            "MEDIUM" => Ok(WarehouseSize::Medium),
            "LARGE" => Ok(WarehouseSize::Large),
            "X-LARGE" => Ok(WarehouseSize::XLarge),
            "2X-LARGE" => Ok(WarehouseSize::XXLarge),
            "3X-LARGE" => Ok(WarehouseSize::XXXLarge),
            "4X-LARGE" => Ok(WarehouseSize::X4Large),
            "5X-LARGE" => Ok(WarehouseSize::X5Large),
            "6X-LARGE" => Ok(WarehouseSize::X6Large),
            other => Err(SdError::validation(format!("unknown warehouse size: {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Warehouse {
    pub name: String,
    pub state: WarehouseState,
    pub size: WarehouseSize,
    pub auto_resume: bool,
    pub auto_suspend_secs: Option<u64>,
    pub created_at: i64,
}

#[derive(Default)]
pub struct WarehouseManager {
    warehouses: RwLock<HashMap<String, Warehouse>>,
}

impl WarehouseManager {
    pub fn new() -> Self {
        WarehouseManager::default()
    }

    pub fn create(
        &self,
        name: &str,
        size: WarehouseSize,
        auto_resume: bool,
        auto_suspend_secs: Option<u64>,
    ) -> SdResult<Warehouse> {
        if name.trim().is_empty() {
            return Err(SdError::validation("warehouse name must not be empty"));
        }
        let name = ident::normalize(name);
        let mut warehouses = self.warehouses.write();
        if warehouses.contains_key(&name) {
            return Err(SdError::already_exists(format!("warehouse {name}")));
        }
        let warehouse = Warehouse {
            name: name.clone(),
            state: WarehouseState::Suspended,
            size,
            auto_resume,
            auto_suspend_secs,
            created_at: snowduck_common::time::now_millis(),
        };
        warehouses.insert(name.clone(), warehouse.clone());
        tracing::debug!(warehouse = %name, size = warehouse.size.as_str(), "warehouse created");
        Ok(warehouse)
    }

    pub fn get(&self, name: &str) -> SdResult<Warehouse> {
        let name = ident::normalize(name);
        self.warehouses
            .read()
            .get(&name)
            .cloned()
            .ok_or_else(|| SdError::not_found(format!("warehouse {name}")))
    }

    pub fn list(&self) -> Vec<Warehouse> {
        let mut all: Vec<Warehouse> = self.warehouses.read().values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn drop(&self, name: &str) -> SdResult<()> {
        let name = ident::normalize(name);
        self.warehouses
            .write()
            .remove(&name)
            .map(|_| tracing::debug!(warehouse = %name, "warehouse dropped"))
            .ok_or_else(|| SdError::not_found(format!("warehouse {name}")))
    }

    pub fn resume(&self, name: &str) -> SdResult<Warehouse> {
        self.transition(name, WarehouseState::Active)
    }

    pub fn suspend(&self, name: &str) -> SdResult<Warehouse> {
        self.transition(name, WarehouseState::Suspended)
    }

    fn transition(&self, name: &str, state: WarehouseState) -> SdResult<Warehouse> {
        let name = ident::normalize(name);
        let mut warehouses = self.warehouses.write();
        let warehouse = warehouses
            .get_mut(&name)
            .ok_or_else(|| SdError::not_found(format!("warehouse {name}")))?;
        warehouse.state = state;
        tracing::debug!(warehouse = %name, state = state.as_str(), "warehouse state transition");
        Ok(warehouse.clone())
    }
}
