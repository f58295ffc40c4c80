//! Internal stage file storage: `<stageDir>/<schemaID>/<stageName>/<path>`.

use std::path::PathBuf;

use snowduck_catalog::Catalog;
use snowduck_common::{ident, stage::resolve_stage_path, SdError, SdResult};

pub fn put_file(
    catalog: &Catalog,
    stage_dir: &std::path::Path,
    database: &str,
    schema: &str,
    stage: &str,
    relative_path: &str,
    bytes: &[u8],
) -> SdResult<()> {
    let resolved = resolve(catalog, stage_dir, database, schema, stage, relative_path)?;
    if let Some(parent) = resolved.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| SdError::execution("stage put_file").with_source(e.to_string()))?;
    }
    std::fs::write(&resolved, bytes).map_err(|e| SdError::execution("stage put_file").with_source(e.to_string()))
}

pub fn get_file(
    catalog: &Catalog,
    stage_dir: &std::path::Path,
    database: &str,
    schema: &str,
    stage: &str,
    relative_path: &str,
) -> SdResult<Vec<u8>> {
    let resolved = resolve(catalog, stage_dir, database, schema, stage, relative_path)?;
    std::fs::read(&resolved).map_err(|_| SdError::not_found(format!("stage file {relative_path}")))
}

fn resolve(
    catalog: &Catalog,
    stage_dir: &std::path::Path,
    database: &str,
    schema: &str,
    stage: &str,
    relative_path: &str,
) -> SdResult<PathBuf> {
    let schema_row = catalog.get_schema_by_name(database, schema)?;
    catalog.get_stage_by_name(database, schema, stage)?;
    let stage_root = stage_dir.join(&schema_row.id).join(ident::normalize(stage));
    resolve_stage_path(&stage_root, relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowduck_catalog::StageType;
    use snowduck_common::EmulatorConfig;
    use snowduck_engine::Engine;
    use std::sync::Arc;

    fn test_catalog() -> Catalog {
        let engine = Arc::new(Engine::open(&EmulatorConfig::default()).unwrap());
        Catalog::new(engine).unwrap()
    }

    #[test]
    fn put_then_get_file_round_trips() {
        let catalog = test_catalog();
        catalog.create_database("TEST_DB", "u", None).unwrap();
        catalog.create_schema("TEST_DB", "PUBLIC", "u", None).unwrap();
        catalog
            .create_stage("TEST_DB", "PUBLIC", "MYSTAGE", "u", StageType::Internal, None)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        put_file(&catalog, dir.path(), "TEST_DB", "PUBLIC", "MYSTAGE", "a/b.csv", b"hi").unwrap();
        let bytes = get_file(&catalog, dir.path(), "TEST_DB", "PUBLIC", "MYSTAGE", "a/b.csv").unwrap();
        assert_eq!(bytes, b"hi");
    }

    #[test]
    fn put_file_rejects_parent_dir_escape() {
        let catalog = test_catalog();
        catalog.create_database("TEST_DB", "u", None).unwrap();
        catalog.create_schema("TEST_DB", "PUBLIC", "u", None).unwrap();
        catalog
            .create_stage("TEST_DB", "PUBLIC", "MYSTAGE", "u", StageType::Internal, None)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let err = put_file(&catalog, dir.path(), "TEST_DB", "PUBLIC", "MYSTAGE", "../x", b"hi").unwrap_err();
        assert_eq!(err.kind(), snowduck_common::ErrorKind::ValidationFailed);
    }

    #[test]
    fn put_file_rejects_absolute_path() {
        let catalog = test_catalog();
        catalog.create_database("TEST_DB", "u", None).unwrap();
        catalog.create_schema("TEST_DB", "PUBLIC", "u", None).unwrap();
        catalog
            .create_stage("TEST_DB", "PUBLIC", "MYSTAGE", "u", StageType::Internal, None)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let err = put_file(&catalog, dir.path(), "TEST_DB", "PUBLIC", "MYSTAGE", "/abs/x", b"hi").unwrap_err();
        assert_eq!(err.kind(), snowduck_common::ErrorKind::ValidationFailed);
    }
}
