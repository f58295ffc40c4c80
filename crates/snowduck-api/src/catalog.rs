//! `/api/v2/databases[/{db}[/schemas[/{s}[/tables[/{t}]]]]]`.

use serde::{Deserialize, Serialize};
use snowduck_catalog::{ColumnDef, Database, Schema, Table};

#[derive(Debug, Deserialize)]
pub struct CreateDatabaseRequest {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DatabaseDto {
    pub id: String,
    pub name: String,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "createdOn")]
    pub created_on: i64,
}

impl From<Database> for DatabaseDto {
    fn from(d: Database) -> Self {
        DatabaseDto {
            id: d.id,
            name: d.name,
            owner: d.owner,
            comment: d.comment,
            created_on: d.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSchemaRequest {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SchemaDto {
    pub id: String,
    pub name: String,
    #[serde(rename = "databaseName")]
    pub database_name: String,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "createdOn")]
    pub created_on: i64,
}

impl SchemaDto {
    pub fn from_schema(s: Schema, database_name: String) -> Self {
        SchemaDto {
            id: s.id,
            name: s.name,
            database_name,
            owner: s.owner,
            comment: s.comment,
            created_on: s.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTableRequest {
    pub name: String,
    pub columns: Vec<ColumnDto>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ColumnDto {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, rename = "primaryKey")]
    pub primary_key: bool,
    #[serde(default)]
    pub default: Option<String>,
}

impl From<ColumnDto> for ColumnDef {
    fn from(c: ColumnDto) -> Self {
        ColumnDef {
            name: c.name,
            data_type: c.data_type,
            nullable: c.nullable,
            primary_key: c.primary_key,
            default: c.default,
        }
    }
}

impl From<ColumnDef> for ColumnDto {
    fn from(c: ColumnDef) -> Self {
        ColumnDto {
            name: c.name,
            data_type: c.data_type,
            nullable: c.nullable,
            primary_key: c.primary_key,
            default: c.default,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TableDto {
    pub id: String,
    pub name: String,
    #[serde(rename = "schemaName")]
    pub schema_name: String,
    pub owner: String,
    pub columns: Vec<ColumnDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "createdOn")]
    pub created_on: i64,
}

impl TableDto {
    pub fn from_table(t: Table, schema_name: String) -> Self {
        TableDto {
            id: t.id,
            name: t.name,
            schema_name,
            owner: t.owner,
            columns: t.columns.into_iter().map(ColumnDto::from).collect(),
            comment: t.comment,
            created_on: t.created_at,
        }
    }
}
