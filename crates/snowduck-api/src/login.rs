//! `/session/v1/login-request` and friends.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub data: LoginData,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    #[serde(rename = "LOGIN_NAME")]
    pub login_name: String,
    #[serde(rename = "PASSWORD")]
    pub password: String,
    #[serde(default, rename = "databaseName")]
    pub database_name: Option<String>,
    #[serde(default, rename = "schemaName")]
    pub schema_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<LoginResponseData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    #[serde(rename = "masterToken")]
    pub master_token: String,
    #[serde(rename = "sessionInfo")]
    pub session_info: SessionInfo,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    #[serde(rename = "databaseName")]
    pub database_name: String,
    #[serde(rename = "schemaName")]
    pub schema_name: String,
}

impl LoginResponse {
    pub fn ok(token: String, master_token: String, database: String, schema: String) -> Self {
        LoginResponse {
            success: true,
            data: Some(LoginResponseData {
                token,
                master_token,
                session_info: SessionInfo {
                    database_name: database,
                    schema_name: schema,
                },
            }),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        LoginResponse {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// `/session?delete=true` and `/session/logout` share one empty-body
/// success/failure envelope.
#[derive(Debug, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SimpleResponse {
    pub fn ok() -> Self {
        SimpleResponse {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        SimpleResponse {
            success: false,
            message: Some(message.into()),
        }
    }
}
