//! Wire DTOs for the driver protocol (`/session/...`, `/queries/v1/...`)
//! and the REST statements v2 and catalog CRUD surfaces. This crate owns
//! the serde shapes only; routing and state live in `snowduck-server`.

pub mod catalog;
pub mod codes;
pub mod login;
pub mod query;
pub mod statements;
pub mod warehouse;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn login_response_serializes_with_expected_field_names() {
        let resp = login::LoginResponse::ok(
            "tok".to_string(),
            "master".to_string(),
            "TEST_DB".to_string(),
            "PUBLIC".to_string(),
        );
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], serde_json::json!(true));
        assert_eq!(json["data"]["masterToken"], serde_json::json!("master"));
        assert_eq!(json["data"]["sessionInfo"]["databaseName"], serde_json::json!("TEST_DB"));
    }

    #[test]
    fn login_request_deserializes_screaming_snake_case_fields() {
        let body = serde_json::json!({
            "data": {
                "LOGIN_NAME": "u",
                "PASSWORD": "p",
                "databaseName": "TEST_DB",
                "schemaName": "PUBLIC"
            }
        });
        let req: login::LoginRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.data.login_name, "u");
        assert_eq!(req.data.database_name.as_deref(), Some("TEST_DB"));
    }

    #[test]
    fn statement_response_created_on_survives_round_trip() {
        let resp = statements::StatementResponse::succeeded("h1".to_string(), 1_700_000_000_000, None, 0);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["createdOn"], serde_json::json!(1_700_000_000_000i64));
        assert_eq!(json["code"], serde_json::json!(codes::SUCCESS));
    }

    #[test]
    fn column_dto_round_trips_through_column_def() {
        use snowduck_catalog::ColumnDef;

        let def = ColumnDef {
            name: "ID".to_string(),
            data_type: "INTEGER".to_string(),
            nullable: false,
            primary_key: true,
            default: None,
        };
        let dto: catalog::ColumnDto = def.clone().into();
        let back: ColumnDef = dto.into();
        assert_eq!(back, def);
    }
}
