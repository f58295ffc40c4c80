//! Extraction of the driver protocol's `Authorization: Snowflake Token="<t>"`
//! header.

use axum::http::HeaderMap;

pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let rest = raw.strip_prefix("Snowflake Token=")?;
    Some(rest.trim_matches('"').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_quoted_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Snowflake Token=\"abc123\"".parse().unwrap(),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }
}
