use std::collections::HashMap;

use axum::http::StatusCode;

use super::ApiSuccess;

/// Static informational mapping for the landing endpoint.
pub async fn home() -> ApiSuccess<HashMap<String, String>> {
    let mut data = HashMap::new();
    data.insert("service".to_string(), "authentication-service".to_string());
    data.insert("version".to_string(), env!("CARGO_PKG_VERSION").to_string());
    data.insert("status".to_string(), "up".to_string());

    ApiSuccess::new(StatusCode::OK, data)
}
