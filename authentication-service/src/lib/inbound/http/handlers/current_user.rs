use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Return the identity bound to the validated session token.
///
/// The middleware has already decoded the token and stored the identity in
/// the request extensions; no storage round trip happens here.
pub async fn current_user(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<CurrentUserResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        CurrentUserResponseData {
            id: user.user_id.to_string(),
            username: user.username,
            email: user.email,
            roles: user.roles,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}
