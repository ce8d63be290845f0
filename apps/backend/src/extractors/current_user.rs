use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::extractors::auth_token::AuthToken;
use crate::state::app_state::AppState;

/// The authenticated account making the request.
///
/// Resolved from the request's identity token; the account itself is owned
/// by another service and is not looked up here.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
}

impl CurrentUser {
    fn resolve(req: &HttpRequest) -> Result<Self, AppError> {
        let app_state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| AppError::internal("AppState not available"))?;

        let token = AuthToken::from_headers(req)?;
        let claims = verify_access_token(&token.token, &app_state.security)?;
        let id = claims.account_id()?;

        debug!(user_id = id, "request authenticated");
        Ok(CurrentUser { id })
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        std::future::ready(Self::resolve(req))
    }
}
