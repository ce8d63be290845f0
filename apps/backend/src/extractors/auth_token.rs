use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::errors::ErrorCode;
use crate::AppError;

/// Header the pifuxelck clients send their token in.
pub const PIFUXELCK_AUTH_HEADER: &str = "x-pifuxelck-auth";

/// Raw identity token from `x-pifuxelck-auth` or `Authorization: Bearer`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthToken {
    pub token: String,
}

impl AuthToken {
    pub fn from_headers(req: &HttpRequest) -> Result<Self, AppError> {
        if let Some(value) = req.headers().get(PIFUXELCK_AUTH_HEADER) {
            let token = value
                .to_str()
                .map_err(|_| AppError::unauthorized(ErrorCode::UnauthorizedInvalidJwt))?
                .trim();
            return Self::non_empty(token);
        }

        let auth_value = req
            .headers()
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::unauthorized(ErrorCode::UnauthorizedMissingToken))?
            .to_str()
            .map_err(|_| AppError::unauthorized(ErrorCode::UnauthorizedInvalidJwt))?;

        // Parse "Bearer <token>" format
        let parts: Vec<&str> = auth_value.split_whitespace().collect();
        if parts.len() != 2 || parts[0] != "Bearer" {
            return Err(AppError::unauthorized(ErrorCode::UnauthorizedInvalidJwt));
        }

        Self::non_empty(parts[1])
    }

    fn non_empty(token: &str) -> Result<Self, AppError> {
        if token.is_empty() {
            return Err(AppError::unauthorized(ErrorCode::UnauthorizedMissingToken));
        }
        Ok(AuthToken {
            token: token.to_string(),
        })
    }
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(Self::from_headers(req))
    }
}
