use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::ErrorCode;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Lifetime of tokens minted by [`mint_access_token`].
pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Claims carried by identity tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Account id, as a decimal string
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    /// The account id named by `sub`.
    pub fn account_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::unauthorized(ErrorCode::UnauthorizedInvalidJwt))
    }
}

/// Mint a HS256 token for `account_id`. Issuance belongs to the account
/// service; this exists for tests and local tooling.
pub fn mint_access_token(
    account_id: i64,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let claims = Claims {
        sub: account_id.to_string(),
        iat,
        exp: iat + ACCESS_TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(security.jwt_secret()),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token and return its claims.
///
/// Expired tokens map to `UNAUTHORIZED_EXPIRED_JWT`; any other failure to
/// `UNAUTHORIZED_INVALID_JWT`.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    // Validation checks exp by default; only HS256 is accepted.
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(security.jwt_secret()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::unauthorized(ErrorCode::UnauthorizedExpiredJwt)
        }
        _ => AppError::unauthorized(ErrorCode::UnauthorizedInvalidJwt),
    })
}
