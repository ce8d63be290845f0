use std::time::SystemTime;

use backend::auth::jwt::mint_access_token;
use backend::state::security_config::SecurityConfig;

/// `Authorization` header value for `account_id`, signed with `security`.
pub fn bearer(account_id: i64, security: &SecurityConfig) -> (String, String) {
    let token =
        mint_access_token(account_id, SystemTime::now(), security).expect("token should mint");
    ("Authorization".to_string(), format!("Bearer {token}"))
}

/// The same identity in the header the pifuxelck clients send.
pub fn pifuxelck_auth(account_id: i64, security: &SecurityConfig) -> (String, String) {
    let token =
        mint_access_token(account_id, SystemTime::now(), security).expect("token should mint");
    ("x-pifuxelck-auth".to_string(), token)
}
