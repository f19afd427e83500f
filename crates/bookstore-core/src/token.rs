//! Bearer Token Inspection
//!
//! The client never verifies signatures; it only reads the JWT payload to
//! learn the expiry and role so it can skip requests that would be
//! rejected anyway and route the user to the right home page.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::domain::Role;
use crate::json;

/// Seconds of slack before `exp` at which a token already counts as expired.
pub const EXPIRY_LEEWAY_SECS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(remote = "Self")]
pub struct TokenClaims {
    #[serde(default, deserialize_with = "json::opt_string_id")]
    pub sub: Option<String>,
    #[serde(default, deserialize_with = "json::opt_string_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

json::lenient_keys!(TokenClaims {
    user_id: ["userId"],
    role: ["userType", "user_type"],
});

impl TokenClaims {
    /// `sub`, or the `user_id` claim some issuers use instead.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().or(self.user_id.as_deref())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Decode the payload segment of a JWT. Returns `None` for anything that
/// is not three dot-separated segments with a base64url JSON payload.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut parts = token.trim().split('.');
    let (_header, payload, _sig) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    // Some issuers pad the segment; the no-pad engine rejects '='.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Expired, malformed or empty tokens all count as expired. Tokens without
/// an `exp` claim never expire client-side.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    if token.trim().is_empty() {
        return true;
    }
    match decode_claims(token) {
        Some(claims) => match claims.expires_at() {
            Some(exp) => exp - Duration::seconds(EXPIRY_LEEWAY_SECS) <= now,
            None => false,
        },
        None => true,
    }
}

/// Remaining lifetime, `None` when unknown or already expired.
pub fn time_until_expiry(token: &str, now: DateTime<Utc>) -> Option<Duration> {
    let exp = decode_claims(token)?.expires_at()?;
    let left = exp - now;
    (left > Duration::zero()).then_some(left)
}

#[cfg(test)]
pub(crate) fn make_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_decode_claims() {
        let token = make_token(&json!({"sub": 12, "exp": 1_704_070_800, "role": "ADMIN", "email": "a@b.com"}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.subject(), Some("12"));
        assert_eq!(claims.role, Some(Role::Admin));
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_user_id_claim_alongside_sub() {
        let token = make_token(&json!({"user_id": 4, "sub": "4", "exp": 1}));
        assert_eq!(decode_claims(&token).unwrap().subject(), Some("4"));
        let token = make_token(&json!({"userId": 9}));
        assert_eq!(decode_claims(&token).unwrap().subject(), Some("9"));
    }

    #[test]
    fn test_expiry() {
        let future = now().timestamp() + 3_600;
        let past = now().timestamp() - 1;
        assert!(!is_expired(&make_token(&json!({"exp": future})), now()));
        assert!(is_expired(&make_token(&json!({"exp": past})), now()));
    }

    #[test]
    fn test_leeway_counts_as_expired() {
        let soon = now().timestamp() + 10;
        assert!(is_expired(&make_token(&json!({"exp": soon})), now()));
    }

    #[test]
    fn test_missing_exp_never_expires() {
        assert!(!is_expired(&make_token(&json!({"sub": "1"})), now()));
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(is_expired("", now()));
        assert!(is_expired("not-a-jwt", now()));
        assert!(is_expired("a.!!!.c", now()));
        assert!(decode_claims("a.b.c.d").is_none());
    }

    #[test]
    fn test_time_until_expiry() {
        let token = make_token(&json!({"exp": now().timestamp() + 120}));
        assert_eq!(time_until_expiry(&token, now()), Some(Duration::seconds(120)));
        let expired = make_token(&json!({"exp": now().timestamp() - 5}));
        assert_eq!(time_until_expiry(&expired, now()), None);
    }

    #[test]
    fn test_role_and_user_type_together() {
        let token = make_token(&json!({"sub": 1, "exp": 4_102_444_800_i64, "role": "admin", "user_type": "admin"}));
        assert!(!is_expired(&token, now()));
        assert_eq!(decode_claims(&token).unwrap().role, Some(Role::Admin));

        let token = make_token(&json!({"user_id": 2, "userId": 2, "userType": "librarian", "user_type": "admin"}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.subject(), Some("2"));
        assert_eq!(claims.role, Some(Role::Librarian));
    }
}
