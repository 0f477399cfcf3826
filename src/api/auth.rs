//! Admin session cookies
//!
//! A session is a signed token `<expiry-unix-secs>.<hex hmac-sha256>` kept in
//! an HttpOnly cookie and checked on every admin request. Nothing is stored
//! server side, so logging out just clears the cookie.

use crate::error::{FeedbackError, Result};
use axum::http::{header::COOKIE, HeaderMap};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the admin session token
pub const SESSION_COOKIE: &str = "feedback_admin";

/// Issues and verifies admin session tokens
#[derive(Clone)]
pub struct SessionSigner {
    key: Vec<u8>,
    ttl_secs: i64,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl SessionSigner {
    pub fn new(key: Vec<u8>, ttl_secs: u64) -> Self {
        Self {
            key,
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    /// New token valid for the configured lifetime
    pub fn issue(&self) -> Result<String> {
        self.issue_at(Utc::now())
    }

    pub fn issue_at(&self, now: DateTime<Utc>) -> Result<String> {
        let expiry = now.timestamp().saturating_add(self.ttl_secs);
        let signature = self.mac(expiry)?.finalize().into_bytes();
        let hex = signature
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>();
        Ok(format!("{}.{}", expiry, hex))
    }

    /// Whether the token is authentic and unexpired
    pub fn verify(&self, token: &str) -> bool {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        let Some((expiry, signature)) = token.split_once('.') else {
            return false;
        };
        let Ok(expiry) = expiry.parse::<i64>() else {
            return false;
        };
        if expiry <= now.timestamp() {
            return false;
        }
        let Some(signature) = decode_hex(signature) else {
            return false;
        };

        match self.mac(expiry) {
            Ok(mac) => mac.verify_slice(&signature).is_ok(),
            Err(_) => false,
        }
    }

    /// Constant-time password check: both sides are MACed and the digests compared
    pub fn password_matches(&self, given: &str, expected: &str) -> bool {
        let digest = |password: &str| -> Result<HmacSha256> {
            let mut mac = HmacSha256::new_from_slice(&self.key)
                .map_err(|e| FeedbackError::Other(format!("Invalid HMAC key: {}", e)))?;
            mac.update(b"password:");
            mac.update(password.as_bytes());
            Ok(mac)
        };

        match (digest(given), digest(expected)) {
            (Ok(given), Ok(expected)) => {
                let expected = expected.finalize().into_bytes();
                given.verify_slice(&expected).is_ok()
            }
            _ => false,
        }
    }

    /// `Set-Cookie` value establishing a session
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/admin; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE, token, self.ttl_secs
        )
    }

    /// `Set-Cookie` value ending the session
    pub fn clear_cookie() -> String {
        format!("{}=; Path=/admin; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
    }

    fn mac(&self, expiry: i64) -> Result<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| FeedbackError::Other(format!("Invalid HMAC key: {}", e)))?;
        mac.update(format!("admin:{}", expiry).as_bytes());
        Ok(mac)
    }
}

/// Session token from the request's cookies, if any
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect()
}
