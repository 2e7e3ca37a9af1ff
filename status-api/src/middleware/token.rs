//! Bearer token claims and header parsing

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Verified token claims
///
/// `sub` is `user:<id>` for people and `client:<id>` for integrations.
/// `perms` lists granted abilities such as `schedules.manage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub perms: Vec<String>,

    pub exp: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

impl Claims {
    /// Claims for `sub` holding `perms`, valid for an hour
    pub fn new(sub: impl Into<String>, perms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: sub.into(),
            email: None,
            perms: perms.into_iter().map(Into::into).collect(),
            exp: now + 3600,
            iat: Some(now),
            jti: None,
            iss: None,
            aud: None,
        }
    }

    pub fn has_permission(&self, perm: &str) -> bool {
        self.perms.iter().any(|p| p == perm)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.sub.strip_prefix("user:")
    }
}

pub trait TokenValidator: Send + Sync + Clone {
    fn validate_token(&self, token: &str) -> Result<Claims, Error>;
}

/// Bearer token from the `Authorization` header.
///
/// `Ok(None)` when the header is absent; an error when it is present but not
/// a bearer credential.
pub fn extract_token(headers: &HeaderMap) -> Result<Option<&str>, Error> {
    let Some(value) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| Error::Unauthorized("Invalid Authorization header encoding".to_string()))?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim())),
        _ => Err(Error::Unauthorized(
            "Invalid Authorization header format".to_string(),
        )),
    }
}
