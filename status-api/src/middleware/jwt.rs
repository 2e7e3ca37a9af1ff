//! JWT authentication middleware
//!
//! Authentication is optional per request: verified [`Claims`] are stored in
//! the request extensions for the [`crate::guard::Caller`] extractor, and
//! any request without usable claims continues anonymously.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::{fs, sync::Arc};

use super::token::{extract_token, Claims, TokenValidator};
use crate::{config::AuthConfig, error::Error};

#[derive(Clone)]
pub struct TokenAuth {
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
}

impl TokenAuth {
    /// Build from configuration, reading the key file
    pub fn from_config(config: &AuthConfig) -> Result<Self, Error> {
        let key = fs::read(&config.key_path).map_err(|e| {
            Error::Config(Box::new(figment::Error::from(format!(
                "Failed to read JWT key from path '{}': {}",
                config.key_path.display(),
                e
            ))))
        })?;

        let algorithm = parse_algorithm(&config.algorithm)?;

        let decoding_key = match algorithm {
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => DecodingKey::from_rsa_pem(&key)?,
            Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(&key)?,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                DecodingKey::from_secret(key.trim_ascii_end())
            }
            Algorithm::EdDSA => DecodingKey::from_ed_pem(&key)?,
            #[allow(unreachable_patterns)]
            other => {
                return Err(Error::Config(Box::new(figment::Error::from(format!(
                    "Unsupported JWT algorithm: {:?}",
                    other
                )))))
            }
        };

        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = &config.audience {
            validation.set_audience(&[audience]);
        }

        tracing::info!(
            algorithm = ?algorithm,
            issuer = ?config.issuer,
            audience = ?config.audience,
            "JWT verification configured"
        );

        Ok(Self {
            decoding_key: Arc::new(decoding_key),
            validation,
        })
    }

    /// Shared-secret HS256 verification
    pub fn hs256(secret: &[u8]) -> Self {
        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(secret)),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Attach verified claims to the request.
    ///
    /// A missing, malformed or unverifiable token leaves the caller
    /// anonymous; the permission guard rejects it wherever an ability is
    /// required.
    pub async fn middleware(
        State(auth): State<Self>,
        mut request: Request<Body>,
        next: Next,
    ) -> Response {
        let claims = extract_token(request.headers())
            .and_then(|token| token.map(|token| auth.validate_token(token)).transpose());

        match claims {
            Ok(Some(claims)) => {
                tracing::debug!(sub = %claims.sub, "Authenticated request");
                request.extensions_mut().insert(claims);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unusable bearer token; caller is anonymous");
            }
        }

        next.run(request).await
    }
}

impl TokenValidator for TokenAuth {
    fn validate_token(&self, token: &str) -> Result<Claims, Error> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(Error::from)?;
        Ok(token_data.claims)
    }
}

fn parse_algorithm(name: &str) -> Result<Algorithm, Error> {
    let algorithm = match name.to_uppercase().as_str() {
        "RS256" => Algorithm::RS256,
        "RS384" => Algorithm::RS384,
        "RS512" => Algorithm::RS512,
        "PS256" => Algorithm::PS256,
        "PS384" => Algorithm::PS384,
        "PS512" => Algorithm::PS512,
        "ES256" => Algorithm::ES256,
        "ES384" => Algorithm::ES384,
        "HS256" => Algorithm::HS256,
        "HS384" => Algorithm::HS384,
        "HS512" => Algorithm::HS512,
        "EDDSA" => Algorithm::EdDSA,
        other => {
            return Err(Error::Config(Box::new(figment::Error::from(format!(
                "Unsupported JWT algorithm: {}",
                other
            )))))
        }
    };
    Ok(algorithm)
}
