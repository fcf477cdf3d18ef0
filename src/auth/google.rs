use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::errors::{AppError, AppResult};

const GOOGLE_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// The profile fields we use from a verified Google ID token.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[async_trait]
pub trait GoogleTokenVerify: Send + Sync {
    async fn verify(&self, id_token: &str) -> AppResult<GoogleProfile>;
}

#[derive(Debug, Deserialize)]
struct Jwks {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

/// Verifies RS256 ID tokens against Google's published JWKS. The cert
/// endpoint is fetched per verification; Google serves it with long cache
/// headers and sign-in is a rare operation here.
pub struct GoogleTokenVerifier {
    client_id: String,
    http: reqwest::Client,
}

impl GoogleTokenVerifier {
    pub fn new(client_id: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn fetch_jwks(&self) -> AppResult<Jwks> {
        let response = self
            .http
            .get(GOOGLE_CERTS_URL)
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to fetch Google certs: {}", e)))?;

        response
            .json::<Jwks>()
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to parse Google certs: {}", e)))
    }
}

#[async_trait]
impl GoogleTokenVerify for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> AppResult<GoogleProfile> {
        if self.client_id.is_empty() {
            return Err(AppError::InternalError(
                "Google OAuth not configured on server".to_string(),
            ));
        }

        let header = decode_header(id_token).map_err(|_| {
            AppError::Unauthorized("Invalid Google token. Please try signing in again.".to_string())
        })?;
        let kid = header.kid.ok_or_else(|| {
            AppError::Unauthorized("Invalid Google token. Please try signing in again.".to_string())
        })?;

        let jwks = self.fetch_jwks().await?;
        let jwk = jwks.keys.iter().find(|k| k.kid == kid).ok_or_else(|| {
            AppError::Unauthorized("Invalid Google token. Please try signing in again.".to_string())
        })?;

        let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
            .map_err(|e| AppError::InternalError(format!("Bad Google signing key: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.client_id]);
        validation.set_issuer(&GOOGLE_ISSUERS);

        let data = decode::<GoogleProfile>(id_token, &decoding_key, &validation).map_err(|e| {
            log::warn!("Google token verification failed: {}", e);
            AppError::Unauthorized("Invalid Google token. Please try signing in again.".to_string())
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_unconfigured_client_id_is_server_error() {
        let verifier = GoogleTokenVerifier::new("");
        let result = verifier.verify("whatever").await;

        match result {
            Err(AppError::InternalError(msg)) => assert!(msg.contains("not configured")),
            other => panic!("Expected InternalError, got {:?}", other.map(|p| p.email)),
        }
    }

    #[actix_web::test]
    async fn test_garbled_token_rejected_before_network() {
        let verifier = GoogleTokenVerifier::new("client-id.apps.googleusercontent.com");
        let result = verifier.verify("not.a.jwt at all").await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
