use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use hotelier_core::identity::{Identity, IdentityVerifier};
use hotelier_core::{CoreError, CoreResult};
use hotelier_store::app_config::IdentityConfig;

use crate::auth::SESSION_TOKEN_TYPE;
use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Identity token verification
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IdentityClaims {
    pub email: String,
    pub exp: usize,
    #[serde(default)]
    pub typ: Option<String>,
}

/// Verifies HS256 identity tokens and yields the email they were issued for.
pub struct JwtIdentityVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityVerifier {
    pub fn new(secret: &str, issuer: Option<&str>, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(iss) = issuer {
            validation.set_issuer(&[iss]);
        }
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(&config.secret, config.issuer.as_deref(), config.audience.as_deref())
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify(&self, credential: &str) -> CoreResult<Identity> {
        let token_data = decode::<IdentityClaims>(credential, &self.key, &self.validation)
            .map_err(|e| CoreError::Unauthorized(format!("Invalid token: {}", e)))?;

        if token_data.claims.typ.as_deref() == Some(SESSION_TOKEN_TYPE) {
            return Err(CoreError::Unauthorized("Session tokens do not prove identity".to_string()));
        }

        let email = token_data.claims.email.trim();
        if email.is_empty() {
            return Err(CoreError::Unauthorized("Token carries no email".to_string()));
        }

        Ok(Identity { email: email.to_string() })
    }
}

// ============================================================================
// Bearer Authentication Middleware
// ============================================================================

pub async fn identity_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Missing bearer token".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::AuthenticationError("Missing bearer token".to_string()))?;

    let identity = state.identity.verify(token).await?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[derive(Serialize)]
    struct TestClaims<'a> {
        email: &'a str,
        exp: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        iss: Option<&'a str>,
    }

    fn token(secret: &str, email: &str, offset: Duration, iss: Option<&str>) -> String {
        let claims = TestClaims {
            email,
            exp: (Utc::now() + offset).timestamp() as usize,
            iss,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_yields_email() {
        let verifier = JwtIdentityVerifier::new("secret", None, None);
        let identity = verifier
            .verify(&token("secret", "ada@example.com", Duration::minutes(5), None))
            .await
            .unwrap();
        assert_eq!(identity.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_wrong_secret_is_unauthorized() {
        let verifier = JwtIdentityVerifier::new("secret", None, None);
        let result = verifier
            .verify(&token("other", "ada@example.com", Duration::minutes(5), None))
            .await;
        assert!(matches!(result, Err(CoreError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let verifier = JwtIdentityVerifier::new("secret", None, None);
        let result = verifier
            .verify(&token("secret", "ada@example.com", Duration::hours(-2), None))
            .await;
        assert!(matches!(result, Err(CoreError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_issuer_is_enforced() {
        let verifier = JwtIdentityVerifier::new("secret", Some("hotelier"), None);

        let wrong = verifier
            .verify(&token("secret", "ada@example.com", Duration::minutes(5), Some("elsewhere")))
            .await;
        assert!(matches!(wrong, Err(CoreError::Unauthorized(_))));

        let right = verifier
            .verify(&token("secret", "ada@example.com", Duration::minutes(5), Some("hotelier")))
            .await;
        assert!(right.is_ok());
    }

    #[tokio::test]
    async fn test_session_typed_token_is_unauthorized() {
        #[derive(Serialize)]
        struct Claims<'a> {
            email: &'a str,
            typ: &'a str,
            exp: usize,
        }

        let claims = Claims {
            email: "ada@example.com",
            typ: SESSION_TOKEN_TYPE,
            exp: (Utc::now() + Duration::minutes(5)).timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret")).unwrap();

        let verifier = JwtIdentityVerifier::new("secret", None, None);
        assert!(matches!(verifier.verify(&token).await, Err(CoreError::Unauthorized(_))));
    }
}
