use crate::error::ApiError;
use crate::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use domain::{CurrentUser, DomainError};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Claims of the session tokens issued by the auth provider. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: u64,
}

/// HS256 session verification against the shared secret.
#[derive(Clone)]
pub struct JwtAuthProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtAuthProvider {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<CurrentUser, DomainError> {
        let data = decode::<SessionClaims>(token, &self.key, &self.validation).map_err(|e| {
            warn!(error = %e, "Rejected session token");
            DomainError::Unauthorized("Your session is invalid or expired, please sign in again".to_string())
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(DomainError::Unauthorized("Session token has no subject".to_string()));
        }
        Ok(CurrentUser::signed_in(data.claims.sub))
    }

    /// Anonymous without an `Authorization` header; otherwise the bearer
    /// token must verify.
    pub fn current_user(&self, authorization: Option<&str>) -> Result<CurrentUser, DomainError> {
        let Some(value) = authorization else {
            return Ok(CurrentUser::anonymous());
        };

        match value.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => self.verify(token.trim()),
            _ => Err(DomainError::Unauthorized(
                "Expected a Bearer session token".to_string(),
            )),
        }
    }
}

/// Identity of the caller, resolved from the request headers.
pub struct AuthSession(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let authorization = match parts.headers.get(header::AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                DomainError::Unauthorized("Authorization header is not valid text".to_string())
            })?),
            None => None,
        };

        let current_user = state.auth.current_user(authorization)?;
        Ok(AuthSession(current_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, sub: &str, exp: u64) -> String {
        encode(
            &Header::default(),
            &SessionClaims { sub: sub.to_string(), exp },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_an_hour() -> u64 {
        (chrono::Utc::now().timestamp() + 3600) as u64
    }

    #[test]
    fn missing_header_is_anonymous() {
        let auth = JwtAuthProvider::new("secret");
        assert_eq!(auth.current_user(None).unwrap(), CurrentUser::anonymous());
    }

    #[test]
    fn valid_token_yields_subject() {
        let auth = JwtAuthProvider::new("secret");
        let header = format!("Bearer {}", token("secret", "user-7", in_an_hour()));
        assert_eq!(
            auth.current_user(Some(&header)).unwrap(),
            CurrentUser::signed_in("user-7")
        );
    }

    #[test]
    fn wrong_secret_expired_or_malformed_is_unauthorized() {
        let auth = JwtAuthProvider::new("secret");
        let forged = format!("Bearer {}", token("other", "user-7", in_an_hour()));
        let expired = format!("Bearer {}", token("secret", "user-7", 1_000));

        for header in [forged.as_str(), expired.as_str(), "Bearer", "Basic abc"] {
            assert!(matches!(
                auth.current_user(Some(header)),
                Err(DomainError::Unauthorized(_))
            ));
        }
    }
}
