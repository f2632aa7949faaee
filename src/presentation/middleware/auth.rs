//! Authentication Middleware
//!
//! JWT validation middleware for the publish API.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::services::Author;
use crate::domain::Role;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Member role, e.g. `teacher`
    pub role: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Claims for `user_id` valid for `ttl_secs` from now
    pub fn new(user_id: impl Into<String>, role: Role, name: Option<String>, ttl_secs: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user_id.into(),
            role: role.as_str().to_string(),
            name,
            exp: now + ttl_secs,
            iat: now,
        }
    }
}

/// Authenticated user extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub role: Role,
    pub name: Option<String>,
}

impl From<&AuthUser> for Author {
    fn from(user: &AuthUser) -> Self {
        Author {
            user_id: user.user_id.clone(),
            role: user.role,
            full_name: user.name.clone(),
        }
    }
}

/// Sign claims with the shared HS256 secret
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Decode and validate a bearer token into the authenticated user
pub fn verify_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Token expired".into())
        }
        _ => AppError::Unauthorized("Invalid token".into()),
    })?;

    let claims = token_data.claims;
    if claims.sub.trim().is_empty() {
        return Err(AppError::Unauthorized("Invalid token claims".into()));
    }

    let role: Role = claims
        .role
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid token claims".into()))?;

    Ok(AuthUser {
        user_id: claims.sub,
        role,
        name: claims.name,
    })
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    // Check for Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".into()))?;

    let user = verify_token(token, &state.settings.jwt.secret)?;

    // Insert authenticated user into request extensions
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "a-test-secret-that-is-at-least-32-chars";

    #[test]
    fn test_token_round_trip_keeps_role_and_name() {
        let claims = Claims::new("t1", Role::Teacher, Some("Ms. Rivera".into()), 3600);
        let token = issue_token(&claims, SECRET).unwrap();

        let user = verify_token(&token, SECRET).unwrap();
        assert_eq!(
            user,
            AuthUser {
                user_id: "t1".into(),
                role: Role::Teacher,
                name: Some("Ms. Rivera".into()),
            }
        );
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(&Claims::new("t1", Role::Teacher, None, 3600), SECRET).unwrap();
        let result = verify_token(&token, "another-secret-that-is-long-enough-too");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = issue_token(&Claims::new("t1", Role::Teacher, None, -3600), SECRET).unwrap();
        match verify_token(&token, SECRET) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Token expired"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "x1".into(),
            role: "janitor".into(),
            name: None,
            exp: now + 3600,
            iat: now,
        };
        let token = issue_token(&claims, SECRET).unwrap();
        assert!(matches!(
            verify_token(&token, SECRET),
            Err(AppError::Unauthorized(_))
        ));
    }
}
