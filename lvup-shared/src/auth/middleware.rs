/// JWT authentication middleware for Axum
///
/// `jwt_auth_middleware` validates the bearer token and stores an
/// `AuthContext` in request extensions; handlers extract it with
/// `Extension<AuthContext>`.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use lvup_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {} ({})", auth.user_id, auth.role.as_str())
/// }
/// ```

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_access_token, Claims, JwtError};
use crate::models::user::UserRole;

/// Authentication context added to request extensions after a token check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Role carried by the access token
    pub role: UserRole,
}

impl AuthContext {
    /// Creates auth context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
        }
    }

    /// Whether this context may act as the given role
    ///
    /// Admin passes every check; instructor passes instructor checks.
    pub fn can_act_as(&self, required: UserRole) -> bool {
        match required {
            UserRole::Student => true,
            UserRole::Instructor => {
                matches!(self.role, UserRole::Instructor | UserRole::Admin)
            }
            UserRole::Admin => self.role == UserRole::Admin,
        }
    }
}

/// Error type for authentication middleware
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Invalid authorization header format
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid token issuer".to_string()),
            _ => AuthError::InvalidToken(err.to_string()),
        }
    }
}

/// JWT authentication middleware
///
/// Validates the `Authorization: Bearer <token>` header and inserts an
/// `AuthContext` into request extensions on success.
///
/// # Errors
///
/// - `AuthError::MissingCredentials`: no authorization header
/// - `AuthError::InvalidFormat`: header is not a Bearer token
/// - `AuthError::InvalidToken`: signature, expiry, issuer or token-type check
///   failed
pub async fn jwt_auth_middleware(
    secret: &str,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_access_token(token, secret)?;

    req.extensions_mut().insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::TokenType;

    #[test]
    fn test_jwt_error_mapping() {
        let err: AuthError = JwtError::Expired.into();
        assert!(matches!(err, AuthError::InvalidToken(ref msg) if msg == "Token expired"));

        let err: AuthError = JwtError::InvalidIssuer.into();
        assert!(matches!(err, AuthError::InvalidToken(ref msg) if msg == "Invalid token issuer"));

        let err: AuthError = JwtError::ValidationError("bad signature".to_string()).into();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_from_claims() {
        let claims = Claims::new(Uuid::new_v4(), UserRole::Instructor, TokenType::Access);
        let ctx = AuthContext::from_claims(&claims);

        assert_eq!(ctx.user_id, claims.sub);
        assert_eq!(ctx.role, UserRole::Instructor);
    }

    #[test]
    fn test_role_hierarchy() {
        let student = AuthContext {
            user_id: Uuid::new_v4(),
            role: UserRole::Student,
        };
        let instructor = AuthContext {
            user_id: Uuid::new_v4(),
            role: UserRole::Instructor,
        };
        let admin = AuthContext {
            user_id: Uuid::new_v4(),
            role: UserRole::Admin,
        };

        assert!(student.can_act_as(UserRole::Student));
        assert!(!student.can_act_as(UserRole::Instructor));
        assert!(!student.can_act_as(UserRole::Admin));

        assert!(instructor.can_act_as(UserRole::Student));
        assert!(instructor.can_act_as(UserRole::Instructor));
        assert!(!instructor.can_act_as(UserRole::Admin));

        assert!(admin.can_act_as(UserRole::Instructor));
        assert!(admin.can_act_as(UserRole::Admin));
    }
}
