use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use sea_orm::ActiveEnum;

use crate::{
    dto::auth::Claims, entity::sea_orm_active_enums::Rol, error::AppError, state::AppState,
};

const NO_TOKEN: &str = "No token provided";
const INVALID_TOKEN: &str = "Invalid token";

/// Identity decoded from a bearer token. Extracting it is the `protect` step:
/// handlers that take an `AuthUser` reject unauthenticated requests with 401.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub user_id: i32,
    pub role: Rol,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Rol::Admin
    }
}

/// Rejects with 403 unless the caller's role is one of `allowed`.
pub fn authorize(user: &AuthUser, allowed: &[Rol]) -> Result<(), AppError> {
    if !allowed.contains(&user.role) {
        return Err(AppError::Forbidden(format!(
            "Access denied: role '{}' is not allowed to perform this action",
            user.role.to_value()
        )));
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    authorize(user, &[Rol::Admin])
}

pub fn decode_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|err| {
        tracing::debug!(error = %err, "token rejected");
        AppError::Unauthorized(INVALID_TOKEN.into())
    })?;

    let user_id = decoded
        .claims
        .sub
        .parse::<i32>()
        .map_err(|_| AppError::Unauthorized(INVALID_TOKEN.into()))?;
    let role = Rol::try_from_value(&decoded.claims.role)
        .map_err(|_| AppError::Unauthorized(INVALID_TOKEN.into()))?;

    Ok(AuthUser { user_id, role })
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized(INVALID_TOKEN.into()))?;

    match auth_str.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(Some(token)),
        _ => Err(AppError::Unauthorized(NO_TOKEN.into())),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or_else(|| AppError::Unauthorized(NO_TOKEN.into()))?;
        decode_token(token, &state.config.jwt_secret)
    }
}

/// `Option<AuthUser>` for endpoints open to anonymous callers: no header means
/// anonymous, while a header carrying a bad token is still rejected.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => decode_token(token, &state.config.jwt_secret).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth_service::issue_token;

    const SECRET: &str = "test-secret-key-for-testing-only";

    fn cliente() -> AuthUser {
        AuthUser {
            user_id: 7,
            role: Rol::Cliente,
        }
    }

    #[test]
    fn issued_token_decodes_to_same_identity() {
        let token = issue_token(7, Rol::Cliente, SECRET, 1).unwrap();
        assert_eq!(decode_token(&token, SECRET).unwrap(), cliente());
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let token = issue_token(7, Rol::Admin, SECRET, 1).unwrap();
        let err = decode_token(&token, "another-secret").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(msg) if msg == INVALID_TOKEN));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let token = issue_token(7, Rol::Admin, SECRET, -2).unwrap();
        assert!(matches!(
            decode_token(&token, SECRET),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn garbage_is_unauthorized() {
        assert!(matches!(
            decode_token("not-a-jwt", SECRET),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn authorize_checks_role_membership() {
        let admin = AuthUser {
            user_id: 1,
            role: Rol::Admin,
        };
        assert!(ensure_admin(&admin).is_ok());
        assert!(matches!(ensure_admin(&cliente()), Err(AppError::Forbidden(_))));
        assert!(authorize(&cliente(), &[Rol::Admin, Rol::Cliente]).is_ok());
    }
}
