use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveEnum, ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    dto::auth::{AuthResponse, Claims, LoginRequest, RegisterRequest},
    entity::{
        Usuarios,
        sea_orm_active_enums::Rol,
        usuario::{self, Column as UsuarioCol},
    },
    error::{AppError, AppResult},
    models::Usuario,
    response::{ApiResponse, Meta},
    services::usuario_service::{NewUsuario, insert_usuario},
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let RegisterRequest {
        nombre,
        email,
        telefono,
        clave,
        tipo,
    } = payload;

    let user = insert_usuario(
        state.db(),
        NewUsuario {
            nombre,
            email,
            telefono,
            clave,
            tipo: tipo.unwrap_or(Rol::Cliente),
        },
    )
    .await?;

    let token = issue_token(
        user.id_usuario,
        user.tipo,
        &state.config.jwt_secret,
        state.config.jwt_expires_hours,
    )?;
    tracing::info!(user_id = user.id_usuario, role = %user.tipo.to_value(), "user registered");

    Ok(ApiResponse::success(
        "User registered",
        AuthResponse {
            token,
            usuario: Usuario::from(user),
        },
        Some(Meta::empty()),
    ))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let LoginRequest { email, clave } = payload;
    let user = Usuarios::find()
        .filter(UsuarioCol::Email.eq(email.trim().to_lowercase()))
        .one(state.db())
        .await?;

    let user: usuario::Model = match user {
        Some(u) if u.status => u,
        _ => return Err(AppError::BadRequest(INVALID_CREDENTIALS.into())),
    };

    if !verify_password(&clave, &user.clave)? {
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    }

    let token = issue_token(
        user.id_usuario,
        user.tipo,
        &state.config.jwt_secret,
        state.config.jwt_expires_hours,
    )?;

    Ok(ApiResponse::success(
        "Logged in",
        AuthResponse {
            token,
            usuario: Usuario::from(user),
        },
        Some(Meta::empty()),
    ))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(user_id: i32, role: Rol, secret: &str, expires_hours: i64) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(expires_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_value(),
        exp: expiration.timestamp().max(0) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("s3creta").unwrap();
        assert_ne!(hash, "s3creta");
        assert!(verify_password("s3creta", &hash).unwrap());
        assert!(!verify_password("otra", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_internal_error() {
        assert!(matches!(
            verify_password("x", "plaintext"),
            Err(AppError::Internal(_))
        ));
    }
}
