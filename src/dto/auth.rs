use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{entity::sea_orm_active_enums::Rol, models::Usuario};

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub nombre: String,
    pub email: String,
    pub telefono: Option<String>,
    pub clave: String,
    /// Role of the new account, `cliente` when absent. Registration is public,
    /// so any caller can create an `admin` account through this field. Deploy
    /// behind a gateway or remove it once the first admin exists.
    pub tipo: Option<Rol>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub clave: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub usuario: Usuario,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}
