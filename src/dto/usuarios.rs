use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{entity::sea_orm_active_enums::Rol, models::Usuario};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUsuarioRequest {
    pub nombre: String,
    pub email: String,
    pub telefono: Option<String>,
    pub clave: String,
    pub tipo: Option<Rol>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUsuarioRequest {
    pub nombre: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<String>)]
    pub telefono: Option<Option<String>>,
    pub clave: Option<String>,
    pub tipo: Option<Rol>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsuarioList {
    pub items: Vec<Usuario>,
}
