use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmpresaRequest {
    pub nombre: String,
    pub rif: String,
    pub direccion: String,
    pub telefono: String,
    pub correo: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEmpresaRequest {
    pub nombre: Option<String>,
    pub rif: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
}
