use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Categoria;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoriaRequest {
    pub nombre: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCategoriaRequest {
    pub nombre: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriaList {
    pub items: Vec<Categoria>,
}
