use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Plato;

/// Dish fields as received on create or update. Every field is optional so the
/// same shape serves partial updates; create checks the required ones.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct PlatoFields {
    pub id_categoria: Option<i32>,
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<String>)]
    pub descripcion: Option<Option<String>>,
    #[schema(value_type = Option<String>, example = "4.50")]
    pub precio: Option<Decimal>,
    pub disponible: Option<bool>,
}

/// Multipart form accepted by dish create/update (documentation only).
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct PlatoForm {
    pub id_categoria: Option<i32>,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    #[schema(value_type = Option<String>)]
    pub precio: Option<String>,
    pub disponible: Option<bool>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub imagen_plato: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoriaNombre {
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlatoDetalle {
    #[serde(flatten)]
    pub plato: Plato,
    pub categoria: Option<CategoriaNombre>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlatoList {
    pub items: Vec<PlatoDetalle>,
}
