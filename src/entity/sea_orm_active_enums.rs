use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "cliente")]
    Cliente,
}

/// Order lifecycle. Any state may be set from any other; there is no
/// transition graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum EstadoPedido {
    #[sea_orm(string_value = "recibido")]
    Recibido,
    #[sea_orm(string_value = "preparando")]
    Preparando,
    #[sea_orm(string_value = "listo")]
    Listo,
    #[sea_orm(string_value = "entregado")]
    Entregado,
    #[sea_orm(string_value = "cancelado")]
    Cancelado,
}
