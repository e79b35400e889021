use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Pedido, PedidoPlato};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LineaPedidoRequest {
    pub id_plato: i32,
    pub cantidad: i32,
}

/// `telefono_cliente` and `platos` are optional on the wire so that a missing
/// value is reported as a validation error rather than a parse failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreatePedidoRequest {
    pub nombre_cliente: Option<String>,
    pub telefono_cliente: Option<String>,
    pub platos: Option<Vec<LineaPedidoRequest>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PedidoCreado {
    pub pedido: Pedido,
    pub detalles: Vec<PedidoPlato>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePedidoRequest {
    pub estado: Option<String>,
    #[schema(value_type = Option<String>, example = "9.00")]
    pub total: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlatoResumen {
    pub nombre: String,
    #[schema(value_type = String)]
    pub precio: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LineaDetalle {
    #[serde(flatten)]
    pub linea: PedidoPlato,
    pub plato: Option<PlatoResumen>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UsuarioContacto {
    pub nombre: String,
    pub email: String,
    pub telefono: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PedidoDetalle {
    #[serde(flatten)]
    pub pedido: Pedido,
    pub lineas: Vec<LineaDetalle>,
    pub usuario: Option<UsuarioContacto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PedidoList {
    pub items: Vec<PedidoDetalle>,
}
