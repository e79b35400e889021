use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{
    categoria, empresa, pedido, pedido_plato, plato,
    sea_orm_active_enums::{EstadoPedido, Rol},
    usuario,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Categoria {
    pub id_categoria: i32,
    pub nombre: String,
    pub status: bool,
}

impl From<categoria::Model> for Categoria {
    fn from(model: categoria::Model) -> Self {
        Self {
            id_categoria: model.id_categoria,
            nombre: model.nombre,
            status: model.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Plato {
    pub id_plato: i32,
    pub id_categoria: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    #[schema(value_type = String, example = "4.50")]
    pub precio: Decimal,
    pub disponible: bool,
    pub imagen_url: Option<String>,
}

impl From<plato::Model> for Plato {
    fn from(model: plato::Model) -> Self {
        Self {
            id_plato: model.id_plato,
            id_categoria: model.id_categoria,
            nombre: model.nombre,
            descripcion: model.descripcion,
            precio: model.precio,
            disponible: model.disponible,
            imagen_url: model.imagen_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Empresa {
    pub id_empresa: i32,
    pub nombre: String,
    pub rif: String,
    pub direccion: String,
    pub telefono: String,
    pub correo: String,
}

impl From<empresa::Model> for Empresa {
    fn from(model: empresa::Model) -> Self {
        Self {
            id_empresa: model.id_empresa,
            nombre: model.nombre,
            rif: model.rif,
            direccion: model.direccion,
            telefono: model.telefono,
            correo: model.correo,
        }
    }
}

/// Public view of an account; the password hash is never exposed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Usuario {
    pub id_usuario: i32,
    pub nombre: String,
    pub email: String,
    pub telefono: Option<String>,
    pub tipo: Rol,
    pub status: bool,
}

impl From<usuario::Model> for Usuario {
    fn from(model: usuario::Model) -> Self {
        Self {
            id_usuario: model.id_usuario,
            nombre: model.nombre,
            email: model.email,
            telefono: model.telefono,
            tipo: model.tipo,
            status: model.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Pedido {
    pub id_pedido: i32,
    pub id_usuario: Option<i32>,
    pub nombre_cliente: Option<String>,
    pub telefono_cliente: String,
    pub fecha: DateTime<Utc>,
    pub estado: EstadoPedido,
    #[schema(value_type = String, example = "9.00")]
    pub total: Decimal,
}

impl From<pedido::Model> for Pedido {
    fn from(model: pedido::Model) -> Self {
        Self {
            id_pedido: model.id_pedido,
            id_usuario: model.id_usuario,
            nombre_cliente: model.nombre_cliente,
            telefono_cliente: model.telefono_cliente,
            fecha: model.fecha.with_timezone(&Utc),
            estado: model.estado,
            total: model.total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PedidoPlato {
    pub id_pedido_plato: i32,
    pub id_pedido: i32,
    pub id_plato: i32,
    pub cantidad: i32,
    #[schema(value_type = String, example = "4.50")]
    pub precio: Decimal,
}

impl From<pedido_plato::Model> for PedidoPlato {
    fn from(model: pedido_plato::Model) -> Self {
        Self {
            id_pedido_plato: model.id_pedido_plato,
            id_pedido: model.id_pedido,
            id_plato: model.id_plato,
            cantidad: model.cantidad,
            precio: model.precio,
        }
    }
}
