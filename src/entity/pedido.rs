use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::EstadoPedido;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pedido")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_pedido: i32,
    pub id_usuario: Option<i32>,
    pub nombre_cliente: Option<String>,
    pub telefono_cliente: String,
    pub fecha: DateTimeWithTimeZone,
    pub estado: EstadoPedido,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::IdUsuario",
        to = "super::usuario::Column::IdUsuario"
    )]
    Usuario,
    #[sea_orm(has_many = "super::pedido_plato::Entity")]
    PedidoPlato,
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Usuario.def()
    }
}

impl Related<super::pedido_plato::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PedidoPlato.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
