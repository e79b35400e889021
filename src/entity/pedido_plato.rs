use sea_orm::entity::prelude::*;

/// One order line. `precio` is the dish price captured when the order was
/// placed and never follows later changes to `plato.precio`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pedido_plato")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_pedido_plato: i32,
    pub id_pedido: i32,
    pub id_plato: i32,
    pub cantidad: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub precio: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pedido::Entity",
        from = "Column::IdPedido",
        to = "super::pedido::Column::IdPedido"
    )]
    Pedido,
    #[sea_orm(
        belongs_to = "super::plato::Entity",
        from = "Column::IdPlato",
        to = "super::plato::Column::IdPlato"
    )]
    Plato,
}

impl Related<super::pedido::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pedido.def()
    }
}

impl Related<super::plato::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plato.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
