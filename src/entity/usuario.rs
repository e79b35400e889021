use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::Rol;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "usuario")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_usuario: i32,
    pub nombre: String,
    #[sea_orm(unique)]
    pub email: String,
    pub telefono: Option<String>,
    pub clave: String,
    pub tipo: Rol,
    pub status: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pedido::Entity")]
    Pedido,
}

impl Related<super::pedido::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pedido.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
