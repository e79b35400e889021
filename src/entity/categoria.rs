use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categoria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_categoria: i32,
    pub nombre: String,
    pub status: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::plato::Entity")]
    Plato,
}

impl Related<super::plato::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plato.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
