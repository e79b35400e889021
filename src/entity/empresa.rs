use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "empresa")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_empresa: i32,
    pub nombre: String,
    pub rif: String,
    #[sea_orm(column_type = "Text")]
    pub direccion: String,
    pub telefono: String,
    pub correo: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
