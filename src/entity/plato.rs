use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "plato")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_plato: i32,
    pub id_categoria: i32,
    pub nombre: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub descripcion: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub precio: Decimal,
    pub disponible: bool,
    pub imagen_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categoria::Entity",
        from = "Column::IdCategoria",
        to = "super::categoria::Column::IdCategoria"
    )]
    Categoria,
    #[sea_orm(has_many = "super::pedido_plato::Entity")]
    PedidoPlato,
}

impl Related<super::categoria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categoria.def()
    }
}

impl Related<super::pedido_plato::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PedidoPlato.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
