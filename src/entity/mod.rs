pub mod categoria;
pub mod empresa;
pub mod pedido;
pub mod pedido_plato;
pub mod plato;
pub mod sea_orm_active_enums;
pub mod usuario;

pub use categoria::Entity as Categorias;
pub use empresa::Entity as Empresas;
pub use pedido::Entity as Pedidos;
pub use pedido_plato::Entity as PedidoPlatos;
pub use plato::Entity as Platos;
pub use usuario::Entity as Usuarios;
