use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categoria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categoria::IdCategoria)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categoria::Nombre).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Categoria::Status)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Plato::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Plato::IdPlato)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Plato::IdCategoria).integer().not_null())
                    .col(ColumnDef::new(Plato::Nombre).string_len(100).not_null())
                    .col(ColumnDef::new(Plato::Descripcion).text().null())
                    .col(ColumnDef::new(Plato::Precio).decimal_len(10, 2).not_null())
                    .col(
                        ColumnDef::new(Plato::Disponible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Plato::ImagenUrl).string_len(255).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plato_categoria")
                            .from(Plato::Table, Plato::IdCategoria)
                            .to(Categoria::Table, Categoria::IdCategoria)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Empresa::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Empresa::IdEmpresa)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Empresa::Nombre).string_len(100).not_null())
                    .col(ColumnDef::new(Empresa::Rif).string_len(20).not_null())
                    .col(ColumnDef::new(Empresa::Direccion).text().not_null())
                    .col(ColumnDef::new(Empresa::Telefono).string_len(20).not_null())
                    .col(ColumnDef::new(Empresa::Correo).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Usuario::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuario::IdUsuario)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Usuario::Nombre).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Usuario::Email)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Usuario::Telefono).string_len(20).null())
                    .col(ColumnDef::new(Usuario::Clave).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Usuario::Tipo)
                            .string_len(20)
                            .not_null()
                            .default("cliente"),
                    )
                    .col(
                        ColumnDef::new(Usuario::Status)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pedido::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pedido::IdPedido)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pedido::IdUsuario).integer().null())
                    .col(ColumnDef::new(Pedido::NombreCliente).string_len(100).null())
                    .col(
                        ColumnDef::new(Pedido::TelefonoCliente)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pedido::Fecha)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Pedido::Estado)
                            .string_len(20)
                            .not_null()
                            .default("recibido"),
                    )
                    .col(ColumnDef::new(Pedido::Total).decimal_len(10, 2).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pedido_usuario")
                            .from(Pedido::Table, Pedido::IdUsuario)
                            .to(Usuario::Table, Usuario::IdUsuario)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PedidoPlato::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PedidoPlato::IdPedidoPlato)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PedidoPlato::IdPedido).integer().not_null())
                    .col(ColumnDef::new(PedidoPlato::IdPlato).integer().not_null())
                    .col(
                        ColumnDef::new(PedidoPlato::Cantidad)
                            .integer()
                            .not_null()
                            .default(1)
                            .check(Expr::col(PedidoPlato::Cantidad).gt(0)),
                    )
                    .col(
                        ColumnDef::new(PedidoPlato::Precio)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pedido_plato_pedido")
                            .from(PedidoPlato::Table, PedidoPlato::IdPedido)
                            .to(Pedido::Table, Pedido::IdPedido)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pedido_plato_plato")
                            .from(PedidoPlato::Table, PedidoPlato::IdPlato)
                            .to(Plato::Table, Plato::IdPlato)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pedido_plato_pedido")
                    .table(PedidoPlato::Table)
                    .col(PedidoPlato::IdPedido)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PedidoPlato::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pedido::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Usuario::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Empresa::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plato::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categoria::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Categoria {
    Table,
    IdCategoria,
    Nombre,
    Status,
}

#[derive(DeriveIden)]
enum Plato {
    Table,
    IdPlato,
    IdCategoria,
    Nombre,
    Descripcion,
    Precio,
    Disponible,
    ImagenUrl,
}

#[derive(DeriveIden)]
enum Empresa {
    Table,
    IdEmpresa,
    Nombre,
    Rif,
    Direccion,
    Telefono,
    Correo,
}

#[derive(DeriveIden)]
enum Usuario {
    Table,
    IdUsuario,
    Nombre,
    Email,
    Telefono,
    Clave,
    Tipo,
    Status,
}

#[derive(DeriveIden)]
enum Pedido {
    Table,
    IdPedido,
    IdUsuario,
    NombreCliente,
    TelefonoCliente,
    Fecha,
    Estado,
    Total,
}

#[derive(DeriveIden)]
enum PedidoPlato {
    Table,
    IdPedidoPlato,
    IdPedido,
    IdPlato,
    Cantidad,
    Precio,
}
