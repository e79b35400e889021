use std::str::FromStr;

use menu_digital_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        Categorias, Empresas, Platos, Usuarios, categoria, empresa, plato,
        sea_orm_active_enums::Rol, usuario,
    },
    services::auth_service::hash_password,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

const MENU: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "Entradas",
        &[
            ("Tequeños", "Palitos de queso envueltos en masa", "6.00"),
            ("Ensalada César", "Lechuga, crutones y aderezo de la casa", "7.50"),
        ],
    ),
    (
        "Platos fuertes",
        &[
            ("Pabellón criollo", "Carne mechada, caraotas, arroz y tajadas", "12.00"),
            ("Pasta carbonara", "Tocineta, huevo y queso parmesano", "10.50"),
        ],
    ),
    (
        "Postres",
        &[
            ("Flan", "Flan de caramelo", "4.50"),
            ("Quesillo", "Postre tradicional", "4.00"),
        ],
    ),
    (
        "Bebidas",
        &[
            ("Papelón con limón", "Bebida natural", "2.50"),
            ("Café", "Guayoyo o marrón", "1.50"),
        ],
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&orm, "Administrador", "admin@example.com", "admin123", Rol::Admin).await?;
    let cliente_id = ensure_user(&orm, "Cliente Demo", "cliente@example.com", "cliente123", Rol::Cliente).await?;
    ensure_empresa(&orm).await?;
    let dishes = seed_menu(&orm).await?;

    println!(
        "Seed completed. Admin ID: {admin_id}, Cliente ID: {cliente_id}, dishes added: {dishes}"
    );
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    nombre: &str,
    email: &str,
    clave: &str,
    tipo: Rol,
) -> anyhow::Result<i32> {
    if let Some(existing) = Usuarios::find()
        .filter(usuario::Column::Email.eq(email))
        .one(orm)
        .await?
    {
        return Ok(existing.id_usuario);
    }

    let clave = hash_password(clave).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let created = usuario::ActiveModel {
        nombre: Set(nombre.to_string()),
        email: Set(email.to_string()),
        telefono: Set(None),
        clave: Set(clave),
        tipo: Set(tipo),
        status: Set(true),
        ..Default::default()
    }
    .insert(orm)
    .await?;
    Ok(created.id_usuario)
}

async fn ensure_empresa(orm: &DatabaseConnection) -> anyhow::Result<()> {
    if Empresas::find().count(orm).await? > 0 {
        return Ok(());
    }
    empresa::ActiveModel {
        nombre: Set("Restaurante Demo".to_string()),
        rif: Set("J-12345678-9".to_string()),
        direccion: Set("Av. Principal, Local 1".to_string()),
        telefono: Set("+58 212 555 0000".to_string()),
        correo: Set("contacto@example.com".to_string()),
        ..Default::default()
    }
    .insert(orm)
    .await?;
    Ok(())
}

/// Creates missing categories and dishes, matching by name. Returns how many
/// dishes were added.
async fn seed_menu(orm: &DatabaseConnection) -> anyhow::Result<usize> {
    let mut added = 0;
    for (nombre_categoria, platos) in MENU {
        let categoria = match Categorias::find()
            .filter(categoria::Column::Nombre.eq(*nombre_categoria))
            .one(orm)
            .await?
        {
            Some(c) => c,
            None => {
                categoria::ActiveModel {
                    nombre: Set(nombre_categoria.to_string()),
                    status: Set(true),
                    ..Default::default()
                }
                .insert(orm)
                .await?
            }
        };

        for (nombre, descripcion, precio) in *platos {
            let exists = Platos::find()
                .filter(plato::Column::Nombre.eq(*nombre))
                .one(orm)
                .await?
                .is_some();
            if exists {
                continue;
            }
            plato::ActiveModel {
                id_categoria: Set(categoria.id_categoria),
                nombre: Set(nombre.to_string()),
                descripcion: Set(Some(descripcion.to_string())),
                precio: Set(Decimal::from_str(precio)?),
                disponible: Set(true),
                imagen_url: Set(None),
                ..Default::default()
            }
            .insert(orm)
            .await?;
            added += 1;
        }
    }
    Ok(added)
}
