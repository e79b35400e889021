use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, Set,
};

use crate::{
    dto::platos::{CategoriaNombre, PlatoDetalle, PlatoFields, PlatoList},
    entity::{
        Categorias, PedidoPlatos, Platos, categoria, pedido_plato,
        plato::{ActiveModel, Column, Model as PlatoModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Plato,
    query::QueryOptions,
    response::{ApiResponse, Meta},
    routes::params::ListQuery,
    services::require_text,
    state::AppState,
    storage::ImageUpload,
};

const SEARCHABLE: &[Column] = &[Column::Nombre, Column::Descripcion];
const SORTABLE: &[(&str, Column)] = &[
    ("id_plato", Column::IdPlato),
    ("nombre", Column::Nombre),
    ("precio", Column::Precio),
];

pub async fn list_platos(state: &AppState, query: ListQuery) -> AppResult<ApiResponse<PlatoList>> {
    let mut options = QueryOptions::build(&query, SEARCHABLE, SORTABLE)?
        .default_sort(Column::IdPlato, Order::Asc);
    if let Some(id_categoria) = query.categoria_id {
        options = options.filter(Column::IdCategoria.eq(id_categoria));
    }
    if let Some(disponible) = query.disponible {
        options = options.filter(Column::Disponible.eq(disponible));
    }

    let finder = options.apply(Platos::find());
    let total = finder.clone().count(state.db()).await?;
    let items = options
        .page
        .apply(finder.find_also_related(Categorias))
        .all(state.db())
        .await?
        .into_iter()
        .map(|(plato, categoria)| detalle(plato, categoria))
        .collect();

    Ok(ApiResponse::success(
        "Platos",
        PlatoList { items },
        Some(options.page.meta(total)),
    ))
}

pub async fn get_plato(state: &AppState, id: i32) -> AppResult<ApiResponse<PlatoDetalle>> {
    let found = Platos::find_by_id(id)
        .find_also_related(Categorias)
        .one(state.db())
        .await?;
    let (plato, categoria) = match found {
        Some(row) => row,
        None => return Err(AppError::NotFound("Plato")),
    };
    Ok(ApiResponse::success("Plato", detalle(plato, categoria), None))
}

/// Stores the image first, then the row. The new file is removed again if
/// the row cannot be written.
pub async fn create_plato(
    state: &AppState,
    user: &AuthUser,
    fields: PlatoFields,
    image: Option<ImageUpload>,
) -> AppResult<ApiResponse<Plato>> {
    ensure_admin(user)?;
    let imagen_url = match &image {
        Some(upload) => Some(state.images.save(upload).await?),
        None => None,
    };

    let result = insert_plato(state, fields, imagen_url.clone()).await;
    if result.is_err() {
        if let Some(reference) = &imagen_url {
            state.images.remove(reference).await;
        }
    }
    let plato = result?;
    tracing::info!(id_plato = plato.id_plato, "plato created");

    Ok(ApiResponse::success(
        "Plato created",
        plato.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_plato(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    fields: PlatoFields,
    image: Option<ImageUpload>,
) -> AppResult<ApiResponse<Plato>> {
    ensure_admin(user)?;
    let imagen_url = match &image {
        Some(upload) => Some(state.images.save(upload).await?),
        None => None,
    };

    let result = save_changes(state, id, fields, imagen_url.clone()).await;
    let (plato, replaced) = match result {
        Ok(saved) => saved,
        Err(err) => {
            if let Some(reference) = &imagen_url {
                state.images.remove(reference).await;
            }
            return Err(err);
        }
    };
    if let Some(old) = replaced {
        state.images.remove(&old).await;
    }

    Ok(ApiResponse::success(
        "Plato updated",
        plato.into(),
        Some(Meta::empty()),
    ))
}

/// Hard delete. Dishes that appear on any order line are kept.
pub async fn delete_plato(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Plato>> {
    ensure_admin(user)?;
    let existing = Platos::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound("Plato"))?;

    let referenced = PedidoPlatos::find()
        .filter(pedido_plato::Column::IdPlato.eq(id))
        .count(state.db())
        .await?;
    if referenced > 0 {
        return Err(AppError::Conflict(
            "Plato is referenced by existing orders".into(),
        ));
    }

    Platos::delete_by_id(id).exec(state.db()).await?;
    if let Some(reference) = &existing.imagen_url {
        state.images.remove(reference).await;
    }

    Ok(ApiResponse::success(
        "Plato deleted",
        existing.into(),
        Some(Meta::empty()),
    ))
}

async fn insert_plato(
    state: &AppState,
    fields: PlatoFields,
    imagen_url: Option<String>,
) -> AppResult<PlatoModel> {
    let Some(id_categoria) = fields.id_categoria else {
        return Err(AppError::BadRequest("id_categoria is required".into()));
    };
    if fields.nombre.is_none() {
        return Err(AppError::BadRequest("nombre is required".into()));
    }
    if fields.precio.is_none() {
        return Err(AppError::BadRequest("precio is required".into()));
    }
    ensure_categoria(state, id_categoria).await?;

    let mut active = ActiveModel {
        disponible: Set(true),
        descripcion: Set(None),
        imagen_url: Set(imagen_url),
        ..Default::default()
    };
    apply_fields(&mut active, fields)?;
    Ok(active.insert(state.db()).await?)
}

/// Returns the saved row and the image reference it replaced, if any.
async fn save_changes(
    state: &AppState,
    id: i32,
    fields: PlatoFields,
    imagen_url: Option<String>,
) -> AppResult<(PlatoModel, Option<String>)> {
    let existing = Platos::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound("Plato"))?;
    if let Some(id_categoria) = fields.id_categoria {
        ensure_categoria(state, id_categoria).await?;
    }

    let previous = existing.imagen_url.clone();
    let mut active: ActiveModel = existing.into();
    apply_fields(&mut active, fields)?;

    let replaced = match imagen_url {
        Some(reference) => {
            active.imagen_url = Set(Some(reference));
            previous
        }
        None => None,
    };

    let plato = active.update(state.db()).await?;
    Ok((plato, replaced))
}

/// Copies every present field onto the active model, validating as it goes.
fn apply_fields(active: &mut ActiveModel, fields: PlatoFields) -> AppResult<()> {
    if let Some(id_categoria) = fields.id_categoria {
        active.id_categoria = Set(id_categoria);
    }
    if let Some(nombre) = fields.nombre {
        active.nombre = Set(require_text("nombre", nombre)?);
    }
    if let Some(descripcion) = fields.descripcion {
        active.descripcion = Set(descripcion);
    }
    if let Some(precio) = fields.precio {
        if precio < Decimal::ZERO {
            return Err(AppError::BadRequest("precio must be zero or greater".into()));
        }
        active.precio = Set(precio.round_dp(2));
    }
    if let Some(disponible) = fields.disponible {
        active.disponible = Set(disponible);
    }
    Ok(())
}

async fn ensure_categoria(state: &AppState, id: i32) -> AppResult<()> {
    let exists = Categorias::find_by_id(id).one(state.db()).await?.is_some();
    if !exists {
        return Err(AppError::BadRequest(format!("Categoria {id} does not exist")));
    }
    Ok(())
}

fn detalle(plato: PlatoModel, categoria: Option<categoria::Model>) -> PlatoDetalle {
    PlatoDetalle {
        plato: plato.into(),
        categoria: categoria.map(|c| CategoriaNombre { nombre: c.nombre }),
    }
}
