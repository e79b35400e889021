use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, Set,
};

use crate::{
    dto::categorias::{CategoriaList, CreateCategoriaRequest, UpdateCategoriaRequest},
    entity::{
        Categorias,
        categoria::{ActiveModel, Column, Model as CategoriaModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Categoria,
    query::QueryOptions,
    response::{ApiResponse, Meta},
    routes::params::ListQuery,
    services::require_text,
    state::AppState,
};

const SEARCHABLE: &[Column] = &[Column::Nombre];
const SORTABLE: &[(&str, Column)] = &[
    ("id_categoria", Column::IdCategoria),
    ("nombre", Column::Nombre),
];

pub async fn list_categorias(
    state: &AppState,
    query: ListQuery,
) -> AppResult<ApiResponse<CategoriaList>> {
    let options = QueryOptions::build(&query, SEARCHABLE, SORTABLE)?
        .filter(Column::Status.eq(query.status.unwrap_or(true)))
        .default_sort(Column::IdCategoria, Order::Asc);

    let finder = options.apply(Categorias::find());
    let total = finder.clone().count(state.db()).await?;
    let items = options
        .page
        .apply(finder)
        .all(state.db())
        .await?
        .into_iter()
        .map(Categoria::from)
        .collect();

    Ok(ApiResponse::success(
        "Categorias",
        CategoriaList { items },
        Some(options.page.meta(total)),
    ))
}

pub async fn get_categoria(state: &AppState, id: i32) -> AppResult<ApiResponse<Categoria>> {
    let categoria = Categorias::find_by_id(id)
        .filter(Column::Status.eq(true))
        .one(state.db())
        .await?;
    let categoria = match categoria {
        Some(c) => c,
        None => return Err(AppError::NotFound("Categoria")),
    };
    Ok(ApiResponse::success("Categoria", categoria.into(), None))
}

pub async fn create_categoria(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCategoriaRequest,
) -> AppResult<ApiResponse<Categoria>> {
    ensure_admin(user)?;
    let active = ActiveModel {
        nombre: Set(require_text("nombre", payload.nombre)?),
        status: Set(true),
        ..Default::default()
    };
    let categoria = active.insert(state.db()).await?;

    Ok(ApiResponse::success(
        "Categoria created",
        categoria.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_categoria(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateCategoriaRequest,
) -> AppResult<ApiResponse<Categoria>> {
    ensure_admin(user)?;
    let existing = find_any(state, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(nombre) = payload.nombre {
        active.nombre = Set(require_text("nombre", nombre)?);
    }
    let categoria = active.update(state.db()).await?;

    Ok(ApiResponse::success(
        "Categoria updated",
        categoria.into(),
        Some(Meta::empty()),
    ))
}

/// Soft delete: the row stays, with `status = false`.
pub async fn delete_categoria(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Categoria>> {
    ensure_admin(user)?;
    let categoria = set_status(state, id, false).await?;
    Ok(ApiResponse::success(
        "Categoria deleted",
        categoria,
        Some(Meta::empty()),
    ))
}

pub async fn activate_categoria(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Categoria>> {
    ensure_admin(user)?;
    let categoria = set_status(state, id, true).await?;
    Ok(ApiResponse::success(
        "Categoria reactivated",
        categoria,
        Some(Meta::empty()),
    ))
}

async fn find_any(state: &AppState, id: i32) -> AppResult<CategoriaModel> {
    Categorias::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound("Categoria"))
}

async fn set_status(state: &AppState, id: i32, status: bool) -> AppResult<Categoria> {
    let mut active: ActiveModel = find_any(state, id).await?.into();
    active.status = Set(status);
    Ok(active.update(state.db()).await?.into())
}
