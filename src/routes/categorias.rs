use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};

use crate::{
    dto::categorias::{CategoriaList, CreateCategoriaRequest, UpdateCategoriaRequest},
    error::AppResult,
    extract::{AppJson, AppQuery},
    middleware::auth::AuthUser,
    models::Categoria,
    response::ApiResponse,
    routes::params::ListQuery,
    services::categoria_service as svc,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categorias).post(create_categoria))
        .route(
            "/{id}",
            get(get_categoria)
                .put(update_categoria)
                .delete(delete_categoria),
        )
        .route("/{id}/activate", patch(activate_categoria))
}

#[utoipa::path(
    get,
    path = "/api/categorias",
    params(ListQuery),
    responses(
        (status = 200, description = "List active categories", body = ApiResponse<CategoriaList>),
        (status = 400, description = "Invalid sort_by")
    ),
    tag = "Categorias"
)]
pub async fn list_categorias(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> AppResult<Json<ApiResponse<CategoriaList>>> {
    let resp = svc::list_categorias(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/categorias/{id}",
    params(("id" = i32, Path, description = "Categoria ID")),
    responses(
        (status = 200, description = "Get category", body = ApiResponse<Categoria>),
        (status = 404, description = "Categoria not found")
    ),
    tag = "Categorias"
)]
pub async fn get_categoria(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Categoria>>> {
    let resp = svc::get_categoria(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/categorias",
    request_body = CreateCategoriaRequest,
    responses(
        (status = 201, description = "Create category", body = ApiResponse<Categoria>),
        (status = 400, description = "nombre missing"),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Categorias"
)]
pub async fn create_categoria(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateCategoriaRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Categoria>>)> {
    let resp = svc::create_categoria(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/categorias/{id}",
    params(("id" = i32, Path, description = "Categoria ID")),
    request_body = UpdateCategoriaRequest,
    responses(
        (status = 200, description = "Update category", body = ApiResponse<Categoria>),
        (status = 404, description = "Categoria not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Categorias"
)]
pub async fn update_categoria(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateCategoriaRequest>,
) -> AppResult<Json<ApiResponse<Categoria>>> {
    let resp = svc::update_categoria(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/categorias/{id}",
    params(("id" = i32, Path, description = "Categoria ID")),
    responses(
        (status = 200, description = "Deactivate category", body = ApiResponse<Categoria>),
        (status = 404, description = "Categoria not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Categorias"
)]
pub async fn delete_categoria(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Categoria>>> {
    let resp = svc::delete_categoria(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/categorias/{id}/activate",
    params(("id" = i32, Path, description = "Categoria ID")),
    responses(
        (status = 200, description = "Reactivate category", body = ApiResponse<Categoria>),
        (status = 404, description = "Categoria not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Categorias"
)]
pub async fn activate_categoria(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Categoria>>> {
    let resp = svc::activate_categoria(&state, &user, id).await?;
    Ok(Json(resp))
}
