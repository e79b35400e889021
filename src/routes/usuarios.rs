use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::usuarios::{CreateUsuarioRequest, UpdateUsuarioRequest, UsuarioList},
    error::AppResult,
    extract::{AppJson, AppQuery},
    middleware::auth::AuthUser,
    models::Usuario,
    response::ApiResponse,
    routes::params::ListQuery,
    services::usuario_service as svc,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_usuarios).post(create_usuario))
        .route(
            "/{id}",
            get(get_usuario).put(update_usuario).delete(delete_usuario),
        )
        .route("/activate/{id}", put(activate_usuario))
}

#[utoipa::path(
    get,
    path = "/api/usuarios",
    params(ListQuery),
    responses(
        (status = 200, description = "List users", body = ApiResponse<UsuarioList>),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Usuarios"
)]
pub async fn list_usuarios(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<ListQuery>,
) -> AppResult<Json<ApiResponse<UsuarioList>>> {
    let resp = svc::list_usuarios(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/usuarios/{id}",
    params(("id" = i32, Path, description = "Usuario ID")),
    responses(
        (status = 200, description = "Get user", body = ApiResponse<Usuario>),
        (status = 404, description = "Usuario not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Usuarios"
)]
pub async fn get_usuario(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Usuario>>> {
    let resp = svc::get_usuario(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/usuarios",
    request_body = CreateUsuarioRequest,
    responses(
        (status = 201, description = "Create user", body = ApiResponse<Usuario>),
        (status = 409, description = "Email already registered")
    ),
    security(("bearer_auth" = [])),
    tag = "Usuarios"
)]
pub async fn create_usuario(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateUsuarioRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Usuario>>)> {
    let resp = svc::create_usuario(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/usuarios/{id}",
    params(("id" = i32, Path, description = "Usuario ID")),
    request_body = UpdateUsuarioRequest,
    responses(
        (status = 200, description = "Update user", body = ApiResponse<Usuario>),
        (status = 404, description = "Usuario not found"),
        (status = 409, description = "Email already registered")
    ),
    security(("bearer_auth" = [])),
    tag = "Usuarios"
)]
pub async fn update_usuario(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateUsuarioRequest>,
) -> AppResult<Json<ApiResponse<Usuario>>> {
    let resp = svc::update_usuario(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/usuarios/{id}",
    params(("id" = i32, Path, description = "Usuario ID")),
    responses(
        (status = 200, description = "Deactivate user", body = ApiResponse<Usuario>),
        (status = 404, description = "Usuario not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Usuarios"
)]
pub async fn delete_usuario(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Usuario>>> {
    let resp = svc::delete_usuario(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/usuarios/activate/{id}",
    params(("id" = i32, Path, description = "Usuario ID")),
    responses(
        (status = 200, description = "Reactivate user", body = ApiResponse<Usuario>),
        (status = 404, description = "Usuario not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Usuarios"
)]
pub async fn activate_usuario(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Usuario>>> {
    let resp = svc::activate_usuario(&state, &user, id).await?;
    Ok(Json(resp))
}
