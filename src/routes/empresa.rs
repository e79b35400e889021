use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::empresa::{CreateEmpresaRequest, UpdateEmpresaRequest},
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    models::Empresa,
    response::ApiResponse,
    services::empresa_service as svc,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_empresa).post(create_empresa))
        .route(
            "/{id}",
            get(get_empresa_by_id)
                .put(update_empresa)
                .delete(delete_empresa),
        )
}

#[utoipa::path(
    get,
    path = "/api/empresa",
    responses(
        (status = 200, description = "Company profile", body = ApiResponse<Empresa>),
        (status = 404, description = "No company profile yet")
    ),
    tag = "Empresa"
)]
pub async fn get_empresa(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Empresa>>> {
    let resp = svc::get_empresa(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/empresa/{id}",
    params(("id" = i32, Path, description = "Empresa ID")),
    responses(
        (status = 200, description = "Company profile", body = ApiResponse<Empresa>),
        (status = 404, description = "Empresa not found")
    ),
    tag = "Empresa"
)]
pub async fn get_empresa_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Empresa>>> {
    let resp = svc::get_empresa_by_id(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/empresa",
    request_body = CreateEmpresaRequest,
    responses(
        (status = 201, description = "Create company profile", body = ApiResponse<Empresa>),
        (status = 400, description = "Profile exists or field missing")
    ),
    security(("bearer_auth" = [])),
    tag = "Empresa"
)]
pub async fn create_empresa(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateEmpresaRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Empresa>>)> {
    let resp = svc::create_empresa(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/empresa/{id}",
    params(("id" = i32, Path, description = "Empresa ID")),
    request_body = UpdateEmpresaRequest,
    responses(
        (status = 200, description = "Update company profile", body = ApiResponse<Empresa>),
        (status = 404, description = "Empresa not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Empresa"
)]
pub async fn update_empresa(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateEmpresaRequest>,
) -> AppResult<Json<ApiResponse<Empresa>>> {
    let resp = svc::update_empresa(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/empresa/{id}",
    params(("id" = i32, Path, description = "Empresa ID")),
    responses(
        (status = 200, description = "Delete company profile", body = ApiResponse<Empresa>),
        (status = 404, description = "Empresa not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Empresa"
)]
pub async fn delete_empresa(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Empresa>>> {
    let resp = svc::delete_empresa(&state, &user, id).await?;
    Ok(Json(resp))
}
