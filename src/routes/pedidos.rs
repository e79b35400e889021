use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::pedidos::{CreatePedidoRequest, PedidoCreado, PedidoDetalle, PedidoList, UpdatePedidoRequest},
    error::AppResult,
    extract::{AppJson, AppQuery},
    middleware::auth::AuthUser,
    models::Pedido,
    response::ApiResponse,
    routes::params::ListQuery,
    services::pedido_service as svc,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pedidos).post(create_pedido))
        .route(
            "/{id}",
            get(get_pedido).put(update_pedido).delete(delete_pedido),
        )
}

#[utoipa::path(
    post,
    path = "/api/pedidos",
    request_body = CreatePedidoRequest,
    responses(
        (status = 201, description = "Place order", body = ApiResponse<PedidoCreado>),
        (status = 400, description = "Invalid order lines"),
        (status = 401, description = "Invalid token")
    ),
    security((), ("bearer_auth" = [])),
    tag = "Pedidos"
)]
pub async fn create_pedido(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    AppJson(payload): AppJson<CreatePedidoRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PedidoCreado>>)> {
    let resp = svc::create_pedido(&state, user.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/pedidos",
    params(ListQuery),
    responses(
        (status = 200, description = "List orders with lines", body = ApiResponse<PedidoList>),
        (status = 403, description = "Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Pedidos"
)]
pub async fn list_pedidos(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<ListQuery>,
) -> AppResult<Json<ApiResponse<PedidoList>>> {
    let resp = svc::list_pedidos(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/pedidos/{id}",
    params(("id" = i32, Path, description = "Pedido ID")),
    responses(
        (status = 200, description = "Get order", body = ApiResponse<PedidoDetalle>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Pedido not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Pedidos"
)]
pub async fn get_pedido(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<PedidoDetalle>>> {
    let resp = svc::get_pedido(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/pedidos/{id}",
    params(("id" = i32, Path, description = "Pedido ID")),
    request_body = UpdatePedidoRequest,
    responses(
        (status = 200, description = "Update order", body = ApiResponse<Pedido>),
        (status = 400, description = "Invalid estado or total"),
        (status = 404, description = "Pedido not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Pedidos"
)]
pub async fn update_pedido(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdatePedidoRequest>,
) -> AppResult<Json<ApiResponse<Pedido>>> {
    let resp = svc::update_pedido(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/pedidos/{id}",
    params(("id" = i32, Path, description = "Pedido ID")),
    responses(
        (status = 200, description = "Delete order and its lines", body = ApiResponse<Pedido>),
        (status = 404, description = "Pedido not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Pedidos"
)]
pub async fn delete_pedido(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Pedido>>> {
    let resp = svc::delete_pedido(&state, &user, id).await?;
    Ok(Json(resp))
}
