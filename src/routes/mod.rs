use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod categorias;
pub mod doc;
pub mod empresa;
pub mod health;
pub mod params;
pub mod pedidos;
pub mod platos;
pub mod usuarios;

/// Every `/api` route, still waiting for `AppState` to be bound.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categorias", categorias::router())
        .nest("/platos", platos::router())
        .nest("/empresa", empresa::router())
        .nest("/usuarios", usuarios::router())
        .nest("/pedidos", pedidos::router())
}
