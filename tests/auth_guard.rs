//! Router-level checks that are decided before any query runs, so the
//! database is left disconnected.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use menu_digital_api::{
    app::build_router, config::AppConfig, entity::sea_orm_active_enums::Rol,
    services::auth_service::issue_token, state::AppState,
};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

const SECRET: &str = "router-test-secret";

fn app() -> Router {
    let config = AppConfig {
        database_url: "postgres://unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: SECRET.into(),
        jwt_expires_hours: 1,
        upload_dir: std::env::temp_dir(),
    };
    build_router(AppState::new(DatabaseConnection::Disconnected, config))
}

fn bearer(role: Rol) -> String {
    format!("Bearer {}", issue_token(7, role, SECRET, 1).unwrap())
}

async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (status, body) = send(Request::get("/api/usuarios").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token provided");
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let request = Request::get("/api/pedidos/1")
        .header(header::AUTHORIZATION, "Basic YWRtaW46YWRtaW4=")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token provided");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let request = Request::delete("/api/categorias/1")
        .header(header::AUTHORIZATION, "Bearer not.a.jwt")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn cliente_cannot_use_admin_routes() {
    let request = Request::get("/api/usuarios")
        .header(header::AUTHORIZATION, bearer(Rol::Cliente))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let request = Request::post("/api/categorias")
        .header(header::AUTHORIZATION, bearer(Rol::Cliente))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"nombre":"Postres"}"#))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["message"].as_str().unwrap().contains("cliente"));
}

#[tokio::test]
async fn order_with_bad_optional_token_is_rejected() {
    let request = Request::post("/api/pedidos")
        .header(header::AUTHORIZATION, "Bearer tampered")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"telefono_cliente":"0414","platos":[{"id_plato":1,"cantidad":1}]}"#,
        ))
        .unwrap();
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn anonymous_order_without_lines_is_bad_request() {
    let request = Request::post("/api/pedidos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"telefono_cliente":"0414","platos":[]}"#))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["error"], "platos must contain at least one line");
}

#[tokio::test]
async fn unknown_sort_field_is_bad_request() {
    let request = Request::get("/api/platos?sort_by=clave:desc")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn post_json(uri: &str) -> axum::http::request::Builder {
    Request::post(uri).header(header::CONTENT_TYPE, "application/json")
}

#[tokio::test]
async fn order_line_without_cantidad_is_bad_request() {
    let request = post_json("/api/pedidos")
        .body(Body::from(
            r#"{"telefono_cliente":"1","platos":[{"id_plato":1}]}"#,
        ))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["error"].as_str().unwrap().contains("cantidad"));
}

#[tokio::test]
async fn empty_category_body_is_bad_request() {
    let request = post_json("/api/categorias")
        .header(header::AUTHORIZATION, bearer(Rol::Admin))
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["error"].as_str().unwrap().contains("nombre"));
}

#[tokio::test]
async fn incomplete_registration_is_bad_request() {
    let request = post_json("/api/auth/register")
        .body(Body::from(r#"{"email":"a@b.c"}"#))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn login_without_json_content_type_is_bad_request() {
    let request = Request::post("/api/auth/login")
        .body(Body::from(r#"{"email":"a@b.c","clave":"x"}"#))
        .unwrap();
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_query_string_is_bad_request() {
    let request = Request::get("/api/platos?limit=muchos")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["error"].is_string());
}

#[tokio::test]
async fn offset_beyond_bigint_is_bad_request() {
    let request = Request::get("/api/platos?limit=1&offset=18446744073709551615")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
