//! Dish writes with images against a mocked Postgres connection and a
//! throwaway upload dir.

use std::{path::Path, str::FromStr};

use axum::{
    body::{Body, Bytes, to_bytes},
    http::{Request, StatusCode, header},
};
use menu_digital_api::{
    app::build_router,
    config::AppConfig,
    dto::platos::PlatoFields,
    entity::{categoria, plato, sea_orm_active_enums::Rol},
    error::AppError,
    middleware::auth::AuthUser,
    services::{auth_service::issue_token, plato_service},
    state::AppState,
    storage::ImageUpload,
};
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use tempfile::TempDir;
use tower::ServiceExt;

const SECRET: &str = "platos-test-secret";
const BOUNDARY: &str = "menu-boundary";

fn state(db: DatabaseConnection, uploads: &Path) -> AppState {
    let config = AppConfig {
        database_url: "postgres://mock".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: SECRET.into(),
        jwt_expires_hours: 1,
        upload_dir: uploads.to_path_buf(),
    };
    AppState::new(db, config)
}

fn admin() -> AuthUser {
    AuthUser {
        user_id: 1,
        role: Rol::Admin,
    }
}

fn png() -> ImageUpload {
    ImageUpload {
        file_name: Some("flan.png".into()),
        content_type: Some("image/png".into()),
        data: Bytes::from_static(b"\x89PNG fake"),
    }
}

fn flan(imagen_url: Option<&str>) -> plato::Model {
    plato::Model {
        id_plato: 3,
        id_categoria: 1,
        nombre: "Flan".into(),
        descripcion: None,
        precio: Decimal::from_str("4.50").unwrap(),
        disponible: true,
        imagen_url: imagen_url.map(str::to_string),
    }
}

fn postres() -> categoria::Model {
    categoria::Model {
        id_categoria: 1,
        nombre: "Postres".into(),
        status: true,
    }
}

fn files_in(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn create_with_unknown_categoria_leaves_no_file_behind() {
    let uploads = TempDir::new().unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<categoria::Model>::new()])
        .into_connection();
    let state = state(db, uploads.path());
    let fields = PlatoFields {
        id_categoria: Some(99),
        nombre: Some("Flan".into()),
        precio: Some(Decimal::from_str("4.50").unwrap()),
        ..Default::default()
    };

    let err = plato_service::create_plato(&state, &admin(), fields, Some(png()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("Categoria 99")));
    assert!(files_in(uploads.path()).is_empty());
}

#[tokio::test]
async fn update_with_unknown_categoria_keeps_the_old_image_only() {
    let uploads = TempDir::new().unwrap();
    std::fs::write(uploads.path().join("plato-old.png"), b"old").unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![flan(Some("/uploads/plato-old.png"))]])
        .append_query_results([Vec::<categoria::Model>::new()])
        .into_connection();
    let state = state(db, uploads.path());
    let fields = PlatoFields {
        id_categoria: Some(99),
        ..Default::default()
    };

    let err = plato_service::update_plato(&state, &admin(), 3, fields, Some(png()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(files_in(uploads.path()), vec!["plato-old.png".to_string()]);
}

#[tokio::test]
async fn replacing_the_image_removes_the_old_file() {
    let uploads = TempDir::new().unwrap();
    std::fs::write(uploads.path().join("plato-old.png"), b"old").unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![flan(Some("/uploads/plato-old.png"))]])
        .append_query_results([vec![flan(Some("/uploads/plato-new.png"))]])
        .into_connection();
    let state = state(db, uploads.path());

    plato_service::update_plato(&state, &admin(), 3, PlatoFields::default(), Some(png()))
        .await
        .unwrap();

    let files = files_in(uploads.path());
    assert_eq!(files.len(), 1, "{files:?}");
    assert_ne!(files[0], "plato-old.png");
    assert!(files[0].starts_with("plato-") && files[0].ends_with(".png"));
}

fn multipart_body(image_type: &str) -> String {
    let text = |name: &str, value: &str| {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    };
    format!(
        "{}{}{}--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"imagen_plato\"; filename=\"flan.png\"\r\nContent-Type: {image_type}\r\n\r\nfake-image-bytes\r\n--{BOUNDARY}--\r\n",
        text("id_categoria", "1"),
        text("nombre", "Flan"),
        text("precio", "4.50"),
    )
}

fn upload_request(image_type: &str) -> Request<Body> {
    let token = issue_token(1, Rol::Admin, SECRET, 1).unwrap();
    Request::post("/api/platos")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(image_type)))
        .unwrap()
}

#[tokio::test]
async fn multipart_create_stores_the_uploaded_image() {
    let uploads = TempDir::new().unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![postres()]])
        .append_query_results([vec![flan(Some("/uploads/plato-stored.png"))]])
        .into_connection();
    let app = build_router(state(db, uploads.path()));

    let response = app.oneshot(upload_request("image/png")).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["nombre"], "Flan");

    let files = files_in(uploads.path());
    assert_eq!(files.len(), 1, "{files:?}");
    let stored = std::fs::read(uploads.path().join(&files[0])).unwrap();
    assert_eq!(stored, b"fake-image-bytes");
}

#[tokio::test]
async fn multipart_non_image_part_is_rejected_without_writing() {
    let uploads = TempDir::new().unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = build_router(state(db, uploads.path()));

    let response = app.oneshot(upload_request("text/plain")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(files_in(uploads.path()).is_empty());
}
