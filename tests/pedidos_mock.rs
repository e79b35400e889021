//! Order placement and visibility against a mocked Postgres connection.

use std::{str::FromStr, sync::Arc};

use chrono::{FixedOffset, TimeZone};
use menu_digital_api::{
    config::AppConfig,
    dto::pedidos::{CreatePedidoRequest, LineaPedidoRequest},
    entity::{
        pedido, pedido_plato, plato,
        sea_orm_active_enums::{EstadoPedido, Rol},
        usuario,
    },
    error::AppError,
    middleware::auth::AuthUser,
    services::pedido_service,
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Transaction};

fn state(db: DatabaseConnection) -> AppState {
    let config = AppConfig {
        database_url: "postgres://mock".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "mock-secret".into(),
        jwt_expires_hours: 1,
        upload_dir: std::env::temp_dir(),
    };
    AppState::new(db, config)
}

fn transaction_log(state: AppState) -> Vec<Transaction> {
    Arc::try_unwrap(state.orm)
        .ok()
        .expect("state still shared")
        .into_transaction_log()
}

fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).unwrap()
}

fn flan(disponible: bool) -> plato::Model {
    plato::Model {
        id_plato: 1,
        id_categoria: 1,
        nombre: "Flan".into(),
        descripcion: None,
        precio: dec("4.50"),
        disponible,
        imagen_url: None,
    }
}

fn pedido_row(id_usuario: Option<i32>) -> pedido::Model {
    pedido::Model {
        id_pedido: 10,
        id_usuario,
        nombre_cliente: Some("Ana".into()),
        telefono_cliente: "04141234567".into(),
        fecha: FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .unwrap(),
        estado: EstadoPedido::Recibido,
        total: dec("9.00"),
    }
}

fn two_flans() -> CreatePedidoRequest {
    CreatePedidoRequest {
        nombre_cliente: Some("Ana".into()),
        telefono_cliente: Some("04141234567".into()),
        platos: Some(vec![LineaPedidoRequest {
            id_plato: 1,
            cantidad: 2,
        }]),
    }
}

#[tokio::test]
async fn unavailable_dish_aborts_before_any_insert() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![flan(false)]])
        .into_connection();
    let state = state(db);

    let err = pedido_service::create_pedido(&state, None, two_flans())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("Plato 1")));

    let log = format!("{:?}", transaction_log(state));
    assert!(!log.contains("INSERT"), "{log}");
}

#[tokio::test]
async fn bad_second_line_stops_the_order_before_later_lookups() {
    let agotado = plato::Model {
        id_plato: 2,
        nombre: "Tres leches".into(),
        ..flan(false)
    };
    // Only two lookups are queued: a third would surface as a DbErr.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![flan(true)]])
        .append_query_results([vec![agotado]])
        .into_connection();
    let state = state(db);
    let payload = CreatePedidoRequest {
        platos: Some(
            [(1, 1), (2, 1), (3, 1)]
                .into_iter()
                .map(|(id_plato, cantidad)| LineaPedidoRequest { id_plato, cantidad })
                .collect(),
        ),
        ..two_flans()
    };

    let err = pedido_service::create_pedido(&state, None, payload)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("Plato 2")));

    let log = format!("{:?}", transaction_log(state));
    assert!(!log.contains("INSERT"), "{log}");
    assert_eq!(log.matches(r#"FROM \"plato\""#).count(), 2, "{log}");
}

#[tokio::test]
async fn missing_phone_is_rejected_without_touching_the_database() {
    let state = state(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let payload = CreatePedidoRequest {
        telefono_cliente: Some("   ".into()),
        ..two_flans()
    };

    let err = pedido_service::create_pedido(&state, None, payload)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(transaction_log(state).is_empty());
}

#[tokio::test]
async fn order_snapshots_price_and_totals_lines() {
    let linea = pedido_plato::Model {
        id_pedido_plato: 100,
        id_pedido: 10,
        id_plato: 1,
        cantidad: 2,
        precio: dec("4.50"),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![flan(true)]])
        .append_query_results([vec![pedido_row(None)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![linea]])
        .into_connection();
    let state = state(db);

    let resp = pedido_service::create_pedido(&state, None, two_flans())
        .await
        .unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data.pedido.total, dec("9.00"));
    assert_eq!(data.pedido.estado, EstadoPedido::Recibido);
    assert_eq!(data.detalles.len(), 1);
    assert_eq!(data.detalles[0].precio, dec("4.50"));
    assert_eq!(data.detalles[0].cantidad, 2);

    let log = format!("{:?}", transaction_log(state));
    assert!(log.contains("pedido_plato"), "{log}");
    assert!(log.contains("9.00"), "{log}");
}

#[tokio::test]
async fn other_users_order_is_forbidden() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pedido_row(Some(5))]])
        .into_connection();
    let state = state(db);
    let intruso = AuthUser {
        user_id: 7,
        role: Rol::Cliente,
    };

    let err = pedido_service::get_pedido(&state, &intruso, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn owner_sees_order_with_contact_details() {
    let dueno = usuario::Model {
        id_usuario: 5,
        nombre: "Ana".into(),
        email: "ana@example.com".into(),
        telefono: Some("04141234567".into()),
        clave: "hash".into(),
        tipo: Rol::Cliente,
        status: true,
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pedido_row(Some(5))]])
        .append_query_results([Vec::<pedido_plato::Model>::new()])
        .append_query_results([vec![dueno]])
        .into_connection();
    let state = state(db);
    let ana = AuthUser {
        user_id: 5,
        role: Rol::Cliente,
    };

    let resp = pedido_service::get_pedido(&state, &ana, 10).await.unwrap();
    let detalle = resp.data.unwrap();
    assert_eq!(detalle.pedido.id_pedido, 10);
    assert!(detalle.lineas.is_empty());
    assert_eq!(detalle.usuario.unwrap().email, "ana@example.com");
}
