use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::{
    dto::pedidos::{
        CreatePedidoRequest, LineaDetalle, LineaPedidoRequest, PedidoCreado, PedidoDetalle,
        PedidoList, PlatoResumen, UpdatePedidoRequest, UsuarioContacto,
    },
    entity::{
        PedidoPlatos, Pedidos, Platos, Usuarios,
        pedido::{self, Column},
        pedido_plato, plato,
        sea_orm_active_enums::EstadoPedido,
        usuario,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Pedido, PedidoPlato},
    query::QueryOptions,
    response::{ApiResponse, Meta},
    routes::params::ListQuery,
    state::AppState,
};

const SEARCHABLE: &[Column] = &[Column::NombreCliente, Column::TelefonoCliente];
const SORTABLE: &[(&str, Column)] = &[
    ("fecha", Column::Fecha),
    ("total", Column::Total),
    ("id_pedido", Column::IdPedido),
];

/// A validated order line with the dish price captured at order time.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    pub id_plato: i32,
    pub cantidad: i32,
    pub precio: Decimal,
}

/// Order lines accumulated before anything is written.
#[derive(Debug, Default)]
pub struct OrderDraft {
    pub lines: Vec<DraftLine>,
    pub total: Decimal,
}

impl OrderDraft {
    /// Adds one requested line given the dish it names, if one was found.
    pub fn push(&mut self, line: &LineaPedidoRequest, plato: Option<&plato::Model>) -> AppResult<()> {
        let plato = match plato {
            Some(p) if p.disponible => p,
            _ => {
                return Err(AppError::BadRequest(format!(
                    "Plato {} does not exist or is not available",
                    line.id_plato
                )));
            }
        };
        if line.cantidad <= 0 {
            return Err(AppError::BadRequest(format!(
                "Invalid cantidad for plato {}",
                line.id_plato
            )));
        }

        self.total += plato.precio * Decimal::from(line.cantidad);
        self.lines.push(DraftLine {
            id_plato: plato.id_plato,
            cantidad: line.cantidad,
            precio: plato.precio,
        });
        Ok(())
    }
}

/// Places an order. Anonymous callers are allowed; an authenticated caller is
/// recorded as the owner.
pub async fn create_pedido(
    state: &AppState,
    user: Option<&AuthUser>,
    payload: CreatePedidoRequest,
) -> AppResult<ApiResponse<PedidoCreado>> {
    let telefono = payload
        .telefono_cliente
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("telefono_cliente is required".into()))?
        .to_string();
    let platos = match payload.platos {
        Some(lines) if !lines.is_empty() => lines,
        _ => {
            return Err(AppError::BadRequest(
                "platos must contain at least one line".into(),
            ));
        }
    };
    let nombre = payload
        .nombre_cliente
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let txn = state.orm.begin().await?;
    let result = place_order(&txn, user, nombre, telefono, &platos).await;
    let (pedido, detalles) = finish(txn, result).await?;

    tracing::info!(
        id_pedido = pedido.id_pedido,
        total = %pedido.total,
        lines = detalles.len(),
        "pedido created"
    );

    Ok(ApiResponse::success(
        "Pedido created",
        PedidoCreado {
            pedido: pedido.into(),
            detalles: detalles.into_iter().map(PedidoPlato::from).collect(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_pedidos(
    state: &AppState,
    user: &AuthUser,
    query: ListQuery,
) -> AppResult<ApiResponse<PedidoList>> {
    ensure_admin(user)?;
    let mut options = QueryOptions::build(&query, SEARCHABLE, SORTABLE)?
        .default_sort(Column::Fecha, Order::Desc);
    if let Some(estado) = query.estado.as_deref().filter(|e| !e.is_empty()) {
        options = options.filter(Column::Estado.eq(parse_estado(estado)?));
    }

    let finder = options.apply(Pedidos::find());
    let total = finder.clone().count(state.db()).await?;
    let pedidos = options.page.apply(finder).all(state.db()).await?;
    let items = with_details(state.db(), pedidos).await?;

    Ok(ApiResponse::success(
        "Pedidos",
        PedidoList { items },
        Some(options.page.meta(total)),
    ))
}

pub async fn get_pedido(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<PedidoDetalle>> {
    let pedido = Pedidos::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound("Pedido"))?;

    if !user.is_admin() && pedido.id_usuario != Some(user.user_id) {
        return Err(AppError::Forbidden(
            "You are not allowed to view this pedido".into(),
        ));
    }

    let detalle = with_details(state.db(), vec![pedido])
        .await?
        .pop()
        .ok_or(AppError::NotFound("Pedido"))?;
    Ok(ApiResponse::success("Pedido", detalle, None))
}

/// Sets `estado` and/or `total`. The total is taken as given and never
/// recomputed from the lines.
pub async fn update_pedido(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdatePedidoRequest,
) -> AppResult<ApiResponse<Pedido>> {
    ensure_admin(user)?;
    let existing = Pedidos::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound("Pedido"))?;

    let mut active: pedido::ActiveModel = existing.into();
    if let Some(estado) = payload.estado {
        active.estado = Set(parse_estado(estado.trim())?);
    }
    if let Some(total) = payload.total {
        if total < Decimal::ZERO {
            return Err(AppError::BadRequest("total must be zero or greater".into()));
        }
        active.total = Set(total.round_dp(2));
    }
    let pedido = active.update(state.db()).await?;
    tracing::info!(id_pedido = id, estado = %pedido.estado.to_value(), "pedido updated");

    Ok(ApiResponse::success(
        "Pedido updated",
        pedido.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_pedido(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Pedido>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;
    let result = remove_order(&txn, id).await;
    let pedido = finish(txn, result).await?;
    tracing::info!(id_pedido = id, "pedido deleted");

    Ok(ApiResponse::success(
        "Pedido deleted",
        pedido.into(),
        Some(Meta::empty()),
    ))
}

async fn place_order<C: ConnectionTrait>(
    db: &C,
    user: Option<&AuthUser>,
    nombre: Option<String>,
    telefono: String,
    lines: &[LineaPedidoRequest],
) -> AppResult<(pedido::Model, Vec<pedido_plato::Model>)> {
    let mut draft = OrderDraft::default();
    for line in lines {
        let plato = Platos::find_by_id(line.id_plato).one(db).await?;
        draft.push(line, plato.as_ref())?;
    }

    let nombre_cliente = match (nombre, user) {
        (Some(nombre), _) => Some(nombre),
        (None, Some(user)) => Usuarios::find_by_id(user.user_id)
            .one(db)
            .await?
            .map(|u| u.nombre),
        (None, None) => None,
    };

    let pedido = pedido::ActiveModel {
        id_usuario: Set(user.map(|u| u.user_id)),
        nombre_cliente: Set(nombre_cliente),
        telefono_cliente: Set(telefono),
        fecha: Set(Utc::now().fixed_offset()),
        estado: Set(EstadoPedido::Recibido),
        total: Set(draft.total),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let rows = draft.lines.iter().map(|line| pedido_plato::ActiveModel {
        id_pedido: Set(pedido.id_pedido),
        id_plato: Set(line.id_plato),
        cantidad: Set(line.cantidad),
        precio: Set(line.precio),
        ..Default::default()
    });
    PedidoPlatos::insert_many(rows).exec_without_returning(db).await?;

    let detalles = PedidoPlatos::find()
        .filter(pedido_plato::Column::IdPedido.eq(pedido.id_pedido))
        .order_by_asc(pedido_plato::Column::IdPedidoPlato)
        .all(db)
        .await?;
    Ok((pedido, detalles))
}

async fn remove_order<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<pedido::Model> {
    let pedido = Pedidos::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Pedido"))?;
    PedidoPlatos::delete_many()
        .filter(pedido_plato::Column::IdPedido.eq(id))
        .exec(db)
        .await?;
    Pedidos::delete_by_id(id).exec(db).await?;
    Ok(pedido)
}

/// Commits on success. On failure the transaction is rolled back before the
/// original error is handed back.
async fn finish<T>(txn: DatabaseTransaction, result: AppResult<T>) -> AppResult<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback) = txn.rollback().await {
                tracing::warn!(error = %rollback, "rollback failed");
            }
            Err(err)
        }
    }
}

/// Ids bound per `IN (...)` list. Postgres caps a statement at 65535 bind
/// parameters and an unpaginated list can hold more orders than that.
const ID_CHUNK: usize = 1_000;

/// Attaches lines (with dish name and price) and the ordering user's contact
/// details to each order, keeping the input order.
async fn with_details<C: ConnectionTrait>(
    db: &C,
    pedidos: Vec<pedido::Model>,
) -> AppResult<Vec<PedidoDetalle>> {
    with_details_chunked(db, pedidos, ID_CHUNK).await
}

async fn with_details_chunked<C: ConnectionTrait>(
    db: &C,
    pedidos: Vec<pedido::Model>,
    chunk: usize,
) -> AppResult<Vec<PedidoDetalle>> {
    if pedidos.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = pedidos.iter().map(|p| p.id_pedido).collect();
    let mut lineas: HashMap<i32, Vec<LineaDetalle>> = HashMap::new();
    for batch in ids.chunks(chunk) {
        for (linea, plato) in PedidoPlatos::find()
            .filter(pedido_plato::Column::IdPedido.is_in(batch.iter().copied()))
            .order_by_asc(pedido_plato::Column::IdPedidoPlato)
            .find_also_related(Platos)
            .all(db)
            .await?
        {
            lineas.entry(linea.id_pedido).or_default().push(LineaDetalle {
                linea: linea.into(),
                plato: plato.map(|p| PlatoResumen {
                    nombre: p.nombre,
                    precio: p.precio,
                }),
            });
        }
    }

    let mut user_ids: Vec<i32> = pedidos.iter().filter_map(|p| p.id_usuario).collect();
    user_ids.sort_unstable();
    user_ids.dedup();
    let mut usuarios: HashMap<i32, usuario::Model> = HashMap::new();
    for batch in user_ids.chunks(chunk) {
        let found = Usuarios::find()
            .filter(usuario::Column::IdUsuario.is_in(batch.iter().copied()))
            .all(db)
            .await?;
        usuarios.extend(found.into_iter().map(|u| (u.id_usuario, u)));
    }

    Ok(pedidos
        .into_iter()
        .map(|pedido| {
            let usuario = pedido
                .id_usuario
                .and_then(|id| usuarios.get(&id))
                .map(|u| UsuarioContacto {
                    nombre: u.nombre.clone(),
                    email: u.email.clone(),
                    telefono: u.telefono.clone(),
                });
            PedidoDetalle {
                lineas: lineas.remove(&pedido.id_pedido).unwrap_or_default(),
                usuario,
                pedido: pedido.into(),
            }
        })
        .collect())
}

fn parse_estado(raw: &str) -> AppResult<EstadoPedido> {
    EstadoPedido::try_from_value(&raw.to_ascii_lowercase()).map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid estado '{raw}', expected one of recibido, preparando, listo, entregado, cancelado"
        ))
    })
}
