use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, Set,
};

use crate::{
    dto::usuarios::{CreateUsuarioRequest, UpdateUsuarioRequest, UsuarioList},
    entity::{
        Usuarios,
        sea_orm_active_enums::Rol,
        usuario::{ActiveModel, Column, Model as UsuarioModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Usuario,
    query::QueryOptions,
    response::{ApiResponse, Meta},
    routes::params::ListQuery,
    services::{auth_service::hash_password, require_text},
    state::AppState,
};

const SEARCHABLE: &[Column] = &[Column::Nombre, Column::Email];
const SORTABLE: &[(&str, Column)] = &[
    ("id_usuario", Column::IdUsuario),
    ("nombre", Column::Nombre),
    ("email", Column::Email),
];

pub struct NewUsuario {
    pub nombre: String,
    pub email: String,
    pub telefono: Option<String>,
    pub clave: String,
    pub tipo: Rol,
}

/// Inserts an account after checking the email is free. Shared by
/// registration and admin user creation.
pub async fn insert_usuario<C: ConnectionTrait>(db: &C, new: NewUsuario) -> AppResult<UsuarioModel> {
    let nombre = require_text("nombre", &new.nombre)?;
    let email = normalize_email(&new.email)?;
    if new.clave.is_empty() {
        return Err(AppError::BadRequest("clave is required".into()));
    }

    ensure_email_free(db, &email, None).await?;

    let active = ActiveModel {
        nombre: Set(nombre),
        email: Set(email),
        telefono: Set(new.telefono.filter(|t| !t.trim().is_empty())),
        clave: Set(hash_password(&new.clave)?),
        tipo: Set(new.tipo),
        status: Set(true),
        ..Default::default()
    };
    Ok(active.insert(db).await?)
}

pub async fn list_usuarios(
    state: &AppState,
    user: &AuthUser,
    query: ListQuery,
) -> AppResult<ApiResponse<UsuarioList>> {
    ensure_admin(user)?;
    let options = QueryOptions::build(&query, SEARCHABLE, SORTABLE)?
        .filter(Column::Status.eq(query.status.unwrap_or(true)))
        .default_sort(Column::IdUsuario, Order::Asc);

    let finder = options.apply(Usuarios::find());
    let total = finder.clone().count(state.db()).await?;
    let items = options
        .page
        .apply(finder)
        .all(state.db())
        .await?
        .into_iter()
        .map(Usuario::from)
        .collect();

    Ok(ApiResponse::success(
        "Usuarios",
        UsuarioList { items },
        Some(options.page.meta(total)),
    ))
}

pub async fn get_usuario(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Usuario>> {
    ensure_admin(user)?;
    let usuario = Usuarios::find_by_id(id)
        .filter(Column::Status.eq(true))
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound("Usuario"))?;
    Ok(ApiResponse::success("Usuario", usuario.into(), None))
}

pub async fn create_usuario(
    state: &AppState,
    user: &AuthUser,
    payload: CreateUsuarioRequest,
) -> AppResult<ApiResponse<Usuario>> {
    ensure_admin(user)?;
    let usuario = insert_usuario(
        state.db(),
        NewUsuario {
            nombre: payload.nombre,
            email: payload.email,
            telefono: payload.telefono,
            clave: payload.clave,
            tipo: payload.tipo.unwrap_or(Rol::Cliente),
        },
    )
    .await?;

    Ok(ApiResponse::success(
        "Usuario created",
        usuario.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_usuario(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateUsuarioRequest,
) -> AppResult<ApiResponse<Usuario>> {
    ensure_admin(user)?;
    let existing = Usuarios::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound("Usuario"))?;

    let mut active: ActiveModel = existing.into();
    if let Some(nombre) = payload.nombre {
        active.nombre = Set(require_text("nombre", nombre)?);
    }
    if let Some(email) = payload.email {
        let email = normalize_email(&email)?;
        ensure_email_free(state.db(), &email, Some(id)).await?;
        active.email = Set(email);
    }
    if let Some(telefono) = payload.telefono {
        active.telefono = Set(telefono);
    }
    if let Some(clave) = payload.clave {
        if clave.is_empty() {
            return Err(AppError::BadRequest("clave cannot be empty".into()));
        }
        active.clave = Set(hash_password(&clave)?);
    }
    if let Some(tipo) = payload.tipo {
        active.tipo = Set(tipo);
    }

    let usuario = active.update(state.db()).await?;
    Ok(ApiResponse::success(
        "Usuario updated",
        usuario.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_usuario(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Usuario>> {
    ensure_admin(user)?;
    let usuario = set_status(state, id, false).await?;
    Ok(ApiResponse::success(
        "Usuario deactivated",
        usuario,
        Some(Meta::empty()),
    ))
}

pub async fn activate_usuario(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Usuario>> {
    ensure_admin(user)?;
    let usuario = set_status(state, id, true).await?;
    Ok(ApiResponse::success(
        "Usuario reactivated",
        usuario,
        Some(Meta::empty()),
    ))
}

async fn set_status(state: &AppState, id: i32, status: bool) -> AppResult<Usuario> {
    let existing = Usuarios::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound("Usuario"))?;
    let mut active: ActiveModel = existing.into();
    active.status = Set(status);
    Ok(active.update(state.db()).await?.into())
}

async fn ensure_email_free<C: ConnectionTrait>(
    db: &C,
    email: &str,
    except_id: Option<i32>,
) -> AppResult<()> {
    let mut finder = Usuarios::find().filter(Column::Email.eq(email));
    if let Some(id) = except_id {
        finder = finder.filter(Column::IdUsuario.ne(id));
    }
    if finder.one(db).await?.is_some() {
        return Err(AppError::Conflict("Email is already registered".into()));
    }
    Ok(())
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = require_text("email", email)?.to_lowercase();
    if !email.contains('@') {
        return Err(AppError::BadRequest("email is not valid".into()));
    }
    Ok(email)
}
