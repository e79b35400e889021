use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};

use crate::{
    dto::empresa::{CreateEmpresaRequest, UpdateEmpresaRequest},
    entity::{
        Empresas,
        empresa::{ActiveModel, Column},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Empresa,
    response::{ApiResponse, Meta},
    services::require_text,
    state::AppState,
};

/// The deployment holds at most one company profile; this returns it.
pub async fn get_empresa(state: &AppState) -> AppResult<ApiResponse<Empresa>> {
    let empresa = Empresas::find()
        .order_by_asc(Column::IdEmpresa)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound("Empresa"))?;
    Ok(ApiResponse::success("Empresa", empresa.into(), None))
}

pub async fn get_empresa_by_id(state: &AppState, id: i32) -> AppResult<ApiResponse<Empresa>> {
    let empresa = Empresas::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound("Empresa"))?;
    Ok(ApiResponse::success("Empresa", empresa.into(), None))
}

pub async fn create_empresa(
    state: &AppState,
    user: &AuthUser,
    payload: CreateEmpresaRequest,
) -> AppResult<ApiResponse<Empresa>> {
    ensure_admin(user)?;
    if Empresas::find().count(state.db()).await? > 0 {
        return Err(AppError::BadRequest(
            "Empresa already exists, update it instead".into(),
        ));
    }

    let active = ActiveModel {
        nombre: Set(require_text("nombre", payload.nombre)?),
        rif: Set(require_text("rif", payload.rif)?),
        direccion: Set(require_text("direccion", payload.direccion)?),
        telefono: Set(require_text("telefono", payload.telefono)?),
        correo: Set(require_text("correo", payload.correo)?),
        ..Default::default()
    };
    let empresa = active.insert(state.db()).await?;

    Ok(ApiResponse::success(
        "Empresa created",
        empresa.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_empresa(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: UpdateEmpresaRequest,
) -> AppResult<ApiResponse<Empresa>> {
    ensure_admin(user)?;
    let existing = Empresas::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound("Empresa"))?;

    let mut active: ActiveModel = existing.into();
    if let Some(nombre) = payload.nombre {
        active.nombre = Set(require_text("nombre", nombre)?);
    }
    if let Some(rif) = payload.rif {
        active.rif = Set(require_text("rif", rif)?);
    }
    if let Some(direccion) = payload.direccion {
        active.direccion = Set(require_text("direccion", direccion)?);
    }
    if let Some(telefono) = payload.telefono {
        active.telefono = Set(require_text("telefono", telefono)?);
    }
    if let Some(correo) = payload.correo {
        active.correo = Set(require_text("correo", correo)?);
    }
    let empresa = active.update(state.db()).await?;

    Ok(ApiResponse::success(
        "Empresa updated",
        empresa.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_empresa(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<Empresa>> {
    ensure_admin(user)?;
    let existing = Empresas::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(AppError::NotFound("Empresa"))?;
    Empresas::delete_by_id(id).exec(state.db()).await?;

    Ok(ApiResponse::success(
        "Empresa deleted",
        existing.into(),
        Some(Meta::empty()),
    ))
}
