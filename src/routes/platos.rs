use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, FromRequest, Multipart, Path, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
    routing::get,
};
use rust_decimal::Decimal;

use crate::{
    dto::platos::{PlatoDetalle, PlatoFields, PlatoForm, PlatoList},
    error::{AppError, AppResult},
    extract::{AppJson, AppQuery},
    middleware::auth::AuthUser,
    models::Plato,
    response::ApiResponse,
    routes::params::ListQuery,
    services::plato_service as svc,
    state::AppState,
    storage::{ImageUpload, MAX_IMAGE_BYTES},
};

/// Multipart field carrying the dish image.
pub const IMAGE_FIELD: &str = "imagen_plato";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_platos).post(create_plato))
        .route(
            "/{id}",
            get(get_plato).put(update_plato).delete(delete_plato),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 512 * 1024))
}

/// Dish write body, either `multipart/form-data` (text fields plus an
/// optional image) or plain JSON.
#[derive(Debug, Default)]
pub struct PlatoPayload {
    pub fields: PlatoFields,
    pub image: Option<ImageUpload>,
}

impl FromRequest<AppState> for PlatoPayload {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            read_multipart(multipart).await
        } else {
            let AppJson(fields) = AppJson::<PlatoFields>::from_request(req, state).await?;
            Ok(Self {
                fields,
                image: None,
            })
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> AppResult<PlatoPayload> {
    let mut payload = PlatoPayload::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart request: {}", e.body_text())))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            // browsers send an empty part when no file was picked
            if data.is_empty() && file_name.as_deref().is_none_or(str::is_empty) {
                continue;
            }
            payload.image = Some(ImageUpload {
                file_name,
                content_type,
                data,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            set_form_field(&mut payload.fields, &name, &value)?;
        }
    }
    Ok(payload)
}

/// Parses one multipart text field into the dish fields. Unknown names are
/// ignored.
fn set_form_field(fields: &mut PlatoFields, name: &str, value: &str) -> AppResult<()> {
    let trimmed = value.trim();
    match name {
        "id_categoria" => {
            let id = trimmed
                .parse::<i32>()
                .map_err(|_| AppError::BadRequest("id_categoria must be an integer".into()))?;
            fields.id_categoria = Some(id);
        }
        "nombre" => fields.nombre = Some(value.to_string()),
        "descripcion" => {
            fields.descripcion = Some((!trimmed.is_empty()).then(|| value.to_string()));
        }
        "precio" => {
            let precio = Decimal::from_str(trimmed)
                .map_err(|_| AppError::BadRequest("precio must be a number".into()))?;
            fields.precio = Some(precio);
        }
        "disponible" => {
            let disponible = match trimmed.to_ascii_lowercase().as_str() {
                "true" | "1" | "on" => true,
                "false" | "0" | "off" => false,
                _ => return Err(AppError::BadRequest("disponible must be true or false".into())),
            };
            fields.disponible = Some(disponible);
        }
        _ => {}
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/platos",
    params(ListQuery),
    responses(
        (status = 200, description = "List dishes with category name", body = ApiResponse<PlatoList>),
        (status = 400, description = "Invalid sort_by")
    ),
    tag = "Platos"
)]
pub async fn list_platos(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> AppResult<Json<ApiResponse<PlatoList>>> {
    let resp = svc::list_platos(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/platos/{id}",
    params(("id" = i32, Path, description = "Plato ID")),
    responses(
        (status = 200, description = "Get dish", body = ApiResponse<PlatoDetalle>),
        (status = 404, description = "Plato not found")
    ),
    tag = "Platos"
)]
pub async fn get_plato(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<PlatoDetalle>>> {
    let resp = svc::get_plato(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/platos",
    request_body(content(
        (PlatoForm = "multipart/form-data"),
        (PlatoFields = "application/json")
    )),
    responses(
        (status = 201, description = "Create dish", body = ApiResponse<Plato>),
        (status = 400, description = "Invalid fields, unknown category or bad image")
    ),
    security(("bearer_auth" = [])),
    tag = "Platos"
)]
pub async fn create_plato(
    State(state): State<AppState>,
    user: AuthUser,
    payload: PlatoPayload,
) -> AppResult<(StatusCode, Json<ApiResponse<Plato>>)> {
    let resp = svc::create_plato(&state, &user, payload.fields, payload.image).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/platos/{id}",
    params(("id" = i32, Path, description = "Plato ID")),
    request_body(content(
        (PlatoForm = "multipart/form-data"),
        (PlatoFields = "application/json")
    )),
    responses(
        (status = 200, description = "Update dish", body = ApiResponse<Plato>),
        (status = 400, description = "Invalid fields, unknown category or bad image"),
        (status = 404, description = "Plato not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Platos"
)]
pub async fn update_plato(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    payload: PlatoPayload,
) -> AppResult<Json<ApiResponse<Plato>>> {
    let resp = svc::update_plato(&state, &user, id, payload.fields, payload.image).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/platos/{id}",
    params(("id" = i32, Path, description = "Plato ID")),
    responses(
        (status = 200, description = "Delete dish", body = ApiResponse<Plato>),
        (status = 404, description = "Plato not found"),
        (status = 409, description = "Dish appears on existing orders")
    ),
    security(("bearer_auth" = [])),
    tag = "Platos"
)]
pub async fn delete_plato(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Plato>>> {
    let resp = svc::delete_plato(&state, &user, id).await?;
    Ok(Json(resp))
}
