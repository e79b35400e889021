use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query string accepted by every list endpoint. Each endpoint reads the
/// parameters that apply to its entity and ignores the rest.
#[derive(Debug, Default, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page size, clamped to 1..=100. Absent means no pagination.
    pub limit: Option<u64>,
    /// Rows to skip, default 0.
    pub offset: Option<u64>,
    /// Case-sensitive substring match over the entity's searchable fields.
    pub search: Option<String>,
    /// `field` or `field:asc|desc`.
    pub sort_by: Option<String>,
    /// Dish filter by category.
    pub categoria_id: Option<i32>,
    /// Dish filter by availability.
    pub disponible: Option<bool>,
    /// Active flag filter for categories and users, default `true`.
    pub status: Option<bool>,
    /// Order state filter.
    pub estado: Option<String>,
}
