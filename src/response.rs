use serde::Serialize;
use utoipa::ToSchema;

/// Paging information for list responses. Single-item responses leave every
/// field `null`.
#[derive(Debug, Default, Serialize, ToSchema, Clone, PartialEq)]
pub struct Meta {
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size; `null` when the list was not paginated.
    pub per_page: Option<i64>,
    /// Rows matching the filters, ignoring limit and offset.
    pub total: Option<i64>,
}

impl Meta {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Envelope shared by every JSON response, errors included.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}
