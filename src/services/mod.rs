use crate::error::{AppError, AppResult};

pub mod auth_service;
pub mod categoria_service;
pub mod empresa_service;
pub mod pedido_service;
pub mod plato_service;
pub mod usuario_service;

/// Trims a required text field and rejects it when blank.
pub(crate) fn require_text(field: &str, value: impl AsRef<str>) -> AppResult<String> {
    let value = value.as_ref().trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("nombre", "  Postres ").unwrap(), "Postres");
        let err = require_text("nombre", "   ").unwrap_err();
        assert_eq!(err.to_string(), "nombre is required");
    }
}
