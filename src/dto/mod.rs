use serde::{Deserialize, Deserializer};

pub mod auth;
pub mod categorias;
pub mod empresa;
pub mod pedidos;
pub mod platos;
pub mod usuarios;

/// Deserializes a nullable field so that an explicit `null` is kept apart from
/// an absent field: absent is `None` (via `#[serde(default)]`), `null` is
/// `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::double_option")]
        descripcion: Option<Option<String>>,
    }

    #[test]
    fn keeps_absent_and_null_apart() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.descripcion, None);

        let null: Patch = serde_json::from_str(r#"{"descripcion": null}"#).unwrap();
        assert_eq!(null.descripcion, Some(None));

        let empty: Patch = serde_json::from_str(r#"{"descripcion": ""}"#).unwrap();
        assert_eq!(empty.descripcion, Some(Some(String::new())));
    }
}
