use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        categorias::{CategoriaList, CreateCategoriaRequest, UpdateCategoriaRequest},
        empresa::{CreateEmpresaRequest, UpdateEmpresaRequest},
        pedidos::{
            CreatePedidoRequest, LineaDetalle, LineaPedidoRequest, PedidoCreado, PedidoDetalle,
            PedidoList, PlatoResumen, UpdatePedidoRequest, UsuarioContacto,
        },
        platos::{CategoriaNombre, PlatoDetalle, PlatoFields, PlatoForm, PlatoList},
        usuarios::{CreateUsuarioRequest, UpdateUsuarioRequest, UsuarioList},
    },
    entity::sea_orm_active_enums::{EstadoPedido, Rol},
    models::{Categoria, Empresa, Pedido, PedidoPlato, Plato, Usuario},
    response::{ApiResponse, Meta},
    routes::{auth, categorias, empresa, health, params, pedidos, platos, usuarios},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        categorias::list_categorias,
        categorias::get_categoria,
        categorias::create_categoria,
        categorias::update_categoria,
        categorias::delete_categoria,
        categorias::activate_categoria,
        platos::list_platos,
        platos::get_plato,
        platos::create_plato,
        platos::update_plato,
        platos::delete_plato,
        empresa::get_empresa,
        empresa::get_empresa_by_id,
        empresa::create_empresa,
        empresa::update_empresa,
        empresa::delete_empresa,
        usuarios::list_usuarios,
        usuarios::get_usuario,
        usuarios::create_usuario,
        usuarios::update_usuario,
        usuarios::delete_usuario,
        usuarios::activate_usuario,
        pedidos::create_pedido,
        pedidos::list_pedidos,
        pedidos::get_pedido,
        pedidos::update_pedido,
        pedidos::delete_pedido
    ),
    components(
        schemas(
            Rol,
            EstadoPedido,
            Categoria,
            Plato,
            Empresa,
            Usuario,
            Pedido,
            PedidoPlato,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            CreateCategoriaRequest,
            UpdateCategoriaRequest,
            CategoriaList,
            PlatoFields,
            PlatoForm,
            CategoriaNombre,
            PlatoDetalle,
            PlatoList,
            CreateEmpresaRequest,
            UpdateEmpresaRequest,
            CreateUsuarioRequest,
            UpdateUsuarioRequest,
            UsuarioList,
            LineaPedidoRequest,
            CreatePedidoRequest,
            UpdatePedidoRequest,
            PedidoCreado,
            PlatoResumen,
            LineaDetalle,
            UsuarioContacto,
            PedidoDetalle,
            PedidoList,
            params::ListQuery,
            Meta,
            ApiResponse<Categoria>,
            ApiResponse<Plato>,
            ApiResponse<PedidoCreado>,
            ApiResponse<PedidoDetalle>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration and login"),
        (name = "Categorias", description = "Menu categories"),
        (name = "Platos", description = "Dishes and their images"),
        (name = "Empresa", description = "Restaurant profile"),
        (name = "Usuarios", description = "Account administration"),
        (name = "Pedidos", description = "Orders"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_is_documented() {
        let spec = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/auth/login",
            "/api/categorias/{id}/activate",
            "/api/platos/{id}",
            "/api/empresa",
            "/api/usuarios/activate/{id}",
            "/api/pedidos/{id}",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
        let schemes = spec.components.unwrap().security_schemes;
        assert!(schemes.contains_key("bearer_auth"));
    }
}
