// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::middleware;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Views ---
        handlers::views::list_views,
        handlers::views::resolve,

        // --- Menu ---
        handlers::menu::list_menu,
        handlers::menu::upsert_menu_item,
        handlers::menu::delete_menu_item,
        handlers::menu::list_categories,
        handlers::menu::create_category,
        handlers::menu::delete_category,

        // --- Orders ---
        handlers::orders::list_orders,
        handlers::orders::create_order,
        handlers::orders::update_order_status,
        handlers::orders::order_ticket,
        handlers::orders::stream_orders,

        // --- Reports ---
        handlers::reports::get_summary,
        handlers::reports::export_csv,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,
        handlers::settings::list_waiters,
        handlers::settings::remove_waiter,
    ),
    components(
        schemas(
            // --- Auth ---
            models::role::Role,
            models::auth::Profile,
            models::auth::RegisterPayload,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Views ---
            middleware::rbac::View,
            handlers::views::PermittedViewsResponse,
            handlers::views::ResolvedViewResponse,

            // --- Menu ---
            models::menu::Category,
            models::menu::MenuItem,
            models::menu::UpsertMenuItemPayload,
            models::menu::CreateCategoryPayload,

            // --- Orders ---
            models::order::OrderStatus,
            models::order::Order,
            models::order::OrderItem,
            models::order::OrderItemDetail,
            models::order::OrderDetail,
            models::order::CreateOrderLine,
            models::order::CreateOrderPayload,
            models::order::UpdateStatusPayload,
            services::events::OrderEventKind,
            services::events::OrderEvent,

            // --- Reports ---
            models::report::WaiterStats,
            models::report::ItemStats,
            models::report::AggregateStats,

            // --- Settings ---
            models::settings::RestaurantSettings,
            models::settings::UpdateSettingsPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Perfis"),
        (name = "Views", description = "Visões liberadas por papel"),
        (name = "Menu", description = "Cardápio e Categorias"),
        (name = "Orders", description = "Pedidos das Mesas"),
        (name = "Reports", description = "Contabilidade e Exportação"),
        (name = "Settings", description = "Configuração do Restaurante e Garçons")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
