// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_middleware;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Tudo abaixo exige bearer token; o acesso por visão (cozinha,
    // contabilidade, gestão) é decidido por extractor em cada handler.
    let session_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/views", get(handlers::views::list_views))
        .route("/views/resolve", get(handlers::views::resolve))
        .route(
            "/menu",
            get(handlers::menu::list_menu).put(handlers::menu::upsert_menu_item),
        )
        .route("/menu/{id}", delete(handlers::menu::delete_menu_item))
        .route(
            "/categories",
            get(handlers::menu::list_categories).post(handlers::menu::create_category),
        )
        .route("/categories/{id}", delete(handlers::menu::delete_category))
        .route(
            "/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route("/orders/stream", get(handlers::orders::stream_orders))
        .route("/orders/{id}/status", put(handlers::orders::update_order_status))
        .route("/orders/{id}/ticket", get(handlers::orders::order_ticket))
        .route("/reports/summary", get(handlers::reports::get_summary))
        .route("/reports/export", get(handlers::reports::export_csv))
        .route(
            "/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .route("/waiters", get(handlers::settings::list_waiters))
        .route("/waiters/{id}", delete(handlers::settings::remove_waiter))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", session_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
