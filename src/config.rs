// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{MenuRepository, OrdersRepository, ProfileRepository, SettingsRepository},
    services::{auth::AuthService, events::OrderEventHub, order::OrderService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub order_service: OrderService,
    pub menu_repo: MenuRepository,
    pub settings_repo: SettingsRepository,
    pub order_events: OrderEventHub,
}

impl AppState {
    // .expect() fica no main: se a configuração falhar, a aplicação não deve iniciar.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let profile_repo = ProfileRepository::new(db_pool.clone());
        let menu_repo = MenuRepository::new(db_pool.clone());
        let orders_repo = OrdersRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());

        let order_events = OrderEventHub::default();
        let auth_service = AuthService::new(profile_repo, jwt_secret);
        let order_service = OrderService::new(
            orders_repo,
            menu_repo.clone(),
            settings_repo.clone(),
            order_events.clone(),
        );

        Ok(Self {
            db_pool,
            auth_service,
            order_service,
            menu_repo,
            settings_repo,
            order_events,
        })
    }
}
