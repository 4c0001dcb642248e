// src/db/settings_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::settings::{RestaurantSettings, UpdateSettingsPayload},
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Linha única; se ainda não existe, devolve os padrões em vez de erro
    pub async fn get_settings(&self) -> Result<RestaurantSettings, AppError> {
        let settings = sqlx::query_as::<_, RestaurantSettings>(
            "SELECT restaurant_name, table_count, updated_at FROM settings WHERE id = TRUE",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings.unwrap_or_default())
    }

    // UPSERT (Insert or Update); campos ausentes no payload preservam o valor atual
    pub async fn update_settings(
        &self,
        input: UpdateSettingsPayload,
    ) -> Result<RestaurantSettings, AppError> {
        let current = self.get_settings().await?;

        let settings = sqlx::query_as::<_, RestaurantSettings>(
            r#"
            INSERT INTO settings (id, restaurant_name, table_count)
            VALUES (TRUE, $1, $2)
            ON CONFLICT (id)
            DO UPDATE SET
                restaurant_name = EXCLUDED.restaurant_name,
                table_count = EXCLUDED.table_count,
                updated_at = NOW()
            RETURNING restaurant_name, table_count, updated_at
            "#,
        )
        .bind(input.restaurant_name.or(current.restaurant_name))
        .bind(input.table_count.unwrap_or(current.table_count))
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }
}
