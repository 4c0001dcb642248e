// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// Configuração do restaurante: uma linha só no banco.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSettings {
    #[schema(example = "Restaurante do Ali")]
    pub restaurant_name: Option<String>,

    // Número de mesas atendidas; pedidos só aceitam mesa dentro do intervalo
    #[schema(example = 12)]
    pub table_count: i32,

    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for RestaurantSettings {
    fn default() -> Self {
        Self {
            restaurant_name: None,
            table_count: 10,
            updated_at: None,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsPayload {
    #[schema(example = "Restaurante do Ali")]
    pub restaurant_name: Option<String>,

    #[validate(range(min = 1, message = "O restaurante precisa de ao menos uma mesa."))]
    #[schema(example = 12)]
    pub table_count: Option<i32>,
}
