// src/models/menu.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    #[schema(example = "Bebidas")]
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// Item do cardápio. `category_name` vem de um JOIN na listagem; itens cuja
// categoria foi excluída aparecem sem categoria.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    #[schema(example = "Chá")]
    pub name: String,
    #[schema(example = "5.00")]
    pub price: Decimal,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Upsert de item do cardápio (criação quando `id` ausente)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertMenuItemPayload {
    pub id: Option<Uuid>,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Chá")]
    pub name: String,

    #[validate(range(min = 0.0, message = "O preço não pode ser negativo."))]
    #[schema(example = 5.00, value_type = f64)]
    pub price: f64,

    pub category_id: Option<Uuid>,
}

impl UpsertMenuItemPayload {
    // O validator não fala Decimal; o preço chega como f64 validado >= 0 e
    // é convertido aqui com 2 casas, como o banco armazena.
    pub fn price_as_decimal(&self) -> Decimal {
        Decimal::try_from(self.price).unwrap_or(Decimal::ZERO).round_dp(2)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Bebidas")]
    pub name: String,
}
