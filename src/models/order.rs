// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    // Fluxo somente para frente: pending -> preparing -> ready -> completed.
    // Cancelamento é permitido de qualquer estado não-terminal.
    // Estados terminais (completed, cancelled) não saem mais do lugar.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (Pending, Preparing) => true,
            (Preparing, Ready) => true,
            (Ready, Completed) => true,
            (Pending | Preparing | Ready, Cancelled) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

// --- Structs persistidas ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    #[schema(example = 4)]
    pub table_number: i32,
    pub waiter_id: Uuid,
    pub status: OrderStatus,
    #[schema(example = "15.00")]
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// `unit_price` é o snapshot do preço no momento do pedido: se o cardápio
// mudar depois, a linha não muda junto.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub menu_item_id: Uuid,
    #[schema(example = 2)]
    pub quantity: i32,
    #[schema(example = "5.00")]
    pub unit_price: Decimal,
    #[schema(example = "10.00")]
    pub total_price: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Linha de item com o nome do prato resolvido (JOIN com menu_items)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub item: OrderItem,
    #[schema(example = "Chá")]
    pub menu_item_name: String,
}

// Pedido completo: cabeçalho + nome do garçom + linhas resolvidas
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub header: Order,
    #[schema(example = "Ali")]
    pub waiter_name: String,
    pub items: Vec<OrderItemDetail>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderLine {
    pub menu_item_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser positiva."))]
    #[schema(example = 2)]
    pub quantity: i32,

    #[schema(example = "sem açúcar")]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(range(min = 1, message = "O número da mesa deve ser positivo."))]
    #[schema(example = 4)]
    pub table_number: i32,

    #[validate(nested)]
    pub items: Vec<CreateOrderLine>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    #[schema(example = "preparing")]
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_are_allowed() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Completed));
    }

    #[test]
    fn cancellation_allowed_from_non_terminal_states() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Preparing.can_transition_to(Cancelled));
        assert!(Ready.can_transition_to(Cancelled));
    }

    #[test]
    fn backward_transitions_are_rejected() {
        use OrderStatus::*;
        assert!(!Ready.can_transition_to(Pending));
        assert!(!Ready.can_transition_to(Preparing));
        assert!(!Preparing.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Ready));
    }

    #[test]
    fn terminal_states_reject_everything() {
        use OrderStatus::*;
        for next in [Pending, Preparing, Ready, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn skipping_stages_is_rejected() {
        use OrderStatus::*;
        assert!(!Pending.can_transition_to(Ready));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Preparing.can_transition_to(Completed));
    }
}
