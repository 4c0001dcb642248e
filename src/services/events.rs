// src/services/events.rs

use serde::Serialize;
use tokio::sync::broadcast;
use utoipa::ToSchema;

use crate::models::order::OrderDetail;

// Uma notificação por mudança de linha de pedido, com o pedido completo
// (itens inclusos) como carga — o mesmo contrato do canal realtime que o
// frontend original consumia. Entrega é "pelo menos uma vez": o consumidor
// recalcula as estatísticas a partir de um snapshot novo, então receber o
// mesmo evento duas vezes é inofensivo.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum OrderEventKind {
    Created,
    StatusChanged,
    Deleted,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvent {
    pub kind: OrderEventKind,
    pub order: OrderDetail,
}

#[derive(Clone)]
pub struct OrderEventHub {
    tx: broadcast::Sender<OrderEvent>,
}

impl OrderEventHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.tx.subscribe()
    }

    // Publicação é melhor-esforço: sem assinantes não é erro
    pub fn publish(&self, event: OrderEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::debug!("Nenhum assinante para evento de pedido: {}", e);
        }
    }
}

impl Default for OrderEventHub {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{Order, OrderStatus};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn sample_event(kind: OrderEventKind) -> OrderEvent {
        OrderEvent {
            kind,
            order: OrderDetail {
                header: Order {
                    id: Uuid::new_v4(),
                    table_number: 1,
                    waiter_id: Uuid::new_v4(),
                    status: OrderStatus::Pending,
                    total_amount: Decimal::ZERO,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                },
                waiter_name: "Ali".to_string(),
                items: vec![],
            },
        }
    }

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let hub = OrderEventHub::new(8);
        let mut rx = hub.subscribe();

        hub.publish(sample_event(OrderEventKind::Created));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.kind, OrderEventKind::Created);
        assert_eq!(received.order.waiter_name, "Ali");
    }

    #[test]
    fn publish_without_subscribers_is_not_an_error() {
        let hub = OrderEventHub::new(8);
        hub.publish(sample_event(OrderEventKind::Deleted));
    }
}
