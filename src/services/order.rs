// src/services/order.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{orders_repo::NewOrderLine, MenuRepository, OrdersRepository, SettingsRepository},
    models::order::{CreateOrderPayload, OrderDetail, OrderStatus},
    services::events::{OrderEvent, OrderEventHub, OrderEventKind},
};

#[derive(Clone)]
pub struct OrderService {
    orders_repo: OrdersRepository,
    menu_repo: MenuRepository,
    settings_repo: SettingsRepository,
    events: OrderEventHub,
}

impl OrderService {
    pub fn new(
        orders_repo: OrdersRepository,
        menu_repo: MenuRepository,
        settings_repo: SettingsRepository,
        events: OrderEventHub,
    ) -> Self {
        Self {
            orders_repo,
            menu_repo,
            settings_repo,
            events,
        }
    }

    pub async fn list_orders(&self) -> Result<Vec<OrderDetail>, AppError> {
        self.orders_repo.list_orders().await
    }

    pub async fn get_order(&self, id: Uuid) -> Result<OrderDetail, AppError> {
        self.orders_repo.get_order_detail(id).await
    }

    // Cria o pedido e suas linhas como uma unidade lógica. São duas
    // escritas no gateway, sem transação envolvendo as duas (o gateway não
    // promete rollback implícito): se a segunda falhar, tentamos apagar o
    // pedido órfão e, se nem isso der certo, o chamador recebe
    // PartialWrite com o id para compensação manual.
    pub async fn create_order(
        &self,
        waiter_id: Uuid,
        payload: CreateOrderPayload,
    ) -> Result<OrderDetail, AppError> {
        // 1. Mesa dentro do intervalo configurado
        let settings = self.settings_repo.get_settings().await?;
        if payload.table_number < 1 || payload.table_number > settings.table_count {
            return Err(AppError::UnknownTable {
                requested: payload.table_number,
                table_count: settings.table_count,
            });
        }

        // 2. Snapshot de preços do cardápio no momento do pedido
        let menu_ids: Vec<Uuid> = payload.items.iter().map(|l| l.menu_item_id).collect();
        let priced = self.menu_repo.prices_for(&menu_ids).await?;
        let price_by_id: HashMap<Uuid, Decimal> = priced.into_iter().collect();

        let mut lines = Vec::with_capacity(payload.items.len());
        let mut total = Decimal::ZERO;
        for line in &payload.items {
            let unit_price = *price_by_id.get(&line.menu_item_id).ok_or_else(|| {
                AppError::ResourceNotFound(format!("Item do cardápio {}", line.menu_item_id))
            })?;
            total += unit_price * Decimal::from(line.quantity);
            lines.push(NewOrderLine {
                menu_item_id: line.menu_item_id,
                quantity: line.quantity,
                unit_price,
                notes: line.notes.clone(),
            });
        }

        // 3. Primeira escrita: o cabeçalho
        let order = self
            .orders_repo
            .insert_order(payload.table_number, waiter_id, total)
            .await?;

        // 4. Segunda escrita: as linhas. Falhou? Compensa apagando o órfão.
        if let Err(items_err) = self.orders_repo.insert_order_items(order.id, &lines).await {
            tracing::warn!(
                "Falha ao inserir itens do pedido {}; tentando compensação: {}",
                order.id,
                items_err
            );
            return match self.orders_repo.delete_order(order.id).await {
                Ok(()) => Err(items_err),
                Err(_) => Err(AppError::PartialWrite { order_id: order.id }),
            };
        }

        let detail = self.orders_repo.get_order_detail(order.id).await?;
        self.events.publish(OrderEvent {
            kind: OrderEventKind::Created,
            order: detail.clone(),
        });

        Ok(detail)
    }

    // Avanço de status com a regra "só para frente". O status atual é lido
    // na hora — nenhuma decisão de permissão/estado é cacheada entre chamadas.
    pub async fn update_status(
        &self,
        id: Uuid,
        next: OrderStatus,
    ) -> Result<OrderDetail, AppError> {
        let current = self.orders_repo.get_order_status(id).await?;

        if !current.can_transition_to(next) {
            return Err(AppError::InvalidTransition { from: current, to: next });
        }

        self.orders_repo.update_order_status(id, next).await?;

        let detail = self.orders_repo.get_order_detail(id).await?;
        self.events.publish(OrderEvent {
            kind: OrderEventKind::StatusChanged,
            order: detail.clone(),
        });

        Ok(detail)
    }
}
