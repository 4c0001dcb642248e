// src/db/orders_repo.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::order::{Order, OrderDetail, OrderItemDetail, OrderStatus},
};

// Linha pronta para inserção: o service já resolveu o snapshot de preço
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub menu_item_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub notes: Option<String>,
}

// Cabeçalho + nome do garçom, decodificado de um JOIN
#[derive(sqlx::FromRow)]
struct OrderHeaderRow {
    #[sqlx(flatten)]
    order: Order,
    waiter_name: String,
}

#[derive(Clone)]
pub struct OrdersRepository {
    pool: PgPool,
}

impl OrdersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    // Pedidos completos, mais novos primeiro, com itens e nomes resolvidos.
    // Duas queries + agrupamento em memória em vez de N+1.
    pub async fn list_orders(&self) -> Result<Vec<OrderDetail>, AppError> {
        let headers = sqlx::query_as::<_, OrderHeaderRow>(
            r#"
            SELECT o.id, o.table_number, o.waiter_id, o.status, o.total_amount,
                   o.created_at, o.updated_at,
                   p.name AS waiter_name
            FROM orders o
            JOIN profiles p ON o.waiter_id = p.id
            ORDER BY o.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = headers.iter().map(|row| row.order.id).collect();
        let mut items_by_order = self.items_for(&ids).await?;

        let orders = headers
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.order.id).unwrap_or_default();
                OrderDetail { header: row.order, waiter_name: row.waiter_name, items }
            })
            .collect();

        Ok(orders)
    }

    pub async fn get_order_detail(&self, id: Uuid) -> Result<OrderDetail, AppError> {
        let row = sqlx::query_as::<_, OrderHeaderRow>(
            r#"
            SELECT o.id, o.table_number, o.waiter_id, o.status, o.total_amount,
                   o.created_at, o.updated_at,
                   p.name AS waiter_name
            FROM orders o
            JOIN profiles p ON o.waiter_id = p.id
            WHERE o.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Pedido {}", id)))?;

        let mut items_by_order = self.items_for(&[row.order.id]).await?;
        let items = items_by_order.remove(&row.order.id).unwrap_or_default();

        Ok(OrderDetail { header: row.order, waiter_name: row.waiter_name, items })
    }

    pub async fn get_order_status(&self, id: Uuid) -> Result<OrderStatus, AppError> {
        let row = sqlx::query_as::<_, (OrderStatus,)>(
            "SELECT status FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Pedido {}", id)))?;

        Ok(row.0)
    }

    async fn items_for(
        &self,
        order_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<OrderItemDetail>>, AppError> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, OrderItemDetail>(
            r#"
            SELECT oi.id, oi.order_id, oi.menu_item_id, oi.quantity,
                   oi.unit_price, oi.total_price, oi.notes, oi.created_at,
                   mi.name AS menu_item_name
            FROM order_items oi
            JOIN menu_items mi ON oi.menu_item_id = mi.id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.created_at
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<OrderItemDetail>> = HashMap::new();
        for row in rows {
            grouped.entry(row.item.order_id).or_default().push(row);
        }
        Ok(grouped)
    }

    // =========================================================================
    //  ESCRITA
    // =========================================================================

    // Insere só o cabeçalho. A inserção dos itens é um segundo passo
    // deliberadamente fora de transação: o gateway não promete rollback
    // implícito, quem compensa é o chamador (ver OrderService::create_order).
    pub async fn insert_order(
        &self,
        table_number: i32,
        waiter_id: Uuid,
        total_amount: Decimal,
    ) -> Result<Order, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (table_number, waiter_id, total_amount)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(table_number)
        .bind(waiter_id)
        .bind(total_amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    pub async fn insert_order_items(
        &self,
        order_id: Uuid,
        lines: &[NewOrderLine],
    ) -> Result<(), AppError> {
        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, menu_item_id, quantity, unit_price, total_price, notes)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(order_id)
            .bind(line.menu_item_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(line.unit_price * Decimal::from(line.quantity))
            .bind(line.notes.as_deref())
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    // Caminho de compensação: remove o pedido órfão (as linhas caem via CASCADE)
    pub async fn delete_order(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE orders SET status = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound(format!("Pedido {}", id)));
        }
        Ok(())
    }
}
