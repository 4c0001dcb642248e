// src/db/menu_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::menu::{Category, MenuItem},
};

const SELECT_MENU_ITEM: &str = r#"
    SELECT mi.id, mi.name, mi.price, mi.category_id,
           c.name AS category_name,
           mi.active, mi.created_at, mi.updated_at
    FROM menu_items mi
    LEFT JOIN categories c ON mi.category_id = c.id
"#;

#[derive(Clone)]
pub struct MenuRepository {
    pool: PgPool,
}

impl MenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CARDÁPIO
    // =========================================================================

    // Só itens ativos, ordenados por nome (a listagem que o garçom vê)
    pub async fn list_menu_items(&self) -> Result<Vec<MenuItem>, AppError> {
        let items = sqlx::query_as::<_, MenuItem>(
            &format!("{SELECT_MENU_ITEM} WHERE mi.active = TRUE ORDER BY mi.name"),
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn find_menu_item(&self, id: Uuid) -> Result<Option<MenuItem>, AppError> {
        let item = sqlx::query_as::<_, MenuItem>(
            &format!("{SELECT_MENU_ITEM} WHERE mi.id = $1"),
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    // Preço dos itens pedidos, em uma query só (snapshot na criação do pedido).
    // Itens inativos ficam de fora de propósito: não se vende o que saiu do cardápio.
    pub async fn prices_for(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, Decimal)>, AppError> {
        let rows = sqlx::query_as::<_, (Uuid, Decimal)>(
            "SELECT id, price FROM menu_items WHERE id = ANY($1) AND active = TRUE",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // UPSERT (criação quando o id ainda não existe)
    pub async fn upsert_menu_item(
        &self,
        id: Option<Uuid>,
        name: &str,
        price: Decimal,
        category_id: Option<Uuid>,
    ) -> Result<MenuItem, AppError> {
        let row = sqlx::query_as::<_, (Uuid,)>(
            r#"
            INSERT INTO menu_items (id, name, price, category_id)
            VALUES (COALESCE($1, uuid_generate_v4()), $2, $3, $4)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                price = EXCLUDED.price,
                category_id = EXCLUDED.category_id,
                updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        self.find_menu_item(row.0)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Item {}", row.0)))
    }

    // Exclusão lógica, como o cardápio original: o item some da listagem
    // mas as linhas de pedidos antigos continuam resolvendo.
    pub async fn deactivate_menu_item(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE menu_items SET active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound(format!("Item {}", id)));
        }
        Ok(())
    }

    // =========================================================================
    //  CATEGORIAS
    // =========================================================================

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!("Categoria '{}' já existe", name));
                }
            }
            AppError::DatabaseError(e)
        })
    }

    // Excluir categoria desativa os itens dela na mesma transação.
    // O app original apagava os itens; aqui a cascata é lógica, para que
    // pedidos históricos continuem resolvendo seus itens.
    pub async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE menu_items SET active = FALSE, updated_at = NOW() WHERE category_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound(format!("Categoria {}", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}
