// src/db/orders_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::orders::{Order, OrderItemDetail, OrderStatus, OrderSummary},
};

// Repositório de pedidos (tabelas 'orders' e 'order_items').
// Os inserts recebem um executor genérico porque cabeçalho e itens
// precisam entrar na MESMA transação (ou tudo, ou nada).
#[derive(Clone)]
pub struct OrdersRepository {
    pool: PgPool,
}

impl OrdersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_orders(&self, user_id: &str) -> Result<Vec<OrderSummary>, AppError> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT o.*, c.name AS customer_name, c.email AS customer_email
            FROM orders o
            JOIN customers c ON o.customer_id = c.id AND c.user_id = o.user_id
            WHERE o.user_id = $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    pub async fn find_order(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<OrderSummary>, AppError> {
        let order = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT o.*, c.name AS customer_name, c.email AS customer_email
            FROM orders o
            JOIN customers c ON o.customer_id = c.id AND c.user_id = o.user_id
            WHERE o.id = $1 AND o.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Itens do pedido com nome/SKU do produto. O pedido já foi
    /// escopado por user_id antes desta chamada.
    pub async fn list_order_items(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<OrderItemDetail>, AppError> {
        let items = sqlx::query_as::<_, OrderItemDetail>(
            r#"
            SELECT oi.*, p.name AS product_name, p.sku AS product_sku
            FROM order_items oi
            JOIN products p ON oi.product_id = p.id
            WHERE oi.order_id = $1
            ORDER BY oi.created_at ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Insere o cabeçalho. O status fica de fora do INSERT de propósito:
    /// o DEFAULT 'pending' do banco vale para todo pedido novo,
    /// independente do que o cliente mandou.
    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        user_id: &str,
        customer_id: Uuid,
        total_amount: Decimal,
        notes: Option<&str>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (user_id, customer_id, total_amount, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(customer_id)
        .bind(total_amount)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(order)
    }

    pub async fn insert_order_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
        total_price: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, unit_price, total_price)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(total_price)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Troca o status. Qualquer valor do enum pode suceder qualquer
    /// outro; não há grafo de transição. None = pedido de outro usuário
    /// ou inexistente.
    pub async fn update_status(
        &self,
        user_id: &str,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }
}
