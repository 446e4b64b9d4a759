// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{CategoryEntry, DashboardStats, RevenueEntry},
};

// Limiar fixo de "estoque baixo" usado apenas no relatório;
// não bloqueia venda nenhuma.
const LOW_STOCK_THRESHOLD: i32 = 10;

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Os contadores do topo. Tudo dentro de uma transação para
    // os seis números saírem do mesmo snapshot.
    pub async fn get_stats(&self, user_id: &str) -> Result<DashboardStats, AppError> {
        let mut tx = self.pool.begin().await?;

        let total_products: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let total_customers: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM customers WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let total_orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let total_revenue: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_amount), 0) FROM orders WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let pending_orders: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE user_id = $1 AND status = 'pending'",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let low_stock_products: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE user_id = $1 AND stock_quantity < $2 AND is_active = TRUE",
        )
        .bind(user_id)
        .bind(LOW_STOCK_THRESHOLD)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardStats {
            total_products,
            total_customers,
            total_orders,
            total_revenue,
            pending_orders,
            low_stock_products,
        })
    }

    // 2. Receita agrupada por mês calendário, últimos 12 meses,
    // mês mais recente primeiro.
    pub async fn get_revenue_by_month(&self, user_id: &str) -> Result<Vec<RevenueEntry>, AppError> {
        let data = sqlx::query_as::<_, RevenueEntry>(
            r#"
            SELECT
                to_char(created_at, 'YYYY-MM') AS month,
                SUM(total_amount) AS revenue
            FROM orders
            WHERE user_id = $1
              AND created_at >= NOW() - INTERVAL '12 months'
            GROUP BY 1
            ORDER BY 1 DESC
            LIMIT 12
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }

    // 3. Rollup por categoria. LEFT JOIN para categoria sem venda
    // ainda aparecer com receita zero.
    pub async fn get_category_rollup(&self, user_id: &str) -> Result<Vec<CategoryEntry>, AppError> {
        let data = sqlx::query_as::<_, CategoryEntry>(
            r#"
            SELECT
                p.category,
                COUNT(DISTINCT p.id) AS products,
                COALESCE(SUM(oi.total_price), 0) AS revenue
            FROM products p
            LEFT JOIN order_items oi ON oi.product_id = p.id
            LEFT JOIN orders o ON o.id = oi.order_id
            WHERE p.user_id = $1
              AND p.is_active = TRUE
              AND (o.user_id = $1 OR o.user_id IS NULL)
            GROUP BY p.category
            ORDER BY revenue DESC
            LIMIT 10
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }
}
