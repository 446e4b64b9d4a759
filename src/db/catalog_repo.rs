// src/db/catalog_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::catalog::Product};

// Repositório do catálogo, responsável pela tabela 'products'.
// Toda consulta filtra por user_id: um usuário nunca enxerga
// (nem altera, nem apaga) produtos de outro.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_products(&self, user_id: &str) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn find_product(&self, user_id: &str, id: Uuid) -> Result<Option<Product>, AppError> {
        let product =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        user_id: &str,
        name: &str,
        description: Option<&str>,
        price: Decimal,
        category: &str,
        stock_quantity: i32,
        sku: Option<&str>,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (user_id, name, description, price, category, stock_quantity, sku)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(stock_quantity)
        .bind(sku)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Atualização parcial: campos None ficam como estão (COALESCE).
    /// Retorna None se o id não existe ou pertence a outro usuário.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_product(
        &self,
        user_id: &str,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        price: Option<Decimal>,
        category: Option<&str>,
        stock_quantity: Option<i32>,
        sku: Option<&str>,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name            = COALESCE($3, name),
                description     = COALESCE($4, description),
                price           = COALESCE($5, price),
                category        = COALESCE($6, category),
                stock_quantity  = COALESCE($7, stock_quantity),
                sku             = COALESCE($8, sku),
                updated_at      = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(stock_quantity)
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Hard delete. Retorna quantas linhas sumiram (0 = não era dele).
    pub async fn delete_product(&self, user_id: &str, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Preço vivo do produto, escopado ao usuário. Genérico sobre o
    /// executor para rodar dentro da transação de criação do pedido.
    pub async fn find_price<'e, E>(
        &self,
        executor: E,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<Decimal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let price = sqlx::query_scalar::<_, Decimal>(
            "SELECT price FROM products WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?;

        Ok(price)
    }
}
