// src/db/crm_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::crm::Customer};

// Repositório de clientes, responsável pela tabela 'customers'.
// Mesmo contrato do catálogo: tudo escopado por user_id.
#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_customers(&self, user_id: &str) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn find_customer(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> Result<Option<Customer>, AppError> {
        let customer =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(customer)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_customer(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        phone: Option<&str>,
        address: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
        postal_code: Option<&str>,
        country: Option<&str>,
    ) -> Result<Customer, AppError> {
        // País ausente assume o padrão do negócio.
        let final_country = country.unwrap_or("Brazil");

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (
                user_id, name, email, phone, address, city, state, postal_code, country
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(city)
        .bind(state)
        .bind(postal_code)
        .bind(final_country)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Atualização parcial via COALESCE, igual ao catálogo.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_customer(
        &self,
        user_id: &str,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
        postal_code: Option<&str>,
        country: Option<&str>,
    ) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers SET
                name        = COALESCE($3, name),
                email       = COALESCE($4, email),
                phone       = COALESCE($5, phone),
                address     = COALESCE($6, address),
                city        = COALESCE($7, city),
                state       = COALESCE($8, state),
                postal_code = COALESCE($9, postal_code),
                country     = COALESCE($10, country),
                updated_at  = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(city)
        .bind(state)
        .bind(postal_code)
        .bind(country)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Confere se o cliente existe E pertence ao usuário. Genérico
    /// sobre o executor para rodar dentro da transação do pedido.
    pub async fn customer_exists<'e, E>(
        &self,
        executor: E,
        user_id: &str,
        id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let found: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM customers WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(executor)
                .await?;

        Ok(found.is_some())
    }

    pub async fn delete_customer(&self, user_id: &str, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
