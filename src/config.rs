// src/config.rs

use std::{env, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    db::{CatalogRepository, CrmRepository, DashboardRepository, OrdersRepository},
    services::{OrderService, SessionService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalog_repo: CatalogRepository,
    pub crm_repo: CrmRepository,
    pub orders_repo: OrdersRepository,
    pub dashboard_repo: DashboardRepository,
    pub order_service: OrderService,
    pub session_service: SessionService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let users_api_url =
            env::var("USERS_SERVICE_API_URL").expect("USERS_SERVICE_API_URL deve ser definida");
        let users_api_key =
            env::var("USERS_SERVICE_API_KEY").expect("USERS_SERVICE_API_KEY deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let crm_repo = CrmRepository::new(db_pool.clone());
        let orders_repo = OrdersRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());
        let order_service = OrderService::new(
            catalog_repo.clone(),
            crm_repo.clone(),
            orders_repo.clone(),
            db_pool.clone(),
        );
        let session_service = SessionService::new(users_api_url, users_api_key)?;

        Ok(Self {
            db_pool,
            catalog_repo,
            crm_repo,
            orders_repo,
            dashboard_repo,
            order_service,
            session_service,
        })
    }
}
