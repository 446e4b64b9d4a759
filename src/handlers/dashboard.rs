// src/handlers/dashboard.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::dashboard::{CategoryEntry, DashboardStats, RevenueEntry},
};

// GET /api/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contadores gerais do usuário", body = DashboardStats),
        (status = 401, description = "Não autorizado")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.dashboard_repo.get_stats(&user.0.id).await?;
    Ok(Json(stats))
}

// GET /api/dashboard/revenue
#[utoipa::path(
    get,
    path = "/api/dashboard/revenue",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Receita por mês, últimos 12 meses", body = Vec<RevenueEntry>),
        (status = 401, description = "Não autorizado")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_revenue(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let data = app_state
        .dashboard_repo
        .get_revenue_by_month(&user.0.id)
        .await?;
    Ok(Json(data))
}

// GET /api/dashboard/categories
#[utoipa::path(
    get,
    path = "/api/dashboard/categories",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Produtos e receita por categoria", body = Vec<CategoryEntry>),
        (status = 401, description = "Não autorizado")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_categories(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let data = app_state
        .dashboard_repo
        .get_category_rollup(&user.0.id)
        .await?;
    Ok(Json(data))
}
