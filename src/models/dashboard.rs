// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// 1. Os cards do topo do dashboard.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_customers: i64,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub pending_orders: i64,
    pub low_stock_products: i64,
}

// 2. Receita por mês calendário ("YYYY-MM"), últimos 12 meses.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct RevenueEntry {
    pub month: String,
    pub revenue: Decimal,
}

// 3. Rollup por categoria de produto ativo.
// Categoria sem pedido aparece com revenue 0.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct CategoryEntry {
    pub category: String,
    pub products: i64,
    pub revenue: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_serializa_em_camel_case() {
        let stats = DashboardStats {
            total_products: 1,
            total_customers: 1,
            total_orders: 1,
            total_revenue: Decimal::new(3000, 2),
            pending_orders: 1,
            low_stock_products: 1,
        };
        let json = serde_json::to_value(&stats).unwrap();
        for key in [
            "totalProducts",
            "totalCustomers",
            "totalOrders",
            "totalRevenue",
            "pendingOrders",
            "lowStockProducts",
        ] {
            assert!(json.get(key).is_some(), "faltou a chave {key}");
        }
        assert_eq!(json["totalRevenue"], serde_json::json!(30.0));
    }
}
