// src/docs.rs

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;
use crate::middleware::auth::SESSION_COOKIE;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::get_oauth_redirect_url,
        handlers::auth::create_session,
        handlers::auth::get_me,
        handlers::auth::logout,

        // --- Produtos ---
        handlers::catalog::list_products,
        handlers::catalog::get_product,
        handlers::catalog::create_product,
        handlers::catalog::update_product,
        handlers::catalog::delete_product,

        // --- Clientes ---
        handlers::crm::list_customers,
        handlers::crm::get_customer,
        handlers::crm::create_customer,
        handlers::crm::update_customer,
        handlers::crm::delete_customer,

        // --- Pedidos ---
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::create_order,
        handlers::orders::update_order_status,

        // --- Dashboard ---
        handlers::dashboard::get_stats,
        handlers::dashboard::get_revenue,
        handlers::dashboard::get_categories,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::SessionUser,
            handlers::auth::CreateSessionPayload,

            // --- Produtos ---
            models::catalog::Product,
            handlers::catalog::CreateProductPayload,
            handlers::catalog::UpdateProductPayload,

            // --- Clientes ---
            models::crm::Customer,
            handlers::crm::CreateCustomerPayload,
            handlers::crm::UpdateCustomerPayload,

            // --- Pedidos ---
            models::orders::OrderStatus,
            models::orders::Order,
            models::orders::OrderItem,
            models::orders::OrderSummary,
            models::orders::OrderItemDetail,
            models::orders::OrderDetail,
            handlers::orders::CreateOrderPayload,
            handlers::orders::CreateOrderItemPayload,
            handlers::orders::UpdateOrderStatusPayload,

            // --- Dashboard ---
            models::dashboard::DashboardStats,
            models::dashboard::RevenueEntry,
            models::dashboard::CategoryEntry,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Sessão via serviço externo de identidade"),
        (name = "Produtos", description = "Catálogo de produtos"),
        (name = "Clientes", description = "Cadastro de clientes"),
        (name = "Pedidos", description = "Pedidos e itens"),
        (name = "Dashboard", description = "Relatórios agregados"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}
