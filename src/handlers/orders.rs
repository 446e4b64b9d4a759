// src/handlers/orders.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::orders::{Order, OrderDetail, OrderStatus, OrderSummary},
};

#[derive(Debug, Deserialize, serde::Serialize, Validate, ToSchema)]
pub struct CreateOrderItemPayload {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade mínima é 1."))]
    #[schema(example = 3)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderPayload {
    pub customer_id: Uuid,

    #[validate(length(min = 1, message = "Pelo menos um item é obrigatório."), nested)]
    pub items: Vec<CreateOrderItemPayload>,

    pub notes: Option<String>,
}

// O status chega como texto e é validado contra o enum aqui,
// para o erro ser um 400 de validação e não uma rejeição de parse.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusPayload {
    #[schema(example = "confirmed")]
    pub status: String,
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Pedidos",
    responses(
        (status = 200, description = "Pedidos do usuário com dados do cliente", body = Vec<OrderSummary>),
        (status = 401, description = "Não autorizado")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.orders_repo.list_orders(&user.0.id).await?;
    Ok(Json(orders))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido com cliente e itens", body = OrderDetail),
        (status = 404, description = "Pedido inexistente ou de outro usuário")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .orders_repo
        .find_order(&user.0.id, id)
        .await?
        .ok_or(AppError::NotFound("Pedido"))?;

    let items = app_state.orders_repo.list_order_items(order.id).await?;

    Ok(Json(OrderDetail { order, items }))
}

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Pedidos",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado com status 'pending'", body = Order),
        (status = 400, description = "Dados inválidos ou produto inexistente")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<CreateOrderPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let items: Vec<(Uuid, i32)> = payload
        .items
        .iter()
        .map(|item| (item.product_id, item.quantity))
        .collect();

    let order = app_state
        .order_service
        .create_order(
            &user.0.id,
            payload.customer_id,
            &items,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// PUT /api/orders/{id}/status
#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = UpdateOrderStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Order),
        (status = 400, description = "Status fora do enum"),
        (status = 404, description = "Pedido inexistente ou de outro usuário")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateOrderStatusPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let status: OrderStatus = payload.status.parse()?;

    let order = app_state
        .orders_repo
        .update_status(&user.0.id, id, status)
        .await?
        .ok_or(AppError::NotFound("Pedido"))?;

    Ok(Json(order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pedido_sem_itens_reprova() {
        let payload = CreateOrderPayload {
            customer_id: Uuid::new_v4(),
            items: vec![],
            notes: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.errors().contains_key("items"));
    }

    #[test]
    fn quantidade_zero_reprova() {
        let payload = CreateOrderPayload {
            customer_id: Uuid::new_v4(),
            items: vec![CreateOrderItemPayload {
                product_id: Uuid::new_v4(),
                quantity: 0,
            }],
            notes: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn pedido_valido_passa() {
        let payload: CreateOrderPayload = serde_json::from_value(json!({
            "customer_id": Uuid::new_v4(),
            "items": [{ "product_id": Uuid::new_v4(), "quantity": 3 }],
            "notes": "entregar de manhã"
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn status_fora_do_enum_vira_erro() {
        assert!("refunded".parse::<OrderStatus>().is_err());
        assert!("shipped".parse::<OrderStatus>().is_ok());
    }
}
