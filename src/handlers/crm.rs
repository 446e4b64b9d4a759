// src/handlers/crm.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
    models::crm::Customer,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "maria@email.com")]
    pub email: String,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,

    // Ausente vira "Brazil" na camada de dados.
    #[schema(example = "Brazil")]
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Clientes",
    responses(
        (status = 200, description = "Clientes do usuário, mais recentes primeiro", body = Vec<Customer>),
        (status = 401, description = "Não autorizado")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.crm_repo.list_customers(&user.0.id).await?;
    Ok(Json(customers))
}

// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = Customer),
        (status = 404, description = "Cliente inexistente ou de outro usuário")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .crm_repo
        .find_customer(&user.0.id, id)
        .await?
        .ok_or(AppError::NotFound("Cliente"))?;

    Ok(Json(customer))
}

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Clientes",
    request_body = CreateCustomerPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Customer),
        (status = 400, description = "Dados inválidos")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<CreateCustomerPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .crm_repo
        .create_customer(
            &user.0.id,
            &payload.name,
            &payload.email,
            payload.phone.as_deref(),
            payload.address.as_deref(),
            payload.city.as_deref(),
            payload.state.as_deref(),
            payload.postal_code.as_deref(),
            payload.country.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpdateCustomerPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente inexistente ou de outro usuário")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateCustomerPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .crm_repo
        .update_customer(
            &user.0.id,
            id,
            payload.name.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
            payload.city.as_deref(),
            payload.state.as_deref(),
            payload.postal_code.as_deref(),
            payload.country.as_deref(),
        )
        .await?
        .ok_or(AppError::NotFound("Cliente"))?;

    Ok(Json(customer))
}

// DELETE /api/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente removido"),
        (status = 404, description = "Cliente inexistente ou de outro usuário")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.crm_repo.delete_customer(&user.0.id, id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Cliente"));
    }

    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cliente_valido_passa() {
        let payload = CreateCustomerPayload {
            name: "Ann".into(),
            email: "ann@x.com".into(),
            phone: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn email_invalido_reprova() {
        let payload = CreateCustomerPayload {
            name: "Ann".into(),
            email: "sem-arroba".into(),
            phone: None,
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn atualizacao_parcial_so_valida_o_que_veio() {
        let payload = UpdateCustomerPayload {
            city: Some("Curitiba".into()),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());

        let payload = UpdateCustomerPayload {
            email: Some("errado".into()),
            ..Default::default()
        };
        assert!(payload.validate().is_err());
    }
}
