// src/handlers/catalog.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
    models::catalog::Product,
};

// ---
// Validação Customizada
// ---
pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Widget")]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = validate_not_negative))]
    #[schema(value_type = f64, example = 10.0)]
    pub price: Decimal,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    #[schema(example = "Ferramentas")]
    pub category: String,

    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    #[schema(example = 5)]
    pub stock_quantity: i32,

    pub sku: Option<String>,
}

// Atualização parcial: qualquer subconjunto dos campos de criação.
// As mesmas regras valem para os campos presentes.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = validate_not_negative))]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: Option<String>,

    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    pub stock_quantity: Option<i32>,

    pub sku: Option<String>,
}

// ---
// Handlers
// ---

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Produtos",
    responses(
        (status = 200, description = "Produtos do usuário, mais recentes primeiro", body = Vec<Product>),
        (status = 401, description = "Não autorizado")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.catalog_repo.list_products(&user.0.id).await?;
    Ok(Json(products))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto encontrado", body = Product),
        (status = 404, description = "Produto inexistente ou de outro usuário")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state
        .catalog_repo
        .find_product(&user.0.id, id)
        .await?
        .ok_or(AppError::NotFound("Produto"))?;

    Ok(Json(product))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Produtos",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Dados inválidos")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<CreateProductPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_repo
        .create_product(
            &user.0.id,
            &payload.name,
            payload.description.as_deref(),
            payload.price,
            &payload.category,
            payload.stock_quantity,
            payload.sku.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Produto inexistente ou de outro usuário")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateProductPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_repo
        .update_product(
            &user.0.id,
            id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.price,
            payload.category.as_deref(),
            payload.stock_quantity,
            payload.sku.as_deref(),
        )
        .await?
        .ok_or(AppError::NotFound("Produto"))?;

    Ok(Json(product))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto removido"),
        (status = 404, description = "Produto inexistente ou de outro usuário")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.catalog_repo.delete_product(&user.0.id, id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Produto"));
    }

    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produto_valido_passa() {
        let payload = CreateProductPayload {
            name: "Widget".into(),
            description: None,
            price: Decimal::new(1000, 2),
            category: "Ferramentas".into(),
            stock_quantity: 5,
            sku: Some("WX-1".into()),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn preco_negativo_reprova() {
        let payload = CreateProductPayload {
            name: "Widget".into(),
            description: None,
            price: Decimal::new(-1, 2),
            category: "Ferramentas".into(),
            stock_quantity: 0,
            sku: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn estoque_negativo_reprova() {
        let payload = CreateProductPayload {
            name: "Widget".into(),
            description: None,
            price: Decimal::ZERO,
            category: "Ferramentas".into(),
            stock_quantity: -1,
            sku: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn atualizacao_vazia_e_valida() {
        // Subconjunto vazio: nada a validar, nada a mudar.
        let payload = UpdateProductPayload::default();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn atualizacao_com_campo_presente_invalido_reprova() {
        let payload = UpdateProductPayload {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn preco_zero_e_permitido() {
        let payload = UpdateProductPayload {
            price: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
    }
}
