// src/common/error.rs

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;
use validator::{ValidationErrors, ValidationErrorsKind};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A taxonomia segue o contrato da API: 400 para entrada inválida,
// 404 para recurso ausente ou de outro usuário, 401 para sessão inválida.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Corpo que nem chegou a ser um objeto JSON válido também é 400.
    #[error("Corpo da requisição inválido: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Status de pedido inválido: '{0}'")]
    InvalidOrderStatus(String),

    // Pedido referenciou um produto inexistente (ou de outro usuário).
    // Identifica QUAL produto para o cliente poder corrigir o carrinho.
    #[error("Produto {0} não encontrado")]
    ProductNotFound(Uuid),

    // Mesmo contrato para o cliente do pedido: id inexistente ou de
    // outro usuário é entrada inválida, nunca um 500 de FK.
    #[error("Cliente {0} não encontrado")]
    CustomerNotFound(Uuid),

    // O nome da entidade entra na mensagem ("Produto", "Cliente", "Pedido").
    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("Token de sessão inválido ou ausente")]
    InvalidToken,

    #[error("Falha ao contatar o serviço de identidade: {0}")]
    SessionService(#[from] reqwest::Error),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// Achata as violações em chaves "campo", "campo.sub" e "campo[i].sub".
// A resposta 400 precisa enumerar TODAS as regras violadas, inclusive
// as de structs aninhadas em listas (itens de pedido, por exemplo),
// que o validator guarda em níveis List/Struct e não em Field.
fn collect_validation_details(
    prefix: &str,
    errors: &ValidationErrors,
    details: &mut HashMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let key = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.entry(key).or_default().extend(messages);
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_details(&key, nested, details);
            }
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    collect_validation_details(&format!("{key}[{index}]"), nested, details);
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo por campo.
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                collect_validation_details("", &errors, &mut details);
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::JsonRejection(rejection) => {
                let body = Json(json!({
                    "error": "Corpo da requisição inválido.",
                    "details": rejection.body_text(),
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidOrderStatus(status) => {
                let body = Json(json!({ "error": format!("Status inválido: '{}'.", status) }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::ProductNotFound(id) => {
                let body = Json(json!({ "error": format!("Produto {} não encontrado.", id) }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::CustomerNotFound(id) => {
                let body = Json(json!({ "error": format!("Cliente {} não encontrado.", id) }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NotFound(entity) => {
                let body = Json(json!({ "error": format!("{} não encontrado.", entity) }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de sessão inválido ou ausente.",
            ),
            AppError::SessionService(ref e) => {
                tracing::error!("Falha no serviço de identidade: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Serviço de autenticação indisponível.",
                )
            }
            // Erros de banco e internos viram 500 sem vazar detalhe.
            // O `tracing` loga a mensagem completa que o `thiserror` montou.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.",
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Cadastro {
        #[validate(length(min = 1, message = "obrigatório"))]
        nome: String,
        #[validate(email(message = "email inválido"))]
        email: String,
    }

    #[derive(Debug, serde::Serialize, Validate)]
    struct ItemPedido {
        #[validate(range(min = 1, message = "a quantidade mínima é 1"))]
        quantity: i32,
    }

    #[derive(Debug, Validate)]
    struct Pedido {
        #[validate(length(min = 1, message = "pelo menos um item"), nested)]
        items: Vec<ItemPedido>,
    }

    #[test]
    fn not_found_vira_404() {
        let resp = AppError::NotFound("Pedido").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn produto_ausente_em_pedido_vira_400() {
        let resp = AppError::ProductNotFound(Uuid::nil()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn cliente_ausente_em_pedido_vira_400() {
        let resp = AppError::CustomerNotFound(Uuid::nil()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn token_invalido_vira_401() {
        let resp = AppError::InvalidToken.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn validacao_enumera_todos_os_campos() {
        let cadastro = Cadastro {
            nome: String::new(),
            email: "sem-arroba".into(),
        };
        let errors = cadastro.validate().unwrap_err();

        let mut details = HashMap::new();
        collect_validation_details("", &errors, &mut details);
        assert_eq!(details.len(), 2);
        assert!(details.contains_key("nome"));
        assert!(details.contains_key("email"));

        let resp = AppError::from(errors).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn violacao_aninhada_aparece_nos_detalhes() {
        // quantity 0 dentro da lista: o validator guarda isso num
        // nível List, não em field_errors().
        let pedido = Pedido {
            items: vec![ItemPedido { quantity: 0 }],
        };
        let errors = pedido.validate().unwrap_err();

        let mut details = HashMap::new();
        collect_validation_details("", &errors, &mut details);
        let messages = details
            .get("items[0].quantity")
            .expect("faltou a violação aninhada");
        assert!(messages.contains(&"a quantidade mínima é 1".to_string()));
    }

    #[test]
    fn lista_vazia_aparece_como_violacao_do_campo() {
        let pedido = Pedido { items: vec![] };
        let errors = pedido.validate().unwrap_err();

        let mut details = HashMap::new();
        collect_validation_details("", &errors, &mut details);
        let messages = details.get("items").expect("faltou a violação de tamanho");
        assert!(messages.contains(&"pelo menos um item".to_string()));
    }

    #[test]
    fn status_invalido_vira_400() {
        let resp = AppError::InvalidOrderStatus("refunded".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
