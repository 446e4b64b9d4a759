// src/handlers/auth.rs

use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::{
    CookieJar, WithRejection,
    cookie::{Cookie, SameSite},
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, SESSION_COOKIE},
    models::auth::SessionUser,
};

// O fluxo inteiro de login pertence ao serviço externo de identidade.
// Aqui só existe o vai-e-vem: redirect de consentimento, troca do
// código por token (guardado em cookie) e logout.

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSessionPayload {
    #[validate(length(min = 1, message = "O código de autorização é obrigatório."))]
    #[schema(example = "4/0AbCD...")]
    pub code: String,
}

// GET /api/oauth/google/redirect_url
#[utoipa::path(
    get,
    path = "/api/oauth/google/redirect_url",
    tag = "Auth",
    responses(
        (status = 200, description = "URL de consentimento do Google"),
        (status = 502, description = "Serviço de identidade indisponível")
    )
)]
pub async fn get_oauth_redirect_url(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let redirect_url = app_state
        .session_service
        .oauth_redirect_url("google")
        .await?;

    Ok(Json(json!({ "redirectUrl": redirect_url })))
}

// POST /api/sessions
#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "Auth",
    request_body = CreateSessionPayload,
    responses(
        (status = 200, description = "Sessão criada; token gravado em cookie HttpOnly"),
        (status = 400, description = "Código ausente ou corpo inválido")
    )
)]
pub async fn create_session(
    State(app_state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<CreateSessionPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session_token = app_state.session_service.exchange_code(&payload.code).await?;

    // Cookie de sessão: HttpOnly para o JS nunca ler, SameSite=None
    // porque o frontend roda em outra origem. 60 dias, igual ao
    // tempo de vida da sessão no serviço de identidade.
    let cookie = Cookie::build((SESSION_COOKIE, session_token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::days(60))
        .build();

    Ok((jar.add(cookie), Json(json!({ "success": true }))))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário da sessão atual", body = SessionUser),
        (status = 401, description = "Sessão inválida")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_me(user: AuthenticatedUser) -> Json<SessionUser> {
    Json(user.0)
}

// GET /api/logout
#[utoipa::path(
    get,
    path = "/api/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Sessão invalidada e cookie removido")
    )
)]
pub async fn logout(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        // Invalidação remota é melhor-esforço: o cookie some de
        // qualquer jeito e o token expira sozinho no upstream.
        if let Err(e) = app_state.session_service.invalidate(cookie.value()).await {
            tracing::warn!("Falha ao invalidar sessão no serviço de identidade: {}", e);
        }
    }

    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    Ok((jar.remove(removal), Json(json!({ "success": true }))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codigo_vazio_reprova_na_validacao() {
        let payload = CreateSessionPayload {
            code: String::new(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn payload_de_sessao_desserializa() {
        let payload: CreateSessionPayload =
            serde_json::from_value(json!({ "code": "abc123" })).unwrap();
        assert_eq!(payload.code, "abc123");
        assert!(payload.validate().is_ok());
    }
}
