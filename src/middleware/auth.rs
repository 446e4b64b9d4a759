// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{common::error::AppError, config::AppState, models::auth::SessionUser};

/// Nome do cookie que carrega o token emitido pelo serviço de identidade.
pub const SESSION_COOKIE: &str = "session_token";

// O middleware em si: aceita o cookie de sessão ou um Bearer token,
// resolve no serviço de identidade e injeta o usuário na requisição.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let from_cookie = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

    let token = match from_cookie {
        Some(token) => Some(token),
        None => request
            .headers()
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string),
    };

    let Some(token) = token else {
        return Err(AppError::InvalidToken);
    };

    let user = app_state.session_service.resolve_user(&token).await?;

    // Insere o usuário nos "extensions" da requisição
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub SessionUser);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}
