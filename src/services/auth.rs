// src/services/auth.rs

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::{common::error::AppError, models::auth::SessionUser};

// Cliente do serviço externo de identidade/sessões. Este backend
// nunca emite credencial: troca código por token, resolve token em
// usuário e invalida sessão, sempre por HTTP com a chave de API
// da aplicação.
#[derive(Clone)]
pub struct SessionService {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct RedirectUrlResponse {
    redirect_url: String,
}

#[derive(Debug, Deserialize)]
struct SessionTokenResponse {
    session_token: String,
}

impl SessionService {
    pub fn new(api_url: String, api_key: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// URL de consentimento OAuth do provedor (ex.: "google").
    pub async fn oauth_redirect_url(&self, provider: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(format!("{}/oauth/{}/redirect_url", self.api_url, provider))
            .header("x-api-key", &self.api_key)
            .send()
            .await?
            .error_for_status()?;

        let body: RedirectUrlResponse = response.json().await?;
        Ok(body.redirect_url)
    }

    /// Troca o código de autorização por um token de sessão.
    pub async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        let response = self
            .client
            .post(format!("{}/sessions", self.api_url))
            .header("x-api-key", &self.api_key)
            .json(&json!({ "code": code }))
            .send()
            .await?
            .error_for_status()?;

        let body: SessionTokenResponse = response.json().await?;
        Ok(body.session_token)
    }

    /// Resolve um token de sessão no usuário dono dele.
    /// 401 do serviço significa token expirado/forjado, não falha nossa.
    pub async fn resolve_user(&self, session_token: &str) -> Result<SessionUser, AppError> {
        let response = self
            .client
            .get(format!("{}/users/me", self.api_url))
            .header("x-api-key", &self.api_key)
            .bearer_auth(session_token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AppError::InvalidToken);
        }

        let user: SessionUser = response.error_for_status()?.json().await?;
        Ok(user)
    }

    /// Invalida a sessão no serviço de identidade.
    pub async fn invalidate(&self, session_token: &str) -> Result<(), AppError> {
        self.client
            .delete(format!("{}/sessions/current", self.api_url))
            .header("x-api-key", &self.api_key)
            .bearer_auth(session_token)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
