// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Usuário resolvido pelo serviço externo de identidade.
/// O `id` é a string opaca emitida por aquele serviço; é ele que
/// escopa TODAS as consultas ao banco.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
