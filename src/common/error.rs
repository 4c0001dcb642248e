use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::order::OrderStatus;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Perfil não encontrado")]
    ProfileNotFound,

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Conflito: {0}")]
    Conflict(String),

    // O papel do usuário não dá acesso à visão pedida
    #[error("Acesso negado à visão '{0}'")]
    ViewForbidden(&'static str),

    // Transição de status fora do fluxo pending -> preparing -> ready -> completed
    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Mesa {requested} fora do intervalo configurado (1..={table_count})")]
    UnknownTable { requested: i32, table_count: i32 },

    // Pedido criado mas a inserção dos itens falhou E a compensação
    // (exclusão do pedido órfão) também falhou. O id vai no corpo para
    // que um operador possa intervir.
    #[error("Escrita parcial: pedido {order_id} ficou sem itens")]
    PartialWrite { order_id: Uuid },

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::ProfileNotFound => {
                (StatusCode::NOT_FOUND, "Perfil não encontrado.".to_string())
            }
            AppError::ResourceNotFound(what) => {
                (StatusCode::NOT_FOUND, format!("Não encontrado: {}.", what))
            }
            AppError::Conflict(what) => (StatusCode::CONFLICT, format!("{}.", what)),
            AppError::ViewForbidden(view) => (
                StatusCode::FORBIDDEN,
                format!("Seu papel não tem acesso à visão '{}'.", view),
            ),
            AppError::InvalidTransition { from, to } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Não é possível mover o pedido de '{}' para '{}'.", from, to),
            ),
            AppError::UnknownTable { requested, table_count } => (
                StatusCode::BAD_REQUEST,
                format!("Mesa {} não existe (restaurante tem {} mesas).", requested, table_count),
            ),
            AppError::PartialWrite { order_id } => {
                tracing::error!("Pedido órfão sem itens: {}", order_id);
                let body = Json(json!({
                    "error": "O pedido foi criado mas os itens não foram salvos.",
                    "orphanOrderId": order_id,
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
