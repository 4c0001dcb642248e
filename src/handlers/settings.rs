// src/handlers/settings.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{ManagementAccess, RequireView},
    models::{
        auth::Profile,
        settings::{RestaurantSettings, UpdateSettingsPayload},
    },
};

// GET /api/settings — leitura liberada para qualquer autenticado
// (o garçom precisa do número de mesas para lançar pedidos)
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Configuração do restaurante", body = RestaurantSettings)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state.settings_repo.get_settings().await?;
    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/settings — só a visão de gestão altera
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = UpdateSettingsPayload,
    responses(
        (status = 200, description = "Configuração atualizada", body = RestaurantSettings),
        (status = 403, description = "Sem acesso à visão de gestão")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    _management: RequireView<ManagementAccess>,
    Json(payload): Json<UpdateSettingsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let updated = app_state.settings_repo.update_settings(payload).await?;

    Ok((StatusCode::OK, Json(updated)))
}

// =============================================================================
//  GARÇONS (visão de gestão)
// =============================================================================

// GET /api/waiters
#[utoipa::path(
    get,
    path = "/api/waiters",
    tag = "Settings",
    responses(
        (status = 200, description = "Garçons ativos", body = Vec<Profile>),
        (status = 403, description = "Sem acesso à visão de gestão")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_waiters(
    State(app_state): State<AppState>,
    _management: RequireView<ManagementAccess>,
) -> Result<impl IntoResponse, AppError> {
    let waiters = app_state.auth_service.list_waiters().await?;
    Ok((StatusCode::OK, Json(waiters)))
}

// DELETE /api/waiters/{id} — desativação lógica do perfil
#[utoipa::path(
    delete,
    path = "/api/waiters/{id}",
    tag = "Settings",
    responses(
        (status = 204, description = "Garçom desativado"),
        (status = 404, description = "Garçom não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do garçom")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_waiter(
    State(app_state): State<AppState>,
    _management: RequireView<ManagementAccess>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.auth_service.remove_waiter(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
