// src/handlers/menu.rs

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
    models::menu::{Category, CreateCategoryPayload, MenuItem, UpsertMenuItemPayload},
};

// =============================================================================
//  CARDÁPIO
// =============================================================================

// GET /api/menu — itens ativos, para qualquer perfil autenticado
#[utoipa::path(
    get,
    path = "/api/menu",
    tag = "Menu",
    responses(
        (status = 200, description = "Itens ativos do cardápio", body = Vec<MenuItem>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_menu(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.menu_repo.list_menu_items().await?;
    Ok((StatusCode::OK, Json(items)))
}

// PUT /api/menu — cria ou edita item (visão de gestão)
#[utoipa::path(
    put,
    path = "/api/menu",
    tag = "Menu",
    request_body = UpsertMenuItemPayload,
    responses(
        (status = 200, description = "Item criado/atualizado", body = MenuItem),
        (status = 403, description = "Sem acesso à visão de gestão")
    ),
    security(("api_jwt" = []))
)]
pub async fn upsert_menu_item(
    State(app_state): State<AppState>,
    _management: RequireView<ManagementAccess>,
    Json(payload): Json<UpsertMenuItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let item = app_state
        .menu_repo
        .upsert_menu_item(
            payload.id,
            &payload.name,
            payload.price_as_decimal(),
            payload.category_id,
        )
        .await?;

    Ok((StatusCode::OK, Json(item)))
}

// DELETE /api/menu/{id} — exclusão lógica
#[utoipa::path(
    delete,
    path = "/api/menu/{id}",
    tag = "Menu",
    responses(
        (status = 204, description = "Item desativado"),
        (status = 404, description = "Item não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do item")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_menu_item(
    State(app_state): State<AppState>,
    _management: RequireView<ManagementAccess>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.menu_repo.deactivate_menu_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  CATEGORIAS
// =============================================================================

// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Menu",
    responses(
        (status = 200, description = "Categorias do cardápio", body = Vec<Category>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.menu_repo.list_categories().await?;
    Ok((StatusCode::OK, Json(categories)))
}

// POST /api/categories
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Menu",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 409, description = "Nome já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    _management: RequireView<ManagementAccess>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let category = app_state.menu_repo.create_category(&payload.name).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// DELETE /api/categories/{id} — desativa os itens da categoria junto
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Menu",
    responses(
        (status = 204, description = "Categoria removida; itens dela desativados"),
        (status = 404, description = "Categoria não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da categoria")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    _management: RequireView<ManagementAccess>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.menu_repo.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
