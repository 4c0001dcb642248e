// src/handlers/orders.rs

use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedProfile,
        rbac::{KitchenAccess, RequireView},
    },
    models::order::{CreateOrderPayload, OrderDetail, UpdateStatusPayload},
    services::ticket,
};

// GET /api/orders — pedidos completos, mais novos primeiro
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "Pedidos com itens e garçom resolvidos", body = Vec<OrderDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.list_orders().await?;
    Ok((StatusCode::OK, Json(orders)))
}

// POST /api/orders — o garçom autenticado lança o pedido da mesa
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado", body = OrderDetail),
        (status = 400, description = "Mesa fora do intervalo ou dados inválidos"),
        (status = 404, description = "Item do cardápio inexistente ou inativo"),
        (status = 500, description = "Escrita parcial: pedido órfão informado no corpo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    AuthenticatedProfile(profile): AuthenticatedProfile,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let order = app_state
        .order_service
        .create_order(profile.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// PUT /api/orders/{id}/status — a cozinha avança o fluxo do pedido
#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    tag = "Orders",
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = OrderDetail),
        (status = 403, description = "Sem acesso à visão da cozinha"),
        (status = 404, description = "Pedido não encontrado"),
        (status = 422, description = "Transição de status inválida")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do pedido")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    _kitchen: RequireView<KitchenAccess>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .update_status(id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(order)))
}

// GET /api/orders/{id}/ticket — comanda em texto puro para a impressora
#[utoipa::path(
    get,
    path = "/api/orders/{id}/ticket",
    tag = "Orders",
    responses(
        (status = 200, description = "Comanda de cozinha em texto puro", body = String, content_type = "text/plain"),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do pedido")
    ),
    security(("api_jwt" = []))
)]
pub async fn order_ticket(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.get_order(id).await?;
    let body = ticket::render_ticket(&order);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    ))
}

// GET /api/orders/stream — canal SSE com um evento por mudança de pedido.
// Receptores atrasados perdem eventos antigos (lag do broadcast); o
// consumidor deve recarregar o snapshot e seguir — recomputar é idempotente.
#[utoipa::path(
    get,
    path = "/api/orders/stream",
    tag = "Orders",
    responses(
        (status = 200, description = "Stream SSE de eventos de pedido", body = String, content_type = "text/event-stream"),
        (status = 403, description = "Sem acesso à visão da cozinha")
    ),
    security(("api_jwt" = []))
)]
pub async fn stream_orders(
    State(app_state): State<AppState>,
    _kitchen: RequireView<KitchenAccess>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = app_state.order_events.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|event| match event {
        Ok(event) => {
            let data = serde_json::to_string(&event).ok()?;
            Some(Ok::<_, Infallible>(Event::default().event("order").data(data)))
        }
        // Receptor ficou para trás: pula os eventos perdidos
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
