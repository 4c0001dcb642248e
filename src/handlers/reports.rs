// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{AccountingAccess, RequireView},
    models::report::{AggregateStats, ReportQuery},
    services::report,
};

// GET /api/reports/summary — estatísticas agregadas da contabilidade.
// `?scope=completed` restringe a pedidos concluídos; o padrão soma tudo,
// como o relatório original fazia.
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Reports",
    responses(
        (status = 200, description = "Receita e contagens por garçom e por produto", body = AggregateStats),
        (status = 403, description = "Sem acesso à visão da contabilidade")
    ),
    params(
        ("scope" = Option<String>, Query, description = "all (padrão) ou completed")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    _accounting: RequireView<AccountingAccess>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.list_orders().await?;
    let stats = report::compute_stats(&orders, query.scope);

    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/reports/export — o mesmo agregado, como CSV para download
#[utoipa::path(
    get,
    path = "/api/reports/export",
    tag = "Reports",
    responses(
        (status = 200, description = "Relatório CSV em três seções", body = String, content_type = "text/csv"),
        (status = 403, description = "Sem acesso à visão da contabilidade")
    ),
    params(
        ("scope" = Option<String>, Query, description = "all (padrão) ou completed")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_csv(
    State(app_state): State<AppState>,
    _accounting: RequireView<AccountingAccess>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.list_orders().await?;
    let stats = report::compute_stats(&orders, query.scope);
    let body = report::format_csv(&stats);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"relatorio_contabil.csv\"",
            ),
        ],
        body,
    ))
}
