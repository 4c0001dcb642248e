// src/handlers/views.rs

use axum::{
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    middleware::{
        auth::AuthenticatedProfile,
        rbac::{permitted_views, resolve_view, View},
    },
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermittedViewsResponse {
    pub views: Vec<View>,
    pub default_view: View,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveViewQuery {
    // String crua: rota desconhecida não é erro, cai na visão padrão
    pub view: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedViewResponse {
    pub view: View,
}

// GET /api/views — quais visões o papel da sessão alcança
#[utoipa::path(
    get,
    path = "/api/views",
    tag = "Views",
    responses(
        (status = 200, description = "Visões permitidas para o papel da sessão", body = PermittedViewsResponse),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_views(
    AuthenticatedProfile(profile): AuthenticatedProfile,
) -> Result<impl IntoResponse, AppError> {
    let views = permitted_views(profile.role).to_vec();

    Ok((
        StatusCode::OK,
        Json(PermittedViewsResponse { views, default_view: View::Waiter }),
    ))
}

// GET /api/views/resolve?view=kitchen — navegação: devolve a visão pedida
// quando permitida, senão a visão padrão do garçom (redireciona, não erra)
#[utoipa::path(
    get,
    path = "/api/views/resolve",
    tag = "Views",
    responses(
        (status = 200, description = "Visão de destino para a navegação", body = ResolvedViewResponse),
        (status = 401, description = "Não autenticado")
    ),
    params(
        ("view" = Option<String>, Query, description = "Visão pedida (waiter, kitchen, accounting, management)")
    ),
    security(("api_jwt" = []))
)]
pub async fn resolve(
    AuthenticatedProfile(profile): AuthenticatedProfile,
    Query(query): Query<ResolveViewQuery>,
) -> Result<impl IntoResponse, AppError> {
    let requested = query.view.as_deref().and_then(parse_view);
    let view = resolve_view(profile.role, requested);

    Ok((StatusCode::OK, Json(ResolvedViewResponse { view })))
}

fn parse_view(raw: &str) -> Option<View> {
    match raw {
        "waiter" => Some(View::Waiter),
        "kitchen" => Some(View::Kitchen),
        "accounting" => Some(View::Accounting),
        "management" => Some(View::Management),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_view_strings_parse_to_none() {
        assert_eq!(parse_view("kitchen"), Some(View::Kitchen));
        assert_eq!(parse_view("mutfak"), None);
        assert_eq!(parse_view(""), None);
    }
}
