// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    models::{auth::Profile, role::Role},
};

// As visões da aplicação. Quem decide o acesso é só o papel do perfil,
// avaliado a cada requisição — nada de cachear decisão de permissão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Waiter,
    Kitchen,
    Accounting,
    Management,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Waiter => "waiter",
            View::Kitchen => "kitchen",
            View::Accounting => "accounting",
            View::Management => "management",
        }
    }
}

// Regras de inclusão fixas:
//   - waiter: toda role autenticada entra
//   - kitchen: admin e kitchen
//   - accounting: admin e accounting
//   - management: só admin
pub fn permitted_views(role: Role) -> &'static [View] {
    match role {
        Role::Waiter => &[View::Waiter],
        Role::Kitchen => &[View::Waiter, View::Kitchen],
        Role::Accounting => &[View::Waiter, View::Accounting],
        Role::Admin => &[View::Waiter, View::Kitchen, View::Accounting, View::Management],
    }
}

// Navegação: visão pedida fora do permitido (ou rota desconhecida, que
// chega como None) cai na visão padrão do garçom — redireciona, não erra.
pub fn resolve_view(role: Role, requested: Option<View>) -> View {
    match requested {
        Some(view) if permitted_views(role).contains(&view) => view,
        _ => View::Waiter,
    }
}

/// 1. O Trait que define o que é uma Visão exigida
pub trait ViewDef: Send + Sync + 'static {
    fn view() -> View;
}

/// 2. O Extractor (Guardião): rejeita com 403 quando o papel do perfil
/// autenticado não inclui a visão exigida pelo endpoint
pub struct RequireView<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireView<T>
where
    T: ViewDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai o perfil (colocado nos extensions pelo auth_middleware)
        let profile = parts
            .extensions
            .get::<Profile>()
            .ok_or(AppError::InvalidToken)?;

        // B. Verifica a regra de inclusão — função pura, sem banco
        let required = T::view();
        if !permitted_views(profile.role).contains(&required) {
            return Err(AppError::ViewForbidden(required.as_str()));
        }

        Ok(RequireView(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS VISÕES (TIPOS)
// ---

pub struct KitchenAccess;
impl ViewDef for KitchenAccess {
    fn view() -> View {
        View::Kitchen
    }
}

pub struct AccountingAccess;
impl ViewDef for AccountingAccess {
    fn view() -> View {
        View::Accounting
    }
}

pub struct ManagementAccess;
impl ViewDef for ManagementAccess {
    fn view() -> View {
        View::Management
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permitted_views_are_exact_per_role() {
        assert_eq!(permitted_views(Role::Waiter), [View::Waiter]);
        assert_eq!(permitted_views(Role::Kitchen), [View::Waiter, View::Kitchen]);
        assert_eq!(permitted_views(Role::Accounting), [View::Waiter, View::Accounting]);
        assert_eq!(
            permitted_views(Role::Admin),
            [View::Waiter, View::Kitchen, View::Accounting, View::Management]
        );
    }

    #[test]
    fn every_role_reaches_the_waiter_view() {
        for role in [Role::Waiter, Role::Kitchen, Role::Accounting, Role::Admin] {
            assert!(permitted_views(role).contains(&View::Waiter));
        }
    }

    #[test]
    fn resolve_returns_requested_view_when_permitted() {
        assert_eq!(resolve_view(Role::Kitchen, Some(View::Kitchen)), View::Kitchen);
        assert_eq!(resolve_view(Role::Admin, Some(View::Management)), View::Management);
    }

    #[test]
    fn forbidden_or_unknown_requests_fall_back_to_waiter() {
        assert_eq!(resolve_view(Role::Waiter, Some(View::Management)), View::Waiter);
        assert_eq!(resolve_view(Role::Kitchen, Some(View::Accounting)), View::Waiter);
        assert_eq!(resolve_view(Role::Accounting, None), View::Waiter);
    }

    #[test]
    fn management_is_admin_only() {
        for role in [Role::Waiter, Role::Kitchen, Role::Accounting] {
            assert!(!permitted_views(role).contains(&View::Management));
        }
    }
}
