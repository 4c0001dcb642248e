// src/models/role.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// O papel de um perfil autenticado. Governa quais visões o usuário alcança.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Waiter,
    Kitchen,
    Accounting,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Waiter => "waiter",
            Role::Kitchen => "kitchen",
            Role::Accounting => "accounting",
            Role::Admin => "admin",
        };
        f.write_str(s)
    }
}
