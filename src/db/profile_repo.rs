// src/db/profile_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{auth::Profile, role::Role},
};

// O repositório de perfis, responsável por todas as interações com a tabela 'profiles'
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um perfil pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles WHERE email = $1 AND active = TRUE",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    // Busca um perfil pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles WHERE id = $1 AND active = TRUE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    // Cria um novo perfil no banco de dados
    pub async fn create_profile(
        &self,
        email: &str,
        name: &str,
        role: Role,
        password_hash: &str,
    ) -> Result<Profile, AppError> {
        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (email, name, role, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(role)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Converte violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    // Lista os garçons ativos (visão de gestão)
    pub async fn list_waiters(&self) -> Result<Vec<Profile>, AppError> {
        let waiters = sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles WHERE role = $1 AND active = TRUE ORDER BY name",
        )
        .bind(Role::Waiter)
        .fetch_all(&self.pool)
        .await?;

        Ok(waiters)
    }

    // Desativação lógica: o perfil some do login e das listagens, mas os
    // pedidos antigos continuam apontando para ele.
    pub async fn deactivate_profile(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE profiles SET active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound(format!("Perfil {}", id)));
        }
        Ok(())
    }
}
