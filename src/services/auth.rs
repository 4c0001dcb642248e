// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProfileRepository,
    models::{
        auth::{Claims, Profile, RegisterPayload},
        role::Role,
    },
};

#[derive(Clone)]
pub struct AuthService {
    profile_repo: ProfileRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(profile_repo: ProfileRepository, jwt_secret: String) -> Self {
        Self { profile_repo, jwt_secret }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<String, AppError> {
        // Hashing fora do runtime async (bcrypt é CPU-bound)
        let password = payload.password.clone();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let profile = self
            .profile_repo
            .create_profile(&payload.email, &payload.name, payload.role, &hashed_password)
            .await?;

        tracing::info!("Perfil criado: {} ({})", profile.email, profile.role);

        self.create_token(profile.id)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let profile = self
            .profile_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = password.to_owned();
        let password_hash = profile.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password, &password_hash)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(profile.id)
    }

    // Valida o token e devolve o perfil correspondente. Perfil ausente ou
    // desativado equivale a não autenticado — nenhuma visão é liberada.
    pub async fn validate_token(&self, token: &str) -> Result<Profile, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.profile_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::ProfileNotFound)
    }

    pub async fn list_waiters(&self) -> Result<Vec<Profile>, AppError> {
        self.profile_repo.list_waiters().await
    }

    pub async fn remove_waiter(&self, id: Uuid) -> Result<(), AppError> {
        // Só perfis de garçom saem por este caminho; admins não se apagam aqui
        match self.profile_repo.find_by_id(id).await? {
            Some(profile) if profile.role == Role::Waiter => {
                self.profile_repo.deactivate_profile(id).await
            }
            Some(_) => Err(AppError::ResourceNotFound(format!("Garçom {}", id))),
            None => Err(AppError::ResourceNotFound(format!("Garçom {}", id))),
        }
    }

    fn create_token(&self, profile_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: profile_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
