use sqlx::PgPool;

use crate::dto::auth_dto::RegisterPayload;
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::crypto::{hash_password, verify_password};

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterPayload, role: &str) -> Result<User> {
        let email = payload.email.trim().to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            return Err(Error::Conflict("A user with this email already exists".into()));
        }

        let password_hash = hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("password hashing failed: {}", e)))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, department, year, university, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(payload.username.trim())
        .bind(&email)
        .bind(&password_hash)
        .bind(&payload.department)
        .bind(&payload.year)
        .bind(&payload.university)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict("A user with this email already exists".into())
            }
            other => other.into(),
        })?;

        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// The same error is returned for an unknown email and a wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let invalid = || Error::Unauthorized("Invalid email or password".into());

        let user = self
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or_else(invalid)?;

        let ok = verify_password(password, &user.password_hash).map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "stored password hash is unreadable");
            invalid()
        })?;
        if !ok {
            return Err(invalid());
        }
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }
}
