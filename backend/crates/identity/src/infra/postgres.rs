//! PostgreSQL Store Implementation

use chrono::{DateTime, Utc};
use platform::password::{ClearTextPassword, HashedPassword};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::credentials::Credentials;
use crate::domain::entity::user::UserAccount;
use crate::domain::store::UserStore;
use crate::domain::validation::validate_new_account;
use crate::domain::value_object::{role::RoleName, user_id::UserId};
use crate::error::{IdentityError, IdentityResult};

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The unique index on `users.email` reports code 23505; everything else
/// stays a database error.
fn map_unique_violation(err: sqlx::Error) -> IdentityError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            IdentityError::EmailTaken
        }
        _ => IdentityError::Database(err),
    }
}

impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<UserAccount>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                email,
                user_name,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn create(&self, user: &UserAccount, password: &str) -> IdentityResult<()> {
        let errors = validate_new_account(&user.email, password);
        if !errors.is_empty() {
            return Err(IdentityError::Validation(errors));
        }

        let clear = ClearTextPassword::new(password.to_string())
            .map_err(|e| IdentityError::Validation(vec![e.to_string()]))?;
        let hash = clear
            .hash()
            .map_err(|e| IdentityError::Internal(e.to_string()))?;
        let credentials = Credentials::new(user.user_id, hash);

        // Account and credentials are one unit; role assignment is not.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                user_name,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.email)
        .bind(&user.user_name)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        sqlx::query(
            r#"
            INSERT INTO user_credentials (
                user_id,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(credentials.user_id.as_uuid())
        .bind(credentials.password_hash.as_phc_string())
        .bind(credentials.created_at)
        .bind(credentials.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn add_to_role(&self, user_id: &UserId, role: &RoleName) -> IdentityResult<()> {
        let role_id = sqlx::query_scalar::<_, i16>(
            "SELECT role_id FROM roles WHERE role_name = $1",
        )
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(role_id) = role_id else {
            return Err(IdentityError::Validation(vec![format!(
                "Role '{}' does not exist",
                role
            )]));
        };

        // Idempotent: re-attaching an existing role is a no-op
        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(role_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn roles_for_user(&self, user_id: &UserId) -> IdentityResult<Vec<RoleName>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.role_name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.role_id
            WHERE ur.user_id = $1
            ORDER BY r.role_name
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(names.into_iter().map(RoleName::new).collect())
    }

    async fn check_password(&self, user_id: &UserId, password: &str) -> IdentityResult<bool> {
        let stored = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM user_credentials WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(stored) = stored else {
            return Ok(false);
        };

        let hash = HashedPassword::from_phc_string(stored)
            .map_err(|_| IdentityError::Internal("Stored password hash is invalid".to_string()))?;

        Ok(hash.verify(&ClearTextPassword::for_verification(password.to_string())))
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    user_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> UserAccount {
        UserAccount {
            user_id: UserId::from_uuid(self.user_id),
            email: self.email,
            user_name: self.user_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
