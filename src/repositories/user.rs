use deadpool_postgres::Pool;
use tokio_postgres::error::SqlState;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::user::{Role, User},
};

const USER_COLUMNS: &str = "id, name, email, password, role, created_at";

/// Creates a new user in the database.
///
/// A duplicate email surfaces as a validation error.
pub async fn create_user(
    pool: &Pool,
    id: Uuid,
    name: &str,
    email: &str,
    password_hash: &str,
    role: Role,
) -> Result<User> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            &format!(
                r#"
                INSERT INTO users (id, name, email, password, role)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {USER_COLUMNS}
                "#
            ),
            &[&id, &name, &email, &password_hash, &role],
        )
        .await
        .map_err(|e| {
            if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                AppError::Validation("User already exists with this email".to_string())
            } else {
                AppError::Database(e)
            }
        })?;
    User::try_from(&row)
}

/// Inserts a user unless the email is already taken.
///
/// Returns `None` when a row with that email already exists.
pub async fn create_user_if_absent(
    pool: &Pool,
    id: Uuid,
    name: &str,
    email: &str,
    password_hash: &str,
    role: Role,
) -> Result<Option<User>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            &format!(
                r#"
                INSERT INTO users (id, name, email, password, role)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (email) DO NOTHING
                RETURNING {USER_COLUMNS}
                "#
            ),
            &[&id, &name, &email, &password_hash, &role],
        )
        .await?;
    row.as_ref().map(User::try_from).transpose()
}

/// Finds a user by their email address.
pub async fn find_by_email(pool: &Pool, email: &str) -> Result<Option<User>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"),
            &[&email],
        )
        .await?;
    row.as_ref().map(User::try_from).transpose()
}

/// Finds a user by their ID.
pub async fn find_by_id(pool: &Pool, user_id: &Uuid) -> Result<Option<User>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"),
            &[user_id],
        )
        .await?;
    row.as_ref().map(User::try_from).transpose()
}
