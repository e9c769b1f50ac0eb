use crate::error::{AppError, Result};
use crate::models::session::Identity;
use crate::models::user::{Role, User, UserProfile};
use crate::repositories::user as user_repo;
use crate::state::AppState;
use crate::validation::auth::{RegisterRequest, normalize_email};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use rand::{rngs::OsRng, RngCore};
use serde::Serialize;
use std::sync::LazyLock;
use uuid::Uuid;
use zeroize::Zeroize;

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 2;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 1;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const ADMIN_ONLY: &str = "Access denied. Admin only.";

/// Verified against when the email is unknown, so both failures cost one Argon2 run.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("feedback-hub-dummy-password").ok());

/// A freshly issued token together with the account it belongs to.
#[derive(Debug, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

/// Hashes a password using Argon2id.
///
/// # Arguments
///
/// * `password` - The password to hash.
///
/// # Returns
///
/// A `Result` containing the PHC-encoded hash.
pub fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut salt_bytes)
        .map_err(|e| AppError::Internal(format!("Failed to generate salt: {}", e)))?;

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Hashing(format!("Salt encoding error: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Hashing(format!("Argon2 params: {}", e)))?,
    );

    let password_hash = argon2
        .hash_password(&password_bytes, &salt)
        .map_err(|e| AppError::Hashing(format!("Argon2 hash error: {}", e)))?
        .to_string();

    password_bytes.zeroize();
    tracing::debug!("Password hashed successfully with Argon2");
    Ok(password_hash)
}

/// Verifies a password against a stored hash.
///
/// Parameters are read from the PHC string, so hashes made with other cost
/// settings still verify.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let mut password_bytes = password.as_bytes().to_vec();
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Hashing(format!("Hash parse error: {}", e)))?;
    let result = Argon2::default()
        .verify_password(&password_bytes, &parsed_hash)
        .is_ok();

    password_bytes.zeroize();
    tracing::debug!("Password verification completed");
    Ok(result)
}

fn session_for(state: &AppState, user: &User) -> Result<AuthSession> {
    Ok(AuthSession {
        token: state.tokens.issue(user.id, user.role)?,
        user: UserProfile::from(user),
    })
}

/// Registers a new account with the `user` role and signs it in.
pub async fn register(state: &AppState, request: RegisterRequest) -> Result<AuthSession> {
    let request = request.into_validated()?;
    tracing::debug!("🔐 Registering user: {}", request.email);

    if user_repo::find_by_email(&state.db, &request.email).await?.is_some() {
        return Err(AppError::Validation(
            "User already exists with this email".to_string(),
        ));
    }

    let hashed_password = hash_password(&request.password)?;
    let user = user_repo::create_user(
        &state.db,
        Uuid::new_v4(),
        &request.name,
        &request.email,
        &hashed_password,
        Role::User,
    )
    .await?;

    tracing::info!("✅ User created with ID: {}", user.id);
    session_for(state, &user)
}

/// Checks credentials and returns the matching account.
///
/// Unknown email and wrong password fail identically.
pub async fn authenticate_user(state: &AppState, email: &str, password: &str) -> Result<User> {
    let email = normalize_email(email);
    tracing::debug!("🔐 Authenticating user: {}", email);

    let Some(user) = user_repo::find_by_email(&state.db, &email).await? else {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = verify_password(password, hash);
        }
        return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
    };

    if !verify_password(password, &user.password)? {
        return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
    }

    tracing::info!("✅ User authenticated: {}", user.id);
    Ok(user)
}

/// Signs in any account.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<AuthSession> {
    let user = authenticate_user(state, email, password).await?;
    session_for(state, &user)
}

/// Signs in an account that holds the `admin` role.
pub async fn admin_login(state: &AppState, email: &str, password: &str) -> Result<AuthSession> {
    let user = authenticate_user(state, email, password).await?;
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(ADMIN_ONLY.to_string()));
    }
    session_for(state, &user)
}

/// Loads the profile behind a verified identity.
pub async fn current_user(state: &AppState, identity: &Identity) -> Result<UserProfile> {
    user_repo::find_by_id(&state.db, &identity.user_id)
        .await?
        .map(|user| UserProfile::from(&user))
        .ok_or_else(|| AppError::Authentication("User not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("Correct horse battery staple", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let first = hash_password("admin123").unwrap();
        let second = hash_password("admin123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn dummy_hash_rejects_any_password() {
        let hash = DUMMY_HASH.as_deref().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!verify_password("admin123", hash).unwrap());
        assert!(!verify_password("", hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(matches!(
            verify_password("admin123", "not-a-phc-string"),
            Err(AppError::Hashing(_))
        ));
    }
}
