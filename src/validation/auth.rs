use garde::Validate;
use serde::Deserialize;

use crate::error::{AppError, Result};

/// The request payload for user registration.
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[garde(custom(not_blank), length(max = 100))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 6, max = 128))]
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegisterRequest {
    /// Validates the payload and returns it with name and email normalized.
    pub fn into_validated(mut self) -> Result<Self> {
        self.name = self.name.trim().to_string();
        self.email = normalize_email(&self.email);
        self.validate()
            .map_err(|report| AppError::Validation(report.to_string().trim_end().to_string()))?;
        Ok(self)
    }
}

/// Canonical form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn not_blank(value: &str, _context: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("Name is required"));
    }
    Ok(())
}
