//! Runtime configuration
//!
//! The admin credential pair is the only secret-ish setting; it comes from
//! the environment with demo defaults so a fresh checkout runs out of the box.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE: &str = "olympiad.db";

const ADMIN_EMAIL_VAR: &str = "OLYMPIAD_ADMIN_EMAIL";
const ADMIN_PASSWORD_VAR: &str = "OLYMPIAD_ADMIN_PASSWORD";

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@olympiad.local";
pub const DEFAULT_ADMIN_PASSWORD: &str = "olympiad-demo";

/// Plaintext admin credential pair as configured. Hashing happens when the
/// credential store is built at startup.
#[derive(Clone, Debug)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn from_env() -> Self {
        let email = std::env::var(ADMIN_EMAIL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());
        let password = std::env::var(ADMIN_PASSWORD_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string());

        Self { email, password }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Env vars are unset in the test environment unless a test sets them.
        let creds = AdminCredentials::from_env();
        assert!(!creds.email.is_empty());
        assert!(!creds.password.is_empty());
    }
}
