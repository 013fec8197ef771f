//! Authentication and password models.

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Validated new password for an existing account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub password: String,
}
