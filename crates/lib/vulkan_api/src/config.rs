//! Backend configuration.

/// Fixed administrator address accepted by `POST /login`.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@vulkan.com";

/// Fixed administrator password accepted by `POST /login`.
pub const DEFAULT_ADMIN_PASSWORD: &str = "123456";

/// Token handed out on successful login.
pub const DEFAULT_ACCESS_TOKEN: &str = "fake-jtw-token";

/// Address used when the backend is served over TCP.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Configuration for the simulated backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    pub admin_email: String,
    pub admin_password: String,
    /// Token returned by a successful login.
    pub access_token: String,
    /// Require `Authorization: Bearer <access_token>` on domain routes.
    pub enforce_auth: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            admin_email: DEFAULT_ADMIN_EMAIL.into(),
            admin_password: DEFAULT_ADMIN_PASSWORD.into(),
            access_token: DEFAULT_ACCESS_TOKEN.into(),
            enforce_auth: false,
        }
    }
}

impl BackendConfig {
    /// Reads configuration from environment variables with the fixed defaults.
    ///
    /// | Variable                | Default            |
    /// |-------------------------|--------------------|
    /// | `VULKAN_BIND_ADDR`      | `127.0.0.1:3000`   |
    /// | `VULKAN_ADMIN_EMAIL`    | `admin@vulkan.com` |
    /// | `VULKAN_ADMIN_PASSWORD` | `123456`           |
    /// | `VULKAN_ENFORCE_AUTH`   | `false`            |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("VULKAN_BIND_ADDR").unwrap_or(defaults.bind_addr),
            admin_email: std::env::var("VULKAN_ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: std::env::var("VULKAN_ADMIN_PASSWORD")
                .unwrap_or(defaults.admin_password),
            access_token: defaults.access_token,
            enforce_auth: std::env::var("VULKAN_ENFORCE_AUTH")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(defaults.enforce_auth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_admin() {
        let config = BackendConfig::default();
        assert_eq!(config.admin_email, "admin@vulkan.com");
        assert_eq!(config.admin_password, "123456");
        assert_eq!(config.access_token, "fake-jtw-token");
        assert!(!config.enforce_auth);
    }
}
