//! Fetch settings shared by the fetcher and the HTTP transport.

use std::time::Duration;

use crate::redirect::DEFAULT_MAX_REDIRECTS;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for hopfetch.
pub const DEFAULT_USER_AGENT: &str = concat!("hopfetch/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Maximum number of redirects followed before giving up.
    pub max_redirects: u32,
    /// Timeout applied to each HTTP attempt.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Domains the transport may connect to. `None` allows every domain.
    pub allowed_domains: Option<Vec<String>>,
    /// Whether to honor proxy environment variables.
    pub system_proxy: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allowed_domains: None,
            system_proxy: true,
        }
    }
}

impl FetchSettings {
    /// Sets the redirect limit.
    pub fn with_max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Restricts connections to the given domains and their subdomains.
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Enables or disables proxies taken from the environment.
    pub fn with_system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = FetchSettings::default();
        assert_eq!(settings.max_redirects, 5);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(settings.user_agent.starts_with("hopfetch/"));
        assert!(settings.allowed_domains.is_none());
        assert!(settings.system_proxy);
    }

    #[test]
    fn test_settings_builder() {
        let settings = FetchSettings::default()
            .with_max_redirects(2)
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("custom/1.0")
            .with_allowed_domains(vec!["example.com".to_string()])
            .with_system_proxy(false);

        assert_eq!(settings.max_redirects, 2);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.user_agent, "custom/1.0");
        assert_eq!(settings.allowed_domains, Some(vec!["example.com".to_string()]));
        assert!(!settings.system_proxy);
    }
}
