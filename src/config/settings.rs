use std::fmt;
use std::sync::Arc;

/// Trait for providing environment variable access
///
/// This abstraction allows for dependency injection of environment variable
/// sources, enabling clean testing without race conditions from parallel
/// test execution modifying shared global environment state.
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production environment provider that reads from system environment
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Test environment provider with configurable variables
#[cfg(test)]
pub struct MockEnvironment {
    vars: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn empty() -> Self {
        Self {
            vars: std::collections::HashMap::new(),
        }
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

#[cfg(test)]
impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Infrastructure settings loaded at startup
pub struct RegistrySettings {
    database_url: String,
}

impl RegistrySettings {
    /// Load settings from environment variables with defaults
    pub fn from_env_provider(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Self {
        let database_url = env_provider
            .get_var("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "sqlite://registry.db?mode=rwc".to_string());

        Self { database_url }
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Self {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

impl fmt::Debug for RegistrySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySettings")
            .field("database_url", &self.database_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_provided_database_url() {
        let env_provider =
            Arc::new(MockEnvironment::empty().with_var("DATABASE_URL", "sqlite://test.db"));

        let settings = RegistrySettings::from_env_provider(env_provider);

        assert_eq!(settings.database_url(), "sqlite://test.db");
    }

    #[test]
    fn test_settings_default_database_url() {
        let env_provider = Arc::new(MockEnvironment::empty());

        let settings = RegistrySettings::from_env_provider(env_provider);

        assert_eq!(settings.database_url(), "sqlite://registry.db?mode=rwc");
    }

    #[test]
    fn test_settings_empty_database_url_falls_back_to_default() {
        let env_provider = Arc::new(MockEnvironment::empty().with_var("DATABASE_URL", ""));

        let settings = RegistrySettings::from_env_provider(env_provider);

        assert_eq!(settings.database_url(), "sqlite://registry.db?mode=rwc");
    }

    #[test]
    fn test_settings_debug_format() {
        let env_provider =
            Arc::new(MockEnvironment::empty().with_var("DATABASE_URL", "sqlite://debug.db"));

        let settings = RegistrySettings::from_env_provider(env_provider);
        let debug_str = format!("{:?}", settings);

        assert!(debug_str.contains("database_url"));
        assert!(debug_str.contains("sqlite://debug.db"));
    }
}
