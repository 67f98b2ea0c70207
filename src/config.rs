//! Runtime configuration for a [`Ui`](crate::ui::Ui).

use crate::modifier::context::DEFAULT_COMPONENT_ID;
use crate::modifier::lazy::LAZY_ALLOW_LIST;
use crate::modifier::{ApplyOptions, LazyPolicy};

/// Configuration for modifier application and name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Apply modifiers grouped by kind instead of by priority alone.
    pub batch: bool,
    /// Component id used when applying modifiers that carry no snapshot.
    pub default_component_id: String,
    /// Let builders defer allow-listed names that are not registered yet.
    pub lazy_resolution: bool,
    /// Names that may be deferred. `None` uses the built-in list.
    pub lazy_allow_list: Option<Vec<String>>,
    /// Log isolated modifier failures.
    pub log_failures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch: false,
            default_component_id: DEFAULT_COMPONENT_ID.to_owned(),
            lazy_resolution: true,
            lazy_allow_list: None,
            log_failures: true,
        }
    }
}

impl Config {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application strategy (builder).
    pub fn with_batch(mut self, batch: bool) -> Self {
        self.batch = batch;
        self
    }

    /// Set the fallback component id (builder).
    pub fn with_default_component_id(mut self, id: impl Into<String>) -> Self {
        self.default_component_id = id.into();
        self
    }

    /// Enable or disable lazy resolution (builder).
    pub fn with_lazy_resolution(mut self, enabled: bool) -> Self {
        self.lazy_resolution = enabled;
        self
    }

    /// Replace the lazy allow-list (builder).
    pub fn with_lazy_allow_list<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lazy_allow_list = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Enable or disable failure logging (builder).
    pub fn with_log_failures(mut self, log: bool) -> Self {
        self.log_failures = log;
        self
    }

    /// Engine options derived from this config.
    pub fn apply_options(&self) -> ApplyOptions {
        ApplyOptions {
            batch: self.batch,
            log_failures: self.log_failures,
        }
    }

    /// Builder lazy policy derived from this config.
    pub fn lazy_policy(&self) -> LazyPolicy {
        if !self.lazy_resolution {
            return LazyPolicy::disabled();
        }
        let allow_list = match &self.lazy_allow_list {
            Some(names) => names.clone(),
            None => LAZY_ALLOW_LIST.iter().map(|s| s.to_string()).collect(),
        };
        LazyPolicy {
            enabled: true,
            allow_list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ModifierRegistry;

    #[test]
    fn defaults() {
        let config = Config::new();
        assert!(!config.batch);
        assert_eq!(config.default_component_id, "unknown");
        assert_eq!(config.apply_options(), ApplyOptions::default());
        assert_eq!(config.lazy_policy(), LazyPolicy::default());
    }

    #[test]
    fn builder_chain() {
        let config = Config::new()
            .with_batch(true)
            .with_default_component_id("app")
            .with_log_failures(false);
        assert_eq!(config.apply_options(), ApplyOptions::batched().quiet());
        assert_eq!(config.default_component_id, "app");
    }

    #[test]
    fn custom_allow_list() {
        let registry = ModifierRegistry::new();
        let policy = Config::new().with_lazy_allow_list(["sparkle"]).lazy_policy();
        assert!(policy.allows("sparkle", &registry));
        assert!(!policy.allows("glassmorphism", &registry));
    }

    #[test]
    fn lazy_resolution_off() {
        let policy = Config::new().with_lazy_resolution(false).lazy_policy();
        assert!(!policy.allows("shadow", &ModifierRegistry::new()));
    }
}
