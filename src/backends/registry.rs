//! Backend lookup by selector.
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - Selectors compare case-insensitively
//! - Unknown or missing selectors fall back to the default backend

use std::collections::HashMap;
use std::sync::Arc;

use crate::backends::{AlternateBackend, Backend, BuildError, PrimaryBackend};
use crate::config::BackendsConfig;

/// Backends keyed by lowercase selector, plus the fallback.
#[derive(Debug)]
pub struct BackendRegistry {
    by_selector: HashMap<String, Arc<dyn Backend>>,
    default: Arc<dyn Backend>,
}

impl BackendRegistry {
    /// Register `backends` under their selectors. `default` must be one of them.
    pub fn new(backends: Vec<Arc<dyn Backend>>, default: &str) -> Result<Self, BuildError> {
        let mut by_selector = HashMap::new();
        for backend in backends {
            for selector in backend.selectors() {
                by_selector.insert(selector.to_ascii_lowercase(), backend.clone());
            }
        }

        let default = by_selector
            .get(&default.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| BuildError::UnknownDefault(default.to_string()))?;

        Ok(Self {
            by_selector,
            default,
        })
    }

    /// Register the primary and alternate backends from configuration.
    pub fn from_config(config: &BackendsConfig) -> Result<Self, BuildError> {
        let primary: Arc<dyn Backend> = Arc::new(PrimaryBackend::from_config(&config.primary)?);
        let alternate: Arc<dyn Backend> = Arc::new(AlternateBackend::from_config(&config.alternate)?);
        Self::new(vec![primary, alternate], &config.default)
    }

    /// Backend for `selector`, or the default.
    pub fn select(&self, selector: Option<&str>) -> &Arc<dyn Backend> {
        selector
            .and_then(|s| self.by_selector.get(&s.to_ascii_lowercase()))
            .unwrap_or(&self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> BackendRegistry {
        BackendRegistry::from_config(&BackendsConfig::default()).unwrap()
    }

    #[test]
    fn test_selects_alternate() {
        let registry = registry();
        assert_eq!(registry.select(Some("kugo")).name(), "kugou");
        assert_eq!(registry.select(Some("kugou")).name(), "kugou");
        assert_eq!(registry.select(Some("KuGou")).name(), "kugou");
    }

    #[test]
    fn test_falls_back_to_primary() {
        let registry = registry();
        assert_eq!(registry.select(None).name(), "gdstudio");
        assert_eq!(registry.select(Some("")).name(), "gdstudio");
        assert_eq!(registry.select(Some("netease")).name(), "gdstudio");
        assert_eq!(registry.select(Some("gdstudio")).name(), "gdstudio");
    }

    #[test]
    fn test_unknown_default() {
        let config = BackendsConfig {
            default: "missing".to_string(),
            ..BackendsConfig::default()
        };
        let err = BackendRegistry::from_config(&config).unwrap_err();
        assert!(matches!(err, BuildError::UnknownDefault(ref name) if name == "missing"));
    }
}
