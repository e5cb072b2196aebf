//! Process environment provider.

use super::{Provider, ProviderResult, ProviderValue};
use crate::{Error, Source};

/// Provider that reads the live process environment.
///
/// The environment is only read, never written.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvProvider;

impl EnvProvider {
    /// Creates a new environment provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Provider for EnvProvider {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn get(&self, key: &str) -> ProviderResult<ProviderValue> {
        match std::env::var(key) {
            Ok(value) => Ok(Some(ProviderValue::new(value, Source::Environment))),

            Err(std::env::VarError::NotPresent) => Ok(None),

            Err(std::env::VarError::NotUnicode(_)) => Err(Error::InvalidUtf8 {
                var: key.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_provider_missing_key() {
        let provider = EnvProvider::new();
        let result = provider.get("ENVSTRUCT_SURELY_UNSET_VARIABLE_4F1C").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_env_provider_reads_path() {
        // PATH is present in every test environment we run in.
        let provider = EnvProvider::new();
        let value = provider.get("PATH").unwrap().unwrap();
        assert_eq!(value.source, Source::Environment);
    }
}
