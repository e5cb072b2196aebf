//! Dotenv file provider.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{Provider, ProviderResult, ProviderValue};
use crate::Source;

/// Provider backed by the key/value pairs of a `.env` file.
///
/// The file is read once at construction time and the values are cached.
/// It does NOT modify the process environment.
///
/// # Example
///
/// ```rust,ignore
/// use envstruct::provider::DotenvProvider;
///
/// // Missing or malformed files give an empty provider
/// let provider = DotenvProvider::load_optional(".env");
///
/// // Strict loading
/// let provider = DotenvProvider::from_path(".env.local")?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct DotenvProvider {
    values: HashMap<String, String>,
    path: Option<PathBuf>,
}

impl DotenvProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a provider from an in-memory mapping.
    #[must_use]
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values, path: None }
    }

    /// Reads a dotenv file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or
    /// contains a line dotenvy cannot parse.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, dotenvy::Error> {
        let path = path.into();
        let values = dotenvy::from_path_iter(&path)?.collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self {
            values,
            path: Some(path),
        })
    }

    /// Reads a dotenv file, falling back to an empty mapping on any failure.
    pub fn load_optional(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        match Self::from_path(path) {
            Ok(provider) => {
                tracing::debug!(
                    path = %path.display(),
                    keys = provider.len(),
                    "loaded dotenv file"
                );
                provider
            }

            Err(err) if err.not_found() => {
                tracing::debug!(path = %path.display(), "no dotenv file, using empty mapping");
                Self::empty()
            }

            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "ignoring unreadable dotenv file"
                );
                Self::empty()
            }
        }
    }

    /// Path of the file the values came from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of keys in the mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Provider for DotenvProvider {
    fn name(&self) -> &'static str {
        "dotenv"
    }

    fn get(&self, key: &str) -> ProviderResult<ProviderValue> {
        Ok(self.values.get(key).map(|value| {
            ProviderValue::new(value.clone(), Source::DotenvFile(self.path.clone()))
        }))
    }
}
