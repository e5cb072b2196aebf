//! Value providers consulted by the source resolver.
//!
//! A [`Provider`] answers "is there a string for this key?". The resolver
//! asks providers in a fixed order and the first answer wins.
//!
//! # Built-in Providers
//!
//! - [`DotenvProvider`] - file-scoped mapping loaded from a `.env` file
//! - [`EnvProvider`] - the live process environment
//!
//! # Custom Providers
//!
//! ```rust,ignore
//! use envstruct::provider::{Provider, ProviderResult, ProviderValue};
//! use envstruct::Source;
//!
//! struct Fixed;
//!
//! impl Provider for Fixed {
//!     fn name(&self) -> &str { "fixed" }
//!
//!     fn get(&self, key: &str) -> ProviderResult<ProviderValue> {
//!         Ok((key == "PORT").then(|| ProviderValue::new("8080", Source::Environment)))
//!     }
//! }
//! ```

mod dotenv;
mod env;

pub use self::dotenv::DotenvProvider;
pub use env::EnvProvider;

use crate::{Error, Source};

/// A raw string together with where it came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderValue {
    /// The raw string value (parsed later by the selected parser).
    pub value: String,

    /// Where this value originated from.
    pub source: Source,
}

impl ProviderValue {
    /// Creates a new provider value.
    #[must_use]
    pub fn new(value: impl Into<String>, source: Source) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }
}

/// Result type for provider lookups.
///
/// - `Ok(Some(value))` - key found
/// - `Ok(None)` - key not present in this provider (try the next one)
/// - `Err(e)` - the key is present but unusable
pub type ProviderResult<T> = Result<Option<T>, Error>;

/// A source of raw strings keyed by variable name.
pub trait Provider: Send + Sync {
    /// Returns the provider's name for logging.
    fn name(&self) -> &str;

    /// Looks up a single key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key exists but its value cannot be read as text.
    fn get(&self, key: &str) -> ProviderResult<ProviderValue>;
}
