//! Source attribution and the source resolver.
//!
//! [`Sources`] decides which single string is handed to a parser for a key.
//! Resolution follows a strict priority:
//!
//! 1. **Dotenv file** - the file-scoped mapping
//! 2. **Environment variables** - the live process environment
//! 3. **Declared default** - `#[env(default = "...")]`
//! 4. **Parser fallback** - the parser's own default, if it has one
//!
//! If none of them produces a string the lookup fails with
//! [`Error::NotFound`]. A file value therefore always shadows the process
//! environment, and a declared default always wins over a parser fallback.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use crate::Error;
use crate::provider::{DotenvProvider, EnvProvider, Provider};

/// Indicates where a resolved value originated from.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Source {
    /// Value was loaded from a `.env` file.
    ///
    /// The optional [`PathBuf`] contains the path to the file if known.
    DotenvFile(Option<PathBuf>),

    /// Value was read from the process environment.
    Environment,

    /// Value came from the field's `default` annotation.
    Default,

    /// Value came from the parser's built-in fallback.
    Fallback,
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DotenvFile(Some(path)) => write!(f, ".env file ({})", path.display()),

            Self::DotenvFile(None) => write!(f, ".env file"),

            Self::Environment => write!(f, "Environment variable"),

            Self::Default => write!(f, "Default value"),

            Self::Fallback => write!(f, "Parser fallback"),
        }
    }
}

/// A string picked by the resolver, with its origin.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolved {
    /// The raw string to parse.
    pub value: String,

    /// Where it came from.
    pub source: Source,
}

/// The candidate string sources for one bind call.
#[derive(Debug, Default)]
pub struct Sources {
    dotenv: DotenvProvider,
    env: EnvProvider,
}

impl Sources {
    /// Loads the dotenv file at `path` and pairs it with the process environment.
    ///
    /// A missing or unreadable file is treated as an empty mapping.
    pub fn load(path: impl AsRef<Path>) -> Self {
        Self {
            dotenv: DotenvProvider::load_optional(path),
            env: EnvProvider::new(),
        }
    }

    /// Uses the process environment only.
    #[must_use]
    pub fn env_only() -> Self {
        Self::default()
    }

    /// Uses an explicit file-scoped mapping in front of the process environment.
    #[must_use]
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self {
            dotenv: DotenvProvider::from_map(values),
            env: EnvProvider::new(),
        }
    }

    /// The file-scoped mapping.
    #[must_use]
    pub const fn dotenv(&self) -> &DotenvProvider {
        &self.dotenv
    }

    /// Picks the string for `key`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] when no source has a value
    /// - [`Error::InvalidUtf8`] when the environment value is not text
    pub fn resolve(
        &self,
        key: &str,
        default: Option<&str>,
        fallback: Option<&str>,
    ) -> Result<Resolved, Error> {
        let providers: [&dyn Provider; 2] = [&self.dotenv, &self.env];

        for provider in providers {
            if let Some(found) = provider.get(key)? {
                tracing::debug!(key, provider = provider.name(), "resolved value");
                return Ok(Resolved {
                    value: found.value,
                    source: found.source,
                });
            }
        }

        let (value, source) = match (default, fallback) {
            (Some(default), _) => (default, Source::Default),
            (None, Some(fallback)) => (fallback, Source::Fallback),
            (None, None) => return Err(Error::not_found(key)),
        };

        tracing::debug!(key, source = %source, "resolved value");
        Ok(Resolved {
            value: value.to_string(),
            source,
        })
    }
}
