//! Error types for binding.
//!
//! This module contains the [`Error`] enum and related functionality for
//! reporting binding failures with rich diagnostics via [`miette`].
//!
//! # Error Variants
//!
//! | Variant | When It Occurs |
//! |---------|----------------|
//! | [`Error::NotFound`] | No source produced a value for a field |
//! | [`Error::TagNotSet`] | A required annotation is missing on a field |
//! | [`Error::Multiple`] | Several annotations are missing on one field |
//! | [`Error::ParserNotFound`] | The field names a parser that is not registered |
//! | [`Error::MismatchedTypes`] | The parser produced a type other than the field type |
//! | [`Error::InvalidUtf8`] | An environment value contains non-UTF-8 bytes |
//! | [`Error::Value`] | The concrete parser rejected the raw string |
//! | [`Error::TagRead`] | Wraps annotation failures with the field name |
//! | [`Error::Parse`] | Wraps resolve/parse failures with the field and key |
//!
//! # Stages
//!
//! A bind call fails in exactly one stage. Annotation problems surface as
//! [`Error::TagRead`] before any value is looked up; value problems surface
//! as [`Error::Parse`] or [`Error::MismatchedTypes`]. The wrapped cause is
//! always reachable through [`std::error::Error::source`]:
//!
//! ```rust,ignore
//! match envstruct::bind::<Config>() {
//!     Ok(config) => { /* use config */ }
//!     Err(err) => {
//!         if let Some(envstruct::ValueError::ZeroPort) = err.find::<envstruct::ValueError>() {
//!             eprintln!("pick a non-zero port");
//!         }
//!         eprintln!("{:?}", miette::Report::from(err));
//!     }
//! }
//! ```

use std::error::Error as StdError;

use miette::Diagnostic;
use thiserror::Error as ThisError;

/// Boxed error returned by concrete parsers.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors that can occur while binding a struct.
///
/// # Diagnostic Codes
///
/// | Code | Meaning |
/// |------|---------|
/// | `envstruct::not_found` | No value for a required key |
/// | `envstruct::tag_not_set` | Missing `var`, `description` or `parser` |
/// | `envstruct::multiple_errors` | Several annotation errors on one field |
/// | `envstruct::parser_not_found` | Unknown parser name |
/// | `envstruct::mismatched_types` | Parser output type differs from field type |
/// | `envstruct::invalid_utf8` | Environment value is not UTF-8 |
/// | `envstruct::invalid_value` | Concrete parser rejected the value |
/// | `envstruct::tag_read` | Annotation stage failed for a field |
/// | `envstruct::parse` | Value stage failed for a field |
#[derive(Debug, ThisError, Diagnostic)]
pub enum Error {
    /// No source produced a value for the key.
    #[error("environment variable {var} not found")]
    #[diagnostic(code(envstruct::not_found), severity(Error))]
    NotFound {
        /// The lookup key.
        var: String,

        /// Dynamic help message naming the key.
        #[help]
        help: String,
    },

    /// A required annotation is missing.
    #[error("tag {tag:?} not set")]
    #[diagnostic(
        code(envstruct::tag_not_set),
        help("add `{tag} = \"...\"` to the field's #[env(...)] attribute")
    )]
    TagNotSet {
        /// Name of the missing annotation (`var`, `description` or `parser`).
        tag: &'static str,
    },

    /// Several errors reported together.
    ///
    /// miette renders these as related diagnostics.
    #[error("{}", join_messages(errors))]
    #[diagnostic(code(envstruct::multiple_errors))]
    Multiple {
        /// All accumulated errors, in the order they were found.
        #[related]
        errors: Vec<Error>,
    },

    /// The parser name has no registry entry.
    #[error("parser {name:?} not found")]
    #[diagnostic(
        code(envstruct::parser_not_found),
        help("register the parser with Registry::register before binding")
    )]
    ParserNotFound {
        /// The requested parser name.
        name: String,
    },

    /// The parser returned a value whose type is not the field's type.
    #[error(
        "cannot set field {field:?} of type {field_type:?} to type {parser_type:?} returned from parser"
    )]
    #[diagnostic(code(envstruct::mismatched_types))]
    MismatchedTypes {
        /// The struct field being assigned.
        field: &'static str,

        /// Type produced by the parser.
        parser_type: &'static str,

        /// Declared type of the field.
        field_type: &'static str,
    },

    /// An environment variable contains invalid UTF-8.
    #[error("environment variable {var} contains invalid UTF-8")]
    #[diagnostic(
        code(envstruct::invalid_utf8),
        help("ensure the variable contains valid UTF-8 text")
    )]
    InvalidUtf8 {
        /// The offending key.
        var: String,
    },

    /// A concrete parser rejected its input.
    #[error("parser {parser:?} rejected {value:?}: {source}")]
    #[diagnostic(code(envstruct::invalid_value))]
    Value {
        /// Name of the parser.
        parser: String,

        /// The raw string handed to the parser.
        value: String,

        /// The parser's own error.
        #[source]
        source: BoxError,
    },

    /// Reading the annotations of a field failed.
    #[error("failed to read tags for {field:?}, {source}")]
    #[diagnostic(code(envstruct::tag_read))]
    TagRead {
        /// The struct field.
        field: &'static str,

        /// What was wrong with the annotations.
        #[source]
        source: BoxError,
    },

    /// Resolving or parsing the value of a field failed.
    #[error("failed to parse env variable {var:?} for {field:?}, {source}")]
    #[diagnostic(code(envstruct::parse))]
    Parse {
        /// The struct field.
        field: &'static str,

        /// The lookup key.
        var: String,

        /// The underlying failure.
        #[source]
        source: BoxError,
    },
}

fn join_messages(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Constructor helpers
// ─────────────────────────────────────────────────────────────────────────────

impl Error {
    /// Creates a `NotFound` error with a standard help message.
    pub fn not_found(var: impl Into<String>) -> Self {
        let var = var.into();
        let help = format!("set {var} in your environment or .env file, or declare a default");
        Error::NotFound { var, help }
    }

    /// Creates a `TagNotSet` error.
    #[must_use]
    pub const fn tag_not_set(tag: &'static str) -> Self {
        Error::TagNotSet { tag }
    }

    /// Collects errors into a single error.
    ///
    /// Returns `None` for an empty list and the error itself for a list of one.
    pub fn multiple(errors: Vec<Error>) -> Option<Self> {
        if errors.len() > 1 {
            return Some(Error::Multiple { errors });
        }

        errors.into_iter().next()
    }

    /// Wraps a failure of the annotation stage.
    pub(crate) fn tag_read(field: &'static str, source: Error) -> Self {
        Error::TagRead {
            field,
            source: Box::new(source),
        }
    }

    /// Wraps a failure of the resolve/parse stage.
    pub(crate) fn parse(field: &'static str, var: impl Into<String>, source: Error) -> Self {
        Error::Parse {
            field,
            var: var.into(),
            source: Box::new(source),
        }
    }

    /// Returns the wrapped [`Error`] of a `TagRead` or `Parse` error.
    ///
    /// Returns `None` for other variants and when the wrapped error is a
    /// concrete parser error.
    pub fn cause(&self) -> Option<&Error> {
        match self {
            Error::TagRead { source, .. } | Error::Parse { source, .. } => {
                source.downcast_ref::<Error>()
            }
            _ => None,
        }
    }

    /// Returns the innermost error of the `source()` chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    /// Returns the first error of type `E` in the chain, starting with `self`.
    pub fn find<E: StdError + 'static>(&self) -> Option<&E> {
        let mut current: Option<&(dyn StdError + 'static)> = Some(self);
        while let Some(err) = current {
            if let Some(found) = err.downcast_ref::<E>() {
                return Some(found);
            }
            current = err.source();
        }
        None
    }
}
