//! Value parsers.
//!
//! A [`Parser`] turns the raw string chosen by the resolver into a typed
//! value. Parsers are registered by name in a
//! [`Registry`](crate::Registry) and selected per field with
//! `#[env(parser = "...")]`.
//!
//! # Built-in Parsers
//!
//! | Name | Output | Notes |
//! |------|--------|-------|
//! | `string` | [`String`] | identity, falls back to `""` |
//! | `absFile` | [`PathBuf`](std::path::PathBuf) | absolute, lexically cleaned path |
//! | `args` | [`CommandArgs`] | quote-aware split into program + arguments |
//! | `port` | [`u16`] | non-zero TCP/UDP port |
//! | `ipv4` | [`Ipv4Addr`](std::net::Ipv4Addr) | dotted quad or IPv4-mapped IPv6 |
//!
//! # Custom Parsers
//!
//! ```rust,ignore
//! use envstruct::{Parser, Registry};
//!
//! struct Millis;
//!
//! impl Parser for Millis {
//!     type Output = std::time::Duration;
//!     type Error = std::num::ParseIntError;
//!
//!     fn name(&self) -> &str { "millis" }
//!
//!     fn parse(&self, raw: &str) -> Result<Self::Output, Self::Error> {
//!         raw.parse().map(std::time::Duration::from_millis)
//!     }
//! }
//!
//! let mut registry = Registry::with_builtins();
//! registry.register(Millis);
//! ```

mod abs_file;
mod args;
mod ipv4;
mod port;
mod string;

pub use abs_file::AbsFile;
pub use args::{Args, CommandArgs};
pub use ipv4::Ipv4;
pub use port::Port;
pub use string::StringParser;

use std::error::Error as StdError;
use std::num::ParseIntError;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error as ThisError;

/// A named, typed string parser.
pub trait Parser: Send + Sync + 'static {
    /// The value produced for a field.
    type Output: 'static;

    /// The error produced for rejected input.
    type Error: StdError + Send + Sync + 'static;

    /// The name fields use to select this parser.
    fn name(&self) -> &str;

    /// Parses a raw string.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when the input is not acceptable.
    fn parse(&self, raw: &str) -> Result<Self::Output, Self::Error>;

    /// A string to parse when no source and no declared default exist.
    fn fallback(&self) -> Option<&str> {
        None
    }
}

/// Errors returned by the built-in parsers.
#[derive(Debug, ThisError, Diagnostic)]
pub enum ValueError {
    /// The port was zero.
    #[error("port cannot be 0")]
    #[diagnostic(code(envstruct::value::zero_port))]
    ZeroPort,

    /// The port was not an unsigned 16-bit integer.
    #[error("invalid port: {0}")]
    #[diagnostic(
        code(envstruct::value::invalid_port),
        help("expected an integer between 1 and 65535")
    )]
    InvalidPort(#[from] ParseIntError),

    /// The port carried a `+` sign.
    #[error("invalid port {input:?}: unexpected sign")]
    #[diagnostic(
        code(envstruct::value::invalid_port),
        help("expected an integer between 1 and 65535")
    )]
    SignedPort {
        /// The rejected input.
        input: String,
    },

    /// The argument string contained no tokens.
    #[error("args array size must contain at least one element")]
    #[diagnostic(code(envstruct::value::empty_args))]
    EmptyArgs,

    /// The path could not be made absolute.
    #[error("cannot resolve absolute path for {path:?}: {source}")]
    #[diagnostic(code(envstruct::value::absolute_path))]
    AbsolutePath {
        /// The input path.
        path: PathBuf,

        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The input is not an IPv4 address.
    #[error("invalid IPv4 address {input:?}")]
    #[diagnostic(
        code(envstruct::value::invalid_ipv4),
        help("expected a dotted quad such as 192.168.0.1")
    )]
    InvalidIpv4 {
        /// The rejected input.
        input: String,
    },
}
