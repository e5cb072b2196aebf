//! # envstruct
//!
//! Bind environment variables and `.env` values into annotated structs.
//!
//! Every bound field names a parser, a lookup key and a description. Parsers
//! live in a [`Registry`] keyed by name, so a field can pick `port` or
//! `absFile` instead of relying on `FromStr`, and applications can register
//! their own.
//!
//! ## Features
//!
//! - **Named parsers** - `string`, `absFile`, `args`, `port` and `ipv4` built in,
//!   custom ones through the [`Parser`] trait
//! - **Strict source priority** - `.env` file, then process environment, then
//!   the declared default, then the parser's own fallback
//! - **All-or-nothing binding** - the struct is only built once every field
//!   has been parsed and type-checked
//! - **Generated help** - an aligned table of every key, exposed through a
//!   [`HelpFn`] field
//! - **Rich diagnostics** - errors carry the field and stage, rendered via [`miette`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use envstruct::{EnvStruct, HelpFn};
//!
//! #[derive(EnvStruct)]
//! struct Config {
//!     #[env(var = "PORT", description = "listen port", parser = "port", default = "8080")]
//!     port: u16,
//!
//!     #[env(var = "NAME", description = "service name", default = "svc")]
//!     name: String,
//!
//!     #[env_help]
//!     help: HelpFn,
//! }
//!
//! fn main() -> envstruct::Result<()> {
//!     let config: Config = envstruct::bind()?;
//!     println!("{}", config.help.call());
//!     Ok(())
//! }
//! ```
//!
//! ## Field Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `var = "NAME"` | Lookup key (required) |
//! | `description = "..."` | Help text (required) |
//! | `default = "value"` | Used when neither the file nor the environment has the key |
//! | `parser = "name"` | Registered parser; optional for kinds with a derived parser (`String`) |
//!
//! `#[env_help]` marks a [`HelpFn`] field that receives the help table.
//! Fields with neither attribute are set to `Default::default()`.
//!
//! ## Struct Attributes
//!
//! ```rust,ignore
//! #[derive(EnvStruct)]
//! #[env_struct(dotenv = "config/app.env")]   // default: ".env"
//! struct Config {
//!     // ...
//! }
//! ```
//!
//! ## Help Output
//!
//! ```text
//! Environment:
//! PORT:  [u16]     (default: 8080)  listen port
//! NAME:  [String]  (default: svc)   service name
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (keys, parser names and sources, never
//! values) and installs no subscriber.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// Re-export the derive macro
pub use envstruct_macro::EnvStruct;

// ============================================================================
// Re-exported Dependencies
// ============================================================================

/// Re-export miette for error handling.
/// Users can use `envstruct::miette` instead of adding miette as a dependency.
pub use miette;

// ============================================================================
// Core Modules
// ============================================================================

mod error;
pub use error::{BoxError, Error};

/// A Result type that displays errors with miette's fancy formatting.
///
/// ```rust,ignore
/// fn main() -> envstruct::Result<()> {
///     let config: Config = envstruct::bind()?;
///     Ok(())
/// }
/// ```
pub type Result<T> = miette::Result<T>;

mod source;
pub use source::{Resolved, Source, Sources};

pub mod parser;
pub use parser::{AbsFile, Args, CommandArgs, Ipv4, Parser, Port, StringParser, ValueError};

pub mod provider;
pub use provider::{DotenvProvider, EnvProvider, Provider, ProviderResult, ProviderValue};

mod registry;
pub use registry::{Parsed, Registry};

pub mod tags;
pub use tags::{FieldDescriptor, FieldSpec, Tags};

mod help;
pub use help::{Help, HelpEntry, HelpFn};

mod binder;
pub use binder::{
    Binder, DEFAULT_DOTENV, EnvStruct, HelpSlot, Values, bind, bind_from, describe,
};
