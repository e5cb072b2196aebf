//! # envstruct_macro
//!
//! Procedural macro implementation for the `envstruct` crate.
//!
//! This crate provides `#[derive(EnvStruct)]`. Rust has no runtime
//! reflection, so the derive writes down at compile time what the binder
//! needs at run time: one field descriptor per `#[env(...)]` field, in
//! declaration order, and a function that moves parsed values back into a
//! new struct.
//!
//! **Note:** Users should depend on the `envstruct` crate, not this one
//! directly. The `envstruct` crate re-exports this macro along with the
//! runtime types.
//!
//! # Module Structure
//!
//! - `parse` - Attribute parsing for `#[env(...)]`, `#[env_help]` and `#[env_struct(...)]`
//! - `expand` - Validation of the input and generation of the `EnvStruct` impl

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod expand;
mod parse;

/// Derive macro implementing `envstruct::EnvStruct`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[env(var = "NAME")]` | Lookup key |
/// | `#[env(description = "...")]` | Help text |
/// | `#[env(default = "value")]` | Default string |
/// | `#[env(parser = "name")]` | Registered parser |
/// | `#[env_help]` | Receives the help table (`envstruct::HelpFn`) |
///
/// Options may be combined in one `#[env(...)]`. A missing `var`,
/// `description` or `parser` is reported when binding, not here, so that
/// every problem of a field is listed together. Unknown or repeated options
/// are compile errors.
///
/// Fields without `#[env]` or `#[env_help]` are set to `Default::default()`.
///
/// # Struct Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[env_struct(dotenv = "path")]` | Dotenv file read by `bind()` (default `.env`) |
///
/// # Example
///
/// ```ignore
/// use envstruct::{EnvStruct, HelpFn};
///
/// #[derive(EnvStruct)]
/// #[env_struct(dotenv = ".env.local")]
/// struct Config {
///     #[env(var = "PORT", description = "listen port", parser = "port")]
///     port: u16,
///
///     #[env(var = "NAME", description = "service name", default = "svc")]
///     name: String,
///
///     #[env_help]
///     help: HelpFn,
/// }
///
/// let config: Config = envstruct::bind()?;
/// ```
#[proc_macro_derive(EnvStruct, attributes(env, env_help, env_struct))]
pub fn derive_env_struct(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand::Expander::expand(input).unwrap_or_else(|err| err.to_compile_error().into())
}
