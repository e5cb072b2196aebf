//! Attribute parsing for `#[env(...)]`, `#[env_help]` and `#[env_struct(...)]`.
//!
//! Options are collected with syn's `ParseNestedMeta`, which gives precise
//! spans for unknown and repeated options. Values must be string literals.
//!
//! # Supported Syntax
//!
//! ## Field-level attributes
//!
//! ```ignore
//! #[env(var = "PORT", description = "listen port", parser = "port")]
//! #[env(var = "NAME", description = "service name", default = "svc")]
//! #[env_help]
//! ```
//!
//! ## Struct-level attributes
//!
//! ```ignore
//! #[env_struct(dotenv = ".env.local")]
//! ```
//!
//! Missing options are not rejected here. The runtime tag reader reports
//! them so that one error lists every missing option of a field.

use std::collections::HashSet;

use syn::meta::ParseNestedMeta;
use syn::{Attribute, DeriveInput, Error as SynError, Field, LitStr, Meta, Result as SynResult};

/// How a field is populated.
pub enum FieldKind {
    /// `#[env(...)]`: resolved and parsed.
    Env(EnvAttr),

    /// `#[env_help]`: receives the help callback.
    Help,

    /// No attribute: `Default::default()`.
    Plain,
}

/// Options of one `#[env(...)]` attribute, verbatim.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EnvAttr {
    /// `var = "..."`
    pub var: Option<String>,

    /// `description = "..."`
    pub description: Option<String>,

    /// `default = "..."`
    pub default: Option<String>,

    /// `parser = "..."`
    pub parser: Option<String>,
}

/// Builder for [`EnvAttr`].
#[derive(Default)]
pub struct Parser {
    attr: EnvAttr,

    /// Options already seen, for duplicate detection.
    seen: HashSet<&'static str>,
}

impl Parser {
    /// Parse a single option from within `#[env(...)]`.
    #[expect(
        clippy::needless_pass_by_value,
        reason = "ParseNestedMeta is passed by value per syn's parse_nested_meta callback signature"
    )]
    fn parse_meta(&mut self, meta: ParseNestedMeta) -> SynResult<()> {
        let ident = meta
            .path
            .get_ident()
            .ok_or_else(|| meta.error("Expected Identifier"))?;
        let name = ident.to_string();

        let key: &'static str = match name.as_str() {
            "var" => "var",
            "description" => "description",
            "default" => "default",
            "parser" => "parser",
            _ => return Err(meta.error(format!("Unknown option `{name}`"))),
        };

        if !self.seen.insert(key) {
            return Err(meta.error(format!("Duplicate option: `{key}`")));
        }

        let lit_str: LitStr = meta.value()?.parse()?;
        let value = Some(lit_str.value());

        match key {
            "var" => self.attr.var = value,
            "description" => self.attr.description = value,
            "default" => self.attr.default = value,
            "parser" => self.attr.parser = value,
            _ => unreachable!(),
        }

        Ok(())
    }

    /// Classify a field by its attributes.
    ///
    /// # Errors
    ///
    /// - more than one `#[env(...)]` or `#[env_help]` on the field
    /// - `#[env(...)]` together with `#[env_help]`
    /// - `#[env_help]` with arguments
    /// - unknown, repeated or non-string options
    pub fn parse_field(field: &Field) -> SynResult<FieldKind> {
        let mut env: Option<EnvAttr> = None;
        let mut help: Option<&Attribute> = None;

        for attr in &field.attrs {
            if attr.path().is_ident("env") {
                if env.is_some() {
                    return Err(SynError::new_spanned(attr, "Duplicate #[env(...)] attribute"));
                }

                let mut builder = Self::default();
                attr.parse_nested_meta(|meta: ParseNestedMeta<'_>| builder.parse_meta(meta))?;
                env = Some(builder.attr);
            } else if attr.path().is_ident("env_help") {
                if !matches!(attr.meta, Meta::Path(_)) {
                    return Err(SynError::new_spanned(attr, "#[env_help] takes no arguments"));
                }

                if help.is_some() {
                    return Err(SynError::new_spanned(attr, "Duplicate #[env_help] attribute"));
                }

                help = Some(attr);
            }
        }

        match (env, help) {
            (Some(_), Some(attr)) => Err(SynError::new_spanned(
                attr,
                "#[env_help] cannot be combined with #[env(...)]",
            )),
            (Some(attr), None) => Ok(FieldKind::Env(attr)),
            (None, Some(_)) => Ok(FieldKind::Help),
            (None, None) => Ok(FieldKind::Plain),
        }
    }
}

/// Parsed `#[env_struct(...)]` attribute.
#[derive(Debug, Default)]
pub struct StructAttr {
    /// Dotenv file path.
    /// Generated from: `#[env_struct(dotenv = "path")]`
    pub dotenv: Option<String>,
}

impl StructAttr {
    /// Parse `#[env_struct(...)]` from a struct.
    pub fn parse_from_struct(input: &DeriveInput) -> SynResult<Self> {
        let mut result = Self::default();

        for attr in &input.attrs {
            if !attr.path().is_ident("env_struct") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("dotenv") {
                    if result.dotenv.is_some() {
                        return Err(meta.error("Duplicate option: `dotenv`"));
                    }

                    let lit_str: LitStr = meta.value()?.parse()?;
                    result.dotenv = Some(lit_str.value());

                    Ok(())
                } else {
                    Err(meta.error("unknown env_struct option"))
                }
            })?;
        }

        Ok(result)
    }
}
