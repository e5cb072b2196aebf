//! Field annotations and the tag reader.
//!
//! `#[derive(EnvStruct)]` emits one [`FieldSpec`] per `#[env(...)]` field with
//! the annotation values copied verbatim. [`read`] validates them into a
//! [`FieldDescriptor`]. Missing annotations are not compile errors; they are
//! reported here so that a single field lists every problem at once.

use std::any::TypeId;

use crate::{Error, Registry};

/// Names of the required annotations, as written inside `#[env(...)]`.
pub mod tag {
    /// The lookup key.
    pub const VAR: &str = "var";
    /// The help text.
    pub const DESCRIPTION: &str = "description";
    /// The parser name.
    pub const PARSER: &str = "parser";
}

/// Raw annotation values of one field.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Tags {
    /// `var = "..."`
    pub var: Option<&'static str>,
    /// `description = "..."`
    pub description: Option<&'static str>,
    /// `default = "..."`
    pub default: Option<&'static str>,
    /// `parser = "..."`
    pub parser: Option<&'static str>,
}

/// Static description of one annotated struct field.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    /// Field identifier.
    pub name: &'static str,

    /// Short type label for help output.
    ///
    /// The last path segment of a plain type (`u16`, `PathBuf`), empty for
    /// generic, reference or tuple types.
    pub type_label: &'static str,

    /// Full type name, used in error messages.
    pub type_name: &'static str,

    /// Runtime identity of the field type.
    pub type_id: TypeId,

    /// The annotation values.
    pub tags: Tags,
}

impl FieldSpec {
    /// Describes a field of type `T`.
    #[must_use]
    pub fn new<T: ?Sized + 'static>(name: &'static str, type_label: &'static str, tags: Tags) -> Self {
        Self {
            name,
            type_label,
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            tags,
        }
    }
}

/// Validated binding intent for one field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDescriptor {
    /// Field identifier.
    pub field: &'static str,

    /// Lookup key.
    pub key: String,

    /// Help text.
    pub description: String,

    /// Parser name, explicit or derived from the field type.
    pub parser: String,

    /// Declared default, verbatim.
    pub default: Option<String>,

    /// Short type label for help output.
    pub type_label: &'static str,
}

/// Validates the annotations of `spec`.
///
/// The parser name comes from the `parser` annotation, or from the
/// registry's kind table for the field type.
///
/// # Errors
///
/// Returns [`Error::TagNotSet`] for one missing annotation, or
/// [`Error::Multiple`] listing every missing annotation (parser, var,
/// description, in that order).
pub fn read(spec: &FieldSpec, registry: &Registry) -> Result<FieldDescriptor, Error> {
    let mut errors = Vec::new();
    let tags = &spec.tags;

    let parser: Option<&str> = tags
        .parser
        .or_else(|| registry.parser_for_kind(spec.type_id));
    if parser.is_none() {
        errors.push(Error::tag_not_set(tag::PARSER));
    }

    if tags.var.is_none() {
        errors.push(Error::tag_not_set(tag::VAR));
    }

    if tags.description.is_none() {
        errors.push(Error::tag_not_set(tag::DESCRIPTION));
    }

    if let Some(err) = Error::multiple(errors) {
        return Err(err);
    }

    Ok(FieldDescriptor {
        field: spec.name,
        key: tags.var.unwrap_or_default().to_string(),
        description: tags.description.unwrap_or_default().to_string(),
        parser: parser.unwrap_or_default().to_string(),
        default: tags.default.map(str::to_string),
        type_label: spec.type_label,
    })
}
