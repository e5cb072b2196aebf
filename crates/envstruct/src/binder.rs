//! The binding engine.
//!
//! A bind call runs in two phases so that a struct is never observed half
//! populated:
//!
//! 1. **Tag pass** - every annotated field is validated by the tag reader.
//!    The first invalid field aborts the call with [`Error::TagRead`].
//!    Valid fields contribute a help entry and a queued parse.
//! 2. **Value pass** - queued parses run in declaration order. Each value is
//!    resolved, parsed and type-checked against its field. A value of another
//!    type is accepted only through an upcast registered with
//!    [`Registry::register_upcast`]. The first failure aborts with
//!    [`Error::Parse`] or [`Error::MismatchedTypes`].
//!
//! Only when both passes succeed is the struct assembled from the collected
//! values.

use std::any::type_name;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::help::{Help, HelpFn};
use crate::registry::{Parsed, Registry};
use crate::source::Sources;
use crate::tags::{self, FieldDescriptor, FieldSpec};
use crate::Error;

/// Dotenv file read when neither the binder nor the struct names one.
pub const DEFAULT_DOTENV: &str = ".env";

/// A struct that can be bound from the environment.
///
/// Implemented by `#[derive(EnvStruct)]`. The derive lists the `#[env]`
/// fields in declaration order and moves the parsed values back into a new
/// struct. A manual implementation must keep [`fields`](Self::fields) and
/// [`assemble`](Self::assemble) in the same order.
pub trait EnvStruct: Sized + 'static {
    /// The annotated fields, in declaration order.
    fn fields() -> Vec<FieldSpec>;

    /// Builds the struct from values parsed for [`fields`](Self::fields).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedTypes`] when a value does not have the
    /// requested type.
    fn assemble(values: &mut Values, help: &mut HelpSlot) -> Result<Self, Error>;

    /// Dotenv path from `#[env_struct(dotenv = "...")]`.
    fn dotenv_path() -> Option<&'static str> {
        None
    }
}

/// Parsed values in declaration order, consumed by [`EnvStruct::assemble`].
#[derive(Debug, Default)]
pub struct Values {
    queue: VecDeque<(&'static str, Parsed)>,
}

impl Values {
    fn push(&mut self, field: &'static str, parsed: Parsed) {
        self.queue.push_back((field, parsed));
    }

    /// Number of values not yet taken.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether every value has been taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Takes the next value as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedTypes`] when the next value belongs to a
    /// different field, is missing, or is not a `T`.
    pub fn take<T: 'static>(&mut self, field: &'static str) -> Result<T, Error> {
        let mismatch = |parser_type| Error::MismatchedTypes {
            field,
            parser_type,
            field_type: type_name::<T>(),
        };

        match self.queue.pop_front() {
            Some((name, parsed)) if name == field => {
                parsed.downcast::<T>().map_err(|parsed| mismatch(parsed.type_name()))
            }
            Some((_, parsed)) => Err(mismatch(parsed.type_name())),
            None => Err(mismatch("nothing")),
        }
    }
}

/// The help callback of one bind call, handed to the first `#[env_help]`
/// field that can hold it.
#[derive(Debug, Default)]
pub struct HelpSlot {
    help: Option<HelpFn>,
}

impl HelpSlot {
    /// Creates a slot holding `help`.
    #[must_use]
    pub const fn new(help: HelpFn) -> Self {
        Self { help: Some(help) }
    }

    /// Value for an `#[env_help]` field of type `T`.
    ///
    /// A `HelpFn` field receives the callback if it has not been handed out
    /// yet. Every other case yields `T::default()`.
    pub fn take<T: Default + 'static>(&mut self) -> T {
        let mut value = T::default();

        let any: &mut dyn std::any::Any = &mut value;
        if let Some(slot) = any.downcast_mut::<HelpFn>()
            && let Some(help) = self.help.take()
        {
            *slot = help;
        }

        value
    }
}

#[derive(Clone, Debug, Default)]
enum Dotenv {
    #[default]
    Auto,
    Path(PathBuf),
    Disabled,
}

/// Binds [`EnvStruct`] types using a parser registry.
///
/// ```rust,ignore
/// let mut registry = Registry::with_builtins();
/// registry.register(Millis);
///
/// let binder = Binder::new(registry).with_dotenv_path("config/app.env");
/// let config: Config = binder.bind()?;
/// ```
#[derive(Debug)]
pub struct Binder {
    registry: Registry,
    dotenv: Dotenv,
}

impl Default for Binder {
    fn default() -> Self {
        Self::new(Registry::with_builtins())
    }
}

impl Binder {
    /// Creates a binder using `registry`.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            dotenv: Dotenv::Auto,
        }
    }

    /// Replaces the registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Reads `path` instead of the struct's or the default dotenv file.
    #[must_use]
    pub fn with_dotenv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv = Dotenv::Path(path.into());
        self
    }

    /// Skips the dotenv file entirely.
    #[must_use]
    pub fn without_dotenv(mut self) -> Self {
        self.dotenv = Dotenv::Disabled;
        self
    }

    /// The parser registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Binds `T` from the dotenv file and the process environment.
    ///
    /// The dotenv path is the one set with
    /// [`with_dotenv_path`](Self::with_dotenv_path), else the struct's
    /// `#[env_struct(dotenv = "...")]`, else [`DEFAULT_DOTENV`]. A missing
    /// file is not an error.
    ///
    /// # Errors
    ///
    /// - [`Error::TagRead`] when a field's annotations are incomplete
    /// - [`Error::Parse`] when a value is missing, unreadable or rejected
    /// - [`Error::MismatchedTypes`] when a parser's output is not the field type
    pub fn bind<T: EnvStruct>(&self) -> Result<T, Error> {
        let sources = match &self.dotenv {
            Dotenv::Auto => Sources::load(T::dotenv_path().unwrap_or(DEFAULT_DOTENV)),
            Dotenv::Path(path) => Sources::load(path),
            Dotenv::Disabled => Sources::env_only(),
        };

        self.bind_with(&sources)
    }

    /// Binds `T` from explicit sources.
    ///
    /// # Errors
    ///
    /// Same as [`bind`](Self::bind).
    pub fn bind_with<T: EnvStruct>(&self, sources: &Sources) -> Result<T, Error> {
        let ty = type_name::<T>();
        tracing::debug!(ty, "binding");

        let (fields, help) = self.read_fields::<T>()?;
        let mut slot = HelpSlot::new(help.into_fn());

        let mut values = Values::default();
        for (spec, descriptor) in &fields {
            let parsed = self.parse_field(sources, descriptor)?;
            let parsed = self
                .registry
                .coerce(parsed, spec.type_id)
                .map_err(|parsed| Error::MismatchedTypes {
                    field: spec.name,
                    parser_type: parsed.type_name(),
                    field_type: spec.type_name,
                })?;

            values.push(spec.name, parsed);
        }

        tracing::debug!(ty, values = values.len(), "assembling");
        let value = T::assemble(&mut values, &mut slot)?;
        tracing::debug!(ty, "bound");
        Ok(value)
    }

    /// Builds the help table of `T` without looking up any value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TagRead`] when a field's annotations are incomplete.
    pub fn describe<T: EnvStruct>(&self) -> Result<Help, Error> {
        self.read_fields::<T>().map(|(_, help)| help)
    }

    /// Tag pass.
    fn read_fields<T: EnvStruct>(&self) -> Result<(Vec<(FieldSpec, FieldDescriptor)>, Help), Error> {
        let mut help = Help::new();
        let mut fields = Vec::new();

        for spec in T::fields() {
            let descriptor =
                tags::read(&spec, &self.registry).map_err(|err| Error::tag_read(spec.name, err))?;

            help.add(
                descriptor.key.as_str(),
                descriptor.type_label,
                descriptor.description.as_str(),
                descriptor.default.clone(),
            );
            fields.push((spec, descriptor));
        }

        Ok((fields, help))
    }

    fn parse_field(&self, sources: &Sources, descriptor: &FieldDescriptor) -> Result<Parsed, Error> {
        let parsed = self
            .registry
            .resolve(
                &descriptor.parser,
                sources,
                &descriptor.key,
                descriptor.default.as_deref(),
            )
            .map_err(|err| Error::parse(descriptor.field, descriptor.key.as_str(), err))?;

        tracing::debug!(
            field = descriptor.field,
            key = %descriptor.key,
            parser = %descriptor.parser,
            source = %parsed.source(),
            "field parsed"
        );

        Ok(parsed)
    }
}

/// Binds `T` with a default [`Binder`].
///
/// # Errors
///
/// See [`Binder::bind`].
pub fn bind<T: EnvStruct>() -> Result<T, Error> {
    Binder::default().bind()
}

/// Builds the help table of `T` with a default [`Binder`].
///
/// # Errors
///
/// See [`Binder::describe`].
pub fn describe<T: EnvStruct>() -> Result<Help, Error> {
    Binder::default().describe::<T>()
}

/// Reads `path` as the dotenv file and binds `T` with a default [`Binder`].
///
/// # Errors
///
/// See [`Binder::bind`].
pub fn bind_from<T: EnvStruct>(path: impl AsRef<Path>) -> Result<T, Error> {
    Binder::default()
        .with_dotenv_path(path.as_ref())
        .bind()
}
