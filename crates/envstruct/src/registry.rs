//! The parser registry.
//!
//! [`Registry`] maps a parser name to a type-erased resolution closure.
//! Each closure captures one concrete [`Parser`] and, when invoked, first asks
//! the [`Sources`] for the raw string and then runs the parser on it. The
//! typed result travels back as a [`Parsed`] value carrying its [`TypeId`],
//! which the binder compares against the field type before assignment.
//!
//! The registry also holds the kind table: a mapping from a field type to the
//! parser used when a field has no `parser` annotation.
//!
//! A field whose type is a trait object accepts a parser output that
//! implements the trait once the coercion is registered with
//! [`Registry::register_upcast`]. The binder consults these before it reports
//! a type mismatch.
//!
//! Build the registry once during start-up and treat it as read-only while
//! binding:
//!
//! ```rust,ignore
//! let mut registry = Registry::with_builtins();
//! registry
//!     .register(MyParser)
//!     .register_kind::<MyType>("mine")
//!     .register_upcast::<u16, Box<dyn Display>>(|port| Box::new(port));
//! let binder = Binder::new(registry);
//! ```

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

use crate::parser::{AbsFile, Args, Ipv4, Parser, Port, StringParser};
use crate::{Error, Source, Sources};

type ResolveFn = dyn Fn(&Sources, &str, Option<&str>) -> Result<Parsed, Error> + Send + Sync;
type UpcastFn = dyn Fn(Parsed) -> Result<Parsed, Parsed> + Send + Sync;

/// A parsed value with its runtime type and origin.
pub struct Parsed {
    value: Box<dyn Any>,
    type_id: TypeId,
    type_name: &'static str,
    source: Source,
}

impl Parsed {
    /// Wraps a typed value.
    pub fn new<T: 'static>(value: T, source: Source) -> Self {
        Self {
            value: Box::new(value),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            source,
        }
    }

    /// The [`TypeId`] of the wrapped value.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The type name of the wrapped value.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Where the raw string came from.
    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }

    /// Whether the wrapped value is a `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Takes the value out as a `T`, or gives `self` back on mismatch.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged when the wrapped value is not a `T`.
    pub fn downcast<T: 'static>(self) -> Result<T, Self> {
        let Self {
            value,
            type_id,
            type_name,
            source,
        } = self;

        value.downcast::<T>().map(|boxed| *boxed).map_err(|value| Self {
            value,
            type_id,
            type_name,
            source,
        })
    }
}

impl Debug for Parsed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parsed")
            .field("type_name", &self.type_name)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Table of named parsers plus the field-type → parser-name derivation.
#[derive(Default)]
pub struct Registry {
    parsers: HashMap<String, Box<ResolveFn>>,
    kinds: HashMap<TypeId, String>,
    /// Keyed by (parser output, field type).
    upcasts: HashMap<(TypeId, TypeId), Box<UpcastFn>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in parsers.
    ///
    /// Registers `string`, `absFile`, `args`, `port` and `ipv4`, and derives
    /// `string` for `String` fields.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register(StringParser)
            .register(AbsFile)
            .register(Args)
            .register(Port)
            .register(Ipv4)
            .register_kind::<String>("string");
        registry
    }

    /// Registers `parser` under its name.
    ///
    /// A parser already registered under the same name is replaced.
    pub fn register<P: Parser>(&mut self, parser: P) -> &mut Self {
        let name = parser.name().to_string();
        tracing::trace!(parser = %name, output = type_name::<P::Output>(), "registering parser");

        let resolve = move |sources: &Sources, key: &str, default: Option<&str>| {
            let resolved = sources.resolve(key, default, parser.fallback())?;

            match parser.parse(&resolved.value) {
                Ok(value) => Ok(Parsed::new(value, resolved.source)),
                Err(err) => Err(Error::Value {
                    parser: parser.name().to_string(),
                    value: resolved.value,
                    source: Box::new(err),
                }),
            }
        };

        self.parsers.insert(name, Box::new(resolve));
        self
    }

    /// Uses the parser `name` for fields of type `T` that have no `parser`
    /// annotation.
    pub fn register_kind<T: 'static>(&mut self, name: impl Into<String>) -> &mut Self {
        self.kinds.insert(TypeId::of::<T>(), name.into());
        self
    }

    /// Lets a parser producing `From` fill a field of type `To`.
    ///
    /// Meant for trait-object fields: `To` is the trait object and `upcast`
    /// is the unsizing coercion, e.g.
    /// `register_upcast::<u16, Box<dyn Display>>(|port| Box::new(port))`.
    pub fn register_upcast<From: 'static, To: 'static>(
        &mut self,
        upcast: impl Fn(From) -> To + Send + Sync + 'static,
    ) -> &mut Self {
        tracing::trace!(from = type_name::<From>(), to = type_name::<To>(), "registering upcast");

        let convert = move |parsed: Parsed| {
            let source = parsed.source.clone();
            parsed
                .downcast::<From>()
                .map(|value| Parsed::new(upcast(value), source))
        };

        self.upcasts
            .insert((TypeId::of::<From>(), TypeId::of::<To>()), Box::new(convert));
        self
    }

    /// Converts `parsed` to the field type `target`.
    ///
    /// A value that already has the field type passes through unchanged;
    /// otherwise a registered upcast is applied.
    ///
    /// # Errors
    ///
    /// Returns `parsed` unchanged when neither applies.
    pub fn coerce(&self, parsed: Parsed, target: TypeId) -> Result<Parsed, Parsed> {
        if parsed.type_id == target {
            return Ok(parsed);
        }

        match self.upcasts.get(&(parsed.type_id, target)) {
            Some(upcast) => upcast(parsed),
            None => Err(parsed),
        }
    }

    /// The parser derived for a field type, if any.
    #[must_use]
    pub fn parser_for_kind(&self, kind: TypeId) -> Option<&str> {
        self.kinds.get(&kind).map(String::as_str)
    }

    /// Whether a parser is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.parsers.contains_key(name)
    }

    /// Registered parser names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolves `key` through `sources` and parses it with parser `name`.
    ///
    /// # Errors
    ///
    /// - [`Error::ParserNotFound`] when `name` is not registered
    /// - [`Error::NotFound`] / [`Error::InvalidUtf8`] from the resolver
    /// - [`Error::Value`] when the parser rejects the string
    pub fn resolve(
        &self,
        name: &str,
        sources: &Sources,
        key: &str,
        default: Option<&str>,
    ) -> Result<Parsed, Error> {
        let resolve = self
            .parsers
            .get(name)
            .ok_or_else(|| Error::ParserNotFound {
                name: name.to_string(),
            })?;

        resolve(sources, key, default)
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("parsers", &self.names())
            .field("kinds", &self.kinds.len())
            .field("upcasts", &self.upcasts.len())
            .finish()
    }
}
