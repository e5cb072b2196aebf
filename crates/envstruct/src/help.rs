//! Help text for bound fields.
//!
//! [`Help`] collects one entry per annotated field in declaration order and
//! renders them as an aligned table:
//!
//! ```text
//! Environment:
//! PORT:  [u16]     (default: 8080)  listen port
//! NAME:  [String]                   service name
//! ```
//!
//! The first three columns are padded to their widest cell plus a two-space
//! gap. The description column is written as-is.

use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

const HEADER: &str = "Environment:";
const GAP: usize = 2;
const UNKNOWN_TYPE: &str = "UNKNOWN";

/// One documented variable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HelpEntry {
    /// Lookup key.
    pub key: String,

    /// Short type label; rendered as `UNKNOWN` when empty.
    pub type_name: String,

    /// Declared default, if any.
    pub default: Option<String>,

    /// Help text.
    pub description: String,
}

impl HelpEntry {
    fn cells(&self) -> [String; 4] {
        let type_name = if self.type_name.is_empty() {
            UNKNOWN_TYPE
        } else {
            &self.type_name
        };

        [
            format!("{}:", self.key),
            format!("[{type_name}]"),
            self.default
                .as_ref()
                .map(|d| format!("(default: {d})"))
                .unwrap_or_default(),
            self.description.clone(),
        ]
    }
}

/// Ordered collection of help entries.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Help {
    entries: Vec<HelpEntry>,
}

impl Help {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn add(
        &mut self,
        key: impl Into<String>,
        type_name: impl Into<String>,
        description: impl Into<String>,
        default: Option<String>,
    ) {
        self.entries.push(HelpEntry {
            key: key.into(),
            type_name: type_name.into(),
            default,
            description: description.into(),
        });
    }

    /// The collected entries, in the order they were added.
    #[must_use]
    pub fn entries(&self) -> &[HelpEntry] {
        &self.entries
    }

    /// Renders the table.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Wraps the collector in a callback.
    #[must_use]
    pub fn into_fn(self) -> HelpFn {
        let help = Arc::new(self);
        HelpFn::new(move || help.render())
    }
}

impl Display for Help {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;

        let rows: Vec<[String; 4]> = self.entries.iter().map(HelpEntry::cells).collect();

        let mut widths = [0usize; 3];
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for [key, type_name, default, description] in &rows {
            writeln!(
                f,
                "{key:<w0$}{type_name:<w1$}{default:<w2$}{description}",
                w0 = widths[0] + GAP,
                w1 = widths[1] + GAP,
                w2 = widths[2] + GAP,
            )?;
        }

        Ok(())
    }
}

/// Zero-argument callback producing the help table.
///
/// Declare a field of this type with `#[env_help]` to receive the table of
/// the struct it belongs to. An unbound callback returns an empty string.
#[derive(Clone, Default)]
pub struct HelpFn(Option<Arc<dyn Fn() -> String + Send + Sync>>);

impl HelpFn {
    /// Wraps a closure.
    pub fn new(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self(Some(Arc::new(f)))
    }

    /// Produces the help text.
    #[must_use]
    pub fn call(&self) -> String {
        self.0.as_ref().map(|f| f()).unwrap_or_default()
    }

    /// Whether a binder installed a callback.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.0.is_some()
    }
}

impl Debug for HelpFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HelpFn")
            .field(&if self.is_bound() { "bound" } else { "unbound" })
            .finish()
    }
}
