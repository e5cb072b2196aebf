use std::sync::LazyLock;

use regex::Regex;

use super::{Parser, ValueError};

/// A program name with its arguments.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommandArgs {
    /// The first token.
    pub program: String,

    /// Every token after the first.
    pub args: Vec<String>,
}

impl CommandArgs {
    /// Creates a command from a program and its arguments.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

/// A token is a `"..."` span or a run of non-quote, non-space characters,
/// and must be followed by whitespace or the end of input. Only ASCII
/// whitespace (`\t \n \f \r` and space) separates tokens.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"("[^"]*"|[^"\t\n\f\r ]+)([\t\n\f\r ]+|$)"#).expect("token pattern is valid")
});

/// Command-line parser, registered as `args`.
///
/// Splits the input into tokens. Quoted tokens keep their quotes, and text
/// that does not form a complete token (for example a bare word glued to a
/// quote) is skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct Args;

impl Parser for Args {
    type Output = CommandArgs;
    type Error = ValueError;

    fn name(&self) -> &'static str {
        "args"
    }

    fn parse(&self, raw: &str) -> Result<CommandArgs, ValueError> {
        let mut tokens = TOKEN
            .find_iter(raw)
            .map(|m| m.as_str().trim())
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        let program = tokens.next().ok_or(ValueError::EmptyArgs)?;
        Ok(CommandArgs::new(program, tokens.collect()))
    }
}
