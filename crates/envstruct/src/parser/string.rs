use std::convert::Infallible;

use super::Parser;

/// Identity parser, registered as `string`.
///
/// Falls back to the empty string, so a `string` field never reports
/// `NotFound`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringParser;

impl Parser for StringParser {
    type Output = String;
    type Error = Infallible;

    fn name(&self) -> &'static str {
        "string"
    }

    fn parse(&self, raw: &str) -> Result<String, Infallible> {
        Ok(raw.to_string())
    }

    fn fallback(&self) -> Option<&str> {
        Some("")
    }
}
