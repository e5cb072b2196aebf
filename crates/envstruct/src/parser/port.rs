use super::{Parser, ValueError};

/// Non-zero `u16` port parser, registered as `port`.
///
/// Only plain decimal digits are accepted; a leading `+` is rejected.
#[derive(Clone, Copy, Debug, Default)]
pub struct Port;

impl Parser for Port {
    type Output = u16;
    type Error = ValueError;

    fn name(&self) -> &'static str {
        "port"
    }

    fn parse(&self, raw: &str) -> Result<u16, ValueError> {
        if raw.starts_with('+') {
            return Err(ValueError::SignedPort {
                input: raw.to_string(),
            });
        }

        match raw.parse::<u16>()? {
            0 => Err(ValueError::ZeroPort),
            port => Ok(port),
        }
    }
}
