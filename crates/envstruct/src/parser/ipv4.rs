use std::net::{IpAddr, Ipv4Addr};

use super::{Parser, ValueError};

/// IPv4 address parser, registered as `ipv4`.
///
/// Accepts a dotted quad or an IPv4-mapped IPv6 address such as
/// `::ffff:10.0.0.1`. Anything else is rejected with
/// [`ValueError::InvalidIpv4`]; the parser never yields a placeholder
/// address.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ipv4;

impl Parser for Ipv4 {
    type Output = Ipv4Addr;
    type Error = ValueError;

    fn name(&self) -> &'static str {
        "ipv4"
    }

    fn parse(&self, raw: &str) -> Result<Ipv4Addr, ValueError> {
        let invalid = || ValueError::InvalidIpv4 {
            input: raw.to_string(),
        };

        match raw.parse::<IpAddr>().map_err(|_| invalid())? {
            IpAddr::V4(addr) => Ok(addr),
            IpAddr::V6(addr) => addr.to_ipv4_mapped().ok_or_else(invalid),
        }
    }
}
