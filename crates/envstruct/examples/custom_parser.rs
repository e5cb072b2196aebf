//! Example: registering a custom parser
//!
//!   `TIMEOUT_MS=250 cargo run --package envstruct --example custom_parser`

use std::time::Duration;

use envstruct::{Binder, EnvStruct, Parser, Registry};

/// Milliseconds as a [`Duration`], registered as `millis`.
struct Millis;

impl Parser for Millis {
    type Output = Duration;
    type Error = std::num::ParseIntError;

    fn name(&self) -> &str {
        "millis"
    }

    fn parse(&self, raw: &str) -> Result<Duration, Self::Error> {
        raw.trim().parse().map(Duration::from_millis)
    }
}

#[derive(Debug, EnvStruct)]
struct Config {
    #[env(var = "TIMEOUT_MS", description = "request timeout", default = "1500", parser = "millis")]
    timeout: Duration,

    #[env(var = "RETRIES_MS", description = "retry backoff", default = "100", parser = "millis")]
    backoff: Duration,
}

fn main() -> envstruct::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut registry = Registry::with_builtins();
    registry.register(Millis).register_kind::<Duration>("millis");

    let binder = Binder::new(registry);
    println!("registered parsers: {:?}", binder.registry().names());

    let config: Config = binder.bind()?;
    println!("{config:#?}");

    Ok(())
}
