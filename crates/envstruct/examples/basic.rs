//! Example: binding a struct from the environment
//!
//! Run with missing vars to see the error report:
//!   cargo run --package envstruct --example basic
//!
//! Run with required vars set:
//!   `APP_PORT=8080 APP_ROOT=./data cargo run --package envstruct --example basic`
//!
//! Set `RUST_LOG=envstruct=debug` to see which source satisfied each key.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use envstruct::{CommandArgs, EnvStruct};

#[derive(Debug, EnvStruct)]
struct Config {
    #[env(var = "APP_PORT", description = "listen port", parser = "port")]
    port: u16,

    #[env(var = "APP_HOST", description = "bind address", default = "127.0.0.1", parser = "ipv4")]
    host: Ipv4Addr,

    #[env(var = "APP_ROOT", description = "data directory", parser = "absFile")]
    root: PathBuf,

    #[env(var = "APP_NAME", description = "service name", default = "envstruct-demo")]
    name: String,

    #[env(var = "APP_WORKER", description = "worker command", default = "worker --threads 4", parser = "args")]
    worker: CommandArgs,
}

fn main() -> envstruct::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config: Config = envstruct::bind()?;

    println!("Successfully bound config!");
    println!("  APP_PORT   = {}", config.port);
    println!("  APP_HOST   = {}", config.host);
    println!("  APP_ROOT   = {}", config.root.display());
    println!("  APP_NAME   = {}", config.name);
    println!(
        "  APP_WORKER = {} {:?}",
        config.worker.program, config.worker.args
    );

    Ok(())
}
