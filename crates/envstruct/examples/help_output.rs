//! Example: generated help text
//!
//!   cargo run --package envstruct --example help_output -- --help
//!
//! `--help` prints the table even when values are missing; without it the
//! bound struct prints its own table through the `#[env_help]` field.

use envstruct::{EnvStruct, HelpFn};

#[derive(EnvStruct)]
struct Config {
    #[env(var = "PORT", description = "listen port", default = "8080", parser = "port")]
    port: u16,

    #[env(var = "NAME", description = "service name", default = "svc")]
    name: String,

    #[env(var = "LOG_DIR", description = "log directory", parser = "absFile")]
    log_dir: std::path::PathBuf,

    #[env_help]
    help: HelpFn,
}

fn main() -> envstruct::Result<()> {
    if std::env::args().any(|arg| arg == "--help") {
        print!("{}", envstruct::describe::<Config>()?);
        return Ok(());
    }

    let config: Config = envstruct::bind()?;
    print!("{}", config.help.call());
    println!();
    println!("port={} name={} log_dir={}", config.port, config.name, config.log_dir.display());

    Ok(())
}
