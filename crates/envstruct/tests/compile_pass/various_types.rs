use std::net::Ipv4Addr;
use std::path::PathBuf;

use envstruct::{CommandArgs, EnvStruct};

#[derive(EnvStruct)]
struct Config {
    #[env(var = "ROOT", description = "data directory", default = ".", parser = "absFile")]
    root: PathBuf,

    #[env(var = "CMD", description = "command to run", default = "true", parser = "args")]
    command: CommandArgs,

    #[env(var = "HOST", description = "bind address", default = "127.0.0.1", parser = "ipv4")]
    host: std::net::Ipv4Addr,

    #[env(var = "ALT_HOST", description = "alternate address", default = "::ffff:10.0.0.1", parser = "ipv4")]
    alt_host: Ipv4Addr,

    #[env(var = "PLUGINS", description = "plugin list", parser = "plugins")]
    plugins: Box<dyn std::any::Any>,
}

fn main() {
    let _ = envstruct::describe::<Config>();
}
