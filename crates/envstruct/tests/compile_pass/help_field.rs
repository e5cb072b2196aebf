use envstruct::{EnvStruct, HelpFn};

#[derive(EnvStruct)]
struct Config {
    #[env(var = "PORT", description = "listen port", default = "8080", parser = "port")]
    port: u16,

    #[env_help]
    help: HelpFn,

    // Not a HelpFn, receives the default.
    #[env_help]
    usage: String,
}

fn main() {
    if let Ok(config) = envstruct::bind::<Config>() {
        let _ = (config.port, config.help.call(), config.usage);
    }
}
