use envstruct::{EnvStruct, HelpFn};

#[derive(EnvStruct)]
struct Config {
    #[env(var = "HELP", description = "help", parser = "string")]
    #[env_help]
    help: HelpFn,
}

fn main() {}
