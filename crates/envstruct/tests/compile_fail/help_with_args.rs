use envstruct::{EnvStruct, HelpFn};

#[derive(EnvStruct)]
struct Config {
    #[env_help(verbose)]
    help: HelpFn,
}

fn main() {}
