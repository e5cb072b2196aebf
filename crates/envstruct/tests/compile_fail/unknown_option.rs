use envstruct::EnvStruct;

#[derive(EnvStruct)]
struct Config {
    #[env(var = "PORT", secret = "yes")]
    port: u16,
}

fn main() {}
