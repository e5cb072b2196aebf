use envstruct::EnvStruct;

#[derive(EnvStruct)]
struct Config {
    #[env(var = "A", description = "port", var = "B")]
    port: u16,
}

fn main() {}
