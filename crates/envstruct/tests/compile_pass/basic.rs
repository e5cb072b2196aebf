use envstruct::EnvStruct;

#[derive(EnvStruct)]
struct Config {
    #[env(var = "PORT", description = "listen port", parser = "port")]
    port: u16,

    #[env(var = "NAME", description = "service name", default = "svc")]
    name: String,
}

fn main() {
    let _ = envstruct::bind::<Config>().map(|c| (c.port, c.name));
}
