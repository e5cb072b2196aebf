use envstruct::EnvStruct;

#[derive(EnvStruct)]
#[env_struct(dotenv = "config/app.env")]
struct Config {
    #[env(var = "NAME", description = "service name", default = "svc", parser = "string")]
    name: String,
}

fn main() {
    assert_eq!(Config::dotenv_path(), Some("config/app.env"));
}
