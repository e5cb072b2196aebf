use envstruct::EnvStruct;

#[derive(EnvStruct)]
struct Config<T> {
    #[env(var = "VALUE", description = "value", parser = "string")]
    value: T,
}

fn main() {}
