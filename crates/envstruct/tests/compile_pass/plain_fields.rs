use envstruct::EnvStruct;

#[derive(Debug, Default, EnvStruct)]
struct Config {
    /// Only annotated fields are bound.
    count: u32,
    labels: Vec<String>,

    // Missing options are reported when binding.
    #[env()]
    incomplete: String,
}

fn main() {
    let _ = envstruct::describe::<Config>();
}
