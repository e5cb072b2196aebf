use envstruct::EnvStruct;

#[derive(EnvStruct)]
struct Marker;

fn main() {}
