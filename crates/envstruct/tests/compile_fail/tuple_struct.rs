use envstruct::EnvStruct;

#[derive(EnvStruct)]
struct Port(u16);

fn main() {}
