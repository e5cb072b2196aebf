use envstruct::EnvStruct;

#[derive(EnvStruct)]
enum Mode {
    Fast,
    Slow,
}

fn main() {}
