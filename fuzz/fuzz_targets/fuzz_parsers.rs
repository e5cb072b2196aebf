#![no_main]

use envstruct::{AbsFile, Ipv4, Parser, Port, Registry, Sources, StringParser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // === Built-in parsers should never panic ===
    if let Ok(port) = Port.parse(data) {
        assert_ne!(port, 0);
    }

    let _ = Ipv4.parse(data);

    if !data.contains('\0')
        && let Ok(path) = AbsFile.parse(data)
    {
        assert!(path.is_absolute());
    }

    assert_eq!(StringParser.parse(data).unwrap(), data);

    // === Registry resolution with the input as declared default ===
    let registry = Registry::with_builtins();
    let sources = Sources::env_only();
    for name in registry.names() {
        let _ = registry.resolve(name, &sources, "ENVSTRUCT_FUZZ_UNSET_KEY", Some(data));
    }
});
