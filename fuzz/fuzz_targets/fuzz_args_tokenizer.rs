#![no_main]

use envstruct::{Args, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // === Tokenizing should never panic ===
    let Ok(cmd) = Args.parse(data) else {
        return;
    };

    // === Every token is non-empty and comes from the input ===
    assert!(!cmd.program.is_empty());
    assert!(data.contains(cmd.program.as_str()));

    for arg in &cmd.args {
        assert!(!arg.is_empty());
        assert!(data.contains(arg.as_str()));
    }

    // === Quoted tokens keep both quotes ===
    for token in std::iter::once(&cmd.program).chain(&cmd.args) {
        if token.starts_with('"') {
            assert!(token.len() >= 2 && token.ends_with('"'));
        }
    }
});
