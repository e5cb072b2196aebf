#![no_main]

use arbitrary::Arbitrary;
use envstruct::Help;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Entry {
    key: String,
    type_name: String,
    description: String,
    default: Option<String>,
}

fuzz_target!(|entries: Vec<Entry>| {
    let mut help = Help::new();
    for entry in &entries {
        help.add(
            entry.key.as_str(),
            entry.type_name.as_str(),
            entry.description.as_str(),
            entry.default.clone(),
        );
    }

    // === Rendering should never panic and always starts with the header ===
    let rendered = help.render();
    assert!(rendered.starts_with("Environment:\n"));
    assert_eq!(help.entries().len(), entries.len());
});
