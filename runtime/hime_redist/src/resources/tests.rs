use super::*;
use hime_lexer_core::AutomatonBuilder;
use pretty_assertions::assert_eq;

fn automaton_bytes() -> Vec<u8> {
    let mut builder = AutomatonBuilder::new();
    let x = builder.add_state(Some(2));
    builder.on_byte(0, b'x', x);
    builder.to_bytes()
}

// === Directory Loader ===

#[test]
fn resolves_next_to_module() {
    let loader = DirectoryLoader::new();
    assert_eq!(
        loader.path_of("gen/calc/parser.rs", "lexer.bin"),
        PathBuf::from("gen/calc/lexer.bin")
    );
    let rooted = DirectoryLoader::with_root("/opt/app");
    assert_eq!(
        rooted.path_of("calc/parser.rs", "lexer.bin"),
        PathBuf::from("/opt/app/calc/lexer.bin")
    );
}

#[test]
fn module_without_directory() {
    let loader = DirectoryLoader::new();
    assert_eq!(loader.path_of("parser.rs", "lexer.bin"), PathBuf::from("lexer.bin"));
}

#[test]
fn reads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("lexer.bin"), automaton_bytes()).unwrap();
    let module = dir.path().join("parser.rs");
    let loader = DirectoryLoader::new();

    let bytes = loader.load(module.to_str().unwrap(), "lexer.bin").unwrap();
    assert_eq!(bytes.as_ref(), automaton_bytes().as_slice());
    let automaton = load_automaton(&loader, module.to_str().unwrap(), "lexer.bin").unwrap();
    assert_eq!(automaton.states_count(), 2);
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let module = dir.path().join("parser.rs");
    let error = DirectoryLoader::new()
        .load(module.to_str().unwrap(), "missing.bin")
        .unwrap_err();
    assert!(matches!(error, ResourceError::NotFound { ref name, .. } if name == "missing.bin"));
}

// === Embedded Resources ===

#[test]
fn embedded_blobs_are_borrowed() {
    static BLOB: &[u8] = &[1, 2, 3];
    let mut resources = EmbeddedResources::new();
    resources.insert("data.bin", BLOB);
    assert_eq!(resources.len(), 1);
    let bytes = resources.load("any/module.rs", "data.bin").unwrap();
    assert!(matches!(bytes, Cow::Borrowed(_)));
    assert_eq!(bytes.as_ref(), BLOB);
}

#[test]
fn embedded_missing_names_module() {
    let resources = EmbeddedResources::new();
    assert!(resources.is_empty());
    let error = resources.load("calc/parser.rs", "lexer.bin").unwrap_err();
    assert_eq!(
        error.to_string(),
        "resource `lexer.bin` not found for module `calc/parser.rs`"
    );
}

// === Automata ===

#[test]
fn malformed_automaton_is_reported() {
    static BROKEN: &[u8] = &[0, 0, 0, 0];
    let mut resources = EmbeddedResources::new();
    resources.insert("lexer.bin", BROKEN);
    let error = load_automaton(&resources, "calc/parser.rs", "lexer.bin").unwrap_err();
    assert!(matches!(
        error,
        LoadError::Automaton {
            source: AutomatonError::Empty,
            ..
        }
    ));
    assert_eq!(
        error.to_string(),
        "malformed automaton `lexer.bin`: automaton has no states; state 0 is required"
    );
}

#[test]
fn missing_automaton_is_transparent() {
    let error = load_automaton(&EmbeddedResources::new(), "m.rs", "lexer.bin").unwrap_err();
    assert!(matches!(error, LoadError::Resource(ResourceError::NotFound { .. })));
    assert_eq!(error.to_string(), "resource `lexer.bin` not found for module `m.rs`");
}
