//! Options integration tests.
//!
//! Loads configuration files and discovers sources in a scratch project.

use std::fs;
use std::path::{Path, PathBuf};

use nameof_options::{discover_files, parse_config_file, NameofOptions, OptionsError};
use tempfile::TempDir;

/// Helper: create `relative` under `root` with placeholder contents.
fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "export {};\n").unwrap();
}

/// Helper: discovered paths relative to `root`, with `/` separators.
fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<String> {
    files
        .into_iter()
        .map(|path| path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

// ============================================================================
// Config files
// ============================================================================

#[test]
fn test_parse_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nameof.json");
    fs::write(
        &path,
        r#"{ "nameofName": "nm", "include": ["lib/**/*.ts"], "macroModules": ["my.macro"] }"#,
    )
    .unwrap();

    let options = parse_config_file(&path).unwrap();
    assert_eq!(options.nameof_name, "nm");
    assert_eq!(options.include, vec!["lib/**/*.ts"]);
    assert_eq!(options.macro_modules, vec!["my.macro"]);
    assert_eq!(options.exclude, NameofOptions::default().exclude);
}

#[test]
fn test_parse_config_file_missing() {
    let dir = TempDir::new().unwrap();
    let error = parse_config_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(error, OptionsError::Read { .. }));
}

#[test]
fn test_parse_config_file_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nameof.json");
    fs::write(&path, "{ \"nameofName\": 3 }").unwrap();
    let error = parse_config_file(&path).unwrap_err();
    assert!(matches!(error, OptionsError::Parse { .. }));
    assert!(error.to_string().contains("nameof.json"));
}

#[test]
fn test_parse_config_file_invalid_marker() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nameof.json");
    fs::write(&path, r#"{ "nameofName": "" }"#).unwrap();
    assert!(matches!(
        parse_config_file(&path),
        Err(OptionsError::InvalidNameofName { .. })
    ));
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_discover_default_patterns() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    touch(root, "src/b.ts");
    touch(root, "src/a.ts");
    touch(root, "src/nested/deep/c.tsx");
    touch(root, "src/d.js");
    touch(root, "src/readme.md");
    touch(root, "lib/e.ts");
    touch(root, "node_modules/src/f.ts");

    let files = discover_files(root, &NameofOptions::default()).unwrap();
    assert_eq!(
        relative(root, files),
        vec!["src/a.ts", "src/b.ts", "src/d.js", "src/nested/deep/c.tsx"]
    );
}

#[test]
fn test_discover_with_exclude() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    touch(root, "src/keep.ts");
    touch(root, "src/generated/skip.ts");
    touch(root, "src/skip.test.ts");

    let options = NameofOptions {
        exclude: vec!["src/generated".to_string(), "**/*.test.ts".to_string()],
        ..NameofOptions::default()
    };
    let files = discover_files(root, &options).unwrap();
    assert_eq!(relative(root, files), vec!["src/keep.ts"]);
}

#[test]
fn test_discover_missing_root() {
    let dir = TempDir::new().unwrap();
    let result = discover_files(&dir.path().join("nope"), &NameofOptions::default());
    assert!(matches!(result, Err(OptionsError::Read { .. })));
}

#[test]
fn test_discover_prunes_nested_excluded_directories() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    touch(root, "src/app.ts");
    touch(root, "src/packages/lib/node_modules/dep/index.ts");
    touch(root, "src/packages/lib/index.ts");

    let options = NameofOptions {
        exclude: vec!["**/node_modules".to_string()],
        ..NameofOptions::default()
    };
    let files = discover_files(root, &options).unwrap();
    assert_eq!(relative(root, files), vec!["src/app.ts", "src/packages/lib/index.ts"]);
}
