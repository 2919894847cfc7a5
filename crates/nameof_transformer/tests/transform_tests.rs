//! Transformer integration tests.
//!
//! Runs whole source texts through parse, resolve and splice, and checks the
//! patched text and the diagnostics.

use std::fs;

use nameof_diagnostics::DiagnosticCategory;
use nameof_options::NameofOptions;
use nameof_transformer::{replace_in_files, replace_in_text, OutputMode, ReplaceResult};
use tempfile::TempDir;

/// Helper: transform `source` with default options.
fn replace(source: &str) -> ReplaceResult {
    let _ = env_logger::builder().is_test(true).try_init();
    replace_in_text("test.ts", source, &NameofOptions::default())
}

/// Helper: transform `source`, expect no errors, and return the new text.
fn transformed(source: &str) -> String {
    let result = replace(source);
    assert!(
        !result.has_errors(),
        "source: {}\ndiagnostics: {:?}",
        source,
        result.diagnostics.diagnostics()
    );
    result.output.unwrap_or_else(|| panic!("nothing replaced in {}", source))
}

/// Helper: codes of all error diagnostics.
fn error_codes(result: &ReplaceResult) -> Vec<u32> {
    result
        .diagnostics
        .diagnostics()
        .iter()
        .filter(|diagnostic| diagnostic.is_error())
        .map(|diagnostic| diagnostic.code)
        .collect()
}

// ============================================================================
// Call forms
// ============================================================================

#[test]
fn test_default_call() {
    assert_eq!(transformed("nameof(console.log);"), "\"log\";");
}

#[test]
fn test_full_with_positive_index() {
    assert_eq!(transformed("nameof.full(console.log.bind, 1);"), "\"log.bind\";");
}

#[test]
fn test_full_with_negative_index() {
    assert_eq!(transformed("nameof.full(console.log.bind, -1);"), "\"bind\";");
}

#[test]
fn test_split() {
    assert_eq!(transformed("nameof.split(console.log);"), "[\"console\", \"log\"];");
}

#[test]
fn test_array() {
    assert_eq!(
        transformed("nameof.array(console.log, console.warn);"),
        "[\"log\", \"warn\"];"
    );
}

#[test]
fn test_full_with_interpolation() {
    assert_eq!(
        transformed("nameof.full(console.log.name[nameof.interpolate((i - 3) * 2)].toString);"),
        "`console.log.name[${(i - 3) * 2}].toString`;"
    );
}

#[test]
fn test_type_argument() {
    assert_eq!(transformed("nameof<MyInterface>();"), "\"MyInterface\";");
}

#[test]
fn test_import_type_uses_qualifier() {
    assert_eq!(transformed("nameof<import(\"m\").Q>();"), "\"Q\";");
}

#[test]
fn test_import_type_without_qualifier_is_reported() {
    let result = replace("nameof<import(\"m\")>();");
    assert_eq!(error_codes(&result), vec![9008]);
    assert!(result.output.is_none());
}

#[test]
fn test_numeric_index_renders_like_javascript() {
    assert_eq!(transformed("nameof.full(a[1e21]);"), "\"a[1e+21]\";");
    assert_eq!(transformed("nameof.full(a[1e-7]);"), "\"a[1e-7]\";");
}

#[test]
fn test_function_argument() {
    assert_eq!(transformed("nameof<User>(u => u.profile.email);"), "\"email\";");
}

#[test]
fn test_this_access() {
    assert_eq!(transformed("const key = nameof(this.state);"), "const key = \"state\";");
}

// ============================================================================
// Surrounding text
// ============================================================================

#[test]
fn test_unrelated_text_is_preserved() {
    let source = "// leading\nconst a   =  nameof(a.b) ;\nfoo( 1,2 );\n";
    assert_eq!(transformed(source), "// leading\nconst a   =  \"b\" ;\nfoo( 1,2 );\n");
}

#[test]
fn test_calls_inside_nested_syntax() {
    let source = "class A {\n    m() {\n        return [nameof(x.y), f(nameof(z))];\n    }\n}\n";
    assert_eq!(
        transformed(source),
        "class A {\n    m() {\n        return [\"y\", f(\"z\")];\n    }\n}\n"
    );
}

#[test]
fn test_no_calls_leaves_file_untouched() {
    let result = replace("const x = name(of);\n");
    assert!(result.output.is_none());
    assert_eq!(result.transformed_calls, 0);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_transformed_count_message() {
    let result = replace("nameof(a);\nnameof(b);\n");
    assert_eq!(result.transformed_calls, 2);
    let message = result
        .diagnostics
        .diagnostics()
        .iter()
        .find(|diagnostic| diagnostic.code == 9101)
        .expect("count message");
    assert_eq!(message.category, DiagnosticCategory::Message);
}

// ============================================================================
// Marker name
// ============================================================================

#[test]
fn test_custom_marker_name() {
    let options = NameofOptions {
        nameof_name: "nm".to_string(),
        ..NameofOptions::default()
    };
    let result = replace_in_text("test.ts", "nm(a.b);\nnameof(c.d);\n", &options);
    assert_eq!(result.output.as_deref(), Some("\"b\";\nnameof(c.d);\n"));
}

#[test]
fn test_macro_import_sets_marker_and_is_removed() {
    let source = "import nm from \"ts-nameof.macro\";\nconst k = nm(a.b);\n";
    assert_eq!(transformed(source), "const k = \"b\";\n");
}

#[test]
fn test_other_imports_are_kept() {
    let source = "import fs from \"fs\";\nnameof(fs.readFile);\n";
    assert_eq!(transformed(source), "import fs from \"fs\";\n\"readFile\";\n");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_nested_nameof_is_reported() {
    let result = replace("nameof(nameof(x));");
    assert_eq!(error_codes(&result), vec![9014]);
}

#[test]
fn test_unused_interpolation_is_reported() {
    let result = replace("const v = nameof.interpolate(x);");
    assert_eq!(error_codes(&result), vec![9015]);
}

#[test]
fn test_error_location() {
    let result = replace("let a;\n  nameof(a, b);\n");
    let error = result
        .diagnostics
        .diagnostics()
        .iter()
        .find(|diagnostic| diagnostic.is_error())
        .expect("an error");
    assert_eq!(error.file.as_deref(), Some("test.ts"));
    assert_eq!(error.position, Some((2, 3)));
}

#[test]
fn test_error_leaves_call_in_place() {
    let result = replace("f(nameof(a, b));\nnameof(c);\n");
    assert!(result.has_errors());
    assert_eq!(result.output.as_deref(), Some("f(nameof(a, b));\n\"c\";\n"));
}

#[test]
fn test_parse_errors_warn_but_still_transform() {
    let result = replace("nameof(a.b);\nlet = ;\n");
    assert!(result
        .diagnostics
        .diagnostics()
        .iter()
        .any(|diagnostic| diagnostic.code == 9100 && diagnostic.category == DiagnosticCategory::Warning));
    assert!(result.output.as_deref().unwrap_or_default().starts_with("\"b\";"));
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_replace_in_files_in_place() {
    let dir = TempDir::new().unwrap();
    let changed = dir.path().join("a.ts");
    let unchanged = dir.path().join("b.ts");
    fs::write(&changed, "export const n = nameof(a.b);\n").unwrap();
    fs::write(&unchanged, "export const n = 1;\n").unwrap();

    let results = replace_in_files(
        &[changed.clone(), unchanged.clone()],
        &NameofOptions::default(),
        &OutputMode::InPlace,
    );
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].written_to.as_deref(), Some(changed.as_path()));
    assert!(results[1].written_to.is_none());
    assert_eq!(fs::read_to_string(&changed).unwrap(), "export const n = \"b\";\n");
    assert_eq!(fs::read_to_string(&unchanged).unwrap(), "export const n = 1;\n");
}

#[test]
fn test_replace_in_files_out_dir() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("a.ts");
    fs::write(&source, "nameof(x);\n").unwrap();
    let out = dir.path().join("out");

    let results = replace_in_files(
        &[source.clone()],
        &NameofOptions::default(),
        &OutputMode::OutDir(out.clone()),
    );
    let written = results[0].written_to.clone().expect("written");
    assert!(written.starts_with(&out));
    assert_eq!(fs::read_to_string(written).unwrap(), "\"x\";\n");
    assert_eq!(fs::read_to_string(&source).unwrap(), "nameof(x);\n");
}

#[test]
fn test_replace_in_files_check_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("a.ts");
    fs::write(&source, "nameof(x);\n").unwrap();

    let results = replace_in_files(&[source.clone()], &NameofOptions::default(), &OutputMode::Check);
    let result = results[0].result.as_ref().unwrap();
    assert_eq!(result.output.as_deref(), Some("\"x\";\n"));
    assert!(results[0].written_to.is_none());
    assert_eq!(fs::read_to_string(&source).unwrap(), "nameof(x);\n");
}

#[test]
fn test_replace_in_files_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.ts");
    let results = replace_in_files(&[missing.clone()], &NameofOptions::default(), &OutputMode::InPlace);
    let error = results[0].result.as_ref().unwrap_err();
    assert_eq!(error.path(), &missing);
}
