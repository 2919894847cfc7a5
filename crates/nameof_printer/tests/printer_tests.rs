//! Printer tests over parsed source files.

use bumpalo::Bump;
use nameof_parser::parse_source_text;
use nameof_printer::Printer;

/// Helper: parse `source` and print it without consulting the source text.
fn reprint(source: &str) -> String {
    let arena = Bump::new();
    let result = parse_source_text(&arena, "test.ts", source);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        result.diagnostics.diagnostics()
    );
    Printer::new().print_source_file(result.source_file)
}

#[test]
fn test_statements_print_structurally() {
    let source = "const x = a.b(c, 1);\nlet [y, , z] = arr;\nif (a) { f(); } else g();";
    assert_eq!(
        reprint(source),
        "const x = a.b(c, 1);\nlet [y, , z] = arr;\nif (a) {\n    f();\n} else g();\n"
    );
}

#[test]
fn test_expressions_print_structurally() {
    assert_eq!(reprint("a?.b[0]!.c;"), "a?.b[0]!.c;\n");
    assert_eq!(reprint("x = (i - 3) * 2;"), "x = (i - 3) * 2;\n");
    assert_eq!(reprint("f<T>(...args);"), "f<T>(...args);\n");
    assert_eq!(reprint("const t = `a${b}c`;"), "const t = `a${b}c`;\n");
    assert_eq!(reprint("const f = async (a) => a.b;"), "const f = async (a) => a.b;\n");
    assert_eq!(reprint("typeof x === 'string';"), "typeof x === 'string';\n");
    assert_eq!(reprint("o = { a: 1, b, ...c };"), "o = { a: 1, b, ...c };\n");
}

#[test]
fn test_types_print_structurally() {
    assert_eq!(
        reprint("let v: Array<string> | undefined = null as any;"),
        "let v: Array<string> | undefined = null as any;\n"
    );
    assert_eq!(reprint("let t: [number, string?];"), "let t: [number, string?];\n");
    assert_eq!(reprint("let q: typeof a.b;"), "let q: typeof a.b;\n");
    assert_eq!(reprint("let i: T[\"key\"];"), "let i: T[\"key\"];\n");
}

#[test]
fn test_classes_print_structurally() {
    let source = "class A extends B { x = 1; m(a: number): void {} }";
    assert_eq!(
        reprint(source),
        "class A extends B {\n    x = 1;\n    m(a: number): void {}\n}\n"
    );
}

#[test]
fn test_imports_and_exports_print_structurally() {
    assert_eq!(
        reprint("import def, { a as b } from \"m\";"),
        "import def, { a as b } from \"m\";\n"
    );
    assert_eq!(reprint("import * as ns from 'm';"), "import * as ns from 'm';\n");
    assert_eq!(reprint("export { x as y };"), "export { x as y };\n");
    assert_eq!(reprint("export * from \"m\";"), "export * from \"m\";\n");
    assert_eq!(reprint("export const a = 1;"), "export const a = 1;\n");
}

#[test]
fn test_source_text_is_copied_verbatim() {
    let source = "let   a=1 ;\nfoo( bar,baz )";
    let arena = Bump::new();
    let result = parse_source_text(&arena, "test.ts", source);
    let printed = Printer::with_source(source).print_source_file(result.source_file);
    assert_eq!(printed, "let   a=1 ;\nfoo( bar,baz )\n");
}
