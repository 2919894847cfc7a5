//! Parser integration tests.
//!
//! Verifies that the parser accepts real-world TypeScript and JavaScript and
//! builds the expected top-level structure.

use bumpalo::Bump;
use nameof_ast::node::Statement;
use nameof_ast::syntax_kind::SyntaxKind;
use nameof_parser::parse_source_text;

/// Helper: parse source text and return the statement kinds, asserting that
/// no diagnostics were produced.
fn statement_kinds(source: &str) -> Vec<SyntaxKind> {
    let arena = Bump::new();
    let result = parse_source_text(&arena, "test.ts", source);
    assert!(
        result.diagnostics.is_empty(),
        "source: {}\ndiagnostics: {:?}",
        source,
        result.diagnostics.diagnostics()
    );
    result.source_file.statements.iter().map(Statement::kind).collect()
}

/// Helper: assert that parsing produces the expected number of top-level statements.
fn assert_statement_count(source: &str, expected: usize) {
    assert_eq!(statement_kinds(source).len(), expected, "source: {}", source);
}

// ============================================================================
// Variable Declarations
// ============================================================================

#[test]
fn test_parse_const_declaration() {
    assert_statement_count("const x = 42;", 1);
}

#[test]
fn test_parse_multiple_declarations() {
    assert_statement_count("const a = 1; let b = 2; var c = 3;", 3);
}

#[test]
fn test_parse_destructuring_declaration() {
    assert_statement_count("const { a, b: [c, , d = 1], ...rest } = obj;", 1);
}

#[test]
fn test_parse_let_as_identifier() {
    assert_eq!(statement_kinds("let.x = 2; let(1);").len(), 2);
}

// ============================================================================
// Functions and classes
// ============================================================================

#[test]
fn test_parse_function_with_params() {
    assert_statement_count("function add(a: number, b = 2, ...c: number[]): number { return a + b; }", 1);
}

#[test]
fn test_parse_async_and_generator_functions() {
    let src = "async function f() { await g(); }\nfunction* h() { yield* i(); yield; }";
    assert_statement_count(src, 2);
}

#[test]
fn test_parse_overloads() {
    let src = "function f(a: string): void;\nfunction f(a: any) {}";
    assert_statement_count(src, 2);
}

#[test]
fn test_parse_abstract_class() {
    let src = r#"
        @sealed
        export abstract class Shape<T = unknown> {
            abstract area(): number;
            #secret = 1;
            static readonly count: number;
            declare field: string;
            override toString(): string { return `${this.#secret}`; }
        }
    "#;
    assert_eq!(statement_kinds(src), vec![SyntaxKind::ClassDeclaration]);
}

#[test]
fn test_parse_class_expression() {
    assert_statement_count("const C = class extends Base<number> { m() {} };", 1);
}

#[test]
fn test_parse_class_with_stray_semicolons() {
    let arena = Bump::new();
    let result = parse_source_text(&arena, "test.ts", "class A { ; x = 1;; m() {}; }");
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics.diagnostics());
    let Statement::ClassDeclaration(class) = &result.source_file.statements[0] else {
        panic!("expected a class declaration");
    };
    let kinds: Vec<SyntaxKind> = class.members.iter().map(|member| member.data().kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::SemicolonClassElement,
            SyntaxKind::PropertyDeclaration,
            SyntaxKind::SemicolonClassElement,
            SyntaxKind::MethodDeclaration,
            SyntaxKind::SemicolonClassElement,
        ]
    );
}

// ============================================================================
// Type-only declarations
// ============================================================================

#[test]
fn test_parse_interface_and_type_alias() {
    let src = r#"
        interface Foo<T> extends Bar {
            readonly a: string;
            b?(x: T): void;
            [key: string]: unknown;
            new (x: number): Foo<T>;
            (): void;
        }
        type Mapped<T> = { readonly [K in keyof T as `get${K & string}`]?: T[K] };
        type Fn = (a: string, ...rest: number[]) => asserts a is string;
        type Tuple = [first: string, second?: number, ...rest: boolean[]];
        type Query = typeof import("./mod").default;
        type Cond<T> = T extends (infer U)[] ? U : never;
    "#;
    let kinds = statement_kinds(src);
    assert_eq!(kinds.len(), 6);
    assert!(kinds.iter().all(|k| *k == SyntaxKind::SkippedStatement));
}

#[test]
fn test_parse_namespace_is_runtime_code() {
    let kinds = statement_kinds("namespace A.B { export const x = 1; }\ndeclare module 'm' { }");
    assert_eq!(kinds, vec![SyntaxKind::ModuleDeclaration, SyntaxKind::SkippedStatement]);
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_parse_expressions() {
    let src = r#"
        a = b ? c : d ?? e;
        x **= 2 ** -y;
        obj?.method?.(arg)?.[0];
        new Foo<string>(1).bar;
        tag`hello ${world}`;
        const v = <any>value;
        const w = value as const satisfies readonly string[];
        for (const k in o) {}
        for await (const item of items) {}
        label: for (let i = 0, j = 1; i < j; i++) { continue label; }
    "#;
    assert_statement_count(src, 10);
}

#[test]
fn test_parse_object_literal_members() {
    let src = "const o = { a, b: 1, [c]: 2, ...d, get e() { return 1; }, set e(v) {}, async *f() {}, 'g': 3, 4: 5 };";
    assert_statement_count(src, 1);
}

#[test]
fn test_parse_switch_and_try() {
    let src = r#"
        switch (x) {
            case 1:
            case 2: f(); break;
            default: g();
        }
        try { risky(); } catch { recover(); } finally { done(); }
        try { risky(); } catch (e: unknown) { throw e; }
    "#;
    assert_statement_count(src, 3);
}

// ============================================================================
// Modules
// ============================================================================

#[test]
fn test_parse_import_forms() {
    let src = r#"
        import "side-effect";
        import def from "a";
        import * as ns from "b";
        import { x, y as z } from "c";
        import type { T } from "d";
        import json from "./data.json" with { type: "json" };
        import fs = require("fs");
        const lazy = import("./lazy");
        const url = import.meta.url;
    "#;
    let kinds = statement_kinds(src);
    assert_eq!(kinds[..6], [SyntaxKind::ImportDeclaration; 6]);
    assert_eq!(kinds[6], SyntaxKind::SkippedStatement);
    assert_eq!(kinds[7], SyntaxKind::VariableStatement);
}

#[test]
fn test_parse_export_forms() {
    let src = r#"
        export const a = 1;
        export default function () {}
        export * from "b";
        export * as ns from "c";
        export { d as e } from "f";
        export type { G } from "h";
        export = i;
    "#;
    let kinds = statement_kinds(src);
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::VariableStatement,
            SyntaxKind::FunctionDeclaration,
            SyntaxKind::ExportDeclaration,
            SyntaxKind::ExportDeclaration,
            SyntaxKind::ExportDeclaration,
            SyntaxKind::ExportDeclaration,
            SyntaxKind::ExportAssignment,
        ]
    );
}

#[test]
fn test_parse_javascript_file() {
    let arena = Bump::new();
    let result = parse_source_text(&arena, "lib.js", "#!/usr/bin/env node\nmodule.exports = nameof(x);");
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.source_file.statements.len(), 1);
}
