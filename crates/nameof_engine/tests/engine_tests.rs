//! Engine integration tests.
//!
//! Drives the engine through the in-memory test host with a post-order
//! rebuilding walk, the way a real driver does.

mod common;

use common::*;
use nameof_engine::{
    CollectingSink, FunctionKind, NameofEngine, NameofErrorKind, NameofResult, Resolution, ResultDumper,
    TransformContext,
};

/// Helper: transform and expect no errors.
fn transformed(node: Node) -> String {
    let outcome = run(&node);
    assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.messages);
    outcome.text()
}

/// Helper: transform and expect exactly one error.
fn single_error(node: Node) -> NameofErrorKind {
    let outcome = run(&node);
    assert_eq!(outcome.errors.len(), 1, "errors: {:?}", outcome.messages);
    outcome.errors.into_iter().next().unwrap()
}

// ============================================================================
// Default calls
// ============================================================================

#[test]
fn test_default_property_access() {
    assert_eq!(transformed(nameof(None, vec![access("console.log")])), "\"log\"");
}

#[test]
fn test_default_identifier() {
    assert_eq!(transformed(nameof(None, vec![ident("window")])), "\"window\"");
}

#[test]
fn test_default_type_argument() {
    let node = nameof_typed(None, vec![access("MyNamespace.MyType")], vec![]);
    assert_eq!(transformed(node), "\"MyType\"");
}

#[test]
fn test_default_arguments_take_precedence_over_type_arguments() {
    let node = nameof_typed(None, vec![ident("T")], vec![access("a.b")]);
    assert_eq!(transformed(node), "\"b\"");
}

#[test]
fn test_default_without_targets_is_invalid() {
    let kind = single_error(nameof(None, vec![]));
    assert_eq!(
        kind,
        NameofErrorKind::InvalidDefaultCall {
            nameof: "nameof".into(),
            arguments: 0,
            type_arguments: 0,
        }
    );
}

#[test]
fn test_default_with_two_targets_is_invalid() {
    let node = nameof(None, vec![ident("a"), ident("b")]);
    let outcome = run(&node);
    assert!(matches!(
        outcome.errors.as_slice(),
        [NameofErrorKind::InvalidDefaultCall { arguments: 2, .. }]
    ));
    assert_eq!(outcome.text(), "nameof(a, b)");
}

#[test]
fn test_default_string_index() {
    let node = nameof(None, vec![elem(ident("obj"), string("prop"))]);
    assert_eq!(transformed(node), "\"prop\"");
}

#[test]
fn test_default_numeric_index() {
    let node = nameof(None, vec![elem(ident("list"), num(0.0))]);
    assert_eq!(transformed(node), "\"0\"");
}

#[test]
fn test_default_call_root_only_needs_last_segment() {
    let node = nameof(None, vec![prop(call(ident("getObject"), vec![]), "value")]);
    assert_eq!(transformed(node), "\"value\"");
}

#[test]
fn test_default_parenthesized_target() {
    let node = nameof(None, vec![paren(access("a.b"))]);
    assert_eq!(transformed(node), "\"b\"");
}

#[test]
fn test_default_unsupported_expression() {
    let node = nameof(None, vec![binary(ident("a"), "+", ident("b"))]);
    assert_eq!(
        single_error(node),
        NameofErrorKind::UnsupportedNode {
            code: "a + b".into(),
            nested_in: None,
        }
    );
}

#[test]
fn test_default_trailing_interpolation_is_unsupported_scenario() {
    let interpolation = nameof(Some("interpolate"), vec![ident("i")]);
    let node = nameof(None, vec![elem(ident("a"), interpolation)]);
    let outcome = run(&node);
    assert!(matches!(
        outcome.errors.first(),
        Some(NameofErrorKind::UnsupportedScenario { code }) if code == "nameof.interpolate(i)"
    ));
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_function_strips_parameter() {
    let node = nameof(None, vec![arrow(&["o"], access("o.prop.other"))]);
    assert_eq!(transformed(node), "\"other\"");
}

#[test]
fn test_full_function_strips_parameter() {
    let node = nameof(Some("full"), vec![arrow(&["o"], access("o.prop.other"))]);
    assert_eq!(transformed(node), "\"prop.other\"");
}

#[test]
fn test_function_unrelated_root_is_kept() {
    let node = nameof(Some("full"), vec![arrow(&["o"], access("console.log"))]);
    assert_eq!(transformed(node), "\"console.log\"");
}

#[test]
fn test_function_returning_parameter_requires_access() {
    let node = nameof(None, vec![arrow(&["o"], ident("o"))]);
    assert_eq!(single_error(node), NameofErrorKind::MissingPropertyAccess { code: "o".into() });
}

#[test]
fn test_function_without_return() {
    let node = nameof(Some("full"), vec![empty_function()]);
    assert_eq!(single_error(node), NameofErrorKind::NoReturnExpression);
}

// ============================================================================
// Typed
// ============================================================================

#[test]
fn test_typed_property_access() {
    let typed = nameof_typed(Some("typed"), vec![ident("MyInterface")], vec![]);
    assert_eq!(transformed(prop(typed, "prop")), "\"prop\"");
}

#[test]
fn test_typed_without_access_is_left_alone() {
    let typed = nameof_typed(Some("typed"), vec![ident("MyInterface")], vec![]);
    let outcome = run(&typed);
    assert!(outcome.errors.is_empty());
    assert!(outcome.output.is_same(&typed));
}

// ============================================================================
// Full
// ============================================================================

#[test]
fn test_full_whole_path() {
    let node = nameof(Some("full"), vec![access("console.log.bind")]);
    assert_eq!(transformed(node), "\"console.log.bind\"");
}

#[test]
fn test_full_positive_index() {
    let node = nameof(Some("full"), vec![access("console.log.bind"), num(1.0)]);
    assert_eq!(transformed(node), "\"log.bind\"");
}

#[test]
fn test_full_negative_index() {
    let node = nameof(Some("full"), vec![access("console.log.bind"), negate(num(1.0))]);
    assert_eq!(transformed(node), "\"bind\"");
}

#[test]
fn test_full_type_argument_with_index() {
    let node = nameof_typed(Some("full"), vec![access("A.B.C")], vec![num(1.0)]);
    assert_eq!(transformed(node), "\"B.C\"");
}

#[test]
fn test_full_type_argument_with_non_numeric_argument() {
    let node = nameof_typed(Some("full"), vec![access("A.B")], vec![ident("x")]);
    assert!(matches!(
        single_error(node),
        NameofErrorKind::InvalidSegmentCall { arguments: 1, type_arguments: 1, .. }
    ));
}

#[test]
fn test_full_element_access() {
    let node = nameof(Some("full"), vec![elem(elem(ident("obj"), string("a")), num(0.0))]);
    assert_eq!(transformed(node), "\"obj[\\\"a\\\"][0]\"");
}

#[test]
fn test_full_bracket_callee() {
    let callee = elem(ident("nameof"), string("full"));
    let node = call(callee, vec![access("a.b")]);
    assert_eq!(transformed(node), "\"a.b\"");
}

#[test]
fn test_full_index_out_of_bounds() {
    let node = nameof(Some("full"), vec![access("a.b"), num(3.0)]);
    assert_eq!(single_error(node), NameofErrorKind::IndexOutOfBounds { index: 3, length: 2 });
}

#[test]
fn test_full_index_at_length_has_no_segment() {
    let node = nameof(Some("full"), vec![access("a.b"), num(2.0)]);
    assert!(matches!(single_error(node), NameofErrorKind::SegmentNotFound { start: 2, .. }));
}

#[test]
fn test_full_non_numeric_index() {
    let node = nameof(Some("full"), vec![access("a.b"), ident("c")]);
    assert_eq!(single_error(node), NameofErrorKind::IndexParsing { code: "c".into() });
}

#[test]
fn test_full_fractional_index() {
    let node = nameof(Some("full"), vec![access("a.b"), num(0.5)]);
    assert_eq!(single_error(node), NameofErrorKind::IndexParsing { code: "0.5".into() });
}

#[test]
fn test_full_too_many_arguments() {
    let node = nameof(Some("full"), vec![ident("a"), num(1.0), num(2.0)]);
    assert!(matches!(
        single_error(node),
        NameofErrorKind::InvalidSegmentCall { function, arguments: 3, type_arguments: 0 } if function == "nameof.full"
    ));
}

#[test]
fn test_full_computed_key_is_unsupported_accessor() {
    let node = nameof(Some("full"), vec![elem(ident("obj"), ident("key"))]);
    assert_eq!(single_error(node), NameofErrorKind::UnsupportedAccessorType { code: "key".into() });
}

#[test]
fn test_full_unsupported_root_outside_segment_is_ignored() {
    let target = prop(prop(call(ident("get"), vec![]), "a"), "b");
    let node = nameof(Some("full"), vec![target, num(1.0)]);
    assert_eq!(transformed(node), "\"a.b\"");
}

#[test]
fn test_full_unsupported_root_inside_segment() {
    let target = prop(call(ident("get"), vec![]), "a");
    let node = nameof(Some("full"), vec![target]);
    assert_eq!(
        single_error(node),
        NameofErrorKind::UnsupportedNode {
            code: "get()".into(),
            nested_in: None,
        }
    );
}

#[test]
fn test_every_index_slices_the_path() {
    let segments = ["a", "b", "c", "d"];
    let n = segments.len() as i64;
    for index in -n..=n {
        let index_node = if index < 0 { negate(num(-index as f64)) } else { num(index as f64) };
        let node = nameof(Some("full"), vec![access("a.b.c.d"), index_node]);
        let outcome = run(&node);
        let start = (if index >= 0 { index } else { n + index }) as usize;
        if start >= segments.len() {
            assert!(matches!(outcome.errors.as_slice(), [NameofErrorKind::SegmentNotFound { .. }]));
        } else {
            assert!(outcome.errors.is_empty(), "index {}: {:?}", index, outcome.messages);
            assert_eq!(outcome.text(), format!("\"{}\"", segments[start..].join(".")), "index {}", index);
        }
    }
    for index in [n + 1, -(n + 1)] {
        let index_node = if index < 0 { negate(num(-index as f64)) } else { num(index as f64) };
        let node = nameof(Some("full"), vec![access("a.b.c.d"), index_node]);
        assert_eq!(single_error(node), NameofErrorKind::IndexOutOfBounds { index, length: 4 });
    }
}

// ============================================================================
// Interpolation
// ============================================================================

fn interpolation_example() -> Node {
    let index = binary(paren(binary(ident("i"), "-", num(3.0))), "*", num(2.0));
    let interpolate = nameof(Some("interpolate"), vec![index]);
    let target = prop(elem(access("console.log.name"), interpolate), "toString");
    nameof(Some("full"), vec![target])
}

#[test]
fn test_full_interpolation_builds_template() {
    assert_eq!(
        transformed(interpolation_example()),
        "`console.log.name[${(i - 3) * 2}].toString`"
    );
}

#[test]
fn test_template_text_matches_printed_node() {
    let node = interpolation_example();
    let host_context = TestContext::new();
    let mut engine = NameofEngine::new(TestHost, CollectingSink::new());
    let mut context = TransformContext::new(&host_context);
    let call = engine.detect_call(&node, &context).expect("call detected");
    assert_eq!(call.function, Some(FunctionKind::Full));

    let Some(Resolution::Single(result)) = engine.process_call(&call, &mut context).unwrap() else {
        panic!("expected a single result");
    };
    assert!(matches!(&result, NameofResult::Template { parts, expressions } if parts.len() == expressions.len() + 1));
    let text = result.render_text(|expression| expression.print()).unwrap();
    let printed = engine.host().dump(result).print();
    assert_eq!(format!("`{}`", text), printed);

    engine.finish(context);
    assert!(engine.sink().is_empty());
}

#[test]
fn test_unused_interpolation_is_reported() {
    let node = nameof(Some("interpolate"), vec![ident("value")]);
    let outcome = run(&node);
    assert!(outcome.output.is_same(&node));
    assert_eq!(
        outcome.errors,
        vec![NameofErrorKind::UnusedInterpolation {
            code: "nameof.interpolate(value)".into(),
            nameof: "nameof".into(),
        }]
    );
}

#[test]
fn test_interpolate_argument_count() {
    let outcome = run(&nameof(Some("interpolate"), vec![]));
    assert_eq!(
        outcome.errors,
        vec![NameofErrorKind::InvalidArgumentCount {
            function: "nameof.interpolate".into(),
            expected: 1,
            actual: 0,
        }]
    );
    assert_eq!(
        outcome.messages[0],
        "Expected 1 argument for the `nameof.interpolate` call, but got 0."
    );
}

#[test]
fn test_split_rejects_interpolation() {
    let interpolate = nameof(Some("interpolate"), vec![ident("i")]);
    let node = nameof(Some("split"), vec![elem(ident("a"), interpolate)]);
    let outcome = run(&node);
    assert!(matches!(outcome.errors[0], NameofErrorKind::UnsupportedScenario { .. }));
    // The failed split leaves the interpolation unconsumed.
    assert!(matches!(outcome.errors[1], NameofErrorKind::UnusedInterpolation { .. }));
}

// ============================================================================
// Split
// ============================================================================

#[test]
fn test_split_whole_path() {
    let node = nameof(Some("split"), vec![access("console.log")]);
    assert_eq!(transformed(node), "[\"console\", \"log\"]");
}

#[test]
fn test_split_with_index() {
    let node = nameof(Some("split"), vec![access("a.b.c"), negate(num(2.0))]);
    assert_eq!(transformed(node), "[\"b\", \"c\"]");
}

#[test]
fn test_split_element_access_uses_bare_values() {
    let node = nameof(Some("split"), vec![elem(elem(ident("a"), string("b")), num(0.0))]);
    assert_eq!(transformed(node), "[\"a\", \"b\", \"0\"]");
}

// ============================================================================
// Array
// ============================================================================

#[test]
fn test_array_of_arguments() {
    let node = nameof(Some("array"), vec![access("console.log"), access("console.warn")]);
    assert_eq!(transformed(node), "[\"log\", \"warn\"]");
}

#[test]
fn test_legacy_array() {
    let node = nameof(Some("toArray"), vec![ident("a"), access("b.c")]);
    assert_eq!(transformed(node), "[\"a\", \"c\"]");
}

#[test]
fn test_array_from_function() {
    let body = array(vec![access("o.a"), access("o.b.c")]);
    let node = nameof(Some("array"), vec![arrow(&["o"], body)]);
    assert_eq!(transformed(node), "[\"a\", \"c\"]");
}

#[test]
fn test_array_function_element_requires_access() {
    let body = array(vec![access("o.a"), ident("o")]);
    let node = nameof(Some("array"), vec![arrow(&["o"], body)]);
    assert_eq!(single_error(node), NameofErrorKind::MissingPropertyAccess { code: "o".into() });
}

#[test]
fn test_array_function_must_return_array() {
    let node = nameof(Some("array"), vec![arrow(&["o"], access("o.a"))]);
    assert_eq!(
        single_error(node),
        NameofErrorKind::UnsupportedNode {
            code: "o.a".into(),
            nested_in: None,
        }
    );
}

#[test]
fn test_array_rejects_source_string_literal() {
    let node = nameof(Some("array"), vec![string("text")]);
    assert!(matches!(single_error(node), NameofErrorKind::UnsupportedNode { nested_in: None, .. }));
}

#[test]
fn test_array_passes_generated_literal_through() {
    let inner = nameof(Some("full"), vec![access("a.b")]);
    let node = nameof(Some("array"), vec![inner, access("c.d")]);
    assert_eq!(transformed(node), "[\"a.b\", \"d\"]");
}

// ============================================================================
// Nesting, functions and markers
// ============================================================================

#[test]
fn test_nested_nameof_is_rejected() {
    let node = nameof(None, vec![nameof(None, vec![ident("x")])]);
    let outcome = run(&node);
    assert_eq!(
        outcome.errors,
        vec![NameofErrorKind::NestedNameof {
            nameof: "nameof".into()
        }]
    );
    assert_eq!(outcome.text(), "nameof(\"x\")");
}

#[test]
fn test_nested_full_inside_full_is_rejected() {
    let inner = nameof(Some("full"), vec![access("a.b")]);
    let node = nameof(Some("full"), vec![inner]);
    assert!(matches!(single_error(node), NameofErrorKind::NestedNameof { .. }));
}

#[test]
fn test_unknown_function() {
    let node = nameof(Some("fullName"), vec![ident("a")]);
    assert_eq!(
        single_error(node),
        NameofErrorKind::UnsupportedFunction {
            function: "nameof.fullName".into()
        }
    );
}

#[test]
fn test_custom_marker() {
    let mut host_context = TestContext::new();
    host_context.nameof = Some("nf".to_string());

    let renamed = call(prop(ident("nf"), "full"), vec![access("a.b")]);
    let outcome = run_with(&renamed, &host_context);
    assert_eq!(outcome.text(), "\"a.b\"");

    let default = nameof(None, vec![access("a.b")]);
    let outcome = run_with(&default, &host_context);
    assert!(outcome.output.is_same(&default));
}

#[test]
fn test_unrelated_call_is_untouched() {
    let node = call(access("console.log"), vec![string("hi")]);
    let outcome = run(&node);
    assert!(outcome.errors.is_empty());
    assert!(outcome.output.is_same(&node));
}

#[test]
fn test_generated_nodes_are_tracked() {
    let node = nameof(None, vec![access("a.b")]);
    let host_context = TestContext::new();
    let mut engine = NameofEngine::new(TestHost, CollectingSink::new());
    let mut context = TransformContext::new(&host_context);
    let generated = engine.transform(node.clone(), &mut context);
    assert!(engine.is_mutated(&generated));
    assert!(!engine.is_mutated(&node));
    assert!(engine.get_original(&generated).unwrap().is_same(&node));
}

#[test]
fn test_error_location_uses_node() {
    let node = nameof(None, vec![]);
    let host_context = TestContext::new();
    let mut engine = NameofEngine::new(TestHost, CollectingSink::new());
    let mut context = TransformContext::new(&host_context);
    engine.transform(node.clone(), &mut context);
    let (location, error) = &engine.sink().errors[0];
    assert_eq!(location.file_path.as_deref(), Some("test.ts"));
    assert_eq!(location.column, Some(node.id()));
    assert_eq!(error.code(), 9001);
}

// ============================================================================
// Host faults
// ============================================================================

#[test]
fn test_host_panic_is_reported_as_internal() {
    let bad = faulty();
    let kind = single_error(nameof(None, vec![bad.clone()]));
    assert_eq!(
        kind,
        NameofErrorKind::Internal {
            message: format!("cannot parse node {}", bad.id()),
        }
    );
    assert_eq!(kind.code(), 9017);
}

#[test]
fn test_host_panic_does_not_stop_the_walk() {
    let node = array(vec![nameof(None, vec![faulty()]), nameof(None, vec![access("a.b")])]);
    let outcome = run(&node);
    assert!(matches!(outcome.errors.as_slice(), [NameofErrorKind::Internal { .. }]));
    assert_eq!(outcome.text(), "[nameof(faulty), \"b\"]");
}
