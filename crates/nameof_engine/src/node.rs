//! Host-independent expression model.
//!
//! A [`ParsedNode`] is the canonical view of one host expression; flattening
//! it with [`ParsedNode::into_path`] yields the access path that `nameof`
//! calls slice and render.

use crate::error::NameofError;

/// The value of an element access such as `a["b"]` or `a[0]`.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexValue {
    String(String),
    Number(f64),
}

impl IndexValue {
    /// Rendered inside brackets: strings are JSON-quoted, numbers are bare.
    pub fn to_accessor(&self) -> String {
        match self {
            IndexValue::String(text) => {
                serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
            }
            IndexValue::Number(value) => format_number(*value),
        }
    }

    /// Rendered on its own, as a name.
    pub fn to_name(&self) -> String {
        match self {
            IndexValue::String(text) => text.clone(),
            IndexValue::Number(value) => format_number(*value),
        }
    }
}

/// Format a number the way JavaScript's `Number.prototype.toString` does:
/// positional notation for magnitudes in `[1e-6, 1e21)`, exponent notation
/// outside it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value < 0.0 {
        return format!("-{}", format_number(-value));
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `1.5e-7`.
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, exponent.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, exponent.abs())
        }
    }
}

/// One syntactic shape the engine understands.
///
/// Every variant keeps the host node it was parsed from in `source`.
#[derive(Debug, Clone)]
pub enum ParsedNode<N> {
    Identifier {
        source: N,
        name: String,
    },
    NumericLiteral {
        source: N,
        value: f64,
    },
    StringLiteral {
        source: N,
        text: String,
    },
    CallExpression {
        source: N,
        callee: N,
        type_arguments: Vec<N>,
        arguments: Vec<N>,
    },
    PropertyAccess {
        source: N,
        expression: Box<ParsedNode<N>>,
        property_name: String,
    },
    IndexAccess {
        source: N,
        expression: Box<ParsedNode<N>>,
        index: Box<ParsedNode<N>>,
    },
    Function {
        source: N,
        parameter_names: Vec<String>,
        /// The returned expression, not yet parsed.
        body: N,
    },
    /// A `nameof.interpolate(expression)` call.
    Interpolation {
        source: N,
        expression: N,
    },
    Unsupported {
        source: N,
        reason: Option<NameofError<N>>,
    },
}

impl<N> ParsedNode<N> {
    pub fn source(&self) -> &N {
        match self {
            ParsedNode::Identifier { source, .. }
            | ParsedNode::NumericLiteral { source, .. }
            | ParsedNode::StringLiteral { source, .. }
            | ParsedNode::CallExpression { source, .. }
            | ParsedNode::PropertyAccess { source, .. }
            | ParsedNode::IndexAccess { source, .. }
            | ParsedNode::Function { source, .. }
            | ParsedNode::Interpolation { source, .. }
            | ParsedNode::Unsupported { source, .. } => source,
        }
    }

    /// The node at the base of an access chain: `a` for `a.b[0].c`.
    pub fn root(&self) -> &ParsedNode<N> {
        let mut node = self;
        while let ParsedNode::PropertyAccess { expression, .. } | ParsedNode::IndexAccess { expression, .. } = node {
            node = &**expression;
        }
        node
    }

    /// Flatten into the path from the root of the access chain to this node.
    pub fn into_path(self) -> Vec<PathPartCandidate<N>> {
        let mut path = Vec::new();
        self.push_path(&mut path);
        path
    }

    fn push_path(self, path: &mut Vec<PathPartCandidate<N>>) {
        match self {
            ParsedNode::Identifier { source, name } => {
                path.push(PathPartCandidate::Identifier { source, value: name });
            }
            ParsedNode::PropertyAccess {
                source,
                expression,
                property_name,
            } => {
                expression.push_path(path);
                path.push(PathPartCandidate::PropertyAccess {
                    source,
                    value: property_name,
                });
            }
            ParsedNode::IndexAccess {
                source,
                expression,
                index,
            } => {
                expression.push_path(path);
                path.push(Self::index_part(source, *index));
            }
            ParsedNode::Unsupported { source, reason } => {
                path.push(PathPartCandidate::Unsupported {
                    source,
                    reason,
                    is_accessor: false,
                });
            }
            other => {
                let source = other.into_source();
                path.push(PathPartCandidate::Unsupported {
                    source,
                    reason: None,
                    is_accessor: false,
                });
            }
        }
    }

    /// Classify the index of an element access.
    fn index_part(access: N, index: ParsedNode<N>) -> PathPartCandidate<N> {
        match index {
            ParsedNode::NumericLiteral { value, .. } => PathPartCandidate::IndexAccess {
                source: access,
                value: IndexValue::Number(value),
            },
            ParsedNode::StringLiteral { text, .. } => PathPartCandidate::IndexAccess {
                source: access,
                value: IndexValue::String(text),
            },
            ParsedNode::Interpolation { source, expression } => {
                PathPartCandidate::Interpolation { source, expression }
            }
            ParsedNode::Unsupported { source, reason } => PathPartCandidate::Unsupported {
                source,
                reason,
                is_accessor: true,
            },
            other => PathPartCandidate::Unsupported {
                source: other.into_source(),
                reason: None,
                is_accessor: true,
            },
        }
    }

    fn into_source(self) -> N {
        match self {
            ParsedNode::Identifier { source, .. }
            | ParsedNode::NumericLiteral { source, .. }
            | ParsedNode::StringLiteral { source, .. }
            | ParsedNode::CallExpression { source, .. }
            | ParsedNode::PropertyAccess { source, .. }
            | ParsedNode::IndexAccess { source, .. }
            | ParsedNode::Function { source, .. }
            | ParsedNode::Interpolation { source, .. }
            | ParsedNode::Unsupported { source, .. } => source,
        }
    }
}

/// One step of a flattened access path.
#[derive(Debug, Clone)]
pub enum PathPartCandidate<N> {
    Identifier {
        source: N,
        value: String,
    },
    PropertyAccess {
        source: N,
        value: String,
    },
    IndexAccess {
        source: N,
        value: IndexValue,
    },
    /// `source` is the interpolate call, `expression` its argument.
    Interpolation {
        source: N,
        expression: N,
    },
    /// Aborts consumption of the path when it falls inside a requested segment.
    Unsupported {
        source: N,
        reason: Option<NameofError<N>>,
        /// Set for element-access keys that are neither strings nor numbers.
        is_accessor: bool,
    },
}

impl<N> PathPartCandidate<N> {
    pub fn source(&self) -> &N {
        match self {
            PathPartCandidate::Identifier { source, .. }
            | PathPartCandidate::PropertyAccess { source, .. }
            | PathPartCandidate::IndexAccess { source, .. }
            | PathPartCandidate::Interpolation { source, .. }
            | PathPartCandidate::Unsupported { source, .. } => source,
        }
    }

    /// The plain name of an identifier or property step.
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            PathPartCandidate::Identifier { value, .. } | PathPartCandidate::PropertyAccess { value, .. } => {
                Some(value)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> ParsedNode<&'static str> {
        ParsedNode::Identifier {
            source: "id",
            name: name.to_string(),
        }
    }

    fn prop(expression: ParsedNode<&'static str>, name: &str) -> ParsedNode<&'static str> {
        ParsedNode::PropertyAccess {
            source: "prop",
            expression: Box::new(expression),
            property_name: name.to_string(),
        }
    }

    fn index(expression: ParsedNode<&'static str>, index: ParsedNode<&'static str>) -> ParsedNode<&'static str> {
        ParsedNode::IndexAccess {
            source: "index",
            expression: Box::new(expression),
            index: Box::new(index),
        }
    }

    #[test]
    fn test_path_follows_access_chain() {
        let node = index(
            prop(ident("console"), "log"),
            ParsedNode::StringLiteral {
                source: "lit",
                text: "x".into(),
            },
        );
        let path = node.into_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0].identifier_name(), Some("console"));
        assert_eq!(path[1].identifier_name(), Some("log"));
        assert!(matches!(
            &path[2],
            PathPartCandidate::IndexAccess { value: IndexValue::String(text), .. } if text == "x"
        ));
    }

    #[test]
    fn test_root_skips_accessors() {
        let node = prop(prop(ident("a"), "b"), "c");
        assert!(matches!(node.root(), ParsedNode::Identifier { name, .. } if name == "a"));
    }

    #[test]
    fn test_non_literal_index_is_unsupported_accessor() {
        let node = index(ident("a"), ident("key"));
        let path = node.into_path();
        assert!(matches!(
            path[1],
            PathPartCandidate::Unsupported { source: "id", is_accessor: true, reason: None }
        ));
    }

    #[test]
    fn test_interpolation_index() {
        let node = index(
            ident("a"),
            ParsedNode::Interpolation {
                source: "call",
                expression: "expr",
            },
        );
        let path = node.into_path();
        assert!(matches!(
            path[1],
            PathPartCandidate::Interpolation { source: "call", expression: "expr" }
        ));
    }

    #[test]
    fn test_non_access_root_is_unsupported() {
        let call = ParsedNode::CallExpression {
            source: "call",
            callee: "f",
            type_arguments: vec![],
            arguments: vec![],
        };
        let path = prop(call, "x").into_path();
        assert!(matches!(
            path[0],
            PathPartCandidate::Unsupported { source: "call", is_accessor: false, .. }
        ));
        assert_eq!(path[1].identifier_name(), Some("x"));
    }

    #[test]
    fn test_index_value_rendering() {
        assert_eq!(IndexValue::String("a\"b".into()).to_accessor(), "\"a\\\"b\"");
        assert_eq!(IndexValue::Number(3.0).to_accessor(), "3");
        assert_eq!(IndexValue::Number(-1.5).to_name(), "-1.5");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_format_number_matches_javascript() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(123.456), "123.456");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e22), "1.5e+22");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }
}
