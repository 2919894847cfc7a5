//! Error taxonomy for malformed `nameof` usage.
//!
//! Every error carries the host node it is about, so the driver can attach a
//! source location. Message text is rendered when the error is built, while
//! the host context needed to print source code is still at hand.

use thiserror::Error;

pub type EngineResult<T, N> = Result<T, NameofError<N>>;

/// An error raised while resolving one call site.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct NameofError<N> {
    /// The node the error points at.
    pub node: N,
    pub kind: NameofErrorKind,
}

impl<N> NameofError<N> {
    pub fn new(node: N, kind: NameofErrorKind) -> Self {
        Self { node, kind }
    }

    pub fn code(&self) -> u32 {
        self.kind.code()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NameofErrorKind {
    #[error(
        "Expected 1 argument or 1 type argument for the `{nameof}()` call, but got {} and {}.",
        count_noun(.arguments, "argument"),
        count_noun(.type_arguments, "type argument")
    )]
    InvalidDefaultCall {
        nameof: String,
        arguments: usize,
        type_arguments: usize,
    },

    #[error(
        "This `{function}` call is invalid. Got {} and {}. Please make sure to pass 1 argument or 1 type argument to transform.",
        count_noun(.arguments, "argument"),
        count_noun(.type_arguments, "type argument")
    )]
    InvalidSegmentCall {
        function: String,
        arguments: usize,
        type_arguments: usize,
    },

    #[error("Expected {} for the `{function}` call, but got {actual}.", count_noun(.expected, "argument"))]
    InvalidArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("The specified expression `{code}` is an invalid index. Expected an integer literal.")]
    IndexParsing { code: String },

    #[error("The specified index is out of bounds. {}", bounds_hint(.index, .length))]
    IndexOutOfBounds { index: i64, length: usize },

    #[error(
        "Unable to find {} starting at index {start}. The expression only has {}.",
        count_noun(.count, "segment"),
        count_noun(.length, "segment")
    )]
    SegmentNotFound {
        start: usize,
        count: usize,
        length: usize,
    },

    #[error("A property of the parameter `{code}` must be accessed.")]
    MissingPropertyAccess { code: String },

    #[error("The import type `{code}` does not have a qualifier to get the name from.")]
    MissingImportTypeQualifier { code: String },

    #[error("Unable to find a returned expression in the specified function.")]
    NoReturnExpression,

    #[error("{}", unsupported_node(.code, .nested_in))]
    UnsupportedNode {
        code: String,
        /// The marker name, when the node was generated by an earlier call.
        nested_in: Option<String>,
    },

    #[error("The specified expression `{code}` is an invalid accessor type. Expected a string or a number.")]
    UnsupportedAccessorType { code: String },

    #[error("The expression `{code}` is not supported in this scenario.")]
    UnsupportedScenario { code: String },

    #[error("The requested function `{function}` does not exist.")]
    UnsupportedFunction { function: String },

    #[error("Nested `{nameof}` expressions in `{nameof}()` calls are not supported.")]
    NestedNameof { nameof: String },

    #[error(
        "The interpolation call `{code}` is unused. Expected interpolation calls to be used inside a `{nameof}.full` call."
    )]
    UnusedInterpolation { code: String, nameof: String },

    #[error("{message}")]
    Custom { message: String },

    /// A host fault outside the taxonomy above.
    #[error("An unexpected error occurred while resolving the call: {message}")]
    Internal { message: String },
}

impl NameofErrorKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> u32 {
        match self {
            NameofErrorKind::InvalidDefaultCall { .. } => 9001,
            NameofErrorKind::InvalidSegmentCall { .. } => 9002,
            NameofErrorKind::InvalidArgumentCount { .. } => 9003,
            NameofErrorKind::IndexParsing { .. } => 9004,
            NameofErrorKind::IndexOutOfBounds { .. } => 9005,
            NameofErrorKind::SegmentNotFound { .. } => 9006,
            NameofErrorKind::MissingPropertyAccess { .. } => 9007,
            NameofErrorKind::MissingImportTypeQualifier { .. } => 9008,
            NameofErrorKind::NoReturnExpression => 9009,
            NameofErrorKind::UnsupportedNode { .. } => 9010,
            NameofErrorKind::UnsupportedAccessorType { .. } => 9011,
            NameofErrorKind::UnsupportedScenario { .. } => 9012,
            NameofErrorKind::UnsupportedFunction { .. } => 9013,
            NameofErrorKind::NestedNameof { .. } => 9014,
            NameofErrorKind::UnusedInterpolation { .. } => 9015,
            NameofErrorKind::Custom { .. } => 9016,
            NameofErrorKind::Internal { .. } => 9017,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, NameofErrorKind::Internal { .. })
    }
}

fn count_noun(count: &usize, noun: &str) -> String {
    if *count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn bounds_hint(index: &i64, length: &usize) -> String {
    if *length == 0 {
        format!("Expected 0, but got {}.", index)
    } else {
        format!("Expected a value between -{0} and {0}, but got {1}.", length, index)
    }
}

fn unsupported_node(code: &str, nested_in: &Option<String>) -> String {
    match nested_in {
        Some(nameof) => format!("Nested `{}()` calls are not supported.", nameof),
        None => format!("The expression `{}` is not supported.", code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_default_call_message() {
        let kind = NameofErrorKind::InvalidDefaultCall {
            nameof: "nameof".into(),
            arguments: 2,
            type_arguments: 1,
        };
        assert_eq!(
            kind.to_string(),
            "Expected 1 argument or 1 type argument for the `nameof()` call, but got 2 arguments and 1 type argument."
        );
    }

    #[test]
    fn test_index_out_of_bounds_message() {
        let empty = NameofErrorKind::IndexOutOfBounds { index: 2, length: 0 };
        assert_eq!(empty.to_string(), "The specified index is out of bounds. Expected 0, but got 2.");

        let kind = NameofErrorKind::IndexOutOfBounds { index: -4, length: 3 };
        assert_eq!(
            kind.to_string(),
            "The specified index is out of bounds. Expected a value between -3 and 3, but got -4."
        );
    }

    #[test]
    fn test_unsupported_node_message_mentions_nesting() {
        let plain = NameofErrorKind::UnsupportedNode {
            code: "a + b".into(),
            nested_in: None,
        };
        assert_eq!(plain.to_string(), "The expression `a + b` is not supported.");

        let nested = NameofErrorKind::UnsupportedNode {
            code: "\"x\"".into(),
            nested_in: Some("nameof".into()),
        };
        assert_eq!(nested.to_string(), "Nested `nameof()` calls are not supported.");
    }

    #[test]
    fn test_error_displays_kind() {
        let error = NameofError::new(7u32, NameofErrorKind::NoReturnExpression);
        assert_eq!(error.code(), 9009);
        assert_eq!(error.to_string(), "Unable to find a returned expression in the specified function.");
    }

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            NameofErrorKind::NoReturnExpression,
            NameofErrorKind::Custom { message: String::new() },
            NameofErrorKind::Internal { message: String::new() },
            NameofErrorKind::NestedNameof { nameof: String::new() },
        ];
        let mut codes: Vec<u32> = kinds.iter().map(NameofErrorKind::code).collect();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(codes.iter().all(|code| *code > 9000));
    }
}
