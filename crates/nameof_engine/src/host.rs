//! Capabilities a host binding provides to the engine.
//!
//! Each trait covers one concern; [`HostBinding`] bundles them. None of the
//! methods call back into the engine.

use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;

use crate::error::NameofError;
use crate::result::NameofResult;

/// Marker identifier used when the host does not override it.
pub const DEFAULT_NAMEOF_NAME: &str = "nameof";

/// The host's node, key and context types.
pub trait HostTypes {
    /// What the driver hands to [`NameofEngine::transform`](crate::NameofEngine::transform).
    type Input;
    /// A handle to one syntax node. Cloning must be cheap.
    type Node: Clone + fmt::Debug;
    /// Node identity, stable for the lifetime of one traversal.
    type Key: Copy + Eq + Hash + fmt::Debug;
    /// Per-file data, such as the source text.
    type Context;

    fn key(&self, node: &Self::Node) -> Self::Key;
}

/// Where a node sits in its file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeLocation {
    pub file_path: Option<String>,
    /// 1-based.
    pub line: Option<u32>,
    /// 1-based.
    pub column: Option<u32>,
}

impl fmt::Display for NodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_path.as_deref().unwrap_or("<unknown>"))?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
            if let Some(column) = self.column {
                write!(f, ":{}", column)?;
            }
        }
        Ok(())
    }
}

pub trait SourceAccess: HostTypes {
    fn get_location(&self, node: &Self::Node, context: &Self::Context) -> NodeLocation;

    /// The original text of `node`. Generated nodes have none and fall back
    /// to [`SourceAccess::print_source_code`].
    fn get_source_code(&self, node: &Self::Node, context: &Self::Context) -> String;

    /// Render `node` to text without consulting the source file.
    fn print_source_code(&self, node: &Self::Node, context: &Self::Context) -> String;
}

pub trait NodeClassifier: HostTypes {
    fn is_call_expression(&self, node: &Self::Node) -> bool;
    /// `a.b` or `a[b]`.
    fn is_access_expression(&self, node: &Self::Node) -> bool;
    fn is_string_literal(&self, node: &Self::Node) -> bool;
    fn is_template_literal(&self, node: &Self::Node) -> bool;
}

pub trait ArraySupport: HostTypes {
    /// The elements of an array literal, or `None` for anything else.
    fn get_array_elements(&self, node: &Self::Node) -> Option<Vec<Self::Node>>;
    fn create_array_literal(&self, elements: Vec<Self::Node>) -> Self::Node;
}

/// One level of a host node in canonical form.
///
/// Children stay host nodes; the engine parses them on demand.
#[derive(Debug, Clone)]
pub enum HostSyntax<N> {
    Identifier { name: String },
    NumericLiteral { value: f64 },
    StringLiteral { text: String },
    CallExpression {
        callee: N,
        type_arguments: Vec<N>,
        arguments: Vec<N>,
    },
    PropertyAccess { expression: N, property_name: String },
    IndexAccess { expression: N, index: N },
    /// `body` is the returned expression.
    Function { parameter_names: Vec<String>, body: N },
    Unsupported,
}

pub trait NodeParser: HostTypes {
    fn extract(&self, input: Self::Input) -> Self::Node;

    /// Classify `node`. An error is kept as the reason the node is
    /// unsupported and surfaces only if the node is actually needed.
    fn parse_internal(
        &self,
        node: &Self::Node,
        context: &Self::Context,
    ) -> Result<HostSyntax<Self::Node>, NameofError<Self::Node>>;
}

pub trait ResultDumper: HostTypes {
    /// Build a string literal, template literal or pass-through node.
    fn dump(&self, result: NameofResult<Self::Node>) -> Self::Node;
}

/// Everything the engine needs from a host.
pub trait HostBinding: SourceAccess + NodeClassifier + ArraySupport + NodeParser + ResultDumper {
    /// The identifier that marks a call, e.g. a renamed macro import.
    fn nameof_name<'c>(&self, context: &'c Self::Context) -> Cow<'c, str> {
        let _ = context;
        Cow::Borrowed(DEFAULT_NAMEOF_NAME)
    }
}

/// Receives every error raised while transforming.
pub trait ErrorSink<N> {
    fn report(&mut self, location: NodeLocation, error: NameofError<N>);
}

impl<N, F> ErrorSink<N> for F
where
    F: FnMut(NodeLocation, NameofError<N>),
{
    fn report(&mut self, location: NodeLocation, error: NameofError<N>) {
        self(location, error)
    }
}

/// Keeps reported errors in memory.
#[derive(Debug)]
pub struct CollectingSink<N> {
    pub errors: Vec<(NodeLocation, NameofError<N>)>,
}

impl<N> CollectingSink<N> {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The rendered messages, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|(_, error)| error.to_string()).collect()
    }
}

impl<N> Default for CollectingSink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> ErrorSink<N> for CollectingSink<N> {
    fn report(&mut self, location: NodeLocation, error: NameofError<N>) {
        self.errors.push((location, error));
    }
}
