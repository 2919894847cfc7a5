//! An in-memory host over a small reference-counted tree, independent of the
//! arena AST used by the transformer crate.

#![allow(dead_code)]

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use nameof_engine::{
    ArraySupport, CollectingSink, HostBinding, HostSyntax, HostTypes, NameofEngine, NameofError, NameofErrorKind,
    NameofResult, NodeClassifier, NodeLocation, NodeParser, ResultDumper, SourceAccess, TransformContext,
};

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

fn next_id() -> u32 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub struct Node(Rc<NodeData>);

#[derive(Debug)]
pub struct NodeData {
    pub id: u32,
    pub kind: Kind,
}

#[derive(Debug)]
pub enum Kind {
    Identifier(String),
    Number(f64),
    Str(String),
    Template { parts: Vec<String>, expressions: Vec<Node> },
    Property(Node, String),
    Element(Node, Node),
    Call { callee: Node, type_arguments: Vec<Node>, arguments: Vec<Node> },
    Arrow { parameters: Vec<String>, body: Node },
    /// A function whose block body has no return statement.
    EmptyFunction,
    Array(Vec<Node>),
    Binary(Node, &'static str, Node),
    Negate(Node),
    Paren(Node),
    /// A node the host panics on when asked to parse it.
    Faulty,
}

impl Node {
    pub fn new(kind: Kind) -> Self {
        Node(Rc::new(NodeData { id: next_id(), kind }))
    }

    fn with_id(id: u32, kind: Kind) -> Self {
        Node(Rc::new(NodeData { id, kind }))
    }

    pub fn id(&self) -> u32 {
        self.0.id
    }

    pub fn kind(&self) -> &Kind {
        &self.0.kind
    }

    pub fn is_same(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn print(&self) -> String {
        match self.kind() {
            Kind::Identifier(name) => name.clone(),
            Kind::Number(value) => nameof_engine::format_number(*value),
            Kind::Str(text) => serde_quote(text),
            Kind::Template { parts, expressions } => {
                let mut out = String::from("`");
                for (i, part) in parts.iter().enumerate() {
                    out.push_str(part);
                    if let Some(expression) = expressions.get(i) {
                        out.push_str("${");
                        out.push_str(&expression.print());
                        out.push('}');
                    }
                }
                out.push('`');
                out
            }
            Kind::Property(expression, name) => format!("{}.{}", expression.print(), name),
            Kind::Element(expression, index) => format!("{}[{}]", expression.print(), index.print()),
            Kind::Call {
                callee,
                type_arguments,
                arguments,
            } => {
                let mut out = callee.print();
                if !type_arguments.is_empty() {
                    out.push('<');
                    out.push_str(&join(type_arguments));
                    out.push('>');
                }
                out.push('(');
                out.push_str(&join(arguments));
                out.push(')');
                out
            }
            Kind::Arrow { parameters, body } => format!("({}) => {}", parameters.join(", "), body.print()),
            Kind::EmptyFunction => "function () {}".to_string(),
            Kind::Array(elements) => format!("[{}]", join(elements)),
            Kind::Binary(left, operator, right) => format!("{} {} {}", left.print(), operator, right.print()),
            Kind::Negate(operand) => format!("-{}", operand.print()),
            Kind::Paren(inner) => format!("({})", inner.print()),
            Kind::Faulty => "faulty".to_string(),
        }
    }
}

fn join(nodes: &[Node]) -> String {
    nodes.iter().map(Node::print).collect::<Vec<_>>().join(", ")
}

fn serde_quote(text: &str) -> String {
    let mut out = String::from("\"");
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

// ============================================================================
// Builders
// ============================================================================

pub fn ident(name: &str) -> Node {
    Node::new(Kind::Identifier(name.to_string()))
}

/// `a.b.c` as nested property accesses.
pub fn access(path: &str) -> Node {
    let mut parts = path.split('.');
    let mut node = ident(parts.next().unwrap());
    for part in parts {
        node = prop(node, part);
    }
    node
}

pub fn prop(expression: Node, name: &str) -> Node {
    Node::new(Kind::Property(expression, name.to_string()))
}

pub fn elem(expression: Node, index: Node) -> Node {
    Node::new(Kind::Element(expression, index))
}

pub fn num(value: f64) -> Node {
    Node::new(Kind::Number(value))
}

pub fn string(text: &str) -> Node {
    Node::new(Kind::Str(text.to_string()))
}

pub fn call(callee: Node, arguments: Vec<Node>) -> Node {
    typed_call(callee, vec![], arguments)
}

pub fn typed_call(callee: Node, type_arguments: Vec<Node>, arguments: Vec<Node>) -> Node {
    Node::new(Kind::Call {
        callee,
        type_arguments,
        arguments,
    })
}

/// `nameof(...)` or `nameof.<function>(...)`.
pub fn nameof(function: Option<&str>, arguments: Vec<Node>) -> Node {
    nameof_typed(function, vec![], arguments)
}

pub fn nameof_typed(function: Option<&str>, type_arguments: Vec<Node>, arguments: Vec<Node>) -> Node {
    let callee = match function {
        Some(function) => prop(ident("nameof"), function),
        None => ident("nameof"),
    };
    typed_call(callee, type_arguments, arguments)
}

pub fn arrow(parameters: &[&str], body: Node) -> Node {
    Node::new(Kind::Arrow {
        parameters: parameters.iter().map(|p| p.to_string()).collect(),
        body,
    })
}

pub fn array(elements: Vec<Node>) -> Node {
    Node::new(Kind::Array(elements))
}

pub fn binary(left: Node, operator: &'static str, right: Node) -> Node {
    Node::new(Kind::Binary(left, operator, right))
}

pub fn negate(operand: Node) -> Node {
    Node::new(Kind::Negate(operand))
}

pub fn paren(inner: Node) -> Node {
    Node::new(Kind::Paren(inner))
}

pub fn empty_function() -> Node {
    Node::new(Kind::EmptyFunction)
}

pub fn faulty() -> Node {
    Node::new(Kind::Faulty)
}

// ============================================================================
// Host
// ============================================================================

pub struct TestContext {
    pub file: String,
    pub nameof: Option<String>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            file: "test.ts".to_string(),
            nameof: None,
        }
    }
}

pub struct TestHost;

impl HostTypes for TestHost {
    type Input = Node;
    type Node = Node;
    type Key = u32;
    type Context = TestContext;

    fn key(&self, node: &Node) -> u32 {
        node.id()
    }
}

impl SourceAccess for TestHost {
    fn get_location(&self, node: &Node, context: &TestContext) -> NodeLocation {
        NodeLocation {
            file_path: Some(context.file.clone()),
            line: Some(1),
            column: Some(node.id()),
        }
    }

    fn get_source_code(&self, node: &Node, _context: &TestContext) -> String {
        node.print()
    }

    fn print_source_code(&self, node: &Node, _context: &TestContext) -> String {
        node.print()
    }
}

impl NodeClassifier for TestHost {
    fn is_call_expression(&self, node: &Node) -> bool {
        matches!(node.kind(), Kind::Call { .. })
    }

    fn is_access_expression(&self, node: &Node) -> bool {
        matches!(node.kind(), Kind::Property(..) | Kind::Element(..))
    }

    fn is_string_literal(&self, node: &Node) -> bool {
        matches!(node.kind(), Kind::Str(_))
    }

    fn is_template_literal(&self, node: &Node) -> bool {
        matches!(node.kind(), Kind::Template { .. })
    }
}

impl ArraySupport for TestHost {
    fn get_array_elements(&self, node: &Node) -> Option<Vec<Node>> {
        match node.kind() {
            Kind::Array(elements) => Some(elements.clone()),
            _ => None,
        }
    }

    fn create_array_literal(&self, elements: Vec<Node>) -> Node {
        array(elements)
    }
}

impl NodeParser for TestHost {
    fn extract(&self, input: Node) -> Node {
        input
    }

    fn parse_internal(&self, node: &Node, context: &TestContext) -> Result<HostSyntax<Node>, NameofError<Node>> {
        Ok(match node.kind() {
            Kind::Identifier(name) => HostSyntax::Identifier { name: name.clone() },
            Kind::Number(value) => HostSyntax::NumericLiteral { value: *value },
            Kind::Str(text) => HostSyntax::StringLiteral { text: text.clone() },
            Kind::Property(expression, name) => HostSyntax::PropertyAccess {
                expression: expression.clone(),
                property_name: name.clone(),
            },
            Kind::Element(expression, index) => HostSyntax::IndexAccess {
                expression: expression.clone(),
                index: index.clone(),
            },
            Kind::Call {
                callee,
                type_arguments,
                arguments,
            } => HostSyntax::CallExpression {
                callee: callee.clone(),
                type_arguments: type_arguments.clone(),
                arguments: arguments.clone(),
            },
            Kind::Arrow { parameters, body } => HostSyntax::Function {
                parameter_names: parameters.clone(),
                body: body.clone(),
            },
            Kind::EmptyFunction => {
                return Err(NameofError::new(node.clone(), NameofErrorKind::NoReturnExpression));
            }
            Kind::Negate(operand) => match operand.kind() {
                Kind::Number(value) => HostSyntax::NumericLiteral { value: -value },
                _ => HostSyntax::Unsupported,
            },
            Kind::Paren(inner) => return self.parse_internal(inner, context),
            Kind::Template { .. } | Kind::Array(_) | Kind::Binary(..) => HostSyntax::Unsupported,
            Kind::Faulty => panic!("cannot parse node {}", node.id()),
        })
    }
}

impl ResultDumper for TestHost {
    fn dump(&self, result: NameofResult<Node>) -> Node {
        match result {
            NameofResult::Plain { text } => string(&text),
            NameofResult::Template { parts, expressions } => Node::new(Kind::Template { parts, expressions }),
            NameofResult::Node { node } => node,
        }
    }
}

impl HostBinding for TestHost {
    fn nameof_name<'c>(&self, context: &'c TestContext) -> Cow<'c, str> {
        match &context.nameof {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Borrowed(nameof_engine::DEFAULT_NAMEOF_NAME),
        }
    }
}

// ============================================================================
// Driver
// ============================================================================

pub type TestEngine = NameofEngine<TestHost, CollectingSink<Node>>;

/// Post-order walk that rebuilds parents whose children were replaced.
pub fn transform_tree(engine: &mut TestEngine, node: &Node, context: &mut TransformContext<'_, TestHost>) -> Node {
    let rebuilt = rebuild_children(engine, node, context);
    engine.transform(rebuilt, context)
}

fn rebuild_children(engine: &mut TestEngine, node: &Node, context: &mut TransformContext<'_, TestHost>) -> Node {
    let mut changed = false;
    let mut visit = |child: &Node, engine: &mut TestEngine, context: &mut TransformContext<'_, TestHost>| {
        let next = transform_tree(engine, child, context);
        changed |= !next.is_same(child);
        next
    };
    let kind = match node.kind() {
        Kind::Property(expression, name) => Kind::Property(visit(expression, engine, context), name.clone()),
        Kind::Element(expression, index) => {
            let expression = visit(expression, engine, context);
            Kind::Element(expression, visit(index, engine, context))
        }
        Kind::Call {
            callee,
            type_arguments,
            arguments,
        } => {
            let callee = visit(callee, engine, context);
            let arguments = arguments.iter().map(|a| visit(a, engine, context)).collect();
            Kind::Call {
                callee,
                type_arguments: type_arguments.clone(),
                arguments,
            }
        }
        Kind::Arrow { parameters, body } => Kind::Arrow {
            parameters: parameters.clone(),
            body: visit(body, engine, context),
        },
        Kind::Array(elements) => Kind::Array(elements.iter().map(|e| visit(e, engine, context)).collect()),
        Kind::Binary(left, operator, right) => {
            let left = visit(left, engine, context);
            Kind::Binary(left, *operator, visit(right, engine, context))
        }
        Kind::Negate(operand) => Kind::Negate(visit(operand, engine, context)),
        Kind::Paren(inner) => Kind::Paren(visit(inner, engine, context)),
        _ => return node.clone(),
    };
    if changed {
        Node::with_id(node.id(), kind)
    } else {
        node.clone()
    }
}

pub struct Outcome {
    pub output: Node,
    pub errors: Vec<NameofErrorKind>,
    pub messages: Vec<String>,
}

impl Outcome {
    pub fn text(&self) -> String {
        self.output.print()
    }
}

/// Transform a whole tree with a fresh engine and context.
pub fn run_with(node: &Node, host_context: &TestContext) -> Outcome {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut engine = NameofEngine::new(TestHost, CollectingSink::new());
    let mut context = TransformContext::new(host_context);
    let output = transform_tree(&mut engine, node, &mut context);
    engine.finish(context);
    let sink = engine.into_sink();
    Outcome {
        output,
        messages: sink.messages(),
        errors: sink.errors.into_iter().map(|(_, error)| error.kind).collect(),
    }
}

pub fn run(node: &Node) -> Outcome {
    run_with(node, &TestContext::new())
}
