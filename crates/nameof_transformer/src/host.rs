//! The engine's view of the TypeScript syntax tree.
//!
//! [`AstHost`] classifies one node at a time into the engine's canonical
//! shapes and builds the literals a resolved call is replaced with. Nodes
//! are handed around as [`HostNode`], a copyable reference into the arena.

use std::borrow::Cow;

use nameof_ast::*;
use nameof_core::{LineMap, TextRange};
use nameof_engine::{
    ArraySupport, HostBinding, HostSyntax, HostTypes, NameofError, NameofErrorKind, NameofResult, NodeClassifier,
    NodeLocation, NodeParser, ResultDumper, SourceAccess,
};
use nameof_printer::Printer;

use crate::factory::NodeFactory;

// ============================================================================
// Nodes
// ============================================================================

/// A node the engine can look at: an expression, a type, or a dotted name
/// inside a type.
#[derive(Debug, Clone, Copy)]
pub enum HostNode<'a> {
    Expression(&'a Expression<'a>),
    Type(&'a TypeNode<'a>),
    EntityName(&'a EntityName<'a>),
}

impl<'a> HostNode<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            HostNode::Expression(expr) => expr.data(),
            HostNode::Type(ty) => ty.data(),
            HostNode::EntityName(name) => name.data(),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.data().id
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }

    pub fn as_expression(&self) -> Option<&'a Expression<'a>> {
        match *self {
            HostNode::Expression(expr) => Some(expr),
            _ => None,
        }
    }
}

// ============================================================================
// Per-file context
// ============================================================================

/// What the host needs to know about the file being transformed.
pub struct FileContext<'a> {
    pub file_name: &'a str,
    pub text: &'a str,
    line_map: LineMap,
    nameof_name: String,
}

impl<'a> FileContext<'a> {
    pub fn new(file_name: &'a str, text: &'a str, nameof_name: impl Into<String>) -> Self {
        Self {
            file_name,
            text,
            line_map: LineMap::new(text),
            nameof_name: nameof_name.into(),
        }
    }

    /// The marker identifier for this file.
    pub fn nameof_name(&self) -> &str {
        &self.nameof_name
    }

    /// 1-based line and column of `pos`.
    pub fn position_of(&self, pos: u32) -> (u32, u32) {
        let lc = self.line_map.line_and_column_of(self.text, pos);
        (lc.line + 1, lc.character + 1)
    }
}

// ============================================================================
// Host
// ============================================================================

pub struct AstHost<'a> {
    factory: NodeFactory<'a>,
}

impl<'a> AstHost<'a> {
    pub fn new(factory: NodeFactory<'a>) -> Self {
        Self { factory }
    }

    #[inline]
    pub fn factory(&self) -> &NodeFactory<'a> {
        &self.factory
    }

    /// Print `node`, copying original text where the node still has it.
    fn print(&self, node: &HostNode<'a>, source_text: Option<&str>) -> String {
        let mut printer = match source_text {
            Some(text) => Printer::with_source(text),
            None => Printer::new(),
        };
        match node {
            HostNode::Expression(expr) => printer.expression_to_string(expr),
            HostNode::Type(ty) => printer.type_to_string(ty),
            HostNode::EntityName(name) => printer.entity_name_to_string(name),
        }
    }

    /// An expression for `node`. Types and names have no expression form,
    /// so they become an identifier spelled like their printed text.
    fn to_expression(&self, node: &HostNode<'a>) -> Expression<'a> {
        match node {
            HostNode::Expression(expr) => (*expr).clone(),
            other => {
                let text = self.print(other, None);
                log::warn!("non-expression node {} used as an expression: `{}`", other.id(), text);
                self.factory.identifier(&text).clone()
            }
        }
    }

    fn error(&self, node: HostNode<'a>, kind: NameofErrorKind) -> NameofError<HostNode<'a>> {
        NameofError::new(node, kind)
    }

    // ========================================================================
    // Classification
    // ========================================================================

    fn parse_expression(
        &self,
        node: HostNode<'a>,
        expr: &'a Expression<'a>,
        context: &FileContext<'a>,
    ) -> Result<HostSyntax<HostNode<'a>>, NameofError<HostNode<'a>>> {
        Ok(match *expr {
            Expression::CallExpression(call) => HostSyntax::CallExpression {
                callee: HostNode::Expression(call.expression),
                type_arguments: call
                    .type_arguments
                    .unwrap_or(&[])
                    .iter()
                    .map(HostNode::Type)
                    .collect(),
                arguments: call.arguments.iter().map(HostNode::Expression).collect(),
            },
            Expression::ThisKeyword(data) | Expression::SuperKeyword(data) => HostSyntax::Identifier {
                name: data.kind.token_text().unwrap_or_default().to_string(),
            },
            Expression::NumericLiteral(literal) => HostSyntax::NumericLiteral { value: literal.value },
            Expression::StringLiteral(literal) => HostSyntax::StringLiteral {
                text: literal.text.to_string(),
            },
            Expression::Identifier(identifier) => HostSyntax::Identifier {
                name: identifier.text.to_string(),
            },
            Expression::ParenthesizedExpression(paren) => {
                return self.parse_internal(&HostNode::Expression(paren.expression), context)
            }
            Expression::NonNullExpression(non_null) => {
                return self.parse_internal(&HostNode::Expression(non_null.expression), context)
            }
            Expression::AsExpression(as_expr) | Expression::SatisfiesExpression(as_expr) => {
                return self.parse_internal(&HostNode::Expression(as_expr.expression), context)
            }
            Expression::PrefixUnaryExpression(unary)
                if matches!(unary.operator, SyntaxKind::PlusToken | SyntaxKind::MinusToken) =>
            {
                match self.parse_internal(&HostNode::Expression(unary.operand), context)? {
                    HostSyntax::NumericLiteral { value } if unary.operator == SyntaxKind::MinusToken => {
                        HostSyntax::NumericLiteral { value: -value }
                    }
                    syntax @ HostSyntax::NumericLiteral { .. } => syntax,
                    _ => HostSyntax::Unsupported,
                }
            }
            Expression::PropertyAccessExpression(access) => HostSyntax::PropertyAccess {
                expression: HostNode::Expression(access.expression),
                property_name: access.name.text.to_string(),
            },
            Expression::ElementAccessExpression(access) => HostSyntax::IndexAccess {
                expression: HostNode::Expression(access.expression),
                index: HostNode::Expression(access.argument_expression),
            },
            Expression::ArrowFunction(arrow) => {
                let body = match arrow.body {
                    ArrowFunctionBody::Expression(body) => Some(body),
                    ArrowFunctionBody::Block(block) => return_expression(block),
                };
                return self.parse_function(node, arrow.parameters, body, context);
            }
            Expression::FunctionExpression(function) => {
                let body = return_expression(&function.body);
                return self.parse_function(node, function.parameters, body, context);
            }
            _ => HostSyntax::Unsupported,
        })
    }

    fn parse_type(
        &self,
        node: HostNode<'a>,
        ty: &'a TypeNode<'a>,
        context: &FileContext<'a>,
    ) -> Result<HostSyntax<HostNode<'a>>, NameofError<HostNode<'a>>> {
        Ok(match *ty {
            TypeNode::KeywordType(data) | TypeNode::ThisType(data) => HostSyntax::Identifier {
                name: data.kind.token_text().unwrap_or_default().to_string(),
            },
            TypeNode::TypeReference(reference) => {
                return self.parse_internal(&HostNode::EntityName(&reference.type_name), context)
            }
            TypeNode::TypeQuery(query) => return self.parse_internal(&HostNode::EntityName(&query.expr_name), context),
            TypeNode::ImportType(import) => match import.qualifier {
                Some(ref qualifier) => return self.parse_internal(&HostNode::EntityName(qualifier), context),
                None => {
                    return Err(self.error(
                        node,
                        NameofErrorKind::MissingImportTypeQualifier {
                            code: self.get_source_code(&node, context),
                        },
                    ))
                }
            },
            TypeNode::ParenthesizedType(wrapped) => {
                return self.parse_internal(&HostNode::Type(wrapped.type_node), context)
            }
            TypeNode::IndexedAccessType(access) => HostSyntax::IndexAccess {
                expression: HostNode::Type(access.object_type),
                index: HostNode::Type(access.index_type),
            },
            // `T["key"]` and `T[0]` index with a literal type.
            TypeNode::LiteralType(literal) => return self.parse_internal(&HostNode::Expression(literal.literal), context),
            _ => HostSyntax::Unsupported,
        })
    }

    fn parse_entity_name(&self, name: &'a EntityName<'a>) -> HostSyntax<HostNode<'a>> {
        match *name {
            EntityName::Identifier(identifier) => HostSyntax::Identifier {
                name: identifier.text.to_string(),
            },
            EntityName::QualifiedName(qualified) => HostSyntax::PropertyAccess {
                expression: HostNode::EntityName(&qualified.left),
                property_name: qualified.right.text.to_string(),
            },
        }
    }

    fn parse_function(
        &self,
        node: HostNode<'a>,
        parameters: &'a [ParameterDeclaration<'a>],
        body: Option<&'a Expression<'a>>,
        context: &FileContext<'a>,
    ) -> Result<HostSyntax<HostNode<'a>>, NameofError<HostNode<'a>>> {
        let body = body.ok_or_else(|| self.error(node, NameofErrorKind::NoReturnExpression))?;
        let parameter_names = parameters
            .iter()
            .map(|parameter| match parameter.name.as_identifier() {
                Some(identifier) => Ok(identifier.text.to_string()),
                None => {
                    let code = parameter
                        .data
                        .range
                        .slice(context.text)
                        .map(str::to_string)
                        .unwrap_or_else(|| self.get_source_code(&node, context));
                    Err(self.error(node, NameofErrorKind::UnsupportedNode { code, nested_in: None }))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HostSyntax::Function {
            parameter_names,
            body: HostNode::Expression(body),
        })
    }
}

/// The expression of the first `return` in `block` that has one. Other
/// statements are ignored.
fn return_expression<'a>(block: &'a Block<'a>) -> Option<&'a Expression<'a>> {
    block.statements.iter().find_map(|statement| match statement {
        Statement::ReturnStatement(ret) => ret.expression,
        _ => None,
    })
}

// ============================================================================
// Engine capabilities
// ============================================================================

impl<'a> HostTypes for AstHost<'a> {
    type Input = HostNode<'a>;
    type Node = HostNode<'a>;
    type Key = NodeId;
    type Context = FileContext<'a>;

    #[inline]
    fn key(&self, node: &HostNode<'a>) -> NodeId {
        node.id()
    }
}

impl<'a> SourceAccess for AstHost<'a> {
    fn get_location(&self, node: &HostNode<'a>, context: &FileContext<'a>) -> NodeLocation {
        let range = node.range();
        let range = if range.is_synthesized() {
            self.factory.origin(node.id())
        } else {
            Some(range)
        };
        let position = range.map(|range| context.position_of(range.pos));
        NodeLocation {
            file_path: Some(context.file_name.to_string()),
            line: position.map(|(line, _)| line),
            column: position.map(|(_, column)| column),
        }
    }

    fn get_source_code(&self, node: &HostNode<'a>, context: &FileContext<'a>) -> String {
        self.print(node, Some(context.text))
    }

    fn print_source_code(&self, node: &HostNode<'a>, _context: &FileContext<'a>) -> String {
        self.print(node, None)
    }
}

impl<'a> NodeClassifier for AstHost<'a> {
    fn is_call_expression(&self, node: &HostNode<'a>) -> bool {
        matches!(node, HostNode::Expression(Expression::CallExpression(_)))
    }

    fn is_access_expression(&self, node: &HostNode<'a>) -> bool {
        matches!(
            node,
            HostNode::Expression(Expression::PropertyAccessExpression(_) | Expression::ElementAccessExpression(_))
        )
    }

    fn is_string_literal(&self, node: &HostNode<'a>) -> bool {
        matches!(node, HostNode::Expression(Expression::StringLiteral(_)))
    }

    fn is_template_literal(&self, node: &HostNode<'a>) -> bool {
        matches!(
            node,
            HostNode::Expression(Expression::NoSubstitutionTemplateLiteral(_) | Expression::TemplateExpression(_))
        )
    }
}

impl<'a> ArraySupport for AstHost<'a> {
    fn get_array_elements(&self, node: &HostNode<'a>) -> Option<Vec<HostNode<'a>>> {
        match node.as_expression()?.skip_parentheses() {
            Expression::ArrayLiteralExpression(array) => Some(array.elements.iter().map(HostNode::Expression).collect()),
            _ => None,
        }
    }

    fn create_array_literal(&self, elements: Vec<HostNode<'a>>) -> HostNode<'a> {
        let elements = elements.iter().map(|element| self.to_expression(element)).collect();
        HostNode::Expression(self.factory.array_literal(elements))
    }
}

impl<'a> NodeParser for AstHost<'a> {
    #[inline]
    fn extract(&self, input: HostNode<'a>) -> HostNode<'a> {
        input
    }

    fn parse_internal(
        &self,
        node: &HostNode<'a>,
        context: &FileContext<'a>,
    ) -> Result<HostSyntax<HostNode<'a>>, NameofError<HostNode<'a>>> {
        match *node {
            HostNode::Expression(expr) => self.parse_expression(*node, expr, context),
            HostNode::Type(ty) => self.parse_type(*node, ty, context),
            HostNode::EntityName(name) => Ok(self.parse_entity_name(name)),
        }
    }
}

impl<'a> ResultDumper for AstHost<'a> {
    fn dump(&self, result: NameofResult<HostNode<'a>>) -> HostNode<'a> {
        match result {
            NameofResult::Plain { text } => HostNode::Expression(self.factory.string_literal(&text)),
            NameofResult::Template { parts, expressions } => {
                let expressions = expressions.iter().map(|node| self.to_expression(node)).collect();
                HostNode::Expression(self.factory.template_expression(&parts, expressions))
            }
            NameofResult::Node { node } => node,
        }
    }
}

impl<'a> HostBinding for AstHost<'a> {
    fn nameof_name<'c>(&self, context: &'c FileContext<'a>) -> Cow<'c, str> {
        Cow::Borrowed(context.nameof_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use nameof_parser::parse_source_text;

    /// Helper: the expression of the first expression statement.
    fn first_expression<'a>(file: &'a SourceFile<'a>) -> &'a Expression<'a> {
        match &file.statements[0] {
            Statement::ExpressionStatement(stmt) => stmt.expression,
            other => panic!("expected an expression statement, got {:?}", other.kind()),
        }
    }

    /// Helper: parse `source` and classify its first expression.
    fn classify(source: &str) -> Result<HostSyntax<String>, String> {
        let arena = Bump::new();
        let file = parse_source_text(&arena, "test.ts", source).source_file;
        let host = AstHost::new(NodeFactory::for_source_file(&arena, file));
        let context = FileContext::new(file.file_name, file.text, "nameof");
        let node = HostNode::Expression(first_expression(file));
        let code = |node: &HostNode<'_>| host.get_source_code(node, &context);
        match host.parse_internal(&node, &context) {
            Ok(syntax) => Ok(match syntax {
                HostSyntax::Identifier { name } => HostSyntax::Identifier { name },
                HostSyntax::NumericLiteral { value } => HostSyntax::NumericLiteral { value },
                HostSyntax::StringLiteral { text } => HostSyntax::StringLiteral { text },
                HostSyntax::CallExpression {
                    callee,
                    type_arguments,
                    arguments,
                } => HostSyntax::CallExpression {
                    callee: code(&callee),
                    type_arguments: type_arguments.iter().map(code).collect(),
                    arguments: arguments.iter().map(code).collect(),
                },
                HostSyntax::PropertyAccess {
                    expression,
                    property_name,
                } => HostSyntax::PropertyAccess {
                    expression: code(&expression),
                    property_name,
                },
                HostSyntax::IndexAccess { expression, index } => HostSyntax::IndexAccess {
                    expression: code(&expression),
                    index: code(&index),
                },
                HostSyntax::Function { parameter_names, body } => HostSyntax::Function {
                    parameter_names,
                    body: code(&body),
                },
                HostSyntax::Unsupported => HostSyntax::Unsupported,
            }),
            Err(error) => Err(error.to_string()),
        }
    }

    #[test]
    fn test_classify_names_and_literals() {
        assert!(matches!(classify("foo;"), Ok(HostSyntax::Identifier { name }) if name == "foo"));
        assert!(matches!(classify("this;"), Ok(HostSyntax::Identifier { name }) if name == "this"));
        assert!(matches!(classify("'a';"), Ok(HostSyntax::StringLiteral { text }) if text == "a"));
        assert!(matches!(classify("-2;"), Ok(HostSyntax::NumericLiteral { value }) if value == -2.0));
        assert!(matches!(classify("(x!) as any;"), Ok(HostSyntax::Identifier { name }) if name == "x"));
        assert!(matches!(classify("null;"), Ok(HostSyntax::Unsupported)));
        assert!(matches!(classify("-x;"), Ok(HostSyntax::Unsupported)));
    }

    #[test]
    fn test_classify_accesses_and_calls() {
        match classify("a.b[0];") {
            Ok(HostSyntax::IndexAccess { expression, index }) => {
                assert_eq!(expression, "a.b");
                assert_eq!(index, "0");
            }
            other => panic!("unexpected {:?}", other),
        }
        match classify("nameof<T>(x, 1);") {
            Ok(HostSyntax::CallExpression {
                callee,
                type_arguments,
                arguments,
            }) => {
                assert_eq!(callee, "nameof");
                assert_eq!(type_arguments, vec!["T"]);
                assert_eq!(arguments, vec!["x", "1"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_classify_functions() {
        match classify("(o) => { f(); return o.prop; };") {
            Ok(HostSyntax::Function { parameter_names, body }) => {
                assert_eq!(parameter_names, vec!["o"]);
                assert_eq!(body, "o.prop");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            classify("(function () { f(); });").unwrap_err(),
            "Unable to find a returned expression in the specified function."
        );
        assert_eq!(
            classify("({ a }) => a;").unwrap_err(),
            "The expression `{ a }` is not supported."
        );
    }

    #[test]
    fn test_location_is_one_based() {
        let arena = Bump::new();
        let file = parse_source_text(&arena, "loc.ts", "\n  foo;").source_file;
        let host = AstHost::new(NodeFactory::for_source_file(&arena, file));
        let context = FileContext::new(file.file_name, file.text, "nameof");
        let location = host.get_location(&HostNode::Expression(first_expression(file)), &context);
        assert_eq!(location.file_path.as_deref(), Some("loc.ts"));
        assert_eq!((location.line, location.column), (Some(2), Some(3)));
    }
}
