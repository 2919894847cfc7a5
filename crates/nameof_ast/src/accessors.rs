//! Uniform header access for the node enums.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use crate::types::NodeId;
use nameof_core::TextRange;

/// Helper to get the NodeData from any statement.
impl<'a> Statement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::VariableStatement(n) => &n.data,
            Statement::FunctionDeclaration(n) => &n.data,
            Statement::ClassDeclaration(n) => &n.data,
            Statement::ModuleDeclaration(n) => &n.data,
            Statement::ImportDeclaration(n) => &n.data,
            Statement::ExportDeclaration(n) => &n.data,
            Statement::ExportAssignment(n) => &n.data,
            Statement::Block(n) => &n.data,
            Statement::EmptyStatement(d) => d,
            Statement::ExpressionStatement(n) => &n.data,
            Statement::IfStatement(n) => &n.data,
            Statement::DoStatement(n) => &n.data,
            Statement::WhileStatement(n) => &n.data,
            Statement::ForStatement(n) => &n.data,
            Statement::ForInStatement(n) => &n.data,
            Statement::ForOfStatement(n) => &n.data,
            Statement::ContinueStatement(n) => &n.data,
            Statement::BreakStatement(n) => &n.data,
            Statement::ReturnStatement(n) => &n.data,
            Statement::SwitchStatement(n) => &n.data,
            Statement::LabeledStatement(n) => &n.data,
            Statement::ThrowStatement(n) => &n.data,
            Statement::TryStatement(n) => &n.data,
            Statement::DebuggerStatement(d) => d,
            Statement::SkippedStatement(n) => &n.data,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn range(&self) -> TextRange {
        self.data().range
    }
}

/// Helper to get the NodeData from any expression.
impl<'a> Expression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Identifier(n) => &n.data,
            Expression::PrivateIdentifier(n) => &n.data,
            Expression::StringLiteral(n) => &n.data,
            Expression::NumericLiteral(n) => &n.data,
            Expression::BigIntLiteral(n) => &n.data,
            Expression::RegularExpressionLiteral(n) => &n.data,
            Expression::NoSubstitutionTemplateLiteral(n) => &n.data,
            Expression::TemplateExpression(n) => &n.data,
            Expression::TaggedTemplateExpression(n) => &n.data,
            Expression::ArrayLiteralExpression(n) => &n.data,
            Expression::ObjectLiteralExpression(n) => &n.data,
            Expression::PropertyAccessExpression(n) => &n.data,
            Expression::ElementAccessExpression(n) => &n.data,
            Expression::CallExpression(n) => &n.data,
            Expression::NewExpression(n) => &n.data,
            Expression::ParenthesizedExpression(n) => &n.data,
            Expression::FunctionExpression(n) => &n.data,
            Expression::ArrowFunction(n) => &n.data,
            Expression::ClassExpression(n) => &n.data,
            Expression::PrefixUnaryExpression(n) => &n.data,
            Expression::PostfixUnaryExpression(n) => &n.data,
            Expression::BinaryExpression(n) => &n.data,
            Expression::ConditionalExpression(n) => &n.data,
            Expression::YieldExpression(n) => &n.data,
            Expression::SpreadElement(n) => &n.data,
            Expression::AsExpression(n) => &n.data,
            Expression::SatisfiesExpression(n) => &n.data,
            Expression::NonNullExpression(n) => &n.data,
            Expression::ThisKeyword(d)
            | Expression::SuperKeyword(d)
            | Expression::NullKeyword(d)
            | Expression::TrueKeyword(d)
            | Expression::FalseKeyword(d)
            | Expression::OmittedExpression(d) => d,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn range(&self) -> TextRange {
        self.data().range
    }

    pub fn id(&self) -> NodeId {
        self.data().id
    }

    /// Strip any number of wrapping parentheses.
    pub fn skip_parentheses(&self) -> &Expression<'a> {
        let mut expr = self;
        while let Expression::ParenthesizedExpression(paren) = expr {
            expr = paren.expression;
        }
        expr
    }
}

/// Helper to get the NodeData from any type node.
impl<'a> TypeNode<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            TypeNode::KeywordType(d) | TypeNode::ThisType(d) => d,
            TypeNode::TypeReference(n) => &n.data,
            TypeNode::FunctionType(n) | TypeNode::ConstructorType(n) => &n.data,
            TypeNode::TypeQuery(n) => &n.data,
            TypeNode::TypeLiteral(n) => &n.data,
            TypeNode::ArrayType(n) => &n.data,
            TypeNode::TupleType(n) => &n.data,
            TypeNode::OptionalType(n) | TypeNode::RestType(n) | TypeNode::ParenthesizedType(n) => {
                &n.data
            }
            TypeNode::UnionType(n) | TypeNode::IntersectionType(n) => &n.data,
            TypeNode::TypeOperator(n) => &n.data,
            TypeNode::IndexedAccessType(n) => &n.data,
            TypeNode::LiteralType(n) => &n.data,
            TypeNode::ImportType(n) => &n.data,
            TypeNode::SkippedType(n) => &n.data,
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn range(&self) -> TextRange {
        self.data().range
    }

    pub fn id(&self) -> NodeId {
        self.data().id
    }
}

impl<'a> EntityName<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            EntityName::Identifier(n) => &n.data,
            EntityName::QualifiedName(n) => &n.data,
        }
    }

    pub fn range(&self) -> TextRange {
        self.data().range
    }

    pub fn id(&self) -> NodeId {
        self.data().id
    }
}

impl<'a> PropertyName<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            PropertyName::Identifier(n) | PropertyName::PrivateIdentifier(n) => &n.data,
            PropertyName::StringLiteral(n) => &n.data,
            PropertyName::NumericLiteral(n) => &n.data,
            PropertyName::ComputedPropertyName(n) => &n.data,
        }
    }
}

impl<'a> BindingName<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            BindingName::Identifier(n) => &n.data,
            BindingName::ObjectBindingPattern(n) => &n.data,
            BindingName::ArrayBindingPattern(n) => &n.data,
        }
    }

    /// The bound identifier, when the name is not a destructuring pattern.
    pub fn as_identifier(&self) -> Option<&'a Identifier<'a>> {
        match self {
            BindingName::Identifier(ident) => Some(ident),
            _ => None,
        }
    }
}

impl<'a> ClassElement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            ClassElement::PropertyDeclaration(n) => &n.data,
            ClassElement::MethodDeclaration(n) => &n.data,
            ClassElement::IndexSignature(n) => &n.data,
            ClassElement::ClassStaticBlockDeclaration(n) => &n.data,
            ClassElement::SemicolonClassElement(d) => d,
        }
    }
}

impl<'a> ObjectLiteralElement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            ObjectLiteralElement::PropertyAssignment(n) => &n.data,
            ObjectLiteralElement::ShorthandPropertyAssignment(n) => &n.data,
            ObjectLiteralElement::SpreadAssignment(n) => &n.data,
            ObjectLiteralElement::MethodDeclaration(n) => &n.data,
        }
    }
}
