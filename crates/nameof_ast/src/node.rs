//! AST node definitions.
//!
//! Nodes are allocated in a bump arena and borrow their text from the
//! source (or from the arena for synthesized nodes). Every node carries a
//! `NodeData` header. All node types are `Clone` so a rewriting pass can
//! copy a node, swap one child, and allocate the result.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use nameof_core::TextRange;

/// Common data shared by all AST nodes.
#[derive(Debug, Clone, Copy)]
pub struct NodeData {
    /// The kind of this node.
    pub kind: SyntaxKind,
    /// Source position range.
    pub range: TextRange,
    /// Node flags.
    pub flags: NodeFlags,
    /// Modifier flags (for declarations).
    pub modifier_flags: ModifierFlags,
    /// Unique node ID (assigned by the parser or the rewriter).
    pub id: NodeId,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            kind,
            range: TextRange::new(pos, end),
            flags: NodeFlags::NONE,
            modifier_flags: ModifierFlags::NONE,
            id: NodeId::INVALID,
        }
    }

    /// Header for a node created by a transformation.
    pub fn synthesized(kind: SyntaxKind, id: NodeId) -> Self {
        Self {
            kind,
            range: TextRange::SYNTHESIZED,
            flags: NodeFlags::SYNTHESIZED,
            modifier_flags: ModifierFlags::NONE,
            id,
        }
    }

    /// Copy of this header marked as rewritten under a fresh id.
    pub fn rewritten(&self, id: NodeId) -> Self {
        Self {
            flags: self.flags | NodeFlags::REWRITTEN,
            id,
            ..*self
        }
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// An optional arena-allocated node.
pub type OptionalNode<'a, T> = Option<&'a T>;

// ============================================================================
// Source File
// ============================================================================

#[derive(Debug, Clone)]
pub struct SourceFile<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
    pub file_name: &'a str,
    pub text: &'a str,
    /// Number of ids handed out by the parser.
    pub node_count: u32,
}

// ============================================================================
// Names
// ============================================================================

#[derive(Debug, Clone)]
pub struct Identifier<'a> {
    pub data: NodeData,
    /// Identifier text with escapes resolved.
    pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct QualifiedName<'a> {
    pub data: NodeData,
    pub left: EntityName<'a>,
    pub right: Identifier<'a>,
}

/// An entity name: either an identifier or a qualified name.
#[derive(Debug, Clone)]
pub enum EntityName<'a> {
    Identifier(&'a Identifier<'a>),
    QualifiedName(&'a QualifiedName<'a>),
}

#[derive(Debug, Clone)]
pub struct ComputedPropertyName<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// Names used in object literals, class members, and type members.
#[derive(Debug, Clone)]
pub enum PropertyName<'a> {
    Identifier(&'a Identifier<'a>),
    PrivateIdentifier(&'a Identifier<'a>),
    StringLiteral(&'a StringLiteral<'a>),
    NumericLiteral(&'a NumericLiteral<'a>),
    ComputedPropertyName(&'a ComputedPropertyName<'a>),
}

// ============================================================================
// Binding patterns
// ============================================================================

#[derive(Debug, Clone)]
pub enum BindingName<'a> {
    Identifier(&'a Identifier<'a>),
    ObjectBindingPattern(&'a ObjectBindingPattern<'a>),
    ArrayBindingPattern(&'a ArrayBindingPattern<'a>),
}

#[derive(Debug, Clone)]
pub struct ObjectBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, BindingElement<'a>>,
}

#[derive(Debug, Clone)]
pub struct ArrayBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, ArrayBindingElement<'a>>,
}

#[derive(Debug, Clone)]
pub enum ArrayBindingElement<'a> {
    BindingElement(&'a BindingElement<'a>),
    OmittedExpression(NodeData),
}

#[derive(Debug, Clone)]
pub struct BindingElement<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: bool,
    pub property_name: Option<PropertyName<'a>>,
    pub name: BindingName<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

// ============================================================================
// Signatures
// ============================================================================

#[derive(Debug, Clone)]
pub struct TypeParameterDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub constraint: OptionalNode<'a, TypeNode<'a>>,
    pub default: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug, Clone)]
pub struct ParameterDeclaration<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: bool,
    pub name: BindingName<'a>,
    pub question_token: bool,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct Decorator<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone)]
pub enum Statement<'a> {
    VariableStatement(&'a VariableStatement<'a>),
    FunctionDeclaration(&'a FunctionDeclaration<'a>),
    ClassDeclaration(&'a ClassDeclaration<'a>),
    ModuleDeclaration(&'a ModuleDeclaration<'a>),
    ImportDeclaration(&'a ImportDeclaration<'a>),
    ExportDeclaration(&'a ExportDeclaration<'a>),
    ExportAssignment(&'a ExportAssignment<'a>),
    Block(&'a Block<'a>),
    EmptyStatement(NodeData),
    ExpressionStatement(&'a ExpressionStatement<'a>),
    IfStatement(&'a IfStatement<'a>),
    DoStatement(&'a DoStatement<'a>),
    WhileStatement(&'a WhileStatement<'a>),
    ForStatement(&'a ForStatement<'a>),
    ForInStatement(&'a ForInOrOfStatement<'a>),
    ForOfStatement(&'a ForInOrOfStatement<'a>),
    ContinueStatement(&'a JumpStatement<'a>),
    BreakStatement(&'a JumpStatement<'a>),
    ReturnStatement(&'a ReturnStatement<'a>),
    SwitchStatement(&'a SwitchStatement<'a>),
    LabeledStatement(&'a LabeledStatement<'a>),
    ThrowStatement(&'a ThrowStatement<'a>),
    TryStatement(&'a TryStatement<'a>),
    DebuggerStatement(NodeData),
    /// Type-only declarations (interfaces, aliases, enums, ambient blocks)
    /// and recovered garbage, kept verbatim.
    SkippedStatement(&'a SkippedStatement<'a>),
}

#[derive(Debug, Clone)]
pub struct SkippedStatement<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct VariableStatement<'a> {
    pub data: NodeData,
    pub declaration_list: VariableDeclarationList<'a>,
}

#[derive(Debug, Clone)]
pub struct VariableDeclarationList<'a> {
    pub data: NodeData,
    pub declarations: NodeList<'a, VariableDeclaration<'a>>,
}

#[derive(Debug, Clone)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub name: BindingName<'a>,
    pub exclamation_token: bool,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct FunctionDeclaration<'a> {
    pub data: NodeData,
    pub decorators: NodeList<'a, Decorator<'a>>,
    pub asterisk_token: bool,
    pub name: Option<Identifier<'a>>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: OptionalNode<'a, Block<'a>>,
}

#[derive(Debug, Clone)]
pub struct ClassDeclaration<'a> {
    pub data: NodeData,
    pub decorators: NodeList<'a, Decorator<'a>>,
    pub name: Option<Identifier<'a>>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub heritage_clauses: NodeList<'a, HeritageClause<'a>>,
    pub members: NodeList<'a, ClassElement<'a>>,
}

/// `namespace A.B { ... }` or `module "m" { ... }`.
#[derive(Debug, Clone)]
pub struct ModuleDeclaration<'a> {
    pub data: NodeData,
    /// Dotted or quoted name as written.
    pub name: &'a str,
    pub body: OptionalNode<'a, Block<'a>>,
}

#[derive(Debug, Clone)]
pub struct HeritageClause<'a> {
    pub data: NodeData,
    /// `ExtendsKeyword` or `ImplementsKeyword`.
    pub token: SyntaxKind,
    pub types: NodeList<'a, ExpressionWithTypeArguments<'a>>,
}

#[derive(Debug, Clone)]
pub struct ExpressionWithTypeArguments<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug, Clone)]
pub enum ClassElement<'a> {
    PropertyDeclaration(&'a PropertyDeclaration<'a>),
    /// Methods, accessors, and constructors; `data.kind` tells them apart.
    MethodDeclaration(&'a MethodDeclaration<'a>),
    IndexSignature(&'a TypeElement<'a>),
    ClassStaticBlockDeclaration(&'a Block<'a>),
    SemicolonClassElement(NodeData),
}

#[derive(Debug, Clone)]
pub struct PropertyDeclaration<'a> {
    pub data: NodeData,
    pub decorators: NodeList<'a, Decorator<'a>>,
    pub name: PropertyName<'a>,
    pub question_token: bool,
    pub exclamation_token: bool,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct MethodDeclaration<'a> {
    pub data: NodeData,
    pub decorators: NodeList<'a, Decorator<'a>>,
    pub asterisk_token: bool,
    pub name: PropertyName<'a>,
    pub question_token: bool,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: OptionalNode<'a, Block<'a>>,
}

#[derive(Debug, Clone)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    pub import_clause: Option<ImportClause<'a>>,
    pub module_specifier: StringLiteral<'a>,
}

#[derive(Debug, Clone)]
pub struct ImportClause<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    /// Default import binding.
    pub name: Option<Identifier<'a>>,
    pub named_bindings: Option<NamedImportBindings<'a>>,
}

#[derive(Debug, Clone)]
pub enum NamedImportBindings<'a> {
    NamespaceImport(&'a Identifier<'a>),
    NamedImports(NodeList<'a, ImportSpecifier<'a>>),
}

#[derive(Debug, Clone)]
pub struct ImportSpecifier<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub property_name: Option<Identifier<'a>>,
    pub name: Identifier<'a>,
}

#[derive(Debug, Clone)]
pub struct ExportDeclaration<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub export_clause: Option<NamedExportBindings<'a>>,
    pub module_specifier: Option<StringLiteral<'a>>,
}

#[derive(Debug, Clone)]
pub enum NamedExportBindings<'a> {
    /// `export * as ns from "m"`
    NamespaceExport(&'a Identifier<'a>),
    NamedExports(NodeList<'a, ExportSpecifier<'a>>),
}

#[derive(Debug, Clone)]
pub struct ExportSpecifier<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub property_name: Option<Identifier<'a>>,
    pub name: Identifier<'a>,
}

/// `export default expr` or `export = expr`.
#[derive(Debug, Clone)]
pub struct ExportAssignment<'a> {
    pub data: NodeData,
    pub is_export_equals: bool,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug, Clone)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub then_statement: &'a Statement<'a>,
    pub else_statement: OptionalNode<'a, Statement<'a>>,
}

#[derive(Debug, Clone)]
pub struct DoStatement<'a> {
    pub data: NodeData,
    pub statement: &'a Statement<'a>,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct WhileStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug, Clone)]
pub enum ForInitializer<'a> {
    VariableDeclarationList(&'a VariableDeclarationList<'a>),
    Expression(&'a Expression<'a>),
}

#[derive(Debug, Clone)]
pub struct ForStatement<'a> {
    pub data: NodeData,
    pub initializer: Option<ForInitializer<'a>>,
    pub condition: OptionalNode<'a, Expression<'a>>,
    pub incrementor: OptionalNode<'a, Expression<'a>>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct ForInOrOfStatement<'a> {
    pub data: NodeData,
    pub await_modifier: bool,
    pub initializer: ForInitializer<'a>,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct JumpStatement<'a> {
    pub data: NodeData,
    pub label: Option<Identifier<'a>>,
}

#[derive(Debug, Clone)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub expression: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct SwitchStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub clauses: NodeList<'a, CaseOrDefaultClause<'a>>,
}

#[derive(Debug, Clone)]
pub struct CaseOrDefaultClause<'a> {
    pub data: NodeData,
    /// `None` for the `default:` clause.
    pub expression: OptionalNode<'a, Expression<'a>>,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug, Clone)]
pub struct LabeledStatement<'a> {
    pub data: NodeData,
    pub label: Identifier<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct ThrowStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct TryStatement<'a> {
    pub data: NodeData,
    pub try_block: Block<'a>,
    pub catch_clause: Option<CatchClause<'a>>,
    pub finally_block: Option<Block<'a>>,
}

#[derive(Debug, Clone)]
pub struct CatchClause<'a> {
    pub data: NodeData,
    pub variable_declaration: Option<VariableDeclaration<'a>>,
    pub block: Block<'a>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone)]
pub enum Expression<'a> {
    Identifier(&'a Identifier<'a>),
    PrivateIdentifier(&'a Identifier<'a>),
    StringLiteral(&'a StringLiteral<'a>),
    NumericLiteral(&'a NumericLiteral<'a>),
    BigIntLiteral(&'a LiteralExpression<'a>),
    RegularExpressionLiteral(&'a LiteralExpression<'a>),
    NoSubstitutionTemplateLiteral(&'a TemplateLiteralPiece<'a>),
    TemplateExpression(&'a TemplateExpression<'a>),
    TaggedTemplateExpression(&'a TaggedTemplateExpression<'a>),
    ArrayLiteralExpression(&'a ArrayLiteralExpression<'a>),
    ObjectLiteralExpression(&'a ObjectLiteralExpression<'a>),
    PropertyAccessExpression(&'a PropertyAccessExpression<'a>),
    ElementAccessExpression(&'a ElementAccessExpression<'a>),
    CallExpression(&'a CallExpression<'a>),
    NewExpression(&'a NewExpression<'a>),
    ParenthesizedExpression(&'a ParenthesizedExpression<'a>),
    FunctionExpression(&'a FunctionExpression<'a>),
    ArrowFunction(&'a ArrowFunction<'a>),
    ClassExpression(&'a ClassDeclaration<'a>),
    /// Prefix operators including `typeof`, `void`, `delete`, and `await`.
    PrefixUnaryExpression(&'a PrefixUnaryExpression<'a>),
    PostfixUnaryExpression(&'a PostfixUnaryExpression<'a>),
    BinaryExpression(&'a BinaryExpression<'a>),
    ConditionalExpression(&'a ConditionalExpression<'a>),
    YieldExpression(&'a YieldExpression<'a>),
    SpreadElement(&'a SpreadElement<'a>),
    AsExpression(&'a AsExpression<'a>),
    SatisfiesExpression(&'a AsExpression<'a>),
    NonNullExpression(&'a NonNullExpression<'a>),
    ThisKeyword(NodeData),
    SuperKeyword(NodeData),
    NullKeyword(NodeData),
    TrueKeyword(NodeData),
    FalseKeyword(NodeData),
    OmittedExpression(NodeData),
}

#[derive(Debug, Clone)]
pub struct StringLiteral<'a> {
    pub data: NodeData,
    /// Cooked value with escapes resolved.
    pub text: &'a str,
    pub is_single_quote: bool,
}

#[derive(Debug, Clone)]
pub struct NumericLiteral<'a> {
    pub data: NodeData,
    /// Source spelling, e.g. `0x10` or `1_000`.
    pub text: &'a str,
    pub value: f64,
}

/// A literal kept by its source spelling only (bigint, regex).
#[derive(Debug, Clone)]
pub struct LiteralExpression<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

/// Head, middle, tail, or whole of a template literal.
#[derive(Debug, Clone)]
pub struct TemplateLiteralPiece<'a> {
    pub data: NodeData,
    /// Cooked text.
    pub text: &'a str,
    /// Raw text between the delimiters.
    pub raw_text: &'a str,
}

#[derive(Debug, Clone)]
pub struct TemplateExpression<'a> {
    pub data: NodeData,
    pub head: TemplateLiteralPiece<'a>,
    pub template_spans: NodeList<'a, TemplateSpan<'a>>,
}

#[derive(Debug, Clone)]
pub struct TemplateSpan<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub literal: TemplateLiteralPiece<'a>,
}

#[derive(Debug, Clone)]
pub struct TaggedTemplateExpression<'a> {
    pub data: NodeData,
    pub tag: &'a Expression<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    pub template: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ArrayLiteralExpression<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct ObjectLiteralExpression<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, ObjectLiteralElement<'a>>,
}

#[derive(Debug, Clone)]
pub enum ObjectLiteralElement<'a> {
    PropertyAssignment(&'a PropertyAssignment<'a>),
    ShorthandPropertyAssignment(&'a ShorthandPropertyAssignment<'a>),
    SpreadAssignment(&'a SpreadElement<'a>),
    MethodDeclaration(&'a MethodDeclaration<'a>),
}

#[derive(Debug, Clone)]
pub struct PropertyAssignment<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ShorthandPropertyAssignment<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    /// `{ a = 1 }` inside destructuring assignment targets.
    pub object_assignment_initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct PropertyAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot_token: bool,
    /// Member name; `#x` names keep their `#`.
    pub name: Identifier<'a>,
}

#[derive(Debug, Clone)]
pub struct ElementAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot_token: bool,
    pub argument_expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot_token: bool,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    pub arguments: NodeList<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct NewExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    pub arguments: Option<NodeList<'a, Expression<'a>>>,
}

#[derive(Debug, Clone)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct FunctionExpression<'a> {
    pub data: NodeData,
    pub asterisk_token: bool,
    pub name: Option<Identifier<'a>>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct ArrowFunction<'a> {
    pub data: NodeData,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: ArrowFunctionBody<'a>,
}

#[derive(Debug, Clone)]
pub enum ArrowFunctionBody<'a> {
    Block(&'a Block<'a>),
    Expression(&'a Expression<'a>),
}

#[derive(Debug, Clone)]
pub struct PrefixUnaryExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct PostfixUnaryExpression<'a> {
    pub data: NodeData,
    pub operand: &'a Expression<'a>,
    pub operator: SyntaxKind,
}

#[derive(Debug, Clone)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator: SyntaxKind,
    pub right: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub when_true: &'a Expression<'a>,
    pub when_false: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct YieldExpression<'a> {
    pub data: NodeData,
    pub asterisk_token: bool,
    pub expression: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct SpreadElement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `expr as T` and `expr satisfies T`.
#[derive(Debug, Clone)]
pub struct AsExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct NonNullExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone)]
pub enum TypeNode<'a> {
    /// Keyword types (`string`, `any`, `void`, ...); `data.kind` is the keyword.
    KeywordType(NodeData),
    ThisType(NodeData),
    TypeReference(&'a TypeReferenceNode<'a>),
    FunctionType(&'a FunctionTypeNode<'a>),
    ConstructorType(&'a FunctionTypeNode<'a>),
    TypeQuery(&'a TypeQueryNode<'a>),
    TypeLiteral(&'a TypeLiteralNode<'a>),
    ArrayType(&'a ArrayTypeNode<'a>),
    TupleType(&'a TupleTypeNode<'a>),
    OptionalType(&'a WrappedTypeNode<'a>),
    RestType(&'a WrappedTypeNode<'a>),
    UnionType(&'a UnionOrIntersectionTypeNode<'a>),
    IntersectionType(&'a UnionOrIntersectionTypeNode<'a>),
    ParenthesizedType(&'a WrappedTypeNode<'a>),
    TypeOperator(&'a TypeOperatorNode<'a>),
    IndexedAccessType(&'a IndexedAccessTypeNode<'a>),
    LiteralType(&'a LiteralTypeNode<'a>),
    ImportType(&'a ImportTypeNode<'a>),
    /// Conditional, mapped, template-literal, and predicate types, kept
    /// by their source text.
    SkippedType(&'a SkippedType<'a>),
}

#[derive(Debug, Clone)]
pub struct TypeReferenceNode<'a> {
    pub data: NodeData,
    pub type_name: EntityName<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug, Clone)]
pub struct FunctionTypeNode<'a> {
    pub data: NodeData,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: &'a TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct TypeQueryNode<'a> {
    pub data: NodeData,
    pub expr_name: EntityName<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug, Clone)]
pub struct TypeLiteralNode<'a> {
    pub data: NodeData,
    pub members: NodeList<'a, TypeElement<'a>>,
}

/// A member of a type literal or interface-like body.
///
/// Property signatures have a name and no parameters; method signatures
/// have both; call and index signatures have parameters and no name.
#[derive(Debug, Clone)]
pub struct TypeElement<'a> {
    pub data: NodeData,
    pub name: Option<PropertyName<'a>>,
    pub question_token: bool,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: Option<NodeList<'a, ParameterDeclaration<'a>>>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug, Clone)]
pub struct ArrayTypeNode<'a> {
    pub data: NodeData,
    pub element_type: &'a TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct TupleTypeNode<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, TypeNode<'a>>,
}

/// Optional, rest, and parenthesized types wrap a single type.
#[derive(Debug, Clone)]
pub struct WrappedTypeNode<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct UnionOrIntersectionTypeNode<'a> {
    pub data: NodeData,
    pub types: NodeList<'a, TypeNode<'a>>,
}

#[derive(Debug, Clone)]
pub struct TypeOperatorNode<'a> {
    pub data: NodeData,
    /// `keyof`, `unique`, or `readonly`.
    pub operator: SyntaxKind,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct IndexedAccessTypeNode<'a> {
    pub data: NodeData,
    pub object_type: &'a TypeNode<'a>,
    pub index_type: &'a TypeNode<'a>,
}

#[derive(Debug, Clone)]
pub struct LiteralTypeNode<'a> {
    pub data: NodeData,
    /// String, numeric, boolean, or null literal; negative numbers are a
    /// prefix unary minus.
    pub literal: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ImportTypeNode<'a> {
    pub data: NodeData,
    pub is_type_of: bool,
    pub argument: &'a TypeNode<'a>,
    pub qualifier: Option<EntityName<'a>>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug, Clone)]
pub struct SkippedType<'a> {
    pub data: NodeData,
    pub text: &'a str,
}
