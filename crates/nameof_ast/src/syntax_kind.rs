//! SyntaxKind enum - token and node kinds for the TypeScript subset the
//! nameof transformer reads.
//!
//! Ordering matters: range checks such as `is_keyword` and
//! `is_assignment_operator` compare discriminants.

/// The kind of a syntax token or node in the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,

    // Pseudo-literals (template)
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    // Identifiers
    Identifier,
    PrivateIdentifier,

    // ========================================================================
    // Reserved words
    // ========================================================================
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Strict mode reserved words
    ImplementsKeyword,
    InterfaceKeyword,
    LetKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,
    YieldKeyword,

    // Contextual keywords
    AbstractKeyword,
    AccessorKeyword,
    AsKeyword,
    AssertsKeyword,
    AsyncKeyword,
    AwaitKeyword,
    AnyKeyword,
    BooleanKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    GetKeyword,
    InferKeyword,
    IsKeyword,
    KeyOfKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    ReadonlyKeyword,
    NumberKeyword,
    ObjectKeyword,
    SatisfiesKeyword,
    SetKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    FromKeyword,
    GlobalKeyword,
    BigIntKeyword,
    OverrideKeyword,
    OfKeyword,

    // ========================================================================
    // Names and signatures
    // ========================================================================
    QualifiedName,
    ComputedPropertyName,
    TypeParameter,
    Parameter,
    Decorator,
    PropertySignature,
    MethodSignature,
    CallSignature,
    IndexSignature,
    PropertyDeclaration,
    MethodDeclaration,
    Constructor,
    GetAccessor,
    SetAccessor,

    // ========================================================================
    // Types
    // ========================================================================
    TypeReference,
    FunctionType,
    ConstructorType,
    TypeQuery,
    TypeLiteral,
    ArrayType,
    TupleType,
    OptionalType,
    RestType,
    UnionType,
    IntersectionType,
    ParenthesizedType,
    ThisType,
    TypeOperator,
    IndexedAccessType,
    LiteralType,
    ImportType,
    SkippedType,
    ExpressionWithTypeArguments,

    // ========================================================================
    // Binding patterns
    // ========================================================================
    ObjectBindingPattern,
    ArrayBindingPattern,
    BindingElement,

    // ========================================================================
    // Expressions
    // ========================================================================
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    NewExpression,
    TaggedTemplateExpression,
    ParenthesizedExpression,
    FunctionExpression,
    ArrowFunction,
    ClassExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    ConditionalExpression,
    TemplateExpression,
    YieldExpression,
    SpreadElement,
    OmittedExpression,
    AsExpression,
    NonNullExpression,
    SatisfiesExpression,
    TemplateSpan,

    // ========================================================================
    // Statements
    // ========================================================================
    Block,
    EmptyStatement,
    VariableStatement,
    ExpressionStatement,
    IfStatement,
    DoStatement,
    WhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    SwitchStatement,
    LabeledStatement,
    ThrowStatement,
    TryStatement,
    DebuggerStatement,
    VariableDeclaration,
    VariableDeclarationList,
    FunctionDeclaration,
    ClassDeclaration,
    ModuleDeclaration,
    ClassStaticBlockDeclaration,
    SemicolonClassElement,
    SkippedStatement,

    // Module elements
    ImportDeclaration,
    ImportClause,
    NamespaceImport,
    NamedImports,
    ImportSpecifier,
    ExportAssignment,
    ExportDeclaration,
    NamedExports,
    NamespaceExport,
    ExportSpecifier,

    // Clauses
    CaseClause,
    DefaultClause,
    HeritageClause,
    CatchClause,

    // Property assignments
    PropertyAssignment,
    ShorthandPropertyAssignment,
    SpreadAssignment,

    SourceFile,
}

impl SyntaxKind {
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::OfKeyword;
    pub const FIRST_RESERVED_WORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
}

impl SyntaxKind {
    /// Whether this kind represents a keyword.
    #[inline]
    pub fn is_keyword(self) -> bool {
        self >= Self::FIRST_KEYWORD && self <= Self::LAST_KEYWORD
    }

    /// Whether this kind is a reserved word that can never be an identifier.
    #[inline]
    pub fn is_reserved_word(self) -> bool {
        self >= Self::FIRST_RESERVED_WORD && self <= Self::LAST_RESERVED_WORD
    }

    /// Whether this kind represents a punctuation token.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        self >= Self::FIRST_PUNCTUATION && self <= Self::LAST_PUNCTUATION
    }

    /// Whether this kind represents an assignment operator.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self >= Self::FIRST_ASSIGNMENT && self <= Self::LAST_ASSIGNMENT
    }

    /// Whether an identifier-like token can name a binding or property.
    #[inline]
    pub fn is_identifier_or_keyword(self) -> bool {
        self == SyntaxKind::Identifier || self.is_keyword()
    }

    /// Whether this kind is a modifier keyword.
    #[inline]
    pub fn is_modifier_kind(self) -> bool {
        matches!(
            self,
            SyntaxKind::AbstractKeyword
                | SyntaxKind::AccessorKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::StaticKeyword
                | SyntaxKind::OverrideKeyword
        )
    }

    /// Whether this keyword names a built-in type such as `string` or `any`.
    #[inline]
    pub fn is_keyword_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::AnyKeyword
                | SyntaxKind::UnknownKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::NumberKeyword
                | SyntaxKind::BigIntKeyword
                | SyntaxKind::BooleanKeyword
                | SyntaxKind::SymbolKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::UndefinedKeyword
                | SyntaxKind::NeverKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::NullKeyword
        )
    }

    /// The fixed source text of a punctuation or keyword token.
    pub fn token_text(self) -> Option<&'static str> {
        use SyntaxKind::*;
        let text = match self {
            OpenBraceToken => "{",
            CloseBraceToken => "}",
            OpenParenToken => "(",
            CloseParenToken => ")",
            OpenBracketToken => "[",
            CloseBracketToken => "]",
            DotToken => ".",
            DotDotDotToken => "...",
            SemicolonToken => ";",
            CommaToken => ",",
            QuestionDotToken => "?.",
            LessThanToken => "<",
            GreaterThanToken => ">",
            LessThanEqualsToken => "<=",
            GreaterThanEqualsToken => ">=",
            EqualsEqualsToken => "==",
            ExclamationEqualsToken => "!=",
            EqualsEqualsEqualsToken => "===",
            ExclamationEqualsEqualsToken => "!==",
            EqualsGreaterThanToken => "=>",
            PlusToken => "+",
            MinusToken => "-",
            AsteriskToken => "*",
            AsteriskAsteriskToken => "**",
            SlashToken => "/",
            PercentToken => "%",
            PlusPlusToken => "++",
            MinusMinusToken => "--",
            LessThanLessThanToken => "<<",
            GreaterThanGreaterThanToken => ">>",
            GreaterThanGreaterThanGreaterThanToken => ">>>",
            AmpersandToken => "&",
            BarToken => "|",
            CaretToken => "^",
            ExclamationToken => "!",
            TildeToken => "~",
            AmpersandAmpersandToken => "&&",
            BarBarToken => "||",
            QuestionToken => "?",
            ColonToken => ":",
            AtToken => "@",
            QuestionQuestionToken => "??",
            EqualsToken => "=",
            PlusEqualsToken => "+=",
            MinusEqualsToken => "-=",
            AsteriskEqualsToken => "*=",
            AsteriskAsteriskEqualsToken => "**=",
            SlashEqualsToken => "/=",
            PercentEqualsToken => "%=",
            LessThanLessThanEqualsToken => "<<=",
            GreaterThanGreaterThanEqualsToken => ">>=",
            GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            AmpersandEqualsToken => "&=",
            BarEqualsToken => "|=",
            CaretEqualsToken => "^=",
            BarBarEqualsToken => "||=",
            AmpersandAmpersandEqualsToken => "&&=",
            QuestionQuestionEqualsToken => "??=",
            BreakKeyword => "break",
            CaseKeyword => "case",
            CatchKeyword => "catch",
            ClassKeyword => "class",
            ConstKeyword => "const",
            ContinueKeyword => "continue",
            DebuggerKeyword => "debugger",
            DefaultKeyword => "default",
            DeleteKeyword => "delete",
            DoKeyword => "do",
            ElseKeyword => "else",
            EnumKeyword => "enum",
            ExportKeyword => "export",
            ExtendsKeyword => "extends",
            FalseKeyword => "false",
            FinallyKeyword => "finally",
            ForKeyword => "for",
            FunctionKeyword => "function",
            IfKeyword => "if",
            ImportKeyword => "import",
            InKeyword => "in",
            InstanceOfKeyword => "instanceof",
            NewKeyword => "new",
            NullKeyword => "null",
            ReturnKeyword => "return",
            SuperKeyword => "super",
            SwitchKeyword => "switch",
            ThisKeyword => "this",
            ThrowKeyword => "throw",
            TrueKeyword => "true",
            TryKeyword => "try",
            TypeOfKeyword => "typeof",
            VarKeyword => "var",
            VoidKeyword => "void",
            WhileKeyword => "while",
            WithKeyword => "with",
            ImplementsKeyword => "implements",
            InterfaceKeyword => "interface",
            LetKeyword => "let",
            PackageKeyword => "package",
            PrivateKeyword => "private",
            ProtectedKeyword => "protected",
            PublicKeyword => "public",
            StaticKeyword => "static",
            YieldKeyword => "yield",
            AbstractKeyword => "abstract",
            AccessorKeyword => "accessor",
            AsKeyword => "as",
            AssertsKeyword => "asserts",
            AsyncKeyword => "async",
            AwaitKeyword => "await",
            AnyKeyword => "any",
            BooleanKeyword => "boolean",
            ConstructorKeyword => "constructor",
            DeclareKeyword => "declare",
            GetKeyword => "get",
            InferKeyword => "infer",
            IsKeyword => "is",
            KeyOfKeyword => "keyof",
            ModuleKeyword => "module",
            NamespaceKeyword => "namespace",
            NeverKeyword => "never",
            ReadonlyKeyword => "readonly",
            NumberKeyword => "number",
            ObjectKeyword => "object",
            SatisfiesKeyword => "satisfies",
            SetKeyword => "set",
            StringKeyword => "string",
            SymbolKeyword => "symbol",
            TypeKeyword => "type",
            UndefinedKeyword => "undefined",
            UniqueKeyword => "unique",
            UnknownKeyword => "unknown",
            FromKeyword => "from",
            GlobalKeyword => "global",
            BigIntKeyword => "bigint",
            OverrideKeyword => "override",
            OfKeyword => "of",
            _ => return None,
        };
        Some(text)
    }

    /// Look up the keyword kind for an identifier-shaped word.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        let kind = match text {
            "break" => BreakKeyword,
            "case" => CaseKeyword,
            "catch" => CatchKeyword,
            "class" => ClassKeyword,
            "const" => ConstKeyword,
            "continue" => ContinueKeyword,
            "debugger" => DebuggerKeyword,
            "default" => DefaultKeyword,
            "delete" => DeleteKeyword,
            "do" => DoKeyword,
            "else" => ElseKeyword,
            "enum" => EnumKeyword,
            "export" => ExportKeyword,
            "extends" => ExtendsKeyword,
            "false" => FalseKeyword,
            "finally" => FinallyKeyword,
            "for" => ForKeyword,
            "function" => FunctionKeyword,
            "if" => IfKeyword,
            "import" => ImportKeyword,
            "in" => InKeyword,
            "instanceof" => InstanceOfKeyword,
            "new" => NewKeyword,
            "null" => NullKeyword,
            "return" => ReturnKeyword,
            "super" => SuperKeyword,
            "switch" => SwitchKeyword,
            "this" => ThisKeyword,
            "throw" => ThrowKeyword,
            "true" => TrueKeyword,
            "try" => TryKeyword,
            "typeof" => TypeOfKeyword,
            "var" => VarKeyword,
            "void" => VoidKeyword,
            "while" => WhileKeyword,
            "with" => WithKeyword,
            "implements" => ImplementsKeyword,
            "interface" => InterfaceKeyword,
            "let" => LetKeyword,
            "package" => PackageKeyword,
            "private" => PrivateKeyword,
            "protected" => ProtectedKeyword,
            "public" => PublicKeyword,
            "static" => StaticKeyword,
            "yield" => YieldKeyword,
            "abstract" => AbstractKeyword,
            "accessor" => AccessorKeyword,
            "as" => AsKeyword,
            "asserts" => AssertsKeyword,
            "async" => AsyncKeyword,
            "await" => AwaitKeyword,
            "any" => AnyKeyword,
            "boolean" => BooleanKeyword,
            "constructor" => ConstructorKeyword,
            "declare" => DeclareKeyword,
            "get" => GetKeyword,
            "infer" => InferKeyword,
            "is" => IsKeyword,
            "keyof" => KeyOfKeyword,
            "module" => ModuleKeyword,
            "namespace" => NamespaceKeyword,
            "never" => NeverKeyword,
            "readonly" => ReadonlyKeyword,
            "number" => NumberKeyword,
            "object" => ObjectKeyword,
            "satisfies" => SatisfiesKeyword,
            "set" => SetKeyword,
            "string" => StringKeyword,
            "symbol" => SymbolKeyword,
            "type" => TypeKeyword,
            "undefined" => UndefinedKeyword,
            "unique" => UniqueKeyword,
            "unknown" => UnknownKeyword,
            "from" => FromKeyword,
            "global" => GlobalKeyword,
            "bigint" => BigIntKeyword,
            "override" => OverrideKeyword,
            "of" => OfKeyword,
            _ => return None,
        };
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_ranges() {
        assert!(SyntaxKind::BreakKeyword.is_keyword());
        assert!(SyntaxKind::OfKeyword.is_keyword());
        assert!(!SyntaxKind::Identifier.is_keyword());
        assert!(SyntaxKind::TypeOfKeyword.is_reserved_word());
        assert!(!SyntaxKind::TypeKeyword.is_reserved_word());
    }

    #[test]
    fn test_keyword_text_round_trips() {
        for word in ["typeof", "satisfies", "keyof", "import", "of"] {
            let kind = SyntaxKind::from_keyword(word).unwrap();
            assert_eq!(kind.token_text(), Some(word));
        }
        assert_eq!(SyntaxKind::from_keyword("nameof"), None);
    }

    #[test]
    fn test_assignment_operators() {
        assert!(SyntaxKind::EqualsToken.is_assignment_operator());
        assert!(SyntaxKind::QuestionQuestionEqualsToken.is_assignment_operator());
        assert!(!SyntaxKind::EqualsEqualsToken.is_assignment_operator());
    }
}
