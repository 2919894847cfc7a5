//! The TypeScript parser implementation.
//!
//! A recursive descent parser over the scanner's token stream that builds
//! an arena-allocated AST. Node ranges start at the node's first token
//! (leading trivia excluded) and end at its last token, so a range slices
//! exactly the node's source text. Nodes are numbered in creation order.
//!
//! Type-only declarations are parsed for correctness and then kept as
//! opaque `SkippedStatement`s; the transformer never looks inside them.

use bumpalo::Bump;
use nameof_ast::node::*;
use nameof_ast::syntax_kind::SyntaxKind;
use nameof_ast::types::*;
use nameof_core::TextSpan;
use nameof_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use nameof_scanner::{Scanner, ScannerState};

use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::utilities::{is_javascript_file, is_start_of_expression, is_statement_recovery_point};

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
const MAX_RECURSION_DEPTH: u32 = 200;

/// Output of parsing one file.
pub struct ParseResult<'a> {
    pub source_file: &'a SourceFile<'a>,
    /// Scanner and parser diagnostics, tagged with the file name.
    pub diagnostics: DiagnosticCollection,
}

/// Parse `text` into a `SourceFile` allocated in `arena`.
pub fn parse_source_text<'a>(arena: &'a Bump, file_name: &str, text: &str) -> ParseResult<'a> {
    let mut parser = Parser::new(arena, file_name, text);
    let source_file = parser.parse_source_file();
    ParseResult {
        source_file,
        diagnostics: parser.take_diagnostics(),
    }
}

/// Snapshot for speculative parsing.
struct ParserState {
    scanner: ScannerState,
    next_node_id: u32,
    prev_token_end: u32,
    diagnostic_count: usize,
    recursion_depth: u32,
}

/// Where a statement list ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementListContext {
    SourceFile,
    Block,
    SwitchClause,
}

/// Whether a parenthesized start can begin an arrow function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tristate {
    True,
    False,
    Unknown,
}

/// The parser produces a SourceFile AST from TypeScript source text.
pub struct Parser<'a> {
    arena: &'a Bump,
    scanner: Scanner<'a>,
    file_name: &'a str,
    source_text: &'a str,
    diagnostics: DiagnosticCollection,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
    next_node_id: u32,
    /// End of the last consumed token; closes the range of finished nodes.
    prev_token_end: u32,
    /// `in` is not a binary operator inside a `for` initializer.
    disallow_in: bool,
    /// `extends` starts a constraint, not a conditional type.
    disallow_conditional_types: bool,
    /// `yield` is an operator inside generator bodies.
    in_generator: bool,
}

impl<'a> Parser<'a> {
    pub fn new(arena: &'a Bump, file_name: &str, source_text: &str) -> Self {
        let file_name: &'a str = arena.alloc_str(file_name);
        let source_text: &'a str = arena.alloc_str(source_text);
        Self {
            arena,
            scanner: Scanner::new(source_text),
            file_name,
            source_text,
            diagnostics: DiagnosticCollection::new(),
            recursion_depth: 0,
            next_node_id: 0,
            prev_token_end: 0,
            disallow_in: false,
            disallow_conditional_types: false,
            in_generator: false,
        }
    }

    pub fn parse_source_file(&mut self) -> &'a SourceFile<'a> {
        self.scanner.skip_shebang();
        self.next_token();

        let statements = self.parse_list_of_statements(StatementListContext::SourceFile);
        let end = self.source_text.len() as u32;

        let mut data = NodeData::new(SyntaxKind::SourceFile, 0, end);
        data.id = self.next_id();
        if is_javascript_file(self.file_name) {
            data.flags |= NodeFlags::JAVASCRIPT_FILE;
        }
        if self.file_name.ends_with(".tsx") || self.file_name.ends_with(".jsx") {
            data.flags |= NodeFlags::JSX;
        }
        if self.diagnostics.has_errors() || self.scanner.diagnostics().has_errors() {
            data.flags |= NodeFlags::THIS_NODE_HAS_ERROR;
        }

        log::trace!(
            "parsed {}: {} statements, {} nodes",
            self.file_name,
            statements.len(),
            self.next_node_id
        );

        self.arena.alloc(SourceFile {
            data,
            statements,
            file_name: self.file_name,
            text: self.source_text,
            node_count: self.next_node_id,
        })
    }

    /// Scanner diagnostics followed by parser diagnostics, all located in
    /// this file.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        let mut diagnostics = self.scanner.take_diagnostics();
        for diagnostic in diagnostics.iter_mut() {
            diagnostic.file = Some(self.file_name.to_string());
        }
        diagnostics.extend(std::mem::take(&mut self.diagnostics));
        diagnostics.sort();
        diagnostics
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end() as u32;
        self.scanner.scan()
    }

    #[inline]
    fn token_pos(&self) -> u32 {
        self.scanner.token_start() as u32
    }

    #[inline]
    fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    /// Header for a node that started at `pos` and ends at the last
    /// consumed token.
    fn finish_node(&mut self, kind: SyntaxKind, pos: u32) -> NodeData {
        let mut data = NodeData::new(kind, pos, self.prev_token_end.max(pos));
        data.id = self.next_id();
        data
    }

    /// Empty header at the current token for a node that is absent from
    /// the source.
    fn missing_node(&mut self, kind: SyntaxKind) -> NodeData {
        let pos = self.token_pos();
        let mut data = NodeData::new(kind, pos, pos);
        data.flags |= NodeFlags::THIS_NODE_HAS_ERROR;
        data.id = self.next_id();
        data
    }

    /// Empty header at the current token for a legitimately empty node
    /// such as an array hole.
    fn empty_node(&mut self, kind: SyntaxKind) -> NodeData {
        let pos = self.token_pos();
        let mut data = NodeData::new(kind, pos, pos);
        data.id = self.next_id();
        data
    }

    #[inline]
    fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    fn alloc_list<T>(&self, items: Vec<T>) -> &'a [T] {
        if items.is_empty() {
            return &[];
        }
        self.arena.alloc_slice_fill_iter(items)
    }

    fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let pos = self.token_pos();
        let end = (self.scanner.token_end() as u32).max(pos);
        self.error_at(pos, end, message, args);
    }

    fn error_at(&mut self, pos: u32, end: u32, message: &DiagnosticMessage, args: &[&str]) {
        // One error per position is enough; later ones are cascades.
        let last_start = self
            .diagnostics
            .diagnostics()
            .last()
            .and_then(|d| d.span)
            .map(|span| span.start);
        if last_start == Some(pos) {
            return;
        }
        self.diagnostics.add(Diagnostic::with_location(
            self.file_name,
            TextSpan::from_bounds(pos, end),
            message,
            args,
        ));
    }

    fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.token() == kind {
            self.next_token();
            return true;
        }
        let text = kind.token_text().unwrap_or("token");
        self.error(&messages::_0_EXPECTED, &[text]);
        false
    }

    fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.token() == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Automatic semicolon insertion: a statement may end at `;`, `}`, the
    /// end of the file, or a line break.
    fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    fn parse_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) || self.can_parse_semicolon() {
            return;
        }
        self.error(&messages::_0_EXPECTED, &[";"]);
    }

    fn save_state(&self) -> ParserState {
        ParserState {
            scanner: self.scanner.save_state(),
            next_node_id: self.next_node_id,
            prev_token_end: self.prev_token_end,
            diagnostic_count: self.diagnostics.len(),
            recursion_depth: self.recursion_depth,
        }
    }

    fn restore_state(&mut self, state: ParserState) {
        self.scanner.restore_state(state.scanner);
        self.next_node_id = state.next_node_id;
        self.prev_token_end = state.prev_token_end;
        self.diagnostics.truncate(state.diagnostic_count);
        self.recursion_depth = state.recursion_depth;
    }

    fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Run `f` speculatively; rewind everything if it returns `None`.
    fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let state = self.save_state();
        let result = f(self);
        if result.is_none() {
            self.restore_state(state);
        }
        result
    }

    fn next_token_is(&mut self, kind: SyntaxKind) -> bool {
        self.look_ahead(|p| p.next_token() == kind)
    }

    fn next_token_is_on_same_line(&mut self, pred: impl FnOnce(&Self) -> bool) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && pred(p)
        })
    }

    /// Enter a nested construct. On overflow the rest of the file is
    /// skipped so every enclosing list terminates.
    fn enter_nesting(&mut self) -> bool {
        if self.recursion_depth < MAX_RECURSION_DEPTH {
            self.recursion_depth += 1;
            return true;
        }
        self.error(&messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]);
        while self.token() != SyntaxKind::EndOfFileToken {
            self.next_token();
        }
        false
    }

    #[inline]
    fn exit_nesting(&mut self) {
        self.recursion_depth -= 1;
    }

    /// Parse with `in` allowed as an operator again.
    fn allow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.disallow_in, false);
        let result = f(self);
        self.disallow_in = saved;
        result
    }

    // ========================================================================
    // Identifiers and names
    // ========================================================================

    /// Identifiers and keywords that are not reserved words.
    fn is_identifier(&self) -> bool {
        let token = self.token();
        token == SyntaxKind::Identifier || (token.is_keyword() && !token.is_reserved_word())
    }

    fn create_identifier(&mut self, is_identifier: bool) -> Identifier<'a> {
        if is_identifier {
            let pos = self.token_pos();
            let kind = if self.token() == SyntaxKind::PrivateIdentifier {
                SyntaxKind::PrivateIdentifier
            } else {
                SyntaxKind::Identifier
            };
            let text = self.scanner.token_text();
            self.next_token();
            return Identifier {
                data: self.finish_node(kind, pos),
                text,
            };
        }
        self.error(&messages::IDENTIFIER_EXPECTED, &[]);
        Identifier {
            data: self.missing_node(SyntaxKind::Identifier),
            text: "",
        }
    }

    fn parse_identifier(&mut self) -> Identifier<'a> {
        let is_identifier = self.is_identifier();
        self.create_identifier(is_identifier)
    }

    /// Any identifier, keyword, or private name: member names after `.`.
    fn parse_identifier_name(&mut self) -> Identifier<'a> {
        let token = self.token();
        self.create_identifier(token.is_identifier_or_keyword() || token == SyntaxKind::PrivateIdentifier)
    }

    fn parse_identifier_and_alloc(&mut self) -> &'a Identifier<'a> {
        let ident = self.parse_identifier();
        self.alloc(ident)
    }

    fn is_literal_property_name(&self) -> bool {
        let token = self.token();
        token.is_identifier_or_keyword()
            || matches!(
                token,
                SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::PrivateIdentifier
            )
    }

    fn is_property_name_start(&self) -> bool {
        self.is_literal_property_name() || self.token() == SyntaxKind::OpenBracketToken
    }

    fn parse_property_name(&mut self) -> PropertyName<'a> {
        match self.token() {
            SyntaxKind::StringLiteral => {
                let literal = self.parse_string_literal();
                PropertyName::StringLiteral(self.alloc(literal))
            }
            SyntaxKind::NumericLiteral => {
                let literal = self.parse_numeric_literal();
                PropertyName::NumericLiteral(self.alloc(literal))
            }
            SyntaxKind::PrivateIdentifier => {
                let ident = self.parse_identifier_name();
                PropertyName::PrivateIdentifier(self.alloc(ident))
            }
            SyntaxKind::OpenBracketToken => {
                let pos = self.token_pos();
                self.next_token();
                let expression = self.allow_in(|p| p.parse_assignment_expression_and_alloc());
                self.parse_expected(SyntaxKind::CloseBracketToken);
                let data = self.finish_node(SyntaxKind::ComputedPropertyName, pos);
                PropertyName::ComputedPropertyName(self.alloc(ComputedPropertyName { data, expression }))
            }
            _ => {
                let ident = self.parse_identifier_name();
                PropertyName::Identifier(self.alloc(ident))
            }
        }
    }

    fn parse_string_literal(&mut self) -> StringLiteral<'a> {
        let pos = self.token_pos();
        let text: &'a str = self.arena.alloc_str(self.scanner.token_value());
        let is_single_quote = self.scanner.token_flags().contains(TokenFlags::SINGLE_QUOTE);
        self.next_token();
        StringLiteral {
            data: self.finish_node(SyntaxKind::StringLiteral, pos),
            text,
            is_single_quote,
        }
    }

    /// A module specifier; reports an error and yields an empty literal
    /// when the current token is not a string.
    fn parse_module_specifier(&mut self) -> StringLiteral<'a> {
        if self.token() == SyntaxKind::StringLiteral {
            return self.parse_string_literal();
        }
        self.error(&messages::STRING_LITERAL_EXPECTED, &[]);
        StringLiteral {
            data: self.missing_node(SyntaxKind::StringLiteral),
            text: "",
            is_single_quote: false,
        }
    }

    fn parse_numeric_literal(&mut self) -> NumericLiteral<'a> {
        let pos = self.token_pos();
        let text = self.scanner.token_text();
        let value = self.scanner.token_number();
        self.next_token();
        NumericLiteral {
            data: self.finish_node(SyntaxKind::NumericLiteral, pos),
            text,
            value,
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_list_of_statements(&mut self, context: StatementListContext) -> NodeList<'a, Statement<'a>> {
        let mut statements = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CloseBraceToken if context != StatementListContext::SourceFile => break,
                SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
                    if context == StatementListContext::SwitchClause =>
                {
                    break
                }
                SyntaxKind::CloseBraceToken => {
                    self.error(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                    self.next_token();
                    continue;
                }
                _ => {}
            }

            let start = self.token_pos();
            let statement = self.parse_statement();
            statements.push(statement);

            // Error recovery: never stay on the same token.
            if self.token_pos() == start && self.token() != SyntaxKind::EndOfFileToken {
                self.next_token();
            }
        }
        self.alloc_list(statements)
    }

    fn parse_statement(&mut self) -> Statement<'a> {
        if !self.enter_nesting() {
            let data = self.missing_node(SyntaxKind::EmptyStatement);
            return Statement::EmptyStatement(data);
        }
        let statement = self.parse_statement_worker();
        self.exit_nesting();
        statement
    }

    fn parse_statement_and_alloc(&mut self) -> &'a Statement<'a> {
        let statement = self.parse_statement();
        self.alloc(statement)
    }

    fn parse_statement_worker(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
                Statement::EmptyStatement(self.finish_node(SyntaxKind::EmptyStatement, pos))
            }
            SyntaxKind::OpenBraceToken => Statement::Block(self.parse_block_and_alloc()),
            SyntaxKind::VarKeyword => self.parse_variable_statement(pos, ModifierFlags::NONE),
            SyntaxKind::LetKeyword if self.is_let_declaration() => {
                self.parse_variable_statement(pos, ModifierFlags::NONE)
            }
            SyntaxKind::ConstKeyword if !self.next_token_is(SyntaxKind::EnumKeyword) => {
                self.parse_variable_statement(pos, ModifierFlags::NONE)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, &[], ModifierFlags::NONE),
            SyntaxKind::ClassKeyword => {
                let class = self.parse_class(pos, &[], ModifierFlags::NONE, SyntaxKind::ClassDeclaration);
                Statement::ClassDeclaration(class)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(pos),
            SyntaxKind::DoKeyword => self.parse_do_statement(pos),
            SyntaxKind::WhileKeyword => self.parse_while_statement(pos),
            SyntaxKind::ForKeyword => self.parse_for_statement(pos),
            SyntaxKind::ContinueKeyword | SyntaxKind::BreakKeyword => self.parse_jump_statement(pos),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(pos),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(pos),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(pos),
            SyntaxKind::TryKeyword => self.parse_try_statement(pos),
            SyntaxKind::DebuggerKeyword => {
                self.next_token();
                self.parse_semicolon();
                Statement::DebuggerStatement(self.finish_node(SyntaxKind::DebuggerStatement, pos))
            }
            SyntaxKind::WithKeyword => self.parse_with_statement(pos),
            SyntaxKind::ExportKeyword => self.parse_export_statement(pos, &[]),
            SyntaxKind::ImportKeyword
                if !self.look_ahead(|p| {
                    matches!(p.next_token(), SyntaxKind::OpenParenToken | SyntaxKind::DotToken)
                }) =>
            {
                self.parse_import_declaration(pos)
            }
            SyntaxKind::AtToken => self.parse_declaration(pos),
            SyntaxKind::ConstKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::GlobalKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::AsyncKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::StaticKeyword
                if self.is_start_of_declaration() =>
            {
                self.parse_declaration(pos)
            }
            _ if self.is_identifier() && self.next_token_is(SyntaxKind::ColonToken) => {
                self.parse_labeled_statement(pos)
            }
            token if is_start_of_expression(token) => self.parse_expression_statement(pos),
            _ => {
                self.error(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                self.next_token();
                while !is_statement_recovery_point(self.token())
                    && !self.has_preceding_line_break()
                    && !is_start_of_expression(self.token())
                {
                    self.next_token();
                }
                self.skipped_statement(pos)
            }
        }
    }

    /// `let` starts a declaration only when a binding follows.
    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
                || matches!(p.token(), SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken)
        })
    }

    /// Whether the modifiers and keywords at the current token introduce a
    /// declaration rather than an expression such as `type = 1` or
    /// `module.exports`.
    fn is_start_of_declaration(&mut self) -> bool {
        self.look_ahead(|p| loop {
            match p.token() {
                SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::AtToken => return true,
                SyntaxKind::InterfaceKeyword | SyntaxKind::TypeKeyword => {
                    p.next_token();
                    return !p.has_preceding_line_break() && p.is_identifier();
                }
                SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                    p.next_token();
                    return !p.has_preceding_line_break()
                        && (p.is_identifier() || p.token() == SyntaxKind::StringLiteral);
                }
                SyntaxKind::GlobalKeyword => {
                    p.next_token();
                    return matches!(
                        p.token(),
                        SyntaxKind::OpenBraceToken | SyntaxKind::Identifier | SyntaxKind::ExportKeyword
                    );
                }
                SyntaxKind::ExportKeyword | SyntaxKind::DefaultKeyword => {
                    p.next_token();
                }
                token if token.is_modifier_kind() => {
                    p.next_token();
                    if p.has_preceding_line_break() {
                        return false;
                    }
                }
                _ => return false,
            }
        })
    }

    fn skipped_statement(&mut self, pos: u32) -> Statement<'a> {
        let data = self.finish_node(SyntaxKind::SkippedStatement, pos);
        let text = data.range.slice(self.source_text).unwrap_or("");
        Statement::SkippedStatement(self.alloc(SkippedStatement { data, text }))
    }

    fn parse_block(&mut self) -> Block<'a> {
        let pos = self.token_pos();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return Block {
                data: self.missing_node(SyntaxKind::Block),
                statements: &[],
            };
        }
        let statements = self.parse_list_of_statements(StatementListContext::Block);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        Block {
            data: self.finish_node(SyntaxKind::Block, pos),
            statements,
        }
    }

    fn parse_block_and_alloc(&mut self) -> &'a Block<'a> {
        let block = self.parse_block();
        self.alloc(block)
    }

    /// Function bodies reset the expression context of their surroundings.
    fn parse_function_block(&mut self, is_generator: bool) -> Block<'a> {
        let saved_generator = std::mem::replace(&mut self.in_generator, is_generator);
        let block = self.allow_in(|p| p.parse_block());
        self.in_generator = saved_generator;
        block
    }

    fn parse_variable_statement(&mut self, pos: u32, modifiers: ModifierFlags) -> Statement<'a> {
        let declaration_list = self.parse_variable_declaration_list();
        self.parse_semicolon();
        let mut data = self.finish_node(SyntaxKind::VariableStatement, pos);
        data.modifier_flags = modifiers;
        Statement::VariableStatement(self.alloc(VariableStatement { data, declaration_list }))
    }

    fn parse_variable_declaration_list(&mut self) -> VariableDeclarationList<'a> {
        let pos = self.token_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            _ => NodeFlags::NONE,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let declarations = self.alloc_list(declarations);
        let mut data = self.finish_node(SyntaxKind::VariableDeclarationList, pos);
        data.flags |= flags;
        VariableDeclarationList { data, declarations }
    }

    fn parse_variable_declaration(&mut self) -> VariableDeclaration<'a> {
        let pos = self.token_pos();
        let name = self.parse_binding_name();
        let exclamation_token =
            !self.has_preceding_line_break() && self.parse_optional(SyntaxKind::ExclamationToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.parse_initializer();
        VariableDeclaration {
            data: self.finish_node(SyntaxKind::VariableDeclaration, pos),
            name,
            exclamation_token,
            type_annotation,
            initializer,
        }
    }

    fn parse_initializer(&mut self) -> OptionalNode<'a, Expression<'a>> {
        if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.parse_assignment_expression_and_alloc())
        } else {
            None
        }
    }

    fn parse_type_annotation(&mut self) -> OptionalNode<'a, TypeNode<'a>> {
        if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_type_and_alloc())
        } else {
            None
        }
    }

    fn parse_expression_statement(&mut self, pos: u32) -> Statement<'a> {
        let expression = self.parse_expression_and_alloc();
        self.parse_semicolon();
        let data = self.finish_node(SyntaxKind::ExpressionStatement, pos);
        Statement::ExpressionStatement(self.alloc(ExpressionStatement { data, expression }))
    }

    fn parse_parenthesized_condition(&mut self) -> &'a Expression<'a> {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in(|p| p.parse_expression_and_alloc());
        self.parse_expected(SyntaxKind::CloseParenToken);
        expression
    }

    fn parse_if_statement(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::IfKeyword);
        let expression = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement_and_alloc();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            Some(self.parse_statement_and_alloc())
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::IfStatement, pos);
        Statement::IfStatement(self.alloc(IfStatement {
            data,
            expression,
            then_statement,
            else_statement,
        }))
    }

    fn parse_do_statement(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::DoKeyword);
        let statement = self.parse_statement_and_alloc();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let expression = self.parse_parenthesized_condition();
        // `do ; while (x) y` inserts a semicolon after the condition.
        self.parse_optional(SyntaxKind::SemicolonToken);
        let data = self.finish_node(SyntaxKind::DoStatement, pos);
        Statement::DoStatement(self.alloc(DoStatement {
            data,
            statement,
            expression,
        }))
    }

    fn parse_while_statement(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::WhileKeyword);
        let expression = self.parse_parenthesized_condition();
        let statement = self.parse_statement_and_alloc();
        let data = self.finish_node(SyntaxKind::WhileStatement, pos);
        Statement::WhileStatement(self.alloc(WhileStatement {
            data,
            expression,
            statement,
        }))
    }

    fn parse_for_statement(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::ForKeyword);
        let await_modifier = self.parse_optional(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = if self.token() == SyntaxKind::SemicolonToken {
            None
        } else {
            let saved = std::mem::replace(&mut self.disallow_in, true);
            let initializer = if matches!(self.token(), SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword)
                || (self.token() == SyntaxKind::LetKeyword && self.is_let_declaration())
            {
                let list = self.parse_variable_declaration_list();
                ForInitializer::VariableDeclarationList(self.alloc(list))
            } else {
                ForInitializer::Expression(self.parse_expression_and_alloc())
            };
            self.disallow_in = saved;
            Some(initializer)
        };

        match initializer {
            Some(initializer) if matches!(self.token(), SyntaxKind::InKeyword | SyntaxKind::OfKeyword) => {
                let is_of = self.token() == SyntaxKind::OfKeyword;
                self.next_token();
                let expression = if is_of {
                    self.allow_in(|p| p.parse_assignment_expression_and_alloc())
                } else {
                    self.allow_in(|p| p.parse_expression_and_alloc())
                };
                self.parse_expected(SyntaxKind::CloseParenToken);
                let statement = self.parse_statement_and_alloc();
                let kind = if is_of {
                    SyntaxKind::ForOfStatement
                } else {
                    SyntaxKind::ForInStatement
                };
                let data = self.finish_node(kind, pos);
                let node = self.alloc(ForInOrOfStatement {
                    data,
                    await_modifier,
                    initializer,
                    expression,
                    statement,
                });
                if is_of {
                    Statement::ForOfStatement(node)
                } else {
                    Statement::ForInStatement(node)
                }
            }
            initializer => {
                self.parse_expected(SyntaxKind::SemicolonToken);
                let condition = if self.token() != SyntaxKind::SemicolonToken {
                    Some(self.allow_in(|p| p.parse_expression_and_alloc()))
                } else {
                    None
                };
                self.parse_expected(SyntaxKind::SemicolonToken);
                let incrementor = if self.token() != SyntaxKind::CloseParenToken {
                    Some(self.allow_in(|p| p.parse_expression_and_alloc()))
                } else {
                    None
                };
                self.parse_expected(SyntaxKind::CloseParenToken);
                let statement = self.parse_statement_and_alloc();
                let data = self.finish_node(SyntaxKind::ForStatement, pos);
                Statement::ForStatement(self.alloc(ForStatement {
                    data,
                    initializer,
                    condition,
                    incrementor,
                    statement,
                }))
            }
        }
    }

    fn parse_jump_statement(&mut self, pos: u32) -> Statement<'a> {
        let is_break = self.token() == SyntaxKind::BreakKeyword;
        self.next_token();
        let label = if !self.can_parse_semicolon() && self.is_identifier() {
            Some(self.parse_identifier())
        } else {
            None
        };
        self.parse_semicolon();
        if is_break {
            let data = self.finish_node(SyntaxKind::BreakStatement, pos);
            Statement::BreakStatement(self.alloc(JumpStatement { data, label }))
        } else {
            let data = self.finish_node(SyntaxKind::ContinueStatement, pos);
            Statement::ContinueStatement(self.alloc(JumpStatement { data, label }))
        }
    }

    fn parse_return_statement(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::ReturnKeyword);
        let expression = if !self.can_parse_semicolon() {
            Some(self.allow_in(|p| p.parse_expression_and_alloc()))
        } else {
            None
        };
        self.parse_semicolon();
        let data = self.finish_node(SyntaxKind::ReturnStatement, pos);
        Statement::ReturnStatement(self.alloc(ReturnStatement { data, expression }))
    }

    fn parse_switch_statement(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::SwitchKeyword);
        let expression = self.parse_parenthesized_condition();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut clauses = Vec::new();
        while !matches!(self.token(), SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken) {
            let clause_pos = self.token_pos();
            let (kind, expression) = match self.token() {
                SyntaxKind::CaseKeyword => {
                    self.next_token();
                    let expression = self.allow_in(|p| p.parse_expression_and_alloc());
                    (SyntaxKind::CaseClause, Some(expression))
                }
                SyntaxKind::DefaultKeyword => {
                    self.next_token();
                    (SyntaxKind::DefaultClause, None)
                }
                _ => {
                    self.error(&messages::CASE_OR_DEFAULT_EXPECTED, &[]);
                    self.next_token();
                    continue;
                }
            };
            self.parse_expected(SyntaxKind::ColonToken);
            let statements = self.parse_list_of_statements(StatementListContext::SwitchClause);
            clauses.push(CaseOrDefaultClause {
                data: self.finish_node(kind, clause_pos),
                expression,
                statements,
            });
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let clauses = self.alloc_list(clauses);
        let data = self.finish_node(SyntaxKind::SwitchStatement, pos);
        Statement::SwitchStatement(self.alloc(SwitchStatement {
            data,
            expression,
            clauses,
        }))
    }

    fn parse_labeled_statement(&mut self, pos: u32) -> Statement<'a> {
        let label = self.parse_identifier();
        self.parse_expected(SyntaxKind::ColonToken);
        let statement = self.parse_statement_and_alloc();
        let data = self.finish_node(SyntaxKind::LabeledStatement, pos);
        Statement::LabeledStatement(self.alloc(LabeledStatement {
            data,
            label,
            statement,
        }))
    }

    fn parse_throw_statement(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::ThrowKeyword);
        let expression = self.allow_in(|p| p.parse_expression_and_alloc());
        self.parse_semicolon();
        let data = self.finish_node(SyntaxKind::ThrowStatement, pos);
        Statement::ThrowStatement(self.alloc(ThrowStatement { data, expression }))
    }

    fn parse_try_statement(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::TryKeyword);
        let try_block = self.parse_block();

        let catch_clause = if self.token() == SyntaxKind::CatchKeyword {
            let catch_pos = self.token_pos();
            self.next_token();
            let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let declaration = self.parse_variable_declaration();
                self.parse_expected(SyntaxKind::CloseParenToken);
                Some(declaration)
            } else {
                None
            };
            let block = self.parse_block();
            Some(CatchClause {
                data: self.finish_node(SyntaxKind::CatchClause, catch_pos),
                variable_declaration,
                block,
            })
        } else {
            None
        };

        let finally_block = if catch_clause.is_none() || self.token() == SyntaxKind::FinallyKeyword {
            self.parse_expected(SyntaxKind::FinallyKeyword);
            Some(self.parse_block())
        } else {
            None
        };

        let data = self.finish_node(SyntaxKind::TryStatement, pos);
        Statement::TryStatement(self.alloc(TryStatement {
            data,
            try_block,
            catch_clause,
            finally_block,
        }))
    }

    /// `with` is not allowed in modules; it is parsed and kept verbatim.
    fn parse_with_statement(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::WithKeyword);
        self.parse_parenthesized_condition();
        self.parse_statement();
        self.skipped_statement(pos)
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Decorators and modifiers followed by a declaration.
    fn parse_declaration(&mut self, pos: u32) -> Statement<'a> {
        let decorators = self.parse_decorators();
        if self.token() == SyntaxKind::ExportKeyword {
            return self.parse_export_statement(pos, decorators);
        }
        let modifiers = self.parse_modifiers();
        self.parse_declaration_worker(pos, decorators, modifiers)
    }

    fn parse_declaration_worker(
        &mut self,
        pos: u32,
        decorators: NodeList<'a, Decorator<'a>>,
        modifiers: ModifierFlags,
    ) -> Statement<'a> {
        let statement = match self.token() {
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos, modifiers)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, decorators, modifiers),
            SyntaxKind::ClassKeyword => {
                let class = self.parse_class(pos, decorators, modifiers, SyntaxKind::ClassDeclaration);
                Statement::ClassDeclaration(class)
            }
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(pos),
            SyntaxKind::TypeKeyword => self.parse_type_alias_declaration(pos),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos),
            SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword | SyntaxKind::GlobalKeyword => {
                self.parse_module_declaration(pos, modifiers)
            }
            SyntaxKind::ImportKeyword => self.parse_import_declaration(pos),
            _ => {
                self.error(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                if self.token_pos() == pos {
                    self.next_token();
                }
                return self.skipped_statement(pos);
            }
        };
        // Ambient declarations carry no runtime code.
        if modifiers.contains(ModifierFlags::AMBIENT) {
            return self.skipped_statement(pos);
        }
        statement
    }

    fn parse_decorators(&mut self) -> NodeList<'a, Decorator<'a>> {
        let mut decorators = Vec::new();
        while self.token() == SyntaxKind::AtToken {
            let pos = self.token_pos();
            self.next_token();
            let expression = self.parse_left_hand_side_expression_and_alloc();
            decorators.push(Decorator {
                data: self.finish_node(SyntaxKind::Decorator, pos),
                expression,
            });
        }
        self.alloc_list(decorators)
    }

    fn modifier_flag(kind: SyntaxKind) -> ModifierFlags {
        match kind {
            SyntaxKind::ExportKeyword => ModifierFlags::EXPORT,
            SyntaxKind::DefaultKeyword => ModifierFlags::DEFAULT,
            SyntaxKind::DeclareKeyword => ModifierFlags::AMBIENT,
            SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
            SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
            SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
            SyntaxKind::AccessorKeyword => ModifierFlags::ACCESSOR,
            SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
            SyntaxKind::AsyncKeyword => ModifierFlags::ASYNC,
            SyntaxKind::ConstKeyword => ModifierFlags::CONST,
            SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
            _ => ModifierFlags::NONE,
        }
    }

    /// Whether the token after a modifier keyword lets it act as a
    /// modifier (`static x` yes, `static()` and `static = 1` no).
    fn next_token_can_follow_modifier(&mut self) -> bool {
        let modifier = self.token();
        self.look_ahead(|p| {
            p.next_token();
            match modifier {
                SyntaxKind::ConstKeyword => p.token() == SyntaxKind::EnumKeyword,
                SyntaxKind::ExportKeyword | SyntaxKind::DefaultKeyword => {
                    !matches!(p.token(), SyntaxKind::EqualsToken | SyntaxKind::CommaToken)
                }
                _ => {
                    !p.has_preceding_line_break()
                        && (p.is_literal_property_name()
                            || matches!(
                                p.token(),
                                SyntaxKind::OpenBracketToken
                                    | SyntaxKind::OpenBraceToken
                                    | SyntaxKind::AsteriskToken
                                    | SyntaxKind::DotDotDotToken
                            ))
                }
            }
        })
    }

    fn parse_modifiers(&mut self) -> ModifierFlags {
        let mut flags = ModifierFlags::NONE;
        while self.token().is_modifier_kind() && self.next_token_can_follow_modifier() {
            flags |= Self::modifier_flag(self.token());
            self.next_token();
        }
        flags
    }

    fn parse_function_declaration(
        &mut self,
        pos: u32,
        decorators: NodeList<'a, Decorator<'a>>,
        modifiers: ModifierFlags,
    ) -> Statement<'a> {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            Some(self.parse_identifier())
        } else {
            if !modifiers.contains(ModifierFlags::DEFAULT) {
                self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            }
            None
        };
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let return_type = self.parse_return_type();
        let body = if self.token() == SyntaxKind::OpenBraceToken {
            let block = self.parse_function_block(asterisk_token);
            Some(self.alloc(block))
        } else {
            // Overload signature.
            self.parse_semicolon();
            None
        };
        let mut data = self.finish_node(SyntaxKind::FunctionDeclaration, pos);
        data.modifier_flags = modifiers;
        Statement::FunctionDeclaration(self.alloc(FunctionDeclaration {
            data,
            decorators,
            asterisk_token,
            name,
            type_parameters,
            parameters,
            return_type,
            body,
        }))
    }

    /// Class declarations and class expressions share one shape.
    fn parse_class(
        &mut self,
        pos: u32,
        decorators: NodeList<'a, Decorator<'a>>,
        modifiers: ModifierFlags,
        kind: SyntaxKind,
    ) -> &'a ClassDeclaration<'a> {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier() && self.token() != SyntaxKind::ImplementsKeyword {
            Some(self.parse_identifier())
        } else {
            None
        };
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let members = self.allow_in(|p| p.parse_class_members());
            self.parse_expected(SyntaxKind::CloseBraceToken);
            members
        } else {
            &[]
        };
        let mut data = self.finish_node(kind, pos);
        data.modifier_flags = modifiers;
        self.alloc(ClassDeclaration {
            data,
            decorators,
            name,
            type_parameters,
            heritage_clauses,
            members,
        })
    }

    fn parse_heritage_clauses(&mut self) -> NodeList<'a, HeritageClause<'a>> {
        let mut clauses = Vec::new();
        while matches!(self.token(), SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword) {
            let pos = self.token_pos();
            let token = self.token();
            self.next_token();
            let mut types = Vec::new();
            loop {
                let type_pos = self.token_pos();
                let expression = self.parse_left_hand_side_expression_and_alloc();
                let type_arguments = if self.token() == SyntaxKind::LessThanToken {
                    Some(self.parse_type_argument_list())
                } else {
                    None
                };
                types.push(ExpressionWithTypeArguments {
                    data: self.finish_node(SyntaxKind::ExpressionWithTypeArguments, type_pos),
                    expression,
                    type_arguments,
                });
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            let types = self.alloc_list(types);
            clauses.push(HeritageClause {
                data: self.finish_node(SyntaxKind::HeritageClause, pos),
                token,
                types,
            });
        }
        self.alloc_list(clauses)
    }

    fn parse_class_members(&mut self) -> NodeList<'a, ClassElement<'a>> {
        let mut members = Vec::new();
        while !matches!(self.token(), SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken) {
            let start = self.token_pos();
            if let Some(member) = self.parse_class_element() {
                members.push(member);
            }
            if self.token_pos() == start && self.token() != SyntaxKind::EndOfFileToken {
                self.next_token();
            }
        }
        self.alloc_list(members)
    }

    fn parse_class_element(&mut self) -> Option<ClassElement<'a>> {
        let pos = self.token_pos();
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            let data = self.finish_node(SyntaxKind::SemicolonClassElement, pos);
            return Some(ClassElement::SemicolonClassElement(data));
        }
        if self.token() == SyntaxKind::StaticKeyword && self.next_token_is(SyntaxKind::OpenBraceToken) {
            self.next_token();
            let body = self.parse_function_block(false);
            let data = self.finish_node(SyntaxKind::ClassStaticBlockDeclaration, pos);
            return Some(ClassElement::ClassStaticBlockDeclaration(self.alloc(Block {
                data,
                statements: body.statements,
            })));
        }

        let decorators = self.parse_decorators();
        let modifiers = self.parse_modifiers();

        if matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_property_name_start()
            })
        {
            let kind = if self.token() == SyntaxKind::GetKeyword {
                SyntaxKind::GetAccessor
            } else {
                SyntaxKind::SetAccessor
            };
            self.next_token();
            let name = self.parse_property_name();
            let method = self.parse_method_rest(pos, kind, decorators, modifiers, false, name, false);
            return Some(ClassElement::MethodDeclaration(method));
        }

        if self.token() == SyntaxKind::ConstructorKeyword && self.next_token_is(SyntaxKind::OpenParenToken) {
            let ident = self.parse_identifier_name();
            let name = PropertyName::Identifier(self.alloc(ident));
            let method =
                self.parse_method_rest(pos, SyntaxKind::Constructor, decorators, modifiers, false, name, false);
            return Some(ClassElement::MethodDeclaration(method));
        }

        if self.is_index_signature() {
            let signature = self.parse_index_signature(pos, modifiers);
            return Some(ClassElement::IndexSignature(self.alloc(signature)));
        }

        if self.is_property_name_start() || self.token() == SyntaxKind::AsteriskToken {
            return Some(self.parse_property_or_method(pos, decorators, modifiers));
        }

        self.error(
            &messages::UNEXPECTED_TOKEN_A_CONSTRUCTOR_METHOD_ACCESSOR_OR_PROPERTY_WAS_EXPECTED,
            &[],
        );
        None
    }

    fn parse_property_or_method(
        &mut self,
        pos: u32,
        decorators: NodeList<'a, Decorator<'a>>,
        modifiers: ModifierFlags,
    ) -> ClassElement<'a> {
        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);

        if asterisk_token || matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            let method = self.parse_method_rest(
                pos,
                SyntaxKind::MethodDeclaration,
                decorators,
                modifiers,
                asterisk_token,
                name,
                question_token,
            );
            return ClassElement::MethodDeclaration(method);
        }

        let exclamation_token = !question_token && self.parse_optional(SyntaxKind::ExclamationToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            let saved_generator = std::mem::replace(&mut self.in_generator, false);
            let initializer = self.parse_assignment_expression_and_alloc();
            self.in_generator = saved_generator;
            Some(initializer)
        } else {
            None
        };
        self.parse_semicolon();

        let mut data = self.finish_node(SyntaxKind::PropertyDeclaration, pos);
        data.modifier_flags = modifiers;
        ClassElement::PropertyDeclaration(self.alloc(PropertyDeclaration {
            data,
            decorators,
            name,
            question_token,
            exclamation_token,
            type_annotation,
            initializer,
        }))
    }

    #[allow(clippy::too_many_arguments)]
    fn parse_method_rest(
        &mut self,
        pos: u32,
        kind: SyntaxKind,
        decorators: NodeList<'a, Decorator<'a>>,
        modifiers: ModifierFlags,
        asterisk_token: bool,
        name: PropertyName<'a>,
        question_token: bool,
    ) -> &'a MethodDeclaration<'a> {
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let return_type = self.parse_return_type();
        let body = if self.token() == SyntaxKind::OpenBraceToken {
            let block = self.parse_function_block(asterisk_token);
            Some(self.alloc(block))
        } else {
            self.parse_semicolon();
            None
        };
        let mut data = self.finish_node(kind, pos);
        data.modifier_flags = modifiers;
        self.alloc(MethodDeclaration {
            data,
            decorators,
            asterisk_token,
            name,
            question_token,
            type_parameters,
            parameters,
            return_type,
            body,
        })
    }

    fn is_index_signature(&mut self) -> bool {
        self.token() == SyntaxKind::OpenBracketToken
            && self.look_ahead(|p| {
                p.next_token();
                if !p.is_identifier() {
                    return false;
                }
                p.next_token();
                p.token() == SyntaxKind::ColonToken
            })
    }

    fn parse_index_signature(&mut self, pos: u32, modifiers: ModifierFlags) -> TypeElement<'a> {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut parameters = Vec::new();
        while !matches!(self.token(), SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken) {
            parameters.push(self.parse_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let parameters = self.alloc_list(parameters);
        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_semicolon();
        let mut data = self.finish_node(SyntaxKind::IndexSignature, pos);
        data.modifier_flags = modifiers;
        TypeElement {
            data,
            name: None,
            question_token: false,
            type_parameters: None,
            parameters: Some(parameters),
            type_annotation,
        }
    }

    fn parse_parameters(&mut self) -> NodeList<'a, ParameterDeclaration<'a>> {
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return &[];
        }
        let mut parameters = Vec::new();
        while !matches!(self.token(), SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken) {
            parameters.push(self.parse_parameter());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.alloc_list(parameters)
    }

    fn parse_parameter(&mut self) -> ParameterDeclaration<'a> {
        let pos = self.token_pos();
        self.parse_decorators();
        let modifiers = self.parse_modifiers();
        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
        let name = if self.token() == SyntaxKind::ThisKeyword {
            let ident = self.parse_identifier_name();
            BindingName::Identifier(self.alloc(ident))
        } else {
            self.parse_binding_name()
        };
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let initializer = self.allow_in(|p| p.parse_initializer());
        let mut data = self.finish_node(SyntaxKind::Parameter, pos);
        data.modifier_flags = modifiers;
        ParameterDeclaration {
            data,
            dot_dot_dot_token,
            name,
            question_token,
            type_annotation,
            initializer,
        }
    }

    fn parse_return_type(&mut self) -> OptionalNode<'a, TypeNode<'a>> {
        if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_type_or_type_predicate())
        } else {
            None
        }
    }

    fn parse_type_parameters(&mut self) -> Option<NodeList<'a, TypeParameterDeclaration<'a>>> {
        if self.token() != SyntaxKind::LessThanToken {
            return None;
        }
        self.next_token();
        let mut parameters = Vec::new();
        while !matches!(self.token(), SyntaxKind::GreaterThanToken | SyntaxKind::EndOfFileToken) {
            let pos = self.token_pos();
            // Variance and const modifiers: `in`, `out`, `const`.
            while matches!(self.token(), SyntaxKind::InKeyword | SyntaxKind::ConstKeyword)
                || (self.token() == SyntaxKind::Identifier
                    && self.scanner.token_text() == "out"
                    && self.look_ahead(|p| {
                        p.next_token();
                        p.is_identifier()
                    }))
            {
                self.next_token();
            }
            let name = self.parse_identifier();
            let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
                Some(self.parse_type_and_alloc())
            } else {
                None
            };
            let default = if self.parse_optional(SyntaxKind::EqualsToken) {
                Some(self.parse_type_and_alloc())
            } else {
                None
            };
            parameters.push(TypeParameterDeclaration {
                data: self.finish_node(SyntaxKind::TypeParameter, pos),
                name,
                constraint,
                default,
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        Some(self.alloc_list(parameters))
    }

    // ========================================================================
    // Binding patterns (destructuring)
    // ========================================================================

    fn parse_binding_name(&mut self) -> BindingName<'a> {
        match self.token() {
            SyntaxKind::OpenBraceToken => BindingName::ObjectBindingPattern(self.parse_object_binding_pattern()),
            SyntaxKind::OpenBracketToken => BindingName::ArrayBindingPattern(self.parse_array_binding_pattern()),
            _ => BindingName::Identifier(self.parse_identifier_and_alloc()),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> &'a ObjectBindingPattern<'a> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut elements = Vec::new();
        while !matches!(self.token(), SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken) {
            elements.push(self.parse_object_binding_element());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let elements = self.alloc_list(elements);
        let data = self.finish_node(SyntaxKind::ObjectBindingPattern, pos);
        self.alloc(ObjectBindingPattern { data, elements })
    }

    fn parse_object_binding_element(&mut self) -> BindingElement<'a> {
        let pos = self.token_pos();
        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
        let is_shorthand = self.is_identifier() && !self.next_token_is(SyntaxKind::ColonToken);
        let (property_name, name) = if is_shorthand {
            (None, BindingName::Identifier(self.parse_identifier_and_alloc()))
        } else {
            let property_name = self.parse_property_name();
            self.parse_expected(SyntaxKind::ColonToken);
            (Some(property_name), self.parse_binding_name())
        };
        let initializer = self.allow_in(|p| p.parse_initializer());
        BindingElement {
            data: self.finish_node(SyntaxKind::BindingElement, pos),
            dot_dot_dot_token,
            property_name,
            name,
            initializer,
        }
    }

    fn parse_array_binding_pattern(&mut self) -> &'a ArrayBindingPattern<'a> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        while !matches!(self.token(), SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken) {
            if self.token() == SyntaxKind::CommaToken {
                let hole = self.empty_node(SyntaxKind::OmittedExpression);
                elements.push(ArrayBindingElement::OmittedExpression(hole));
                self.next_token();
                continue;
            }
            let element_pos = self.token_pos();
            let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = self.allow_in(|p| p.parse_initializer());
            let data = self.finish_node(SyntaxKind::BindingElement, element_pos);
            elements.push(ArrayBindingElement::BindingElement(self.alloc(BindingElement {
                data,
                dot_dot_dot_token,
                property_name: None,
                name,
                initializer,
            })));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let elements = self.alloc_list(elements);
        let data = self.finish_node(SyntaxKind::ArrayBindingPattern, pos);
        self.alloc(ArrayBindingPattern { data, elements })
    }

    // ========================================================================
    // Type-only and namespace declarations
    // ========================================================================

    fn parse_interface_declaration(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        self.parse_identifier();
        self.parse_type_parameters();
        self.parse_heritage_clauses();
        self.parse_type_members();
        self.skipped_statement(pos)
    }

    fn parse_type_alias_declaration(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::TypeKeyword);
        self.parse_identifier();
        self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        self.parse_type();
        self.parse_semicolon();
        self.skipped_statement(pos)
    }

    fn parse_enum_declaration(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::EnumKeyword);
        self.parse_identifier();
        if self.parse_expected(SyntaxKind::OpenBraceToken) {
            while !matches!(self.token(), SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken) {
                self.parse_property_name();
                self.allow_in(|p| p.parse_initializer());
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }
        self.skipped_statement(pos)
    }

    /// `namespace A.B { }`, `module "m" { }`, and `global { }`.
    fn parse_module_declaration(&mut self, pos: u32, modifiers: ModifierFlags) -> Statement<'a> {
        let name_pos;
        if self.token() == SyntaxKind::GlobalKeyword {
            name_pos = self.token_pos();
            self.next_token();
        } else {
            self.next_token();
            name_pos = self.token_pos();
            if self.token() == SyntaxKind::StringLiteral {
                self.parse_string_literal();
            } else {
                self.parse_identifier();
                while self.parse_optional(SyntaxKind::DotToken) {
                    self.parse_identifier_name();
                }
            }
        }
        let name_end = self.prev_token_end.max(name_pos);
        let name = self
            .source_text
            .get(name_pos as usize..name_end as usize)
            .unwrap_or("");

        let body = if self.token() == SyntaxKind::OpenBraceToken {
            Some(self.parse_block_and_alloc())
        } else {
            self.parse_semicolon();
            None
        };
        let mut data = self.finish_node(SyntaxKind::ModuleDeclaration, pos);
        data.modifier_flags = modifiers;
        Statement::ModuleDeclaration(self.alloc(ModuleDeclaration { data, name, body }))
    }

    // ========================================================================
    // Imports and exports
    // ========================================================================

    /// Skip `with { ... }` / `assert { ... }` import attributes.
    fn parse_import_attributes(&mut self) {
        let is_attributes_keyword = self.token() == SyntaxKind::WithKeyword
            || (self.token() == SyntaxKind::Identifier && self.scanner.token_text() == "assert");
        if is_attributes_keyword && !self.has_preceding_line_break() {
            self.next_token();
            if self.token() == SyntaxKind::OpenBraceToken {
                self.parse_object_literal();
            }
        }
    }

    /// `import type X`, `import type { X }`, `import type * as X`; but
    /// `import type from "m"` imports a binding named `type`.
    fn is_type_only_import_or_export(&mut self) -> bool {
        self.token() == SyntaxKind::TypeKeyword
            && self.look_ahead(|p| {
                p.next_token();
                match p.token() {
                    SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken => true,
                    SyntaxKind::FromKeyword => p.next_token() == SyntaxKind::FromKeyword,
                    SyntaxKind::EqualsToken | SyntaxKind::CommaToken => false,
                    _ => p.is_identifier(),
                }
            })
    }

    fn parse_import_declaration(&mut self, pos: u32) -> Statement<'a> {
        self.parse_expected(SyntaxKind::ImportKeyword);

        if self.token() == SyntaxKind::StringLiteral {
            let module_specifier = self.parse_string_literal();
            self.parse_import_attributes();
            self.parse_semicolon();
            let data = self.finish_node(SyntaxKind::ImportDeclaration, pos);
            return Statement::ImportDeclaration(self.alloc(ImportDeclaration {
                data,
                import_clause: None,
                module_specifier,
            }));
        }

        let clause_pos = self.token_pos();
        let is_type_only = self.is_type_only_import_or_export();
        if is_type_only {
            self.next_token();
        }

        // `import x = require("m")` and `import x = A.B`.
        if self.is_identifier() && self.next_token_is(SyntaxKind::EqualsToken) {
            self.parse_identifier();
            self.parse_expected(SyntaxKind::EqualsToken);
            self.parse_left_hand_side_expression();
            self.parse_semicolon();
            return self.skipped_statement(pos);
        }

        let name = if (self.is_identifier() && self.token() != SyntaxKind::FromKeyword)
            || (self.token() == SyntaxKind::FromKeyword && self.next_token_is(SyntaxKind::FromKeyword))
        {
            Some(self.parse_identifier())
        } else {
            None
        };

        let named_bindings = if name.is_none() || self.parse_optional(SyntaxKind::CommaToken) {
            match self.token() {
                SyntaxKind::AsteriskToken => {
                    self.next_token();
                    self.parse_expected(SyntaxKind::AsKeyword);
                    Some(NamedImportBindings::NamespaceImport(self.parse_identifier_and_alloc()))
                }
                SyntaxKind::OpenBraceToken => {
                    let specifiers = self.parse_import_or_export_specifiers(SyntaxKind::ImportSpecifier);
                    Some(NamedImportBindings::NamedImports(specifiers))
                }
                _ => {
                    self.error(&messages::_0_EXPECTED, &["{"]);
                    None
                }
            }
        } else {
            None
        };

        let import_clause = ImportClause {
            data: self.finish_node(SyntaxKind::ImportClause, clause_pos),
            is_type_only,
            name,
            named_bindings,
        };

        self.parse_expected(SyntaxKind::FromKeyword);
        let module_specifier = self.parse_module_specifier();
        self.parse_import_attributes();
        self.parse_semicolon();

        let data = self.finish_node(SyntaxKind::ImportDeclaration, pos);
        Statement::ImportDeclaration(self.alloc(ImportDeclaration {
            data,
            import_clause: Some(import_clause),
            module_specifier,
        }))
    }

    /// `{ a, b as c, type d }` for both imports and exports.
    fn parse_import_or_export_specifiers(&mut self, kind: SyntaxKind) -> NodeList<'a, ImportSpecifier<'a>> {
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut specifiers = Vec::new();
        while !matches!(self.token(), SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken) {
            let pos = self.token_pos();
            let is_type_only = self.token() == SyntaxKind::TypeKeyword
                && self.look_ahead(|p| {
                    p.next_token();
                    (p.token().is_identifier_or_keyword() && p.token() != SyntaxKind::AsKeyword)
                        || (p.token() == SyntaxKind::AsKeyword && p.next_token() == SyntaxKind::AsKeyword)
                });
            if is_type_only {
                self.next_token();
            }
            let first = self.parse_module_export_name();
            let (property_name, name) = if self.parse_optional(SyntaxKind::AsKeyword) {
                (Some(first), self.parse_module_export_name())
            } else {
                (None, first)
            };
            specifiers.push(ImportSpecifier {
                data: self.finish_node(kind, pos),
                is_type_only,
                property_name,
                name,
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.alloc_list(specifiers)
    }

    /// An identifier name or an arbitrary string export name (`"a-b"`).
    fn parse_module_export_name(&mut self) -> Identifier<'a> {
        if self.token() == SyntaxKind::StringLiteral {
            let pos = self.token_pos();
            let text = self.scanner.token_text();
            self.next_token();
            return Identifier {
                data: self.finish_node(SyntaxKind::StringLiteral, pos),
                text,
            };
        }
        self.parse_identifier_name()
    }

    fn is_export_default_declaration(&mut self) -> bool {
        match self.token() {
            SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::AtToken
            | SyntaxKind::InterfaceKeyword => true,
            SyntaxKind::AsyncKeyword => self.next_token_is_on_same_line(|p| p.token() == SyntaxKind::FunctionKeyword),
            SyntaxKind::AbstractKeyword => self.next_token_is_on_same_line(|p| p.token() == SyntaxKind::ClassKeyword),
            _ => false,
        }
    }

    fn parse_export_statement(&mut self, pos: u32, decorators: NodeList<'a, Decorator<'a>>) -> Statement<'a> {
        self.parse_expected(SyntaxKind::ExportKeyword);

        match self.token() {
            SyntaxKind::EqualsToken => {
                self.next_token();
                let expression = self.allow_in(|p| p.parse_assignment_expression_and_alloc());
                self.parse_semicolon();
                let data = self.finish_node(SyntaxKind::ExportAssignment, pos);
                Statement::ExportAssignment(self.alloc(ExportAssignment {
                    data,
                    is_export_equals: true,
                    expression,
                }))
            }
            SyntaxKind::DefaultKeyword => {
                self.next_token();
                if self.is_export_default_declaration() {
                    if self.token() == SyntaxKind::InterfaceKeyword {
                        return self.parse_interface_declaration(pos);
                    }
                    let decorators = if decorators.is_empty() {
                        self.parse_decorators()
                    } else {
                        decorators
                    };
                    let modifiers = ModifierFlags::EXPORT | ModifierFlags::DEFAULT | self.parse_modifiers();
                    return self.parse_declaration_worker(pos, decorators, modifiers);
                }
                let expression = self.allow_in(|p| p.parse_assignment_expression_and_alloc());
                self.parse_semicolon();
                let data = self.finish_node(SyntaxKind::ExportAssignment, pos);
                Statement::ExportAssignment(self.alloc(ExportAssignment {
                    data,
                    is_export_equals: false,
                    expression,
                }))
            }
            // `export as namespace X;`
            SyntaxKind::AsKeyword => {
                self.next_token();
                self.parse_expected(SyntaxKind::NamespaceKeyword);
                self.parse_identifier();
                self.parse_semicolon();
                self.skipped_statement(pos)
            }
            // `export import A = B.C;`
            SyntaxKind::ImportKeyword => {
                let import_pos = self.token_pos();
                self.parse_import_declaration(import_pos);
                self.skipped_statement(pos)
            }
            SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken => self.parse_export_declaration(pos, false),
            SyntaxKind::TypeKeyword if self.is_type_only_import_or_export() => {
                self.next_token();
                self.parse_export_declaration(pos, true)
            }
            _ => {
                let decorators = if decorators.is_empty() {
                    self.parse_decorators()
                } else {
                    decorators
                };
                let modifiers = ModifierFlags::EXPORT | self.parse_modifiers();
                self.parse_declaration_worker(pos, decorators, modifiers)
            }
        }
    }

    fn parse_export_declaration(&mut self, pos: u32, is_type_only: bool) -> Statement<'a> {
        let export_clause = if self.parse_optional(SyntaxKind::AsteriskToken) {
            if self.parse_optional(SyntaxKind::AsKeyword) {
                let name = self.parse_module_export_name();
                Some(NamedExportBindings::NamespaceExport(self.alloc(name)))
            } else {
                None
            }
        } else {
            let specifiers = self.parse_import_or_export_specifiers(SyntaxKind::ExportSpecifier);
            let specifiers = specifiers.iter().map(|spec| ExportSpecifier {
                data: spec.data,
                is_type_only: spec.is_type_only,
                property_name: spec.property_name.clone(),
                name: spec.name.clone(),
            });
            let specifiers: Vec<_> = specifiers.collect();
            Some(NamedExportBindings::NamedExports(self.alloc_list(specifiers)))
        };

        let module_specifier = if self.parse_optional(SyntaxKind::FromKeyword) {
            Some(self.parse_module_specifier())
        } else {
            if export_clause.is_none() {
                self.error(&messages::_0_EXPECTED, &["from"]);
            }
            None
        };
        self.parse_import_attributes();
        self.parse_semicolon();

        let data = self.finish_node(SyntaxKind::ExportDeclaration, pos);
        Statement::ExportDeclaration(self.alloc(ExportDeclaration {
            data,
            is_type_only,
            export_clause,
            module_specifier,
        }))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Comma-separated expression.
    fn parse_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let mut expression = self.parse_assignment_expression();
        while self.token() == SyntaxKind::CommaToken {
            self.next_token();
            let right = self.parse_assignment_expression_and_alloc();
            let data = self.finish_node(SyntaxKind::BinaryExpression, pos);
            expression = Expression::BinaryExpression(self.alloc(BinaryExpression {
                data,
                left: self.alloc(expression),
                operator: SyntaxKind::CommaToken,
                right,
            }));
        }
        expression
    }

    fn parse_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_expression();
        self.alloc(expression)
    }

    fn parse_assignment_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_assignment_expression();
        self.alloc(expression)
    }

    fn parse_assignment_expression(&mut self) -> Expression<'a> {
        if !self.enter_nesting() {
            let data = self.missing_node(SyntaxKind::Identifier);
            return Expression::Identifier(self.alloc(Identifier { data, text: "" }));
        }
        let expression = self.parse_assignment_expression_worker();
        self.exit_nesting();
        expression
    }

    fn parse_assignment_expression_worker(&mut self) -> Expression<'a> {
        let pos = self.token_pos();

        if self.token() == SyntaxKind::YieldKeyword && self.in_generator {
            return self.parse_yield_expression(pos);
        }
        if let Some(arrow) = self.try_parse_parenthesized_arrow_function(pos) {
            return arrow;
        }
        if let Some(arrow) = self.try_parse_async_simple_arrow_function(pos) {
            return arrow;
        }

        let expression = self.parse_binary_expression_or_higher(pos, OperatorPrecedence::Lowest);

        if let Expression::Identifier(ident) = expression {
            if self.token() == SyntaxKind::EqualsGreaterThanToken && !self.has_preceding_line_break() {
                return self.parse_simple_arrow_function(pos, ident, false);
            }
        }

        if self.token().is_assignment_operator() {
            let operator = self.token();
            self.next_token();
            let right = self.parse_assignment_expression_and_alloc();
            let data = self.finish_node(SyntaxKind::BinaryExpression, pos);
            return Expression::BinaryExpression(self.alloc(BinaryExpression {
                data,
                left: self.alloc(expression),
                operator,
                right,
            }));
        }

        self.parse_conditional_expression_rest(pos, expression)
    }

    fn parse_conditional_expression_rest(&mut self, pos: u32, condition: Expression<'a>) -> Expression<'a> {
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return condition;
        }
        let when_true = self.allow_in(|p| p.parse_assignment_expression_and_alloc());
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression_and_alloc();
        let data = self.finish_node(SyntaxKind::ConditionalExpression, pos);
        Expression::ConditionalExpression(self.alloc(ConditionalExpression {
            data,
            condition: self.alloc(condition),
            when_true,
            when_false,
        }))
    }

    fn parse_yield_expression(&mut self, pos: u32) -> Expression<'a> {
        self.next_token();
        let (asterisk_token, expression) = if !self.has_preceding_line_break()
            && (self.token() == SyntaxKind::AsteriskToken || is_start_of_expression(self.token()))
        {
            let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
            (asterisk_token, Some(self.parse_assignment_expression_and_alloc()))
        } else {
            (false, None)
        };
        let data = self.finish_node(SyntaxKind::YieldExpression, pos);
        Expression::YieldExpression(self.alloc(YieldExpression {
            data,
            asterisk_token,
            expression,
        }))
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    /// Cheap classification of `(`/`<`/`async (` so that only plausible
    /// arrow heads are parsed speculatively.
    fn is_parenthesized_arrow_function_start(&mut self) -> Tristate {
        if !matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::AsyncKeyword
        ) {
            return Tristate::False;
        }
        self.look_ahead(|p| {
            if p.token() == SyntaxKind::AsyncKeyword {
                p.next_token();
                if p.has_preceding_line_break()
                    || !matches!(p.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
                {
                    return Tristate::False;
                }
            }
            if p.token() == SyntaxKind::LessThanToken {
                p.next_token();
                return if p.is_identifier() || p.token() == SyntaxKind::ConstKeyword {
                    Tristate::Unknown
                } else {
                    Tristate::False
                };
            }

            match p.next_token() {
                SyntaxKind::CloseParenToken => match p.next_token() {
                    SyntaxKind::EqualsGreaterThanToken | SyntaxKind::ColonToken | SyntaxKind::OpenBraceToken => {
                        Tristate::True
                    }
                    _ => Tristate::False,
                },
                SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken => Tristate::Unknown,
                SyntaxKind::DotDotDotToken => Tristate::True,
                SyntaxKind::ThisKeyword => Tristate::Unknown,
                token if token.is_modifier_kind() && p.look_ahead(|q| {
                    q.next_token();
                    q.is_identifier()
                }) =>
                {
                    Tristate::True
                }
                _ if !p.is_identifier() => Tristate::False,
                _ => match p.next_token() {
                    SyntaxKind::ColonToken => Tristate::True,
                    SyntaxKind::QuestionToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::EqualsToken
                    | SyntaxKind::CloseParenToken => Tristate::Unknown,
                    _ => Tristate::False,
                },
            }
        })
    }

    fn try_parse_parenthesized_arrow_function(&mut self, pos: u32) -> Option<Expression<'a>> {
        if self.is_parenthesized_arrow_function_start() == Tristate::False {
            return None;
        }
        let (is_async, type_parameters, parameters, return_type) =
            self.try_parse(|p| p.parse_parenthesized_arrow_function_head())?;
        Some(self.parse_arrow_function_rest(pos, is_async, type_parameters, parameters, return_type))
    }

    #[allow(clippy::type_complexity)]
    fn parse_parenthesized_arrow_function_head(
        &mut self,
    ) -> Option<(
        bool,
        Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
        NodeList<'a, ParameterDeclaration<'a>>,
        OptionalNode<'a, TypeNode<'a>>,
    )> {
        let diagnostic_count = self.diagnostics.len();
        let scanner_diagnostic_count = self.scanner.diagnostics().len();

        let is_async = self.parse_optional(SyntaxKind::AsyncKeyword);
        let type_parameters = self.parse_type_parameters();
        if self.token() != SyntaxKind::OpenParenToken {
            return None;
        }
        let parameters = self.parse_parameters();
        let return_type = self.parse_return_type();

        if self.diagnostics.len() != diagnostic_count
            || self.scanner.diagnostics().len() != scanner_diagnostic_count
            || self.token() != SyntaxKind::EqualsGreaterThanToken
            || self.has_preceding_line_break()
        {
            return None;
        }
        Some((is_async, type_parameters, parameters, return_type))
    }

    fn try_parse_async_simple_arrow_function(&mut self, pos: u32) -> Option<Expression<'a>> {
        if self.token() != SyntaxKind::AsyncKeyword {
            return None;
        }
        let is_simple_arrow = self.look_ahead(|p| {
            p.next_token();
            if p.has_preceding_line_break() || !p.is_identifier() {
                return false;
            }
            p.next_token();
            p.token() == SyntaxKind::EqualsGreaterThanToken && !p.has_preceding_line_break()
        });
        if !is_simple_arrow {
            return None;
        }
        self.next_token();
        let ident = self.parse_identifier_and_alloc();
        Some(self.parse_simple_arrow_function(pos, ident, true))
    }

    /// `x => body`, with `x` already parsed.
    fn parse_simple_arrow_function(&mut self, pos: u32, ident: &'a Identifier<'a>, is_async: bool) -> Expression<'a> {
        let mut data = NodeData::new(SyntaxKind::Parameter, ident.data.range.pos, ident.data.range.end);
        data.id = self.next_id();
        let parameter = ParameterDeclaration {
            data,
            dot_dot_dot_token: false,
            name: BindingName::Identifier(ident),
            question_token: false,
            type_annotation: None,
            initializer: None,
        };
        let parameters = self.alloc_list(vec![parameter]);
        self.parse_arrow_function_rest(pos, is_async, None, parameters, None)
    }

    fn parse_arrow_function_rest(
        &mut self,
        pos: u32,
        is_async: bool,
        type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
        parameters: NodeList<'a, ParameterDeclaration<'a>>,
        return_type: OptionalNode<'a, TypeNode<'a>>,
    ) -> Expression<'a> {
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let body = if self.token() == SyntaxKind::OpenBraceToken {
            let block = self.parse_function_block(false);
            ArrowFunctionBody::Block(self.alloc(block))
        } else {
            let saved_generator = std::mem::replace(&mut self.in_generator, false);
            let expression = self.parse_assignment_expression_and_alloc();
            self.in_generator = saved_generator;
            ArrowFunctionBody::Expression(expression)
        };
        let mut data = self.finish_node(SyntaxKind::ArrowFunction, pos);
        if is_async {
            data.modifier_flags |= ModifierFlags::ASYNC;
        }
        Expression::ArrowFunction(self.alloc(ArrowFunction {
            data,
            type_parameters,
            parameters,
            return_type,
            body,
        }))
    }

    // ========================================================================
    // Binary and unary expressions
    // ========================================================================

    fn parse_binary_expression_or_higher(&mut self, pos: u32, precedence: OperatorPrecedence) -> Expression<'a> {
        let left = self.parse_unary_expression_or_higher();
        self.parse_binary_expression_rest(pos, precedence, left)
    }

    fn parse_binary_expression_rest(
        &mut self,
        pos: u32,
        precedence: OperatorPrecedence,
        mut left: Expression<'a>,
    ) -> Expression<'a> {
        loop {
            // `>` is scanned alone so type arguments can close; combine here.
            self.scanner.rescan_greater_than_token();
            let operator = self.token();
            let new_precedence = get_binary_operator_precedence(operator);
            if new_precedence == OperatorPrecedence::Invalid {
                break;
            }
            // `**` is right-associative.
            let consume = if operator == SyntaxKind::AsteriskAsteriskToken {
                new_precedence >= precedence
            } else {
                new_precedence > precedence
            };
            if !consume || (operator == SyntaxKind::InKeyword && self.disallow_in) {
                break;
            }

            if matches!(operator, SyntaxKind::AsKeyword | SyntaxKind::SatisfiesKeyword) {
                if self.has_preceding_line_break() {
                    break;
                }
                self.next_token();
                let type_node = if operator == SyntaxKind::AsKeyword && self.token() == SyntaxKind::ConstKeyword {
                    let const_pos = self.token_pos();
                    self.next_token();
                    let data = self.finish_node(SyntaxKind::ConstKeyword, const_pos);
                    self.alloc(TypeNode::KeywordType(data))
                } else {
                    self.parse_type_and_alloc()
                };
                let expression = self.alloc(left);
                left = if operator == SyntaxKind::AsKeyword {
                    let data = self.finish_node(SyntaxKind::AsExpression, pos);
                    Expression::AsExpression(self.alloc(AsExpression {
                        data,
                        expression,
                        type_node,
                    }))
                } else {
                    let data = self.finish_node(SyntaxKind::SatisfiesExpression, pos);
                    Expression::SatisfiesExpression(self.alloc(AsExpression {
                        data,
                        expression,
                        type_node,
                    }))
                };
                continue;
            }

            self.next_token();
            let right_pos = self.token_pos();
            let right = self.parse_binary_expression_or_higher(right_pos, new_precedence);
            let data = self.finish_node(SyntaxKind::BinaryExpression, pos);
            left = Expression::BinaryExpression(self.alloc(BinaryExpression {
                data,
                left: self.alloc(left),
                operator,
                right: self.alloc(right),
            }));
        }
        left
    }

    /// `await` is an operator when an expression follows on the same line.
    fn is_await_expression(&mut self) -> bool {
        self.next_token_is_on_same_line(|p| is_start_of_expression(p.token()))
    }

    fn parse_unary_expression_or_higher(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => self.parse_prefix_unary_expression(pos),
            SyntaxKind::AwaitKeyword if self.is_await_expression() => self.parse_prefix_unary_expression(pos),
            SyntaxKind::LessThanToken => {
                // Legacy `<T>expr` assertion: the type is dropped.
                self.next_token();
                self.parse_type();
                self.parse_expected(SyntaxKind::GreaterThanToken);
                self.parse_unary_expression_or_higher()
            }
            _ => {
                let expression = self.parse_left_hand_side_expression();
                if matches!(self.token(), SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
                    && !self.has_preceding_line_break()
                {
                    let operator = self.token();
                    self.next_token();
                    let data = self.finish_node(SyntaxKind::PostfixUnaryExpression, pos);
                    return Expression::PostfixUnaryExpression(self.alloc(PostfixUnaryExpression {
                        data,
                        operand: self.alloc(expression),
                        operator,
                    }));
                }
                expression
            }
        }
    }

    fn parse_prefix_unary_expression(&mut self, pos: u32) -> Expression<'a> {
        let operator = self.token();
        self.next_token();
        let operand = self.parse_unary_expression_or_higher();
        let data = self.finish_node(SyntaxKind::PrefixUnaryExpression, pos);
        Expression::PrefixUnaryExpression(self.alloc(PrefixUnaryExpression {
            data,
            operator,
            operand: self.alloc(operand),
        }))
    }

    // ========================================================================
    // Left-hand-side expressions
    // ========================================================================

    fn parse_left_hand_side_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let expression = self.parse_primary_expression();
        self.parse_member_or_call_expression_rest(pos, expression, true)
    }

    fn parse_left_hand_side_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_left_hand_side_expression();
        self.alloc(expression)
    }

    /// Property and element access, non-null assertions, tagged templates,
    /// and (when `allow_calls`) calls.
    fn parse_member_or_call_expression_rest(
        &mut self,
        pos: u32,
        mut expression: Expression<'a>,
        allow_calls: bool,
    ) -> Expression<'a> {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_identifier_name();
                    expression = self.finish_property_access(pos, expression, false, name);
                }
                SyntaxKind::QuestionDotToken => {
                    self.next_token();
                    expression = match self.token() {
                        SyntaxKind::OpenParenToken if allow_calls => {
                            let arguments = self.parse_argument_list();
                            self.finish_call(pos, expression, true, None, arguments)
                        }
                        SyntaxKind::LessThanToken if allow_calls => {
                            let type_arguments = self.parse_type_argument_list();
                            let arguments = self.parse_argument_list();
                            self.finish_call(pos, expression, true, Some(type_arguments), arguments)
                        }
                        SyntaxKind::OpenBracketToken => self.parse_element_access_rest(pos, expression, true),
                        _ => {
                            let name = self.parse_identifier_name();
                            self.finish_property_access(pos, expression, true, name)
                        }
                    };
                }
                SyntaxKind::ExclamationToken if !self.has_preceding_line_break() => {
                    self.next_token();
                    let data = self.finish_node(SyntaxKind::NonNullExpression, pos);
                    expression = Expression::NonNullExpression(self.alloc(NonNullExpression {
                        data,
                        expression: self.alloc(expression),
                    }));
                }
                SyntaxKind::OpenBracketToken => {
                    expression = self.parse_element_access_rest(pos, expression, false);
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    expression = self.parse_tagged_template_rest(pos, expression, None);
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_argument_list();
                    expression = self.finish_call(pos, expression, false, None, arguments);
                }
                SyntaxKind::LessThanToken if allow_calls => {
                    let Some(type_arguments) = self.try_parse(|p| p.parse_type_arguments_in_expression()) else {
                        break;
                    };
                    expression = if self.token() == SyntaxKind::OpenParenToken {
                        let arguments = self.parse_argument_list();
                        self.finish_call(pos, expression, false, Some(type_arguments), arguments)
                    } else {
                        self.parse_tagged_template_rest(pos, expression, Some(type_arguments))
                    };
                }
                _ => break,
            }
        }
        expression
    }

    fn finish_property_access(
        &mut self,
        pos: u32,
        expression: Expression<'a>,
        question_dot_token: bool,
        name: Identifier<'a>,
    ) -> Expression<'a> {
        let mut data = self.finish_node(SyntaxKind::PropertyAccessExpression, pos);
        if question_dot_token {
            data.flags |= NodeFlags::OPTIONAL_CHAIN;
        }
        Expression::PropertyAccessExpression(self.alloc(PropertyAccessExpression {
            data,
            expression: self.alloc(expression),
            question_dot_token,
            name,
        }))
    }

    fn parse_element_access_rest(
        &mut self,
        pos: u32,
        expression: Expression<'a>,
        question_dot_token: bool,
    ) -> Expression<'a> {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let argument_expression = self.allow_in(|p| p.parse_expression_and_alloc());
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let mut data = self.finish_node(SyntaxKind::ElementAccessExpression, pos);
        if question_dot_token {
            data.flags |= NodeFlags::OPTIONAL_CHAIN;
        }
        Expression::ElementAccessExpression(self.alloc(ElementAccessExpression {
            data,
            expression: self.alloc(expression),
            question_dot_token,
            argument_expression,
        }))
    }

    fn finish_call(
        &mut self,
        pos: u32,
        expression: Expression<'a>,
        question_dot_token: bool,
        type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
        arguments: NodeList<'a, Expression<'a>>,
    ) -> Expression<'a> {
        let mut data = self.finish_node(SyntaxKind::CallExpression, pos);
        if question_dot_token {
            data.flags |= NodeFlags::OPTIONAL_CHAIN;
        }
        Expression::CallExpression(self.alloc(CallExpression {
            data,
            expression: self.alloc(expression),
            question_dot_token,
            type_arguments,
            arguments,
        }))
    }

    fn parse_tagged_template_rest(
        &mut self,
        pos: u32,
        tag: Expression<'a>,
        type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    ) -> Expression<'a> {
        let template_pos = self.token_pos();
        let template = if self.token() == SyntaxKind::NoSubstitutionTemplateLiteral {
            let piece = self.parse_template_piece();
            Expression::NoSubstitutionTemplateLiteral(self.alloc(piece))
        } else {
            self.parse_template_expression(template_pos)
        };
        let data = self.finish_node(SyntaxKind::TaggedTemplateExpression, pos);
        Expression::TaggedTemplateExpression(self.alloc(TaggedTemplateExpression {
            data,
            tag: self.alloc(tag),
            type_arguments,
            template: self.alloc(template),
        }))
    }

    /// `<T, U>` in expression position; only accepted when a call or a
    /// template follows, so `a < b > c` stays a comparison.
    fn parse_type_arguments_in_expression(&mut self) -> Option<NodeList<'a, TypeNode<'a>>> {
        let diagnostic_count = self.diagnostics.len();
        if !self.parse_optional(SyntaxKind::LessThanToken) {
            return None;
        }
        let mut arguments = Vec::new();
        loop {
            arguments.push(self.parse_type_in_nested_context());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        if !self.parse_optional(SyntaxKind::GreaterThanToken) || self.diagnostics.len() != diagnostic_count {
            return None;
        }
        match self.token() {
            SyntaxKind::OpenParenToken | SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                Some(self.alloc_list(arguments))
            }
            _ => None,
        }
    }

    fn parse_argument_list(&mut self) -> NodeList<'a, Expression<'a>> {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let arguments = self.allow_in(|p| {
            let mut arguments = Vec::new();
            while !matches!(p.token(), SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken) {
                if p.token() == SyntaxKind::DotDotDotToken {
                    arguments.push(p.parse_spread_element());
                } else if is_start_of_expression(p.token()) {
                    arguments.push(p.parse_assignment_expression());
                } else {
                    p.error(&messages::EXPRESSION_OR_COMMA_EXPECTED, &[]);
                    break;
                }
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            arguments
        });
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.alloc_list(arguments)
    }

    fn parse_spread_element(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::DotDotDotToken);
        let expression = self.parse_assignment_expression_and_alloc();
        let data = self.finish_node(SyntaxKind::SpreadElement, pos);
        Expression::SpreadElement(self.alloc(SpreadElement { data, expression }))
    }

    fn parse_new_expression(&mut self, pos: u32) -> Expression<'a> {
        self.parse_expected(SyntaxKind::NewKeyword);

        // `new.target`
        if self.token() == SyntaxKind::DotToken {
            let keyword = Identifier {
                data: self.finish_node(SyntaxKind::Identifier, pos),
                text: "new",
            };
            let keyword = Expression::Identifier(self.alloc(keyword));
            self.next_token();
            let name = self.parse_identifier_name();
            return self.finish_property_access(pos, keyword, false, name);
        }

        let expression_pos = self.token_pos();
        let expression = self.parse_primary_expression();
        let expression = self.parse_member_or_call_expression_rest(expression_pos, expression, false);
        let type_arguments = if self.token() == SyntaxKind::LessThanToken {
            self.try_parse(|p| p.parse_type_arguments_in_expression())
        } else {
            None
        };
        let arguments = if self.token() == SyntaxKind::OpenParenToken {
            Some(self.parse_argument_list())
        } else {
            None
        };
        let data = self.finish_node(SyntaxKind::NewExpression, pos);
        Expression::NewExpression(self.alloc(NewExpression {
            data,
            expression: self.alloc(expression),
            type_arguments,
            arguments,
        }))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::NumericLiteral => {
                let literal = self.parse_numeric_literal();
                Expression::NumericLiteral(self.alloc(literal))
            }
            SyntaxKind::BigIntLiteral => {
                let literal = self.parse_literal_expression(SyntaxKind::BigIntLiteral);
                Expression::BigIntLiteral(literal)
            }
            SyntaxKind::StringLiteral => {
                let literal = self.parse_string_literal();
                Expression::StringLiteral(self.alloc(literal))
            }
            SyntaxKind::NoSubstitutionTemplateLiteral => {
                let piece = self.parse_template_piece();
                Expression::NoSubstitutionTemplateLiteral(self.alloc(piece))
            }
            SyntaxKind::TemplateHead => self.parse_template_expression(pos),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
                if self.scanner.rescan_slash_token() == SyntaxKind::RegularExpressionLiteral =>
            {
                let literal = self.parse_literal_expression(SyntaxKind::RegularExpressionLiteral);
                Expression::RegularExpressionLiteral(literal)
            }
            SyntaxKind::ThisKeyword => {
                self.next_token();
                Expression::ThisKeyword(self.finish_node(SyntaxKind::ThisKeyword, pos))
            }
            SyntaxKind::SuperKeyword => {
                self.next_token();
                Expression::SuperKeyword(self.finish_node(SyntaxKind::SuperKeyword, pos))
            }
            SyntaxKind::NullKeyword => {
                self.next_token();
                Expression::NullKeyword(self.finish_node(SyntaxKind::NullKeyword, pos))
            }
            SyntaxKind::TrueKeyword => {
                self.next_token();
                Expression::TrueKeyword(self.finish_node(SyntaxKind::TrueKeyword, pos))
            }
            SyntaxKind::FalseKeyword => {
                self.next_token();
                Expression::FalseKeyword(self.finish_node(SyntaxKind::FalseKeyword, pos))
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.allow_in(|p| p.parse_expression_and_alloc());
                self.parse_expected(SyntaxKind::CloseParenToken);
                let data = self.finish_node(SyntaxKind::ParenthesizedExpression, pos);
                Expression::ParenthesizedExpression(self.alloc(ParenthesizedExpression { data, expression }))
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(pos),
            SyntaxKind::OpenBraceToken => Expression::ObjectLiteralExpression(self.parse_object_literal()),
            SyntaxKind::AsyncKeyword
                if self.next_token_is_on_same_line(|p| p.token() == SyntaxKind::FunctionKeyword) =>
            {
                self.parse_function_expression(pos)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_expression(pos),
            SyntaxKind::ClassKeyword => {
                let class = self.parse_class(pos, &[], ModifierFlags::NONE, SyntaxKind::ClassExpression);
                Expression::ClassExpression(class)
            }
            SyntaxKind::AtToken => {
                let decorators = self.parse_decorators();
                let class = self.parse_class(pos, decorators, ModifierFlags::NONE, SyntaxKind::ClassExpression);
                Expression::ClassExpression(class)
            }
            SyntaxKind::NewKeyword => self.parse_new_expression(pos),
            SyntaxKind::PrivateIdentifier => {
                let ident = self.parse_identifier_name();
                Expression::PrivateIdentifier(self.alloc(ident))
            }
            // `import(...)` and `import.meta` act like a callee identifier.
            SyntaxKind::ImportKeyword => {
                let ident = self.parse_identifier_name();
                Expression::Identifier(self.alloc(ident))
            }
            _ if self.is_identifier() => Expression::Identifier(self.parse_identifier_and_alloc()),
            _ => {
                self.error(&messages::EXPRESSION_EXPECTED, &[]);
                let data = self.missing_node(SyntaxKind::Identifier);
                Expression::Identifier(self.alloc(Identifier { data, text: "" }))
            }
        }
    }

    fn parse_literal_expression(&mut self, kind: SyntaxKind) -> &'a LiteralExpression<'a> {
        let pos = self.token_pos();
        let text = self.scanner.token_text();
        self.next_token();
        let data = self.finish_node(kind, pos);
        self.alloc(LiteralExpression { data, text })
    }

    fn parse_template_piece(&mut self) -> TemplateLiteralPiece<'a> {
        let pos = self.token_pos();
        let kind = self.token();
        let text: &'a str = self.arena.alloc_str(self.scanner.token_value());
        let raw_text = self.scanner.token_raw_text();
        self.next_token();
        TemplateLiteralPiece {
            data: self.finish_node(kind, pos),
            text,
            raw_text,
        }
    }

    fn parse_template_expression(&mut self, pos: u32) -> Expression<'a> {
        let head = self.parse_template_piece();
        let mut template_spans = Vec::new();
        loop {
            let span_pos = self.token_pos();
            let expression = self.allow_in(|p| p.parse_expression_and_alloc());
            if self.token() != SyntaxKind::CloseBraceToken {
                self.error(&messages::_0_EXPECTED, &["}"]);
                let literal = TemplateLiteralPiece {
                    data: self.missing_node(SyntaxKind::TemplateTail),
                    text: "",
                    raw_text: "",
                };
                template_spans.push(TemplateSpan {
                    data: self.finish_node(SyntaxKind::TemplateSpan, span_pos),
                    expression,
                    literal,
                });
                break;
            }
            self.scanner.rescan_template_token();
            let literal = self.parse_template_piece();
            let is_tail = literal.data.kind != SyntaxKind::TemplateMiddle;
            template_spans.push(TemplateSpan {
                data: self.finish_node(SyntaxKind::TemplateSpan, span_pos),
                expression,
                literal,
            });
            if is_tail {
                break;
            }
        }
        let template_spans = self.alloc_list(template_spans);
        let data = self.finish_node(SyntaxKind::TemplateExpression, pos);
        Expression::TemplateExpression(self.alloc(TemplateExpression {
            data,
            head,
            template_spans,
        }))
    }

    fn parse_array_literal(&mut self, pos: u32) -> Expression<'a> {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let elements = self.allow_in(|p| {
            let mut elements = Vec::new();
            while !matches!(p.token(), SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken) {
                if p.token() == SyntaxKind::CommaToken {
                    elements.push(Expression::OmittedExpression(p.empty_node(SyntaxKind::OmittedExpression)));
                    p.next_token();
                    continue;
                }
                if p.token() == SyntaxKind::DotDotDotToken {
                    elements.push(p.parse_spread_element());
                } else {
                    elements.push(p.parse_assignment_expression());
                }
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            elements
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let elements = self.alloc_list(elements);
        let data = self.finish_node(SyntaxKind::ArrayLiteralExpression, pos);
        Expression::ArrayLiteralExpression(self.alloc(ArrayLiteralExpression { data, elements }))
    }

    fn parse_object_literal(&mut self) -> &'a ObjectLiteralExpression<'a> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let properties = self.allow_in(|p| {
            let mut properties = Vec::new();
            while !matches!(p.token(), SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken) {
                properties.push(p.parse_object_literal_element());
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            properties
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let properties = self.alloc_list(properties);
        let data = self.finish_node(SyntaxKind::ObjectLiteralExpression, pos);
        self.alloc(ObjectLiteralExpression { data, properties })
    }

    fn parse_object_literal_element(&mut self) -> ObjectLiteralElement<'a> {
        let pos = self.token_pos();

        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression_and_alloc();
            let data = self.finish_node(SyntaxKind::SpreadAssignment, pos);
            return ObjectLiteralElement::SpreadAssignment(self.alloc(SpreadElement { data, expression }));
        }

        let modifiers = if self.token() == SyntaxKind::AsyncKeyword && self.next_token_can_follow_modifier() {
            self.next_token();
            ModifierFlags::ASYNC
        } else {
            ModifierFlags::NONE
        };

        if matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_property_name_start()
            })
        {
            let kind = if self.token() == SyntaxKind::GetKeyword {
                SyntaxKind::GetAccessor
            } else {
                SyntaxKind::SetAccessor
            };
            self.next_token();
            let name = self.parse_property_name();
            let method = self.parse_method_rest(pos, kind, &[], modifiers, false, name, false);
            return ObjectLiteralElement::MethodDeclaration(method);
        }

        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let is_shorthand_candidate = self.is_identifier();
        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);

        if asterisk_token || matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            let method = self.parse_method_rest(
                pos,
                SyntaxKind::MethodDeclaration,
                &[],
                modifiers,
                asterisk_token,
                name,
                question_token,
            );
            return ObjectLiteralElement::MethodDeclaration(method);
        }

        if let PropertyName::Identifier(ident) = &name {
            if is_shorthand_candidate
                && matches!(
                    self.token(),
                    SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken | SyntaxKind::EqualsToken
                )
            {
                let object_assignment_initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                    Some(self.parse_assignment_expression_and_alloc())
                } else {
                    None
                };
                let data = self.finish_node(SyntaxKind::ShorthandPropertyAssignment, pos);
                return ObjectLiteralElement::ShorthandPropertyAssignment(self.alloc(
                    ShorthandPropertyAssignment {
                        data,
                        name: (*ident).clone(),
                        object_assignment_initializer,
                    },
                ));
            }
        }

        if !self.parse_expected(SyntaxKind::ColonToken) {
            self.error(&messages::PROPERTY_ASSIGNMENT_EXPECTED, &[]);
        }
        let initializer = self.parse_assignment_expression_and_alloc();
        let data = self.finish_node(SyntaxKind::PropertyAssignment, pos);
        ObjectLiteralElement::PropertyAssignment(self.alloc(PropertyAssignment {
            data,
            name,
            initializer,
        }))
    }

    fn parse_function_expression(&mut self, pos: u32) -> Expression<'a> {
        let is_async = self.parse_optional(SyntaxKind::AsyncKeyword);
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            Some(self.parse_identifier())
        } else {
            None
        };
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        let return_type = self.parse_return_type();
        let body = self.parse_function_block(asterisk_token);
        let mut data = self.finish_node(SyntaxKind::FunctionExpression, pos);
        if is_async {
            data.modifier_flags |= ModifierFlags::ASYNC;
        }
        Expression::FunctionExpression(self.alloc(FunctionExpression {
            data,
            asterisk_token,
            name,
            type_parameters,
            parameters,
            return_type,
            body,
        }))
    }

    // ========================================================================
    // Types
    // ========================================================================

    fn skipped_type(&mut self, pos: u32) -> TypeNode<'a> {
        let data = self.finish_node(SyntaxKind::SkippedType, pos);
        let text = data.range.slice(self.source_text).unwrap_or("");
        TypeNode::SkippedType(self.alloc(SkippedType { data, text }))
    }

    fn parse_type_and_alloc(&mut self) -> &'a TypeNode<'a> {
        let type_node = self.parse_type();
        self.alloc(type_node)
    }

    /// A type inside brackets, where conditional types are allowed again.
    fn parse_type_in_nested_context(&mut self) -> TypeNode<'a> {
        let saved = std::mem::replace(&mut self.disallow_conditional_types, false);
        let type_node = self.parse_type();
        self.disallow_conditional_types = saved;
        type_node
    }

    fn parse_type(&mut self) -> TypeNode<'a> {
        if !self.enter_nesting() {
            let data = self.missing_node(SyntaxKind::SkippedType);
            return TypeNode::SkippedType(self.alloc(SkippedType { data, text: "" }));
        }
        let type_node = self.parse_type_worker();
        self.exit_nesting();
        type_node
    }

    fn parse_type_worker(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        if self.is_start_of_function_or_constructor_type() {
            return self.parse_function_or_constructor_type(pos);
        }
        let type_node = self.parse_union_type_or_higher();

        // `T extends U ? X : Y`
        if !self.disallow_conditional_types
            && !self.has_preceding_line_break()
            && self.parse_optional(SyntaxKind::ExtendsKeyword)
        {
            let saved = std::mem::replace(&mut self.disallow_conditional_types, true);
            self.parse_type();
            self.disallow_conditional_types = false;
            self.parse_expected(SyntaxKind::QuestionToken);
            self.parse_type();
            self.parse_expected(SyntaxKind::ColonToken);
            self.parse_type();
            self.disallow_conditional_types = saved;
            return self.skipped_type(pos);
        }
        type_node
    }

    /// Return type annotations may be type predicates (`x is T`,
    /// `asserts x`, `asserts x is T`).
    fn parse_type_or_type_predicate(&mut self) -> &'a TypeNode<'a> {
        let pos = self.token_pos();
        let is_asserts = self.token() == SyntaxKind::AssertsKeyword
            && self.next_token_is_on_same_line(|p| p.is_identifier() || p.token() == SyntaxKind::ThisKeyword);
        if is_asserts {
            self.next_token();
            self.next_token();
            if self.parse_optional(SyntaxKind::IsKeyword) {
                self.parse_type();
            }
            let type_node = self.skipped_type(pos);
            return self.alloc(type_node);
        }
        let is_predicate = (self.is_identifier() || self.token() == SyntaxKind::ThisKeyword)
            && self.next_token_is_on_same_line(|p| p.token() == SyntaxKind::IsKeyword);
        if is_predicate {
            self.next_token();
            self.next_token();
            self.parse_type();
            let type_node = self.skipped_type(pos);
            return self.alloc(type_node);
        }
        self.parse_type_and_alloc()
    }

    fn is_start_of_function_or_constructor_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::LessThanToken | SyntaxKind::NewKeyword => true,
            SyntaxKind::AbstractKeyword => self.next_token_is(SyntaxKind::NewKeyword),
            SyntaxKind::OpenParenToken => self.look_ahead(|p| p.is_unambiguously_start_of_function_type()),
            _ => false,
        }
    }

    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        self.next_token();
        if matches!(self.token(), SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken) {
            return true;
        }
        if self.skip_parameter_start() {
            if matches!(
                self.token(),
                SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::QuestionToken | SyntaxKind::EqualsToken
            ) {
                return true;
            }
            if self.parse_optional(SyntaxKind::CloseParenToken) && self.token() == SyntaxKind::EqualsGreaterThanToken {
                return true;
            }
        }
        false
    }

    fn skip_parameter_start(&mut self) -> bool {
        if self.token().is_modifier_kind() {
            self.parse_modifiers();
        }
        if self.is_identifier() || self.token() == SyntaxKind::ThisKeyword {
            self.next_token();
            return true;
        }
        if matches!(self.token(), SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken) {
            let diagnostic_count = self.diagnostics.len();
            self.parse_binding_name();
            return self.diagnostics.len() == diagnostic_count;
        }
        false
    }

    fn parse_function_or_constructor_type(&mut self, pos: u32) -> TypeNode<'a> {
        self.parse_optional(SyntaxKind::AbstractKeyword);
        let is_constructor = self.parse_optional(SyntaxKind::NewKeyword);
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameters();
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let return_type = self.parse_type_or_type_predicate();
        let kind = if is_constructor {
            SyntaxKind::ConstructorType
        } else {
            SyntaxKind::FunctionType
        };
        let data = self.finish_node(kind, pos);
        let node = self.alloc(FunctionTypeNode {
            data,
            type_parameters,
            parameters,
            return_type,
        });
        if is_constructor {
            TypeNode::ConstructorType(node)
        } else {
            TypeNode::FunctionType(node)
        }
    }

    fn parse_union_type_or_higher(&mut self) -> TypeNode<'a> {
        self.parse_union_or_intersection_type(
            SyntaxKind::BarToken,
            SyntaxKind::UnionType,
            Self::parse_intersection_type_or_higher,
        )
    }

    fn parse_intersection_type_or_higher(&mut self) -> TypeNode<'a> {
        self.parse_union_or_intersection_type(
            SyntaxKind::AmpersandToken,
            SyntaxKind::IntersectionType,
            Self::parse_type_operator_or_higher,
        )
    }

    /// `A | B | C`; a leading operator is allowed (`| A | B`).
    fn parse_union_or_intersection_type(
        &mut self,
        operator: SyntaxKind,
        kind: SyntaxKind,
        parse_constituent: fn(&mut Self) -> TypeNode<'a>,
    ) -> TypeNode<'a> {
        let pos = self.token_pos();
        let has_leading_operator = self.parse_optional(operator);
        let first = if has_leading_operator && self.is_start_of_function_or_constructor_type() {
            let constituent_pos = self.token_pos();
            self.parse_function_or_constructor_type(constituent_pos)
        } else {
            parse_constituent(self)
        };
        if self.token() != operator && !has_leading_operator {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(operator) {
            types.push(parse_constituent(self));
        }
        let types = self.alloc_list(types);
        let data = self.finish_node(kind, pos);
        let node = self.alloc(UnionOrIntersectionTypeNode { data, types });
        if kind == SyntaxKind::UnionType {
            TypeNode::UnionType(node)
        } else {
            TypeNode::IntersectionType(node)
        }
    }

    fn parse_type_operator_or_higher(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::KeyOfKeyword | SyntaxKind::UniqueKeyword | SyntaxKind::ReadonlyKeyword => {
                let operator = self.token();
                self.next_token();
                let type_node = self.parse_type_operator_or_higher();
                let data = self.finish_node(SyntaxKind::TypeOperator, pos);
                TypeNode::TypeOperator(self.alloc(TypeOperatorNode {
                    data,
                    operator,
                    type_node: self.alloc(type_node),
                }))
            }
            SyntaxKind::InferKeyword => {
                self.next_token();
                self.parse_identifier();
                if self.token() == SyntaxKind::ExtendsKeyword {
                    self.next_token();
                    let saved = std::mem::replace(&mut self.disallow_conditional_types, true);
                    self.parse_type();
                    self.disallow_conditional_types = saved;
                }
                self.skipped_type(pos)
            }
            _ => self.parse_postfix_type_or_higher(),
        }
    }

    fn parse_postfix_type_or_higher(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        let mut type_node = self.parse_non_array_type();
        while !self.has_preceding_line_break() && self.token() == SyntaxKind::OpenBracketToken {
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                let data = self.finish_node(SyntaxKind::ArrayType, pos);
                type_node = TypeNode::ArrayType(self.alloc(ArrayTypeNode {
                    data,
                    element_type: self.alloc(type_node),
                }));
            } else {
                let index_type = self.parse_type_in_nested_context();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                let data = self.finish_node(SyntaxKind::IndexedAccessType, pos);
                type_node = TypeNode::IndexedAccessType(self.alloc(IndexedAccessTypeNode {
                    data,
                    object_type: self.alloc(type_node),
                    index_type: self.alloc(index_type),
                }));
            }
        }
        type_node
    }

    fn parse_non_array_type(&mut self) -> TypeNode<'a> {
        let pos = self.token_pos();
        match self.token() {
            token if token.is_keyword_type() && !self.next_token_is(SyntaxKind::DotToken) => {
                self.next_token();
                TypeNode::KeywordType(self.finish_node(token, pos))
            }
            SyntaxKind::ThisKeyword => {
                self.next_token();
                TypeNode::ThisType(self.finish_node(SyntaxKind::ThisType, pos))
            }
            SyntaxKind::TypeOfKeyword => {
                self.next_token();
                if self.token() == SyntaxKind::ImportKeyword {
                    return self.parse_import_type(pos, true);
                }
                self.parse_type_query(pos)
            }
            SyntaxKind::ImportKeyword => self.parse_import_type(pos, false),
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NoSubstitutionTemplateLiteral => {
                let literal = self.parse_primary_expression();
                self.finish_literal_type(pos, literal)
            }
            SyntaxKind::MinusToken
                if self.look_ahead(|p| {
                    matches!(p.next_token(), SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral)
                }) =>
            {
                let literal = self.parse_prefix_unary_expression(pos);
                self.finish_literal_type(pos, literal)
            }
            SyntaxKind::TemplateHead => self.parse_template_literal_type(pos),
            SyntaxKind::OpenBraceToken => {
                if self.is_start_of_mapped_type() {
                    return self.parse_mapped_type(pos);
                }
                let members = self.parse_type_members();
                let data = self.finish_node(SyntaxKind::TypeLiteral, pos);
                TypeNode::TypeLiteral(self.alloc(TypeLiteralNode { data, members }))
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(pos),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let type_node = self.parse_type_in_nested_context();
                self.parse_expected(SyntaxKind::CloseParenToken);
                let data = self.finish_node(SyntaxKind::ParenthesizedType, pos);
                TypeNode::ParenthesizedType(self.alloc(WrappedTypeNode {
                    data,
                    type_node: self.alloc(type_node),
                }))
            }
            _ if self.is_identifier() || self.token().is_keyword_type() => self.parse_type_reference(pos),
            _ => {
                self.error(&messages::TYPE_EXPECTED, &[]);
                let data = self.missing_node(SyntaxKind::SkippedType);
                TypeNode::SkippedType(self.alloc(SkippedType { data, text: "" }))
            }
        }
    }

    fn finish_literal_type(&mut self, pos: u32, literal: Expression<'a>) -> TypeNode<'a> {
        let data = self.finish_node(SyntaxKind::LiteralType, pos);
        TypeNode::LiteralType(self.alloc(LiteralTypeNode {
            data,
            literal: self.alloc(literal),
        }))
    }

    fn parse_entity_name(&mut self) -> EntityName<'a> {
        let pos = self.token_pos();
        let first = self.parse_identifier_name();
        let mut entity = EntityName::Identifier(self.alloc(first));
        while self.parse_optional(SyntaxKind::DotToken) {
            let right = self.parse_identifier_name();
            let data = self.finish_node(SyntaxKind::QualifiedName, pos);
            entity = EntityName::QualifiedName(self.alloc(QualifiedName {
                data,
                left: entity,
                right,
            }));
        }
        entity
    }

    fn parse_type_arguments_of_reference(&mut self) -> Option<NodeList<'a, TypeNode<'a>>> {
        if !self.has_preceding_line_break() && self.token() == SyntaxKind::LessThanToken {
            Some(self.parse_type_argument_list())
        } else {
            None
        }
    }

    fn parse_type_reference(&mut self, pos: u32) -> TypeNode<'a> {
        let type_name = self.parse_entity_name();
        let type_arguments = self.parse_type_arguments_of_reference();
        let data = self.finish_node(SyntaxKind::TypeReference, pos);
        TypeNode::TypeReference(self.alloc(TypeReferenceNode {
            data,
            type_name,
            type_arguments,
        }))
    }

    fn parse_type_query(&mut self, pos: u32) -> TypeNode<'a> {
        let expr_name = self.parse_entity_name();
        let type_arguments = self.parse_type_arguments_of_reference();
        let data = self.finish_node(SyntaxKind::TypeQuery, pos);
        TypeNode::TypeQuery(self.alloc(TypeQueryNode {
            data,
            expr_name,
            type_arguments,
        }))
    }

    /// `import("m").A.B<T>`, optionally preceded by `typeof`.
    fn parse_import_type(&mut self, pos: u32, is_type_of: bool) -> TypeNode<'a> {
        self.parse_expected(SyntaxKind::ImportKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let argument = self.parse_type_in_nested_context();
        if self.parse_optional(SyntaxKind::CommaToken) && self.token() == SyntaxKind::OpenBraceToken {
            self.parse_object_literal();
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        let qualifier = if self.parse_optional(SyntaxKind::DotToken) {
            Some(self.parse_entity_name())
        } else {
            None
        };
        let type_arguments = self.parse_type_arguments_of_reference();
        let data = self.finish_node(SyntaxKind::ImportType, pos);
        TypeNode::ImportType(self.alloc(ImportTypeNode {
            data,
            is_type_of,
            argument: self.alloc(argument),
            qualifier,
            type_arguments,
        }))
    }

    fn parse_type_argument_list(&mut self) -> NodeList<'a, TypeNode<'a>> {
        self.parse_expected(SyntaxKind::LessThanToken);
        let mut arguments = Vec::new();
        while !matches!(self.token(), SyntaxKind::GreaterThanToken | SyntaxKind::EndOfFileToken) {
            arguments.push(self.parse_type_in_nested_context());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        self.alloc_list(arguments)
    }

    fn parse_template_literal_type(&mut self, pos: u32) -> TypeNode<'a> {
        self.next_token();
        loop {
            self.parse_type_in_nested_context();
            if self.token() != SyntaxKind::CloseBraceToken {
                self.error(&messages::_0_EXPECTED, &["}"]);
                break;
            }
            let kind = self.scanner.rescan_template_token();
            self.next_token();
            if kind != SyntaxKind::TemplateMiddle {
                break;
            }
        }
        self.skipped_type(pos)
    }

    fn is_start_of_mapped_type(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if matches!(p.token(), SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
                return p.next_token() == SyntaxKind::ReadonlyKeyword;
            }
            if p.token() == SyntaxKind::ReadonlyKeyword {
                p.next_token();
            }
            if p.token() != SyntaxKind::OpenBracketToken {
                return false;
            }
            p.next_token();
            if !p.is_identifier() {
                return false;
            }
            p.next_token() == SyntaxKind::InKeyword
        })
    }

    /// `{ readonly [K in keyof T as N]?: T[K] }`
    fn parse_mapped_type(&mut self, pos: u32) -> TypeNode<'a> {
        self.parse_expected(SyntaxKind::OpenBraceToken);
        if matches!(self.token(), SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
            self.next_token();
        }
        self.parse_optional(SyntaxKind::ReadonlyKeyword);
        self.parse_expected(SyntaxKind::OpenBracketToken);
        self.parse_identifier();
        self.parse_expected(SyntaxKind::InKeyword);
        self.parse_type_in_nested_context();
        if self.parse_optional(SyntaxKind::AsKeyword) {
            self.parse_type_in_nested_context();
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        if matches!(self.token(), SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
            self.next_token();
        }
        self.parse_optional(SyntaxKind::QuestionToken);
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type_in_nested_context();
        }
        self.parse_type_member_semicolon();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.skipped_type(pos)
    }

    fn parse_tuple_type(&mut self, pos: u32) -> TypeNode<'a> {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        while !matches!(self.token(), SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken) {
            let element_pos = self.token_pos();
            let is_rest = self.parse_optional(SyntaxKind::DotDotDotToken);

            // Named members: `name: T`, `name?: T`.
            let is_named = self.is_identifier()
                && self.look_ahead(|p| {
                    p.next_token();
                    p.parse_optional(SyntaxKind::QuestionToken);
                    p.token() == SyntaxKind::ColonToken
                });
            let mut is_optional = false;
            if is_named {
                self.next_token();
                is_optional = self.parse_optional(SyntaxKind::QuestionToken);
                self.parse_expected(SyntaxKind::ColonToken);
            }

            let mut element = self.parse_type_in_nested_context();
            if !is_named && self.parse_optional(SyntaxKind::QuestionToken) {
                is_optional = true;
            }
            if is_optional || is_rest {
                let kind = if is_rest {
                    SyntaxKind::RestType
                } else {
                    SyntaxKind::OptionalType
                };
                let data = self.finish_node(kind, element_pos);
                let node = self.alloc(WrappedTypeNode {
                    data,
                    type_node: self.alloc(element),
                });
                element = if is_rest {
                    TypeNode::RestType(node)
                } else {
                    TypeNode::OptionalType(node)
                };
            }
            elements.push(element);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let elements = self.alloc_list(elements);
        let data = self.finish_node(SyntaxKind::TupleType, pos);
        TypeNode::TupleType(self.alloc(TupleTypeNode { data, elements }))
    }

    // ========================================================================
    // Type members
    // ========================================================================

    fn parse_type_members(&mut self) -> NodeList<'a, TypeElement<'a>> {
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return &[];
        }
        let mut members = Vec::new();
        while !matches!(self.token(), SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken) {
            let start = self.token_pos();
            members.push(self.parse_type_member());
            if self.token_pos() == start {
                self.error(&messages::PROPERTY_ASSIGNMENT_EXPECTED, &[]);
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.alloc_list(members)
    }

    fn parse_type_member_semicolon(&mut self) {
        if !self.parse_optional(SyntaxKind::CommaToken) {
            self.parse_semicolon();
        }
    }

    fn parse_type_member(&mut self) -> TypeElement<'a> {
        let pos = self.token_pos();

        let is_call_signature = matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
            || (self.token() == SyntaxKind::NewKeyword
                && self.look_ahead(|p| {
                    matches!(p.next_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
                }));
        if is_call_signature {
            self.parse_optional(SyntaxKind::NewKeyword);
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let type_annotation = self.parse_return_type();
            self.parse_type_member_semicolon();
            return TypeElement {
                data: self.finish_node(SyntaxKind::CallSignature, pos),
                name: None,
                question_token: false,
                type_parameters,
                parameters: Some(parameters),
                type_annotation,
            };
        }

        let modifiers = self.parse_modifiers();
        if self.is_index_signature() {
            return self.parse_index_signature(pos, modifiers);
        }

        if matches!(self.token(), SyntaxKind::GetKeyword | SyntaxKind::SetKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_property_name_start()
            })
        {
            self.next_token();
        }

        let name = self.parse_property_name();
        let question_token = self.parse_optional(SyntaxKind::QuestionToken);

        if matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            let type_parameters = self.parse_type_parameters();
            let parameters = self.parse_parameters();
            let type_annotation = self.parse_return_type();
            self.parse_type_member_semicolon();
            let mut data = self.finish_node(SyntaxKind::MethodSignature, pos);
            data.modifier_flags = modifiers;
            return TypeElement {
                data,
                name: Some(name),
                question_token,
                type_parameters,
                parameters: Some(parameters),
                type_annotation,
            };
        }

        let type_annotation = self.parse_type_annotation();
        self.parse_type_member_semicolon();
        let mut data = self.finish_node(SyntaxKind::PropertySignature, pos);
        data.modifier_flags = modifiers;
        TypeElement {
            data,
            name: Some(name),
            question_token,
            type_parameters: None,
            parameters: None,
            type_annotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: parse and return the statements plus diagnostics count.
    fn parse<'a>(arena: &'a Bump, source: &str) -> ParseResult<'a> {
        parse_source_text(arena, "test.ts", source)
    }

    /// Helper: the single expression of a one-statement file.
    fn single_expression<'a>(result: &ParseResult<'a>) -> &'a Expression<'a> {
        match &result.source_file.statements[0] {
            Statement::ExpressionStatement(stmt) => stmt.expression,
            other => panic!("expected expression statement, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_ranges_exclude_leading_trivia() {
        let arena = Bump::new();
        let result = parse(&arena, "  /* c */ nameof(x) ;");
        let expression = single_expression(&result);
        let range = expression.range();
        assert_eq!(range.slice(result.source_file.text), Some("nameof(x)"));
    }

    #[test]
    fn test_node_ids_are_dense() {
        let arena = Bump::new();
        let result = parse(&arena, "const a = b.c(d);");
        let file = result.source_file;
        assert!(file.node_count > 0);
        assert_eq!(file.data.id.0, file.node_count - 1);
    }

    #[test]
    fn test_property_access_chain() {
        let arena = Bump::new();
        let result = parse(&arena, "a.b?.c!;");
        assert!(result.diagnostics.is_empty());
        let Expression::NonNullExpression(non_null) = single_expression(&result) else {
            panic!("expected non-null assertion");
        };
        let Expression::PropertyAccessExpression(access) = non_null.expression else {
            panic!("expected property access");
        };
        assert!(access.question_dot_token);
        assert_eq!(access.name.text, "c");
    }

    #[test]
    fn test_generic_call_vs_comparison() {
        let arena = Bump::new();
        let result = parse(&arena, "nameof<Foo>(); a < b > c;");
        assert!(result.diagnostics.is_empty());
        let Statement::ExpressionStatement(first) = &result.source_file.statements[0] else {
            panic!("expected expression statement");
        };
        let Expression::CallExpression(call) = first.expression else {
            panic!("expected call");
        };
        assert_eq!(call.type_arguments.map(|args| args.len()), Some(1));
        let Statement::ExpressionStatement(second) = &result.source_file.statements[1] else {
            panic!("expected expression statement");
        };
        assert_eq!(second.expression.kind(), SyntaxKind::BinaryExpression);
    }

    #[test]
    fn test_arrow_functions() {
        let arena = Bump::new();
        let result = parse(&arena, "f(o => o.a, (x: T) => { return x; }, async y => y, (a));");
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        let Expression::CallExpression(call) = single_expression(&result) else {
            panic!("expected call");
        };
        let kinds: Vec<_> = call.arguments.iter().map(|arg| arg.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::ArrowFunction,
                SyntaxKind::ArrowFunction,
                SyntaxKind::ArrowFunction,
                SyntaxKind::ParenthesizedExpression,
            ]
        );
    }

    #[test]
    fn test_template_literal_pieces() {
        let arena = Bump::new();
        let result = parse(&arena, "`a${b}c${d}e`;");
        let Expression::TemplateExpression(template) = single_expression(&result) else {
            panic!("expected template");
        };
        assert_eq!(template.head.text, "a");
        assert_eq!(template.template_spans.len(), 2);
        assert_eq!(template.template_spans[1].literal.raw_text, "e");
        assert_eq!(template.template_spans[1].literal.data.kind, SyntaxKind::TemplateTail);
    }

    #[test]
    fn test_type_only_declarations_are_skipped() {
        let arena = Bump::new();
        let source = "interface I { a: string; m(): void }\ntype T<U> = U extends string ? 1 : 2;\nenum E { A = 1, B }\ndeclare const x: number;";
        let result = parse(&arena, source);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.source_file.statements.len(), 4);
        for statement in result.source_file.statements {
            assert_eq!(statement.kind(), SyntaxKind::SkippedStatement);
        }
    }

    #[test]
    fn test_imports_and_exports() {
        let arena = Bump::new();
        let source = "import nameof, { a as b, type C } from \"ts-nameof\";\nimport * as ns from './x';\nexport { b };\nexport default 1;";
        let result = parse(&arena, source);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        let Statement::ImportDeclaration(import) = &result.source_file.statements[0] else {
            panic!("expected import");
        };
        assert_eq!(import.module_specifier.text, "ts-nameof");
        let clause = import.import_clause.as_ref().map(|c| c.name.as_ref().map(|n| n.text));
        assert_eq!(clause, Some(Some("nameof")));
        assert_eq!(result.source_file.statements[3].kind(), SyntaxKind::ExportAssignment);
    }

    #[test]
    fn test_class_members() {
        let arena = Bump::new();
        let source = "class A<T> extends B implements C {\n  private x?: number = 1;\n  static { init(); }\n  get y() { return 1; }\n  constructor(public z: string) { super(); }\n  [key: string]: any;\n}";
        let result = parse(&arena, source);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        let Statement::ClassDeclaration(class) = &result.source_file.statements[0] else {
            panic!("expected class");
        };
        assert_eq!(class.heritage_clauses.len(), 2);
        assert_eq!(class.members.len(), 5);
    }

    #[test]
    fn test_regex_and_division() {
        let arena = Bump::new();
        let result = parse(&arena, "const r = /ab+c/g; const d = a / b / c;");
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.source_file.statements.len(), 2);
    }

    #[test]
    fn test_statement_recovery() {
        let arena = Bump::new();
        let result = parse(&arena, "const = ;\nnameof(x);");
        assert!(result.diagnostics.has_errors());
        assert!(result.source_file.data.flags.contains(NodeFlags::THIS_NODE_HAS_ERROR));
        let has_call = result
            .source_file
            .statements
            .iter()
            .any(|s| matches!(s, Statement::ExpressionStatement(e) if e.expression.kind() == SyntaxKind::CallExpression));
        assert!(has_call);
    }

    #[test]
    fn test_deep_nesting_reports_error() {
        // Debug builds need more than the default test thread stack.
        let handle = std::thread::Builder::new()
            .stack_size(64 * 1024 * 1024)
            .spawn(|| {
                let arena = Bump::new();
                let source = format!("{}1{};", "(".repeat(400), ")".repeat(400));
                let result = parse(&arena, &source);
                result
                    .diagnostics
                    .diagnostics()
                    .iter()
                    .map(|d| d.code)
                    .collect::<Vec<u32>>()
            })
            .unwrap();
        let codes = handle.join().unwrap();
        assert!(codes.contains(&messages::MAXIMUM_NESTING_DEPTH_EXCEEDED.code));
    }

    #[test]
    fn test_diagnostics_carry_file_name() {
        let arena = Bump::new();
        let result = parse_source_text(&arena, "src/a.ts", "let s = 'abc");
        assert!(result.diagnostics.has_errors());
        for diagnostic in result.diagnostics.diagnostics() {
            assert_eq!(diagnostic.file.as_deref(), Some("src/a.ts"));
        }
    }
}
