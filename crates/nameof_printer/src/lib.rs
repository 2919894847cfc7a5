//! nameof_printer: AST to text output.
//!
//! Renders statements, expressions and type nodes back into TypeScript
//! text. When the printer is given the file's source text, every node that
//! still has source text is copied verbatim from it, so only generated and
//! rewritten nodes are printed structurally and original formatting is kept
//! wherever possible.

use std::fmt::Write as _;

use nameof_ast::node::*;
use nameof_ast::syntax_kind::SyntaxKind;
use nameof_ast::types::{ModifierFlags, NodeFlags};

/// Options for the printer.
#[derive(Debug, Clone)]
pub struct PrinterOptions {
    /// Indentation string.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline after a source file.
    pub trailing_newline: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "    ".to_string(),
            new_line: "\n".to_string(),
            trailing_newline: true,
        }
    }
}

/// The printer converts AST nodes to text.
pub struct Printer<'s> {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
    /// Text the original nodes' ranges point into.
    source_text: Option<&'s str>,
}

impl<'s> Printer<'s> {
    /// A printer that renders every node structurally.
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(256),
            indent_level: 0,
            options,
            source_text: None,
        }
    }

    /// A printer that copies nodes with source text out of `source_text`.
    pub fn with_source(source_text: &'s str) -> Self {
        Self {
            source_text: Some(source_text),
            ..Self::new()
        }
    }

    /// Print a source file to a string.
    pub fn print_source_file(&mut self, source_file: &SourceFile<'_>) -> String {
        self.output.clear();
        for (i, stmt) in source_file.statements.iter().enumerate() {
            if i > 0 {
                self.write_newline();
            }
            self.write_indent();
            self.print_statement(stmt);
        }
        if self.options.trailing_newline && !self.output.is_empty() {
            self.write_newline();
        }
        std::mem::take(&mut self.output)
    }

    pub fn statement_to_string(&mut self, stmt: &Statement<'_>) -> String {
        self.output.clear();
        self.print_statement(stmt);
        std::mem::take(&mut self.output)
    }

    pub fn expression_to_string(&mut self, expr: &Expression<'_>) -> String {
        self.output.clear();
        self.print_expression(expr);
        std::mem::take(&mut self.output)
    }

    pub fn type_to_string(&mut self, ty: &TypeNode<'_>) -> String {
        self.output.clear();
        self.print_type_node(ty);
        std::mem::take(&mut self.output)
    }

    pub fn entity_name_to_string(&mut self, name: &EntityName<'_>) -> String {
        self.output.clear();
        self.print_entity_name(name);
        std::mem::take(&mut self.output)
    }

    /// The verbatim text of a node, when it has any.
    fn source_slice(&self, data: &NodeData) -> Option<&'s str> {
        if !data.flags.has_source_text() || data.flags.contains(NodeFlags::THIS_NODE_HAS_ERROR) {
            return None;
        }
        data.range.slice(self.source_text?)
    }

    /// Copy the node's source text. Returns whether anything was written.
    fn write_source(&mut self, data: &NodeData) -> bool {
        match self.source_slice(data) {
            Some(text) => {
                self.output.push_str(text);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    fn print_statement(&mut self, stmt: &Statement<'_>) {
        if self.write_source(stmt.data()) {
            return;
        }
        match stmt {
            Statement::EmptyStatement(_) => self.write(";"),
            Statement::ExpressionStatement(n) => {
                self.print_expression(n.expression);
                self.write(";");
            }
            Statement::VariableStatement(n) => {
                self.print_modifier_flags(n.data.modifier_flags);
                self.print_variable_declaration_list(&n.declaration_list);
                self.write(";");
            }
            Statement::ReturnStatement(n) => {
                self.write("return");
                if let Some(expr) = n.expression {
                    self.write(" ");
                    self.print_expression(expr);
                }
                self.write(";");
            }
            Statement::IfStatement(n) => {
                self.write("if (");
                self.print_expression(n.expression);
                self.write(") ");
                self.print_statement(n.then_statement);
                if let Some(else_stmt) = n.else_statement {
                    self.write(" else ");
                    self.print_statement(else_stmt);
                }
            }
            Statement::Block(n) => self.print_block(n),
            Statement::FunctionDeclaration(n) => self.print_function_declaration(n),
            Statement::ClassDeclaration(n) => self.print_class(n),
            Statement::ModuleDeclaration(n) => {
                self.print_modifier_flags(n.data.modifier_flags);
                if n.name == "global" {
                    self.write("global");
                } else {
                    let keyword = if n.name.starts_with(['"', '\'']) {
                        "module "
                    } else {
                        "namespace "
                    };
                    self.write(keyword);
                    self.write(n.name);
                }
                match n.body {
                    Some(body) => {
                        self.write(" ");
                        self.print_block(body);
                    }
                    None => self.write(";"),
                }
            }
            Statement::ImportDeclaration(n) => self.print_import_declaration(n),
            Statement::ExportDeclaration(n) => self.print_export_declaration(n),
            Statement::ExportAssignment(n) => {
                if n.is_export_equals {
                    self.write("export = ");
                } else {
                    self.write("export default ");
                }
                self.print_expression(n.expression);
                self.write(";");
            }
            Statement::DoStatement(n) => {
                self.write("do ");
                self.print_statement(n.statement);
                self.write(" while (");
                self.print_expression(n.expression);
                self.write(");");
            }
            Statement::WhileStatement(n) => {
                self.write("while (");
                self.print_expression(n.expression);
                self.write(") ");
                self.print_statement(n.statement);
            }
            Statement::ForStatement(n) => {
                self.write("for (");
                if let Some(ref init) = n.initializer {
                    self.print_for_initializer(init);
                }
                self.write(";");
                if let Some(cond) = n.condition {
                    self.write(" ");
                    self.print_expression(cond);
                }
                self.write(";");
                if let Some(incr) = n.incrementor {
                    self.write(" ");
                    self.print_expression(incr);
                }
                self.write(") ");
                self.print_statement(n.statement);
            }
            Statement::ForInStatement(n) => self.print_for_in_or_of(n, "in"),
            Statement::ForOfStatement(n) => self.print_for_in_or_of(n, "of"),
            Statement::ContinueStatement(n) => self.print_jump("continue", n),
            Statement::BreakStatement(n) => self.print_jump("break", n),
            Statement::SwitchStatement(n) => self.print_switch_statement(n),
            Statement::LabeledStatement(n) => {
                self.print_identifier(&n.label);
                self.write(": ");
                self.print_statement(n.statement);
            }
            Statement::ThrowStatement(n) => {
                self.write("throw ");
                self.print_expression(n.expression);
                self.write(";");
            }
            Statement::TryStatement(n) => {
                self.write("try ");
                self.print_block(&n.try_block);
                if let Some(ref catch) = n.catch_clause {
                    self.write(" catch ");
                    if let Some(ref decl) = catch.variable_declaration {
                        self.write("(");
                        self.print_variable_declaration(decl);
                        self.write(") ");
                    }
                    self.print_block(&catch.block);
                }
                if let Some(ref finally) = n.finally_block {
                    self.write(" finally ");
                    self.print_block(finally);
                }
            }
            Statement::DebuggerStatement(_) => self.write("debugger;"),
            Statement::SkippedStatement(n) => self.write(n.text),
        }
    }

    fn print_jump(&mut self, keyword: &str, node: &JumpStatement<'_>) {
        self.write(keyword);
        if let Some(ref label) = node.label {
            self.write(" ");
            self.print_identifier(label);
        }
        self.write(";");
    }

    fn print_variable_declaration_list(&mut self, list: &VariableDeclarationList<'_>) {
        let keyword = if list.data.flags.contains(NodeFlags::CONST) {
            "const "
        } else if list.data.flags.contains(NodeFlags::LET) {
            "let "
        } else {
            "var "
        };
        self.write(keyword);
        self.print_list(list.declarations, ", ", Self::print_variable_declaration);
    }

    fn print_variable_declaration(&mut self, decl: &VariableDeclaration<'_>) {
        self.print_binding_name(&decl.name);
        if decl.exclamation_token {
            self.write("!");
        }
        if let Some(ty) = decl.type_annotation {
            self.write(": ");
            self.print_type_node(ty);
        }
        if let Some(init) = decl.initializer {
            self.write(" = ");
            self.print_expression(init);
        }
    }

    fn print_binding_name(&mut self, name: &BindingName<'_>) {
        if self.write_source(name.data()) {
            return;
        }
        match name {
            BindingName::Identifier(id) => self.print_identifier(id),
            BindingName::ObjectBindingPattern(p) => {
                if p.elements.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                self.print_list(p.elements, ", ", Self::print_binding_element);
                self.write(" }");
            }
            BindingName::ArrayBindingPattern(p) => {
                self.write("[");
                self.print_list(p.elements, ", ", |printer, elem| match elem {
                    ArrayBindingElement::BindingElement(e) => printer.print_binding_element(e),
                    ArrayBindingElement::OmittedExpression(_) => {}
                });
                self.write("]");
            }
        }
    }

    fn print_binding_element(&mut self, elem: &BindingElement<'_>) {
        if elem.dot_dot_dot_token {
            self.write("...");
        }
        if let Some(ref prop_name) = elem.property_name {
            self.print_property_name(prop_name);
            self.write(": ");
        }
        self.print_binding_name(&elem.name);
        if let Some(init) = elem.initializer {
            self.write(" = ");
            self.print_expression(init);
        }
    }

    fn print_block(&mut self, node: &Block<'_>) {
        if self.write_source(&node.data) {
            return;
        }
        self.print_statement_list(node.statements);
    }

    fn print_statement_list(&mut self, statements: &[Statement<'_>]) {
        self.write("{");
        if !statements.is_empty() {
            self.increase_indent();
            for stmt in statements.iter() {
                self.write_newline();
                self.write_indent();
                self.print_statement(stmt);
            }
            self.decrease_indent();
            self.write_newline();
            self.write_indent();
        }
        self.write("}");
    }

    fn print_function_declaration(&mut self, node: &FunctionDeclaration<'_>) {
        self.print_decorators(node.decorators);
        self.print_modifier_flags(node.data.modifier_flags);
        self.write("function");
        if node.asterisk_token {
            self.write("*");
        }
        if let Some(ref name) = node.name {
            self.write(" ");
            self.print_identifier(name);
        }
        self.print_signature(node.type_parameters, node.parameters, node.return_type);
        match node.body {
            Some(body) => {
                self.write(" ");
                self.print_block(body);
            }
            None => self.write(";"),
        }
    }

    fn print_class(&mut self, node: &ClassDeclaration<'_>) {
        self.print_decorators(node.decorators);
        self.print_modifier_flags(node.data.modifier_flags);
        self.write("class");
        if let Some(ref name) = node.name {
            self.write(" ");
            self.print_identifier(name);
        }
        self.print_optional_type_parameters(node.type_parameters);
        for clause in node.heritage_clauses.iter() {
            self.write(if clause.token == SyntaxKind::ImplementsKeyword {
                " implements "
            } else {
                " extends "
            });
            self.print_list(clause.types, ", ", |printer, ty| {
                printer.print_expression(ty.expression);
                printer.print_optional_type_arguments(ty.type_arguments);
            });
        }
        self.write(" {");
        if !node.members.is_empty() {
            self.increase_indent();
            for member in node.members.iter() {
                self.write_newline();
                self.write_indent();
                self.print_class_element(member);
            }
            self.decrease_indent();
            self.write_newline();
            self.write_indent();
        }
        self.write("}");
    }

    fn print_class_element(&mut self, elem: &ClassElement<'_>) {
        if self.write_source(elem.data()) {
            return;
        }
        match elem {
            ClassElement::PropertyDeclaration(prop) => {
                self.print_decorators(prop.decorators);
                self.print_modifier_flags(prop.data.modifier_flags);
                self.print_property_name(&prop.name);
                if prop.question_token {
                    self.write("?");
                }
                if prop.exclamation_token {
                    self.write("!");
                }
                if let Some(ty) = prop.type_annotation {
                    self.write(": ");
                    self.print_type_node(ty);
                }
                if let Some(init) = prop.initializer {
                    self.write(" = ");
                    self.print_expression(init);
                }
                self.write(";");
            }
            ClassElement::MethodDeclaration(method) => self.print_method(method),
            ClassElement::IndexSignature(signature) => self.print_type_element(signature),
            ClassElement::ClassStaticBlockDeclaration(block) => {
                self.write("static ");
                self.print_statement_list(block.statements);
            }
            ClassElement::SemicolonClassElement(_) => self.write(";"),
        }
    }

    /// Methods, accessors and constructors of classes and object literals.
    fn print_method(&mut self, method: &MethodDeclaration<'_>) {
        self.print_decorators(method.decorators);
        self.print_modifier_flags(method.data.modifier_flags);
        match method.data.kind {
            SyntaxKind::GetAccessor => self.write("get "),
            SyntaxKind::SetAccessor => self.write("set "),
            _ => {}
        }
        if method.asterisk_token {
            self.write("*");
        }
        self.print_property_name(&method.name);
        if method.question_token {
            self.write("?");
        }
        self.print_signature(method.type_parameters, method.parameters, method.return_type);
        match method.body {
            Some(body) => {
                self.write(" ");
                self.print_block(body);
            }
            None => self.write(";"),
        }
    }

    fn print_for_initializer(&mut self, init: &ForInitializer<'_>) {
        match init {
            ForInitializer::VariableDeclarationList(list) => self.print_variable_declaration_list(list),
            ForInitializer::Expression(expr) => self.print_expression(expr),
        }
    }

    fn print_for_in_or_of(&mut self, node: &ForInOrOfStatement<'_>, keyword: &str) {
        self.write("for ");
        if node.await_modifier {
            self.write("await ");
        }
        self.write("(");
        self.print_for_initializer(&node.initializer);
        self.write(" ");
        self.write(keyword);
        self.write(" ");
        self.print_expression(node.expression);
        self.write(") ");
        self.print_statement(node.statement);
    }

    fn print_switch_statement(&mut self, node: &SwitchStatement<'_>) {
        self.write("switch (");
        self.print_expression(node.expression);
        self.write(") {");
        self.increase_indent();
        for clause in node.clauses.iter() {
            self.write_newline();
            self.write_indent();
            match clause.expression {
                Some(expr) => {
                    self.write("case ");
                    self.print_expression(expr);
                    self.write(":");
                }
                None => self.write("default:"),
            }
            self.increase_indent();
            for stmt in clause.statements.iter() {
                self.write_newline();
                self.write_indent();
                self.print_statement(stmt);
            }
            self.decrease_indent();
        }
        self.decrease_indent();
        self.write_newline();
        self.write_indent();
        self.write("}");
    }

    fn print_import_declaration(&mut self, node: &ImportDeclaration<'_>) {
        self.write("import ");
        if let Some(ref clause) = node.import_clause {
            if clause.is_type_only {
                self.write("type ");
            }
            if let Some(ref name) = clause.name {
                self.print_identifier(name);
                if clause.named_bindings.is_some() {
                    self.write(", ");
                }
            }
            match clause.named_bindings {
                Some(NamedImportBindings::NamespaceImport(name)) => {
                    self.write("* as ");
                    self.print_identifier(name);
                }
                Some(NamedImportBindings::NamedImports(specifiers)) => {
                    self.write("{ ");
                    self.print_list(specifiers, ", ", |printer, spec| {
                        printer.print_specifier(spec.is_type_only, spec.property_name.as_ref(), &spec.name)
                    });
                    self.write(" }");
                }
                None => {}
            }
            self.write(" from ");
        }
        self.print_string_literal(&node.module_specifier);
        self.write(";");
    }

    fn print_export_declaration(&mut self, node: &ExportDeclaration<'_>) {
        self.write("export ");
        if node.is_type_only {
            self.write("type ");
        }
        match node.export_clause {
            Some(NamedExportBindings::NamespaceExport(name)) => {
                self.write("* as ");
                self.print_identifier(name);
            }
            Some(NamedExportBindings::NamedExports(specifiers)) => {
                if specifiers.is_empty() {
                    self.write("{}");
                } else {
                    self.write("{ ");
                    self.print_list(specifiers, ", ", |printer, spec| {
                        printer.print_specifier(spec.is_type_only, spec.property_name.as_ref(), &spec.name)
                    });
                    self.write(" }");
                }
            }
            None => self.write("*"),
        }
        if let Some(ref specifier) = node.module_specifier {
            self.write(" from ");
            self.print_string_literal(specifier);
        }
        self.write(";");
    }

    fn print_specifier(&mut self, is_type_only: bool, property_name: Option<&Identifier<'_>>, name: &Identifier<'_>) {
        if is_type_only {
            self.write("type ");
        }
        if let Some(property_name) = property_name {
            self.print_identifier(property_name);
            self.write(" as ");
        }
        self.print_identifier(name);
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    fn print_expression(&mut self, expr: &Expression<'_>) {
        if self.write_source(expr.data()) {
            return;
        }
        match expr {
            Expression::Identifier(id) | Expression::PrivateIdentifier(id) => self.print_identifier(id),
            Expression::StringLiteral(n) => self.print_string_literal(n),
            Expression::NumericLiteral(n) => self.write(n.text),
            Expression::BigIntLiteral(n) | Expression::RegularExpressionLiteral(n) => self.write(n.text),
            Expression::NoSubstitutionTemplateLiteral(n) => {
                self.write("`");
                self.write(n.raw_text);
                self.write("`");
            }
            Expression::TemplateExpression(n) => self.print_template_expression(n),
            Expression::TaggedTemplateExpression(n) => {
                self.print_expression(n.tag);
                self.print_optional_type_arguments(n.type_arguments);
                self.print_expression(n.template);
            }
            Expression::ArrayLiteralExpression(n) => {
                self.write("[");
                self.print_list(n.elements, ", ", Self::print_expression);
                // A trailing hole needs its own comma.
                if matches!(n.elements.last(), Some(Expression::OmittedExpression(_))) {
                    self.write(",");
                }
                self.write("]");
            }
            Expression::ObjectLiteralExpression(n) => self.print_object_literal(n),
            Expression::PropertyAccessExpression(n) => {
                self.print_expression(n.expression);
                self.write(if n.question_dot_token { "?." } else { "." });
                self.print_identifier(&n.name);
            }
            Expression::ElementAccessExpression(n) => {
                self.print_expression(n.expression);
                if n.question_dot_token {
                    self.write("?.");
                }
                self.write("[");
                self.print_expression(n.argument_expression);
                self.write("]");
            }
            Expression::CallExpression(n) => {
                self.print_expression(n.expression);
                if n.question_dot_token {
                    self.write("?.");
                }
                self.print_optional_type_arguments(n.type_arguments);
                self.write("(");
                self.print_list(n.arguments, ", ", Self::print_expression);
                self.write(")");
            }
            Expression::NewExpression(n) => {
                self.write("new ");
                self.print_expression(n.expression);
                self.print_optional_type_arguments(n.type_arguments);
                if let Some(args) = n.arguments {
                    self.write("(");
                    self.print_list(args, ", ", Self::print_expression);
                    self.write(")");
                }
            }
            Expression::ParenthesizedExpression(n) => {
                self.write("(");
                self.print_expression(n.expression);
                self.write(")");
            }
            Expression::FunctionExpression(n) => {
                self.print_modifier_flags(n.data.modifier_flags);
                self.write("function");
                if n.asterisk_token {
                    self.write("*");
                }
                if let Some(ref name) = n.name {
                    self.write(" ");
                    self.print_identifier(name);
                }
                self.print_signature(n.type_parameters, n.parameters, n.return_type);
                self.write(" ");
                self.print_block(&n.body);
            }
            Expression::ArrowFunction(n) => {
                self.print_modifier_flags(n.data.modifier_flags);
                self.print_signature(n.type_parameters, n.parameters, n.return_type);
                self.write(" => ");
                match n.body {
                    ArrowFunctionBody::Block(block) => self.print_block(block),
                    ArrowFunctionBody::Expression(body) => self.print_expression(body),
                }
            }
            Expression::ClassExpression(n) => self.print_class(n),
            Expression::PrefixUnaryExpression(n) => {
                self.write(token_text(n.operator));
                if n.operator.is_keyword() {
                    self.write(" ");
                }
                self.print_expression(n.operand);
            }
            Expression::PostfixUnaryExpression(n) => {
                self.print_expression(n.operand);
                self.write(token_text(n.operator));
            }
            Expression::BinaryExpression(n) => {
                self.print_expression(n.left);
                if n.operator != SyntaxKind::CommaToken {
                    self.write(" ");
                }
                self.write(token_text(n.operator));
                self.write(" ");
                self.print_expression(n.right);
            }
            Expression::ConditionalExpression(n) => {
                self.print_expression(n.condition);
                self.write(" ? ");
                self.print_expression(n.when_true);
                self.write(" : ");
                self.print_expression(n.when_false);
            }
            Expression::YieldExpression(n) => {
                self.write("yield");
                if n.asterisk_token {
                    self.write("*");
                }
                if let Some(expr) = n.expression {
                    self.write(" ");
                    self.print_expression(expr);
                }
            }
            Expression::SpreadElement(n) => {
                self.write("...");
                self.print_expression(n.expression);
            }
            Expression::AsExpression(n) => {
                self.print_expression(n.expression);
                self.write(" as ");
                self.print_type_node(n.type_node);
            }
            Expression::SatisfiesExpression(n) => {
                self.print_expression(n.expression);
                self.write(" satisfies ");
                self.print_type_node(n.type_node);
            }
            Expression::NonNullExpression(n) => {
                self.print_expression(n.expression);
                self.write("!");
            }
            Expression::ThisKeyword(_) => self.write("this"),
            Expression::SuperKeyword(_) => self.write("super"),
            Expression::NullKeyword(_) => self.write("null"),
            Expression::TrueKeyword(_) => self.write("true"),
            Expression::FalseKeyword(_) => self.write("false"),
            Expression::OmittedExpression(_) => {}
        }
    }

    fn print_template_expression(&mut self, node: &TemplateExpression<'_>) {
        self.write("`");
        self.write(node.head.raw_text);
        for span in node.template_spans.iter() {
            self.write("${");
            self.print_expression(span.expression);
            self.write("}");
            self.write(span.literal.raw_text);
        }
        self.write("`");
    }

    fn print_object_literal(&mut self, node: &ObjectLiteralExpression<'_>) {
        if node.properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        self.print_list(node.properties, ", ", |printer, prop| {
            if printer.write_source(prop.data()) {
                return;
            }
            match prop {
                ObjectLiteralElement::PropertyAssignment(p) => {
                    printer.print_property_name(&p.name);
                    printer.write(": ");
                    printer.print_expression(p.initializer);
                }
                ObjectLiteralElement::ShorthandPropertyAssignment(p) => {
                    printer.print_identifier(&p.name);
                    if let Some(init) = p.object_assignment_initializer {
                        printer.write(" = ");
                        printer.print_expression(init);
                    }
                }
                ObjectLiteralElement::SpreadAssignment(p) => {
                    printer.write("...");
                    printer.print_expression(p.expression);
                }
                ObjectLiteralElement::MethodDeclaration(m) => printer.print_method(m),
            }
        });
        self.write(" }");
    }

    // ========================================================================
    // Type printing
    // ========================================================================

    fn print_type_node(&mut self, ty: &TypeNode<'_>) {
        if self.write_source(ty.data()) {
            return;
        }
        match ty {
            TypeNode::KeywordType(data) => self.write(token_text(data.kind)),
            TypeNode::ThisType(_) => self.write("this"),
            TypeNode::TypeReference(n) => {
                self.print_entity_name(&n.type_name);
                self.print_optional_type_arguments(n.type_arguments);
            }
            TypeNode::FunctionType(n) | TypeNode::ConstructorType(n) => {
                if n.data.kind == SyntaxKind::ConstructorType {
                    self.write("new ");
                }
                self.print_optional_type_parameters(n.type_parameters);
                self.write("(");
                self.print_parameters(n.parameters);
                self.write(") => ");
                self.print_type_node(n.return_type);
            }
            TypeNode::TypeQuery(n) => {
                self.write("typeof ");
                self.print_entity_name(&n.expr_name);
                self.print_optional_type_arguments(n.type_arguments);
            }
            TypeNode::TypeLiteral(n) => {
                if n.members.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                self.print_list(n.members, " ", Self::print_type_element);
                self.write(" }");
            }
            TypeNode::ArrayType(n) => {
                self.print_type_node(n.element_type);
                self.write("[]");
            }
            TypeNode::TupleType(n) => {
                self.write("[");
                self.print_list(n.elements, ", ", Self::print_type_node);
                self.write("]");
            }
            TypeNode::OptionalType(n) => {
                self.print_type_node(n.type_node);
                self.write("?");
            }
            TypeNode::RestType(n) => {
                self.write("...");
                self.print_type_node(n.type_node);
            }
            TypeNode::UnionType(n) => self.print_list(n.types, " | ", Self::print_type_node),
            TypeNode::IntersectionType(n) => self.print_list(n.types, " & ", Self::print_type_node),
            TypeNode::ParenthesizedType(n) => {
                self.write("(");
                self.print_type_node(n.type_node);
                self.write(")");
            }
            TypeNode::TypeOperator(n) => {
                self.write(token_text(n.operator));
                self.write(" ");
                self.print_type_node(n.type_node);
            }
            TypeNode::IndexedAccessType(n) => {
                self.print_type_node(n.object_type);
                self.write("[");
                self.print_type_node(n.index_type);
                self.write("]");
            }
            TypeNode::LiteralType(n) => self.print_expression(n.literal),
            TypeNode::ImportType(n) => {
                if n.is_type_of {
                    self.write("typeof ");
                }
                self.write("import(");
                self.print_type_node(n.argument);
                self.write(")");
                if let Some(ref qualifier) = n.qualifier {
                    self.write(".");
                    self.print_entity_name(qualifier);
                }
                self.print_optional_type_arguments(n.type_arguments);
            }
            TypeNode::SkippedType(n) => self.write(n.text),
        }
    }

    fn print_type_element(&mut self, elem: &TypeElement<'_>) {
        if self.write_source(&elem.data) {
            return;
        }
        self.print_modifier_flags(elem.data.modifier_flags);
        if elem.data.kind == SyntaxKind::IndexSignature {
            self.write("[");
            if let Some(params) = elem.parameters {
                self.print_parameters(params);
            }
            self.write("]");
        } else {
            if let Some(ref name) = elem.name {
                self.print_property_name(name);
            }
            if elem.question_token {
                self.write("?");
            }
            self.print_optional_type_parameters(elem.type_parameters);
            if let Some(params) = elem.parameters {
                self.write("(");
                self.print_parameters(params);
                self.write(")");
            }
        }
        if let Some(ty) = elem.type_annotation {
            self.write(": ");
            self.print_type_node(ty);
        }
        self.write(";");
    }

    // ========================================================================
    // Helper printing functions
    // ========================================================================

    fn print_identifier(&mut self, id: &Identifier<'_>) {
        self.write(id.text);
    }

    fn print_string_literal(&mut self, literal: &StringLiteral<'_>) {
        if self.write_source(&literal.data) {
            return;
        }
        let quote = if literal.is_single_quote { '\'' } else { '"' };
        let quoted = quote_string(literal.text, quote);
        self.write(&quoted);
    }

    fn print_entity_name(&mut self, name: &EntityName<'_>) {
        match name {
            EntityName::Identifier(id) => self.print_identifier(id),
            EntityName::QualifiedName(q) => {
                self.print_entity_name(&q.left);
                self.write(".");
                self.print_identifier(&q.right);
            }
        }
    }

    fn print_property_name(&mut self, name: &PropertyName<'_>) {
        match name {
            PropertyName::Identifier(id) | PropertyName::PrivateIdentifier(id) => self.print_identifier(id),
            PropertyName::StringLiteral(literal) => self.print_string_literal(literal),
            PropertyName::NumericLiteral(literal) => self.write(literal.text),
            PropertyName::ComputedPropertyName(c) => {
                self.write("[");
                self.print_expression(c.expression);
                self.write("]");
            }
        }
    }

    fn print_decorators(&mut self, decorators: &[Decorator<'_>]) {
        for decorator in decorators.iter() {
            self.write("@");
            self.print_expression(decorator.expression);
            self.write(" ");
        }
    }

    /// `<T>(a: A): R` shared by functions, methods and arrows.
    fn print_signature(
        &mut self,
        type_parameters: Option<&[TypeParameterDeclaration<'_>]>,
        parameters: &[ParameterDeclaration<'_>],
        return_type: Option<&TypeNode<'_>>,
    ) {
        self.print_optional_type_parameters(type_parameters);
        self.write("(");
        self.print_parameters(parameters);
        self.write(")");
        if let Some(ret) = return_type {
            self.write(": ");
            self.print_type_node(ret);
        }
    }

    fn print_parameters(&mut self, params: &[ParameterDeclaration<'_>]) {
        self.print_list(params, ", ", |printer, param| {
            if printer.write_source(&param.data) {
                return;
            }
            printer.print_modifier_flags(param.data.modifier_flags);
            if param.dot_dot_dot_token {
                printer.write("...");
            }
            printer.print_binding_name(&param.name);
            if param.question_token {
                printer.write("?");
            }
            if let Some(ty) = param.type_annotation {
                printer.write(": ");
                printer.print_type_node(ty);
            }
            if let Some(init) = param.initializer {
                printer.write(" = ");
                printer.print_expression(init);
            }
        });
    }

    fn print_optional_type_parameters(&mut self, type_params: Option<&[TypeParameterDeclaration<'_>]>) {
        let Some(params) = type_params else { return };
        self.write("<");
        self.print_list(params, ", ", |printer, tp| {
            printer.print_identifier(&tp.name);
            if let Some(constraint) = tp.constraint {
                printer.write(" extends ");
                printer.print_type_node(constraint);
            }
            if let Some(default) = tp.default {
                printer.write(" = ");
                printer.print_type_node(default);
            }
        });
        self.write(">");
    }

    fn print_optional_type_arguments(&mut self, type_args: Option<&[TypeNode<'_>]>) {
        if let Some(args) = type_args {
            self.write("<");
            self.print_list(args, ", ", Self::print_type_node);
            self.write(">");
        }
    }

    fn print_modifier_flags(&mut self, flags: ModifierFlags) {
        if flags.is_empty() {
            return;
        }
        if flags.contains(ModifierFlags::EXPORT) { self.write("export "); }
        if flags.contains(ModifierFlags::DEFAULT) { self.write("default "); }
        if flags.contains(ModifierFlags::AMBIENT) { self.write("declare "); }
        if flags.contains(ModifierFlags::PUBLIC) { self.write("public "); }
        if flags.contains(ModifierFlags::PRIVATE) { self.write("private "); }
        if flags.contains(ModifierFlags::PROTECTED) { self.write("protected "); }
        if flags.contains(ModifierFlags::ABSTRACT) { self.write("abstract "); }
        if flags.contains(ModifierFlags::STATIC) { self.write("static "); }
        if flags.contains(ModifierFlags::OVERRIDE) { self.write("override "); }
        if flags.contains(ModifierFlags::READONLY) { self.write("readonly "); }
        if flags.contains(ModifierFlags::ACCESSOR) { self.write("accessor "); }
        if flags.contains(ModifierFlags::CONST) { self.write("const "); }
        if flags.contains(ModifierFlags::ASYNC) { self.write("async "); }
    }

    fn print_list<T>(&mut self, items: &[T], separator: &str, mut print: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            print(self, item);
        }
    }

    // ========================================================================
    // Core write helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

impl Default for Printer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Print one expression, copying original nodes out of `source_text` when
/// it is given.
pub fn print_expression(expr: &Expression<'_>, source_text: Option<&str>) -> String {
    let mut printer = match source_text {
        Some(text) => Printer::with_source(text),
        None => Printer::new(),
    };
    printer.expression_to_string(expr)
}

fn token_text(kind: SyntaxKind) -> &'static str {
    kind.token_text().unwrap_or("")
}

/// Quote `text` as a JavaScript string literal.
pub fn quote_string(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Escape cooked text for the raw part of a template literal.
pub fn escape_template_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '\r' => out.push_str("\\r"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nameof_ast::types::NodeId;
    use nameof_core::TextRange;

    /// Helper: a header for a node created outside the parser.
    fn synthesized(kind: SyntaxKind) -> NodeData {
        NodeData::synthesized(kind, NodeId(100))
    }

    fn ident<'a>(text: &'a str, range: Option<TextRange>) -> Identifier<'a> {
        let mut data = synthesized(SyntaxKind::Identifier);
        if let Some(range) = range {
            data = NodeData::new(SyntaxKind::Identifier, range.pos, range.end);
        }
        Identifier { data, text }
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("log", '"'), "\"log\"");
        assert_eq!(quote_string("a\"b\\c", '"'), "\"a\\\"b\\\\c\"");
        assert_eq!(quote_string("it's", '\''), "'it\\'s'");
        assert_eq!(quote_string("line\nbreak\u{1}", '"'), "\"line\\nbreak\\u0001\"");
    }

    #[test]
    fn test_escape_template_text() {
        assert_eq!(escape_template_text("a.b["), "a.b[");
        assert_eq!(escape_template_text("`${x}`"), "\\`\\${x}\\`");
        assert_eq!(escape_template_text("$ alone"), "$ alone");
    }

    #[test]
    fn test_synthesized_string_literal() {
        let literal = StringLiteral {
            data: synthesized(SyntaxKind::StringLiteral),
            text: "console.log",
            is_single_quote: false,
        };
        let expr = Expression::StringLiteral(&literal);
        assert_eq!(print_expression(&expr, Some("ignored")), "\"console.log\"");
    }

    #[test]
    fn test_synthesized_template_with_original_hole() {
        let source = "i + 1";
        let left = ident("i", Some(TextRange::new(0, 1)));
        let hole = Expression::Identifier(&left);
        let span = TemplateSpan {
            data: synthesized(SyntaxKind::TemplateSpan),
            expression: &hole,
            literal: TemplateLiteralPiece {
                data: synthesized(SyntaxKind::TemplateTail),
                text: "].x",
                raw_text: "].x",
            },
        };
        let spans = [span];
        let template = TemplateExpression {
            data: synthesized(SyntaxKind::TemplateExpression),
            head: TemplateLiteralPiece {
                data: synthesized(SyntaxKind::TemplateHead),
                text: "a[",
                raw_text: "a[",
            },
            template_spans: &spans,
        };
        let expr = Expression::TemplateExpression(&template);
        assert_eq!(print_expression(&expr, Some(source)), "`a[${i}].x`");
    }

    #[test]
    fn test_rewritten_node_prints_structurally() {
        let source = "f(nameof(x))";
        let callee = ident("f", Some(TextRange::new(0, 1)));
        let callee_expr = Expression::Identifier(&callee);
        let literal = StringLiteral {
            data: synthesized(SyntaxKind::StringLiteral),
            text: "x",
            is_single_quote: false,
        };
        let arguments = [Expression::StringLiteral(&literal)];
        let call = CallExpression {
            data: NodeData::new(SyntaxKind::CallExpression, 0, 12).rewritten(NodeId(101)),
            expression: &callee_expr,
            question_dot_token: false,
            type_arguments: None,
            arguments: &arguments,
        };
        let expr = Expression::CallExpression(&call);
        assert_eq!(print_expression(&expr, Some(source)), "f(\"x\")");

        // Without the rewrite flag the original text is copied.
        let original = CallExpression {
            data: NodeData::new(SyntaxKind::CallExpression, 0, 12),
            ..call.clone()
        };
        let expr = Expression::CallExpression(&original);
        assert_eq!(print_expression(&expr, Some(source)), source);
    }

    #[test]
    fn test_array_of_strings() {
        let a = StringLiteral {
            data: synthesized(SyntaxKind::StringLiteral),
            text: "console",
            is_single_quote: false,
        };
        let b = StringLiteral { text: "log", ..a.clone() };
        let elements = [Expression::StringLiteral(&a), Expression::StringLiteral(&b)];
        let array = ArrayLiteralExpression {
            data: synthesized(SyntaxKind::ArrayLiteralExpression),
            elements: &elements,
        };
        let expr = Expression::ArrayLiteralExpression(&array);
        assert_eq!(print_expression(&expr, None), "[\"console\", \"log\"]");
    }
}
