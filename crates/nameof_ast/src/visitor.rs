//! AST visitor trait for traversing the syntax tree.
//!
//! `AstVisitor` methods default to walking into children through the
//! `walk_*` functions, so an implementation can intercept one node kind
//! and still delegate the rest of the traversal.

use crate::node::*;

/// A visitor over arena-allocated nodes. Default implementations walk
/// into children.
pub trait AstVisitor<'a> {
    fn visit_source_file(&mut self, node: &'a SourceFile<'a>) {
        for stmt in node.statements.iter() {
            self.visit_statement(stmt);
        }
    }

    fn visit_statement(&mut self, stmt: &'a Statement<'a>) {
        walk_statement(self, stmt);
    }

    fn visit_block(&mut self, node: &'a Block<'a>) {
        for stmt in node.statements.iter() {
            self.visit_statement(stmt);
        }
    }

    fn visit_variable_declaration_list(&mut self, node: &'a VariableDeclarationList<'a>) {
        for decl in node.declarations.iter() {
            self.visit_variable_declaration(decl);
        }
    }

    fn visit_variable_declaration(&mut self, node: &'a VariableDeclaration<'a>) {
        self.visit_binding_name(&node.name);
        if let Some(ty) = node.type_annotation {
            self.visit_type_node(ty);
        }
        if let Some(init) = node.initializer {
            self.visit_expression(init);
        }
    }

    fn visit_import_declaration(&mut self, _node: &'a ImportDeclaration<'a>) {}

    fn visit_export_declaration(&mut self, _node: &'a ExportDeclaration<'a>) {}

    fn visit_class_declaration(&mut self, node: &'a ClassDeclaration<'a>) {
        for decorator in node.decorators.iter() {
            self.visit_expression(decorator.expression);
        }
        if let Some(type_params) = node.type_parameters {
            for tp in type_params.iter() {
                self.visit_type_parameter(tp);
            }
        }
        for clause in node.heritage_clauses.iter() {
            for ty in clause.types.iter() {
                self.visit_expression(ty.expression);
                if let Some(args) = ty.type_arguments {
                    for arg in args.iter() {
                        self.visit_type_node(arg);
                    }
                }
            }
        }
        for member in node.members.iter() {
            self.visit_class_element(member);
        }
    }

    fn visit_class_element(&mut self, member: &'a ClassElement<'a>) {
        match member {
            ClassElement::PropertyDeclaration(prop) => {
                for decorator in prop.decorators.iter() {
                    self.visit_expression(decorator.expression);
                }
                self.visit_property_name(&prop.name);
                if let Some(ty) = prop.type_annotation {
                    self.visit_type_node(ty);
                }
                if let Some(init) = prop.initializer {
                    self.visit_expression(init);
                }
            }
            ClassElement::MethodDeclaration(method) => self.visit_method_declaration(method),
            ClassElement::IndexSignature(sig) => self.visit_type_element(sig),
            ClassElement::ClassStaticBlockDeclaration(block) => self.visit_block(block),
            ClassElement::SemicolonClassElement(_) => {}
        }
    }

    fn visit_method_declaration(&mut self, node: &'a MethodDeclaration<'a>) {
        for decorator in node.decorators.iter() {
            self.visit_expression(decorator.expression);
        }
        self.visit_property_name(&node.name);
        self.visit_signature(node.type_parameters, node.parameters, node.return_type);
        if let Some(body) = node.body {
            self.visit_block(body);
        }
    }

    fn visit_signature(
        &mut self,
        type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
        parameters: NodeList<'a, ParameterDeclaration<'a>>,
        return_type: OptionalNode<'a, TypeNode<'a>>,
    ) {
        if let Some(type_params) = type_parameters {
            for tp in type_params.iter() {
                self.visit_type_parameter(tp);
            }
        }
        for param in parameters.iter() {
            self.visit_parameter(param);
        }
        if let Some(ret) = return_type {
            self.visit_type_node(ret);
        }
    }

    fn visit_parameter(&mut self, node: &'a ParameterDeclaration<'a>) {
        self.visit_binding_name(&node.name);
        if let Some(ty) = node.type_annotation {
            self.visit_type_node(ty);
        }
        if let Some(init) = node.initializer {
            self.visit_expression(init);
        }
    }

    fn visit_type_parameter(&mut self, node: &'a TypeParameterDeclaration<'a>) {
        if let Some(constraint) = node.constraint {
            self.visit_type_node(constraint);
        }
        if let Some(default) = node.default {
            self.visit_type_node(default);
        }
    }

    fn visit_binding_name(&mut self, name: &'a BindingName<'a>) {
        match name {
            BindingName::Identifier(_) => {}
            BindingName::ObjectBindingPattern(pattern) => {
                for element in pattern.elements.iter() {
                    self.visit_binding_element(element);
                }
            }
            BindingName::ArrayBindingPattern(pattern) => {
                for element in pattern.elements.iter() {
                    if let ArrayBindingElement::BindingElement(element) = element {
                        self.visit_binding_element(element);
                    }
                }
            }
        }
    }

    fn visit_binding_element(&mut self, node: &'a BindingElement<'a>) {
        if let Some(ref property_name) = node.property_name {
            self.visit_property_name(property_name);
        }
        self.visit_binding_name(&node.name);
        if let Some(init) = node.initializer {
            self.visit_expression(init);
        }
    }

    fn visit_property_name(&mut self, name: &'a PropertyName<'a>) {
        if let PropertyName::ComputedPropertyName(computed) = name {
            self.visit_expression(computed.expression);
        }
    }

    fn visit_expression(&mut self, expr: &'a Expression<'a>) {
        walk_expression(self, expr);
    }

    fn visit_type_node(&mut self, ty: &'a TypeNode<'a>) {
        walk_type_node(self, ty);
    }

    fn visit_type_element(&mut self, node: &'a TypeElement<'a>) {
        if let Some(ref name) = node.name {
            self.visit_property_name(name);
        }
        if let Some(type_params) = node.type_parameters {
            for tp in type_params.iter() {
                self.visit_type_parameter(tp);
            }
        }
        if let Some(params) = node.parameters {
            for param in params.iter() {
                self.visit_parameter(param);
            }
        }
        if let Some(ty) = node.type_annotation {
            self.visit_type_node(ty);
        }
    }
}

// ============================================================================
// Default walks
// ============================================================================

pub fn walk_statement<'a, V: AstVisitor<'a> + ?Sized>(visitor: &mut V, stmt: &'a Statement<'a>) {
    match stmt {
        Statement::VariableStatement(n) => visitor.visit_variable_declaration_list(&n.declaration_list),
        Statement::FunctionDeclaration(n) => {
            for decorator in n.decorators.iter() {
                visitor.visit_expression(decorator.expression);
            }
            visitor.visit_signature(n.type_parameters, n.parameters, n.return_type);
            if let Some(body) = n.body {
                visitor.visit_block(body);
            }
        }
        Statement::ClassDeclaration(n) => visitor.visit_class_declaration(n),
        Statement::ModuleDeclaration(n) => {
            if let Some(body) = n.body {
                visitor.visit_block(body);
            }
        }
        Statement::ImportDeclaration(n) => visitor.visit_import_declaration(n),
        Statement::ExportDeclaration(n) => visitor.visit_export_declaration(n),
        Statement::ExportAssignment(n) => visitor.visit_expression(n.expression),
        Statement::Block(n) => visitor.visit_block(n),
        Statement::EmptyStatement(_) => {}
        Statement::ExpressionStatement(n) => visitor.visit_expression(n.expression),
        Statement::IfStatement(n) => {
            visitor.visit_expression(n.expression);
            visitor.visit_statement(n.then_statement);
            if let Some(else_stmt) = n.else_statement {
                visitor.visit_statement(else_stmt);
            }
        }
        Statement::DoStatement(n) => {
            visitor.visit_statement(n.statement);
            visitor.visit_expression(n.expression);
        }
        Statement::WhileStatement(n) => {
            visitor.visit_expression(n.expression);
            visitor.visit_statement(n.statement);
        }
        Statement::ForStatement(n) => {
            if let Some(ref init) = n.initializer {
                walk_for_initializer(visitor, init);
            }
            if let Some(cond) = n.condition {
                visitor.visit_expression(cond);
            }
            if let Some(incr) = n.incrementor {
                visitor.visit_expression(incr);
            }
            visitor.visit_statement(n.statement);
        }
        Statement::ForInStatement(n) | Statement::ForOfStatement(n) => {
            walk_for_initializer(visitor, &n.initializer);
            visitor.visit_expression(n.expression);
            visitor.visit_statement(n.statement);
        }
        Statement::ContinueStatement(_) | Statement::BreakStatement(_) => {}
        Statement::ReturnStatement(n) => {
            if let Some(expr) = n.expression {
                visitor.visit_expression(expr);
            }
        }
        Statement::SwitchStatement(n) => {
            visitor.visit_expression(n.expression);
            for clause in n.clauses.iter() {
                if let Some(expr) = clause.expression {
                    visitor.visit_expression(expr);
                }
                for stmt in clause.statements.iter() {
                    visitor.visit_statement(stmt);
                }
            }
        }
        Statement::LabeledStatement(n) => visitor.visit_statement(n.statement),
        Statement::ThrowStatement(n) => visitor.visit_expression(n.expression),
        Statement::TryStatement(n) => {
            visitor.visit_block(&n.try_block);
            if let Some(ref catch) = n.catch_clause {
                if let Some(ref decl) = catch.variable_declaration {
                    visitor.visit_variable_declaration(decl);
                }
                visitor.visit_block(&catch.block);
            }
            if let Some(ref finally) = n.finally_block {
                visitor.visit_block(finally);
            }
        }
        Statement::DebuggerStatement(_) | Statement::SkippedStatement(_) => {}
    }
}

fn walk_for_initializer<'a, V: AstVisitor<'a> + ?Sized>(visitor: &mut V, init: &'a ForInitializer<'a>) {
    match init {
        ForInitializer::VariableDeclarationList(list) => visitor.visit_variable_declaration_list(list),
        ForInitializer::Expression(expr) => visitor.visit_expression(expr),
    }
}

pub fn walk_expression<'a, V: AstVisitor<'a> + ?Sized>(visitor: &mut V, expr: &'a Expression<'a>) {
    match expr {
        Expression::TemplateExpression(n) => {
            for span in n.template_spans.iter() {
                visitor.visit_expression(span.expression);
            }
        }
        Expression::TaggedTemplateExpression(n) => {
            visitor.visit_expression(n.tag);
            walk_type_arguments(visitor, n.type_arguments);
            visitor.visit_expression(n.template);
        }
        Expression::ArrayLiteralExpression(n) => {
            for element in n.elements.iter() {
                visitor.visit_expression(element);
            }
        }
        Expression::ObjectLiteralExpression(n) => {
            for property in n.properties.iter() {
                match property {
                    ObjectLiteralElement::PropertyAssignment(prop) => {
                        visitor.visit_property_name(&prop.name);
                        visitor.visit_expression(prop.initializer);
                    }
                    ObjectLiteralElement::ShorthandPropertyAssignment(prop) => {
                        if let Some(init) = prop.object_assignment_initializer {
                            visitor.visit_expression(init);
                        }
                    }
                    ObjectLiteralElement::SpreadAssignment(spread) => {
                        visitor.visit_expression(spread.expression);
                    }
                    ObjectLiteralElement::MethodDeclaration(method) => {
                        visitor.visit_method_declaration(method);
                    }
                }
            }
        }
        Expression::PropertyAccessExpression(n) => visitor.visit_expression(n.expression),
        Expression::ElementAccessExpression(n) => {
            visitor.visit_expression(n.expression);
            visitor.visit_expression(n.argument_expression);
        }
        Expression::CallExpression(n) => {
            visitor.visit_expression(n.expression);
            walk_type_arguments(visitor, n.type_arguments);
            for arg in n.arguments.iter() {
                visitor.visit_expression(arg);
            }
        }
        Expression::NewExpression(n) => {
            visitor.visit_expression(n.expression);
            walk_type_arguments(visitor, n.type_arguments);
            if let Some(args) = n.arguments {
                for arg in args.iter() {
                    visitor.visit_expression(arg);
                }
            }
        }
        Expression::ParenthesizedExpression(n) => visitor.visit_expression(n.expression),
        Expression::FunctionExpression(n) => {
            visitor.visit_signature(n.type_parameters, n.parameters, n.return_type);
            visitor.visit_block(&n.body);
        }
        Expression::ArrowFunction(n) => {
            visitor.visit_signature(n.type_parameters, n.parameters, n.return_type);
            match n.body {
                ArrowFunctionBody::Block(block) => visitor.visit_block(block),
                ArrowFunctionBody::Expression(body) => visitor.visit_expression(body),
            }
        }
        Expression::ClassExpression(n) => visitor.visit_class_declaration(n),
        Expression::PrefixUnaryExpression(n) => visitor.visit_expression(n.operand),
        Expression::PostfixUnaryExpression(n) => visitor.visit_expression(n.operand),
        Expression::BinaryExpression(n) => {
            visitor.visit_expression(n.left);
            visitor.visit_expression(n.right);
        }
        Expression::ConditionalExpression(n) => {
            visitor.visit_expression(n.condition);
            visitor.visit_expression(n.when_true);
            visitor.visit_expression(n.when_false);
        }
        Expression::YieldExpression(n) => {
            if let Some(expr) = n.expression {
                visitor.visit_expression(expr);
            }
        }
        Expression::SpreadElement(n) => visitor.visit_expression(n.expression),
        Expression::AsExpression(n) | Expression::SatisfiesExpression(n) => {
            visitor.visit_expression(n.expression);
            visitor.visit_type_node(n.type_node);
        }
        Expression::NonNullExpression(n) => visitor.visit_expression(n.expression),
        Expression::Identifier(_)
        | Expression::PrivateIdentifier(_)
        | Expression::StringLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::RegularExpressionLiteral(_)
        | Expression::NoSubstitutionTemplateLiteral(_)
        | Expression::ThisKeyword(_)
        | Expression::SuperKeyword(_)
        | Expression::NullKeyword(_)
        | Expression::TrueKeyword(_)
        | Expression::FalseKeyword(_)
        | Expression::OmittedExpression(_) => {}
    }
}

fn walk_type_arguments<'a, V: AstVisitor<'a> + ?Sized>(
    visitor: &mut V,
    type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
) {
    if let Some(args) = type_arguments {
        for arg in args.iter() {
            visitor.visit_type_node(arg);
        }
    }
}

pub fn walk_type_node<'a, V: AstVisitor<'a> + ?Sized>(visitor: &mut V, ty: &'a TypeNode<'a>) {
    match ty {
        TypeNode::TypeReference(n) => walk_type_arguments(visitor, n.type_arguments),
        TypeNode::FunctionType(n) | TypeNode::ConstructorType(n) => {
            visitor.visit_signature(n.type_parameters, n.parameters, Some(n.return_type));
        }
        TypeNode::TypeQuery(n) => walk_type_arguments(visitor, n.type_arguments),
        TypeNode::TypeLiteral(n) => {
            for member in n.members.iter() {
                visitor.visit_type_element(member);
            }
        }
        TypeNode::ArrayType(n) => visitor.visit_type_node(n.element_type),
        TypeNode::TupleType(n) => {
            for element in n.elements.iter() {
                visitor.visit_type_node(element);
            }
        }
        TypeNode::OptionalType(n) | TypeNode::RestType(n) | TypeNode::ParenthesizedType(n) => {
            visitor.visit_type_node(n.type_node);
        }
        TypeNode::UnionType(n) | TypeNode::IntersectionType(n) => {
            for member in n.types.iter() {
                visitor.visit_type_node(member);
            }
        }
        TypeNode::TypeOperator(n) => visitor.visit_type_node(n.type_node),
        TypeNode::IndexedAccessType(n) => {
            visitor.visit_type_node(n.object_type);
            visitor.visit_type_node(n.index_type);
        }
        TypeNode::LiteralType(n) => visitor.visit_expression(n.literal),
        TypeNode::ImportType(n) => {
            visitor.visit_type_node(n.argument);
            walk_type_arguments(visitor, n.type_arguments);
        }
        TypeNode::KeywordType(_) | TypeNode::ThisType(_) | TypeNode::SkippedType(_) => {}
    }
}
