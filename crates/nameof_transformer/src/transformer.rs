//! Post-order rewrite of a source file through the engine.
//!
//! Children are visited before their parent. When a child is replaced, the
//! parent is copied with the new child under a fresh id and the
//! [`NodeFlags::REWRITTEN`] flag, so an enclosing `nameof` call sees the
//! generated literal instead of the original call. Every expression is then
//! offered to the engine, and each replacement is recorded against the
//! original text range.

use std::ptr;

use bumpalo::Bump;
use nameof_ast::*;
use nameof_core::TextRange;
use nameof_diagnostics::DiagnosticCollection;
use nameof_engine::{NameofEngine, TransformContext};
use nameof_options::NameofOptions;
use nameof_printer::Printer;
use rustc_hash::FxHashSet;

use crate::factory::NodeFactory;
use crate::host::{AstHost, FileContext, HostNode};
use crate::macro_import::find_macro_imports;
use crate::sink::DiagnosticSink;

/// Text to put in place of `range` of the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub range: TextRange,
    pub text: String,
}

/// Result of transforming one source file.
#[derive(Debug)]
pub struct TransformOutput<'a> {
    /// The rebuilt file; the input itself when nothing changed.
    pub source_file: &'a SourceFile<'a>,
    /// In visit order. Replacements of nested calls are included along with
    /// the replacement of their enclosing call.
    pub replacements: Vec<Replacement>,
    pub diagnostics: DiagnosticCollection,
    /// Number of calls the engine resolved.
    pub transformed_calls: usize,
    /// The marker used for this file.
    pub nameof_name: String,
}

impl TransformOutput<'_> {
    pub fn has_changes(&self) -> bool {
        !self.replacements.is_empty()
    }
}

/// Transform every `nameof` call in `source_file`.
///
/// An import from one of the configured macro modules sets the marker for
/// this file and is removed.
pub fn transform_source_file<'a>(
    arena: &'a Bump,
    source_file: &'a SourceFile<'a>,
    options: &NameofOptions,
) -> TransformOutput<'a> {
    let macro_imports = find_macro_imports(source_file, &options.macro_modules);
    let nameof_name = match macro_imports.first() {
        Some(import) => {
            if macro_imports.len() > 1 {
                log::warn!(
                    "{}: {} macro imports found, using `{}` as the marker",
                    source_file.file_name,
                    macro_imports.len(),
                    import.alias
                );
            }
            import.alias.to_string()
        }
        None => options.nameof_name.clone(),
    };

    let context = FileContext::new(source_file.file_name, source_file.text, nameof_name);
    let host = AstHost::new(NodeFactory::for_source_file(arena, source_file));
    let mut transformer = NameofTransformer::new(host, &context);
    for import in &macro_imports {
        transformer.remove_statement(import.declaration.data.id, import.declaration.data.range);
    }
    let rewritten = transformer.transform_source_file(source_file);
    transformer.finish(rewritten)
}

pub struct NameofTransformer<'a, 'c> {
    engine: NameofEngine<AstHost<'a>, DiagnosticSink>,
    context: TransformContext<'c, AstHost<'a>>,
    file: &'c FileContext<'a>,
    replacements: Vec<Replacement>,
    removed_statements: FxHashSet<NodeId>,
    transformed_calls: usize,
}

impl<'a, 'c> NameofTransformer<'a, 'c> {
    pub fn new(host: AstHost<'a>, file: &'c FileContext<'a>) -> Self {
        Self {
            engine: NameofEngine::new(host, DiagnosticSink::new()),
            context: TransformContext::new(file),
            file,
            replacements: Vec::new(),
            removed_statements: FxHashSet::default(),
            transformed_calls: 0,
        }
    }

    /// Drop the top-level statement `id`, together with the line break that
    /// ends it.
    pub fn remove_statement(&mut self, id: NodeId, range: TextRange) {
        self.removed_statements.insert(id);
        let rest = &self.file.text[(range.end as usize).min(self.file.text.len())..];
        let line_break = if rest.starts_with("\r\n") {
            2
        } else if rest.starts_with('\n') {
            1
        } else {
            0
        };
        self.replacements.push(Replacement {
            range: TextRange::new(range.pos, range.end + line_break),
            text: String::new(),
        });
    }

    pub fn transform_source_file(&mut self, file: &'a SourceFile<'a>) -> &'a SourceFile<'a> {
        let kept = if self.removed_statements.is_empty() {
            None
        } else {
            let statements: Vec<Statement<'a>> = file
                .statements
                .iter()
                .filter(|statement| !self.removed_statements.contains(&statement.data().id))
                .cloned()
                .collect();
            Some(self.factory().alloc_list(statements))
        };
        let base = kept.unwrap_or(file.statements);
        let statements = self.visit_list(base, Self::visit_statement);
        if kept.is_none() && statements.is_none() {
            return file;
        }
        let data = self.rewritten(&file.data);
        self.alloc(SourceFile {
            data,
            statements: statements.unwrap_or(base),
            ..file.clone()
        })
    }

    /// Report interpolations no `full` call consumed and collect the output.
    pub fn finish(self, source_file: &'a SourceFile<'a>) -> TransformOutput<'a> {
        let NameofTransformer {
            mut engine,
            context,
            file,
            replacements,
            transformed_calls,
            ..
        } = self;
        engine.finish(context);
        TransformOutput {
            source_file,
            replacements,
            diagnostics: engine.into_sink().into_diagnostics(),
            transformed_calls,
            nameof_name: file.nameof_name().to_string(),
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    #[inline]
    fn factory(&self) -> &NodeFactory<'a> {
        self.engine.host().factory()
    }

    #[inline]
    fn alloc<T>(&self, value: T) -> &'a T {
        self.factory().alloc(value)
    }

    #[inline]
    fn rewritten(&self, data: &NodeData) -> NodeData {
        self.factory().rewritten(data)
    }

    /// Visit each item; `None` when no item changed.
    fn visit_list<T: Clone>(
        &mut self,
        list: &'a [T],
        mut visit: impl FnMut(&mut Self, &'a T) -> Option<T>,
    ) -> Option<&'a [T]> {
        let mut rebuilt: Option<Vec<T>> = None;
        for (i, item) in list.iter().enumerate() {
            match visit(self, item) {
                Some(new) => rebuilt.get_or_insert_with(|| list[..i].to_vec()).push(new),
                None => {
                    if let Some(items) = rebuilt.as_mut() {
                        items.push(item.clone());
                    }
                }
            }
        }
        rebuilt.map(|items| self.factory().alloc_list(items))
    }

    fn record_replacement(&mut self, range: TextRange, generated: &'a Expression<'a>) {
        self.transformed_calls += 1;
        self.factory().record_origin(generated.id(), range);
        if range.is_synthesized() {
            return;
        }
        let text = Printer::with_source(self.file.text).expression_to_string(generated);
        log::trace!("{}: {:?} -> {}", self.file.file_name, range, text);
        self.replacements.push(Replacement { range, text });
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Visit `expr` and its children. Returns the replacement or rebuilt
    /// node, or `None` when it is unchanged.
    pub fn visit_expression(&mut self, expr: &'a Expression<'a>) -> Option<&'a Expression<'a>> {
        let rebuilt = self.rebuild_expression(expr);
        let current = rebuilt.unwrap_or(expr);
        match self.engine.transform(HostNode::Expression(current), &mut self.context) {
            HostNode::Expression(generated) if !ptr::eq(generated, current) => {
                self.record_replacement(expr.range(), generated);
                Some(generated)
            }
            HostNode::Expression(_) => rebuilt,
            other => {
                log::warn!("expression {} was replaced by a non-expression node {}", current.id(), other.id());
                rebuilt
            }
        }
    }

    fn visit_expression_value(&mut self, expr: &'a Expression<'a>) -> Option<Expression<'a>> {
        self.visit_expression(expr).cloned()
    }

    fn visit_optional_expression(&mut self, expr: Option<&'a Expression<'a>>) -> Option<&'a Expression<'a>> {
        expr.and_then(|expr| self.visit_expression(expr))
    }

    fn rebuild_expression(&mut self, expr: &'a Expression<'a>) -> Option<&'a Expression<'a>> {
        let rebuilt = match *expr {
            Expression::TemplateExpression(n) => {
                let template_spans = self.visit_list(n.template_spans, |this, span| {
                    let expression = this.visit_expression(span.expression)?;
                    Some(TemplateSpan {
                        data: this.rewritten(&span.data),
                        expression,
                        literal: span.literal.clone(),
                    })
                })?;
                Expression::TemplateExpression(self.alloc(TemplateExpression {
                    data: self.rewritten(&n.data),
                    head: n.head.clone(),
                    template_spans,
                }))
            }
            Expression::TaggedTemplateExpression(n) => {
                let tag = self.visit_expression(n.tag);
                let template = self.visit_expression(n.template);
                if tag.is_none() && template.is_none() {
                    return None;
                }
                Expression::TaggedTemplateExpression(self.alloc(TaggedTemplateExpression {
                    data: self.rewritten(&n.data),
                    tag: tag.unwrap_or(n.tag),
                    template: template.unwrap_or(n.template),
                    ..n.clone()
                }))
            }
            Expression::ArrayLiteralExpression(n) => {
                let elements = self.visit_list(n.elements, Self::visit_expression_value)?;
                Expression::ArrayLiteralExpression(self.alloc(ArrayLiteralExpression {
                    data: self.rewritten(&n.data),
                    elements,
                }))
            }
            Expression::ObjectLiteralExpression(n) => {
                let properties = self.visit_list(n.properties, Self::visit_object_element)?;
                Expression::ObjectLiteralExpression(self.alloc(ObjectLiteralExpression {
                    data: self.rewritten(&n.data),
                    properties,
                }))
            }
            Expression::PropertyAccessExpression(n) => {
                let expression = self.visit_expression(n.expression)?;
                Expression::PropertyAccessExpression(self.alloc(PropertyAccessExpression {
                    data: self.rewritten(&n.data),
                    expression,
                    ..n.clone()
                }))
            }
            Expression::ElementAccessExpression(n) => {
                let expression = self.visit_expression(n.expression);
                let argument_expression = self.visit_expression(n.argument_expression);
                if expression.is_none() && argument_expression.is_none() {
                    return None;
                }
                Expression::ElementAccessExpression(self.alloc(ElementAccessExpression {
                    data: self.rewritten(&n.data),
                    expression: expression.unwrap_or(n.expression),
                    argument_expression: argument_expression.unwrap_or(n.argument_expression),
                    ..n.clone()
                }))
            }
            Expression::CallExpression(n) => {
                let expression = self.visit_expression(n.expression);
                let arguments = self.visit_list(n.arguments, Self::visit_expression_value);
                if expression.is_none() && arguments.is_none() {
                    return None;
                }
                Expression::CallExpression(self.alloc(CallExpression {
                    data: self.rewritten(&n.data),
                    expression: expression.unwrap_or(n.expression),
                    arguments: arguments.unwrap_or(n.arguments),
                    ..n.clone()
                }))
            }
            Expression::NewExpression(n) => {
                let expression = self.visit_expression(n.expression);
                let arguments = n
                    .arguments
                    .and_then(|arguments| self.visit_list(arguments, Self::visit_expression_value));
                if expression.is_none() && arguments.is_none() {
                    return None;
                }
                Expression::NewExpression(self.alloc(NewExpression {
                    data: self.rewritten(&n.data),
                    expression: expression.unwrap_or(n.expression),
                    arguments: arguments.or(n.arguments),
                    ..n.clone()
                }))
            }
            Expression::ParenthesizedExpression(n) => {
                let expression = self.visit_expression(n.expression)?;
                Expression::ParenthesizedExpression(self.alloc(ParenthesizedExpression {
                    data: self.rewritten(&n.data),
                    expression,
                }))
            }
            Expression::FunctionExpression(n) => {
                let parameters = self.visit_list(n.parameters, Self::visit_parameter);
                let body = self.visit_block(&n.body);
                if parameters.is_none() && body.is_none() {
                    return None;
                }
                Expression::FunctionExpression(self.alloc(FunctionExpression {
                    data: self.rewritten(&n.data),
                    parameters: parameters.unwrap_or(n.parameters),
                    body: body.unwrap_or_else(|| n.body.clone()),
                    ..n.clone()
                }))
            }
            Expression::ArrowFunction(n) => {
                let parameters = self.visit_list(n.parameters, Self::visit_parameter);
                let body = match n.body {
                    ArrowFunctionBody::Block(block) => self
                        .visit_block(block)
                        .map(|block| ArrowFunctionBody::Block(self.alloc(block))),
                    ArrowFunctionBody::Expression(expr) => self.visit_expression(expr).map(ArrowFunctionBody::Expression),
                };
                if parameters.is_none() && body.is_none() {
                    return None;
                }
                Expression::ArrowFunction(self.alloc(ArrowFunction {
                    data: self.rewritten(&n.data),
                    parameters: parameters.unwrap_or(n.parameters),
                    body: body.unwrap_or_else(|| n.body.clone()),
                    ..n.clone()
                }))
            }
            Expression::ClassExpression(n) => Expression::ClassExpression(self.visit_class(n)?),
            Expression::PrefixUnaryExpression(n) => {
                let operand = self.visit_expression(n.operand)?;
                Expression::PrefixUnaryExpression(self.alloc(PrefixUnaryExpression {
                    data: self.rewritten(&n.data),
                    operand,
                    ..n.clone()
                }))
            }
            Expression::PostfixUnaryExpression(n) => {
                let operand = self.visit_expression(n.operand)?;
                Expression::PostfixUnaryExpression(self.alloc(PostfixUnaryExpression {
                    data: self.rewritten(&n.data),
                    operand,
                    ..n.clone()
                }))
            }
            Expression::BinaryExpression(n) => {
                let left = self.visit_expression(n.left);
                let right = self.visit_expression(n.right);
                if left.is_none() && right.is_none() {
                    return None;
                }
                Expression::BinaryExpression(self.alloc(BinaryExpression {
                    data: self.rewritten(&n.data),
                    left: left.unwrap_or(n.left),
                    right: right.unwrap_or(n.right),
                    ..n.clone()
                }))
            }
            Expression::ConditionalExpression(n) => {
                let condition = self.visit_expression(n.condition);
                let when_true = self.visit_expression(n.when_true);
                let when_false = self.visit_expression(n.when_false);
                if condition.is_none() && when_true.is_none() && when_false.is_none() {
                    return None;
                }
                Expression::ConditionalExpression(self.alloc(ConditionalExpression {
                    data: self.rewritten(&n.data),
                    condition: condition.unwrap_or(n.condition),
                    when_true: when_true.unwrap_or(n.when_true),
                    when_false: when_false.unwrap_or(n.when_false),
                }))
            }
            Expression::YieldExpression(n) => {
                let expression = self.visit_optional_expression(n.expression)?;
                Expression::YieldExpression(self.alloc(YieldExpression {
                    data: self.rewritten(&n.data),
                    expression: Some(expression),
                    ..n.clone()
                }))
            }
            Expression::SpreadElement(n) => Expression::SpreadElement(self.visit_spread(n)?),
            Expression::AsExpression(n) => Expression::AsExpression(self.visit_as(n)?),
            Expression::SatisfiesExpression(n) => Expression::SatisfiesExpression(self.visit_as(n)?),
            Expression::NonNullExpression(n) => {
                let expression = self.visit_expression(n.expression)?;
                Expression::NonNullExpression(self.alloc(NonNullExpression {
                    data: self.rewritten(&n.data),
                    expression,
                }))
            }
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
            | Expression::OmittedExpression(_) => return None,
        };
        Some(self.alloc(rebuilt))
    }

    fn visit_spread(&mut self, n: &'a SpreadElement<'a>) -> Option<&'a SpreadElement<'a>> {
        let expression = self.visit_expression(n.expression)?;
        Some(self.alloc(SpreadElement {
            data: self.rewritten(&n.data),
            expression,
        }))
    }

    fn visit_as(&mut self, n: &'a AsExpression<'a>) -> Option<&'a AsExpression<'a>> {
        let expression = self.visit_expression(n.expression)?;
        Some(self.alloc(AsExpression {
            data: self.rewritten(&n.data),
            expression,
            type_node: n.type_node,
        }))
    }

    fn visit_object_element(&mut self, element: &'a ObjectLiteralElement<'a>) -> Option<ObjectLiteralElement<'a>> {
        match *element {
            ObjectLiteralElement::PropertyAssignment(n) => {
                let name = self.visit_property_name(&n.name);
                let initializer = self.visit_expression(n.initializer);
                if name.is_none() && initializer.is_none() {
                    return None;
                }
                Some(ObjectLiteralElement::PropertyAssignment(self.alloc(PropertyAssignment {
                    data: self.rewritten(&n.data),
                    name: name.unwrap_or_else(|| n.name.clone()),
                    initializer: initializer.unwrap_or(n.initializer),
                })))
            }
            ObjectLiteralElement::ShorthandPropertyAssignment(n) => {
                let initializer = self.visit_optional_expression(n.object_assignment_initializer)?;
                Some(ObjectLiteralElement::ShorthandPropertyAssignment(self.alloc(
                    ShorthandPropertyAssignment {
                        data: self.rewritten(&n.data),
                        name: n.name.clone(),
                        object_assignment_initializer: Some(initializer),
                    },
                )))
            }
            ObjectLiteralElement::SpreadAssignment(n) => {
                self.visit_spread(n).map(ObjectLiteralElement::SpreadAssignment)
            }
            ObjectLiteralElement::MethodDeclaration(n) => {
                self.visit_method(n).map(ObjectLiteralElement::MethodDeclaration)
            }
        }
    }

    fn visit_property_name(&mut self, name: &'a PropertyName<'a>) -> Option<PropertyName<'a>> {
        match *name {
            PropertyName::ComputedPropertyName(n) => {
                let expression = self.visit_expression(n.expression)?;
                Some(PropertyName::ComputedPropertyName(self.alloc(ComputedPropertyName {
                    data: self.rewritten(&n.data),
                    expression,
                })))
            }
            _ => None,
        }
    }

    // ========================================================================
    // Bindings and signatures
    // ========================================================================

    fn visit_parameter(&mut self, n: &'a ParameterDeclaration<'a>) -> Option<ParameterDeclaration<'a>> {
        let name = self.visit_binding_name(&n.name);
        let initializer = self.visit_optional_expression(n.initializer);
        if name.is_none() && initializer.is_none() {
            return None;
        }
        Some(ParameterDeclaration {
            data: self.rewritten(&n.data),
            name: name.unwrap_or_else(|| n.name.clone()),
            initializer: initializer.or(n.initializer),
            ..n.clone()
        })
    }

    fn visit_binding_name(&mut self, name: &'a BindingName<'a>) -> Option<BindingName<'a>> {
        match *name {
            BindingName::Identifier(_) => None,
            BindingName::ObjectBindingPattern(n) => {
                let elements = self.visit_list(n.elements, Self::visit_binding_element)?;
                Some(BindingName::ObjectBindingPattern(self.alloc(ObjectBindingPattern {
                    data: self.rewritten(&n.data),
                    elements,
                })))
            }
            BindingName::ArrayBindingPattern(n) => {
                let elements = self.visit_list(n.elements, |this, element| match *element {
                    ArrayBindingElement::BindingElement(element) => this
                        .visit_binding_element(element)
                        .map(|element| ArrayBindingElement::BindingElement(this.alloc(element))),
                    ArrayBindingElement::OmittedExpression(_) => None,
                })?;
                Some(BindingName::ArrayBindingPattern(self.alloc(ArrayBindingPattern {
                    data: self.rewritten(&n.data),
                    elements,
                })))
            }
        }
    }

    fn visit_binding_element(&mut self, n: &'a BindingElement<'a>) -> Option<BindingElement<'a>> {
        let property_name = n.property_name.as_ref().and_then(|name| self.visit_property_name(name));
        let name = self.visit_binding_name(&n.name);
        let initializer = self.visit_optional_expression(n.initializer);
        if property_name.is_none() && name.is_none() && initializer.is_none() {
            return None;
        }
        Some(BindingElement {
            data: self.rewritten(&n.data),
            dot_dot_dot_token: n.dot_dot_dot_token,
            property_name: property_name.or_else(|| n.property_name.clone()),
            name: name.unwrap_or_else(|| n.name.clone()),
            initializer: initializer.or(n.initializer),
        })
    }

    fn visit_decorator(&mut self, n: &'a Decorator<'a>) -> Option<Decorator<'a>> {
        let expression = self.visit_expression(n.expression)?;
        Some(Decorator {
            data: self.rewritten(&n.data),
            expression,
        })
    }

    // ========================================================================
    // Classes
    // ========================================================================

    fn visit_class(&mut self, n: &'a ClassDeclaration<'a>) -> Option<&'a ClassDeclaration<'a>> {
        let decorators = self.visit_list(n.decorators, Self::visit_decorator);
        let heritage_clauses = self.visit_list(n.heritage_clauses, |this, clause| {
            let types = this.visit_list(clause.types, |this, ty| {
                let expression = this.visit_expression(ty.expression)?;
                Some(ExpressionWithTypeArguments {
                    data: this.rewritten(&ty.data),
                    expression,
                    type_arguments: ty.type_arguments,
                })
            })?;
            Some(HeritageClause {
                data: this.rewritten(&clause.data),
                token: clause.token,
                types,
            })
        });
        let members = self.visit_list(n.members, Self::visit_class_element);
        if decorators.is_none() && heritage_clauses.is_none() && members.is_none() {
            return None;
        }
        Some(self.alloc(ClassDeclaration {
            data: self.rewritten(&n.data),
            decorators: decorators.unwrap_or(n.decorators),
            heritage_clauses: heritage_clauses.unwrap_or(n.heritage_clauses),
            members: members.unwrap_or(n.members),
            ..n.clone()
        }))
    }

    fn visit_class_element(&mut self, member: &'a ClassElement<'a>) -> Option<ClassElement<'a>> {
        match *member {
            ClassElement::PropertyDeclaration(n) => {
                let decorators = self.visit_list(n.decorators, Self::visit_decorator);
                let name = self.visit_property_name(&n.name);
                let initializer = self.visit_optional_expression(n.initializer);
                if decorators.is_none() && name.is_none() && initializer.is_none() {
                    return None;
                }
                Some(ClassElement::PropertyDeclaration(self.alloc(PropertyDeclaration {
                    data: self.rewritten(&n.data),
                    decorators: decorators.unwrap_or(n.decorators),
                    name: name.unwrap_or_else(|| n.name.clone()),
                    initializer: initializer.or(n.initializer),
                    ..n.clone()
                })))
            }
            ClassElement::MethodDeclaration(n) => self.visit_method(n).map(ClassElement::MethodDeclaration),
            ClassElement::ClassStaticBlockDeclaration(block) => self
                .visit_block(block)
                .map(|block| ClassElement::ClassStaticBlockDeclaration(self.alloc(block))),
            ClassElement::IndexSignature(_) | ClassElement::SemicolonClassElement(_) => None,
        }
    }

    fn visit_method(&mut self, n: &'a MethodDeclaration<'a>) -> Option<&'a MethodDeclaration<'a>> {
        let decorators = self.visit_list(n.decorators, Self::visit_decorator);
        let name = self.visit_property_name(&n.name);
        let parameters = self.visit_list(n.parameters, Self::visit_parameter);
        let body = n.body.and_then(|body| self.visit_block(body));
        if decorators.is_none() && name.is_none() && parameters.is_none() && body.is_none() {
            return None;
        }
        Some(self.alloc(MethodDeclaration {
            data: self.rewritten(&n.data),
            decorators: decorators.unwrap_or(n.decorators),
            name: name.unwrap_or_else(|| n.name.clone()),
            parameters: parameters.unwrap_or(n.parameters),
            body: body.map(|body| self.alloc(body)).or(n.body),
            ..n.clone()
        }))
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn visit_statement(&mut self, stmt: &'a Statement<'a>) -> Option<Statement<'a>> {
        Some(match *stmt {
            Statement::VariableStatement(n) => {
                let declaration_list = self.visit_declaration_list(&n.declaration_list)?;
                Statement::VariableStatement(self.alloc(VariableStatement {
                    data: self.rewritten(&n.data),
                    declaration_list,
                }))
            }
            Statement::FunctionDeclaration(n) => {
                let decorators = self.visit_list(n.decorators, Self::visit_decorator);
                let parameters = self.visit_list(n.parameters, Self::visit_parameter);
                let body = n.body.and_then(|body| self.visit_block(body));
                if decorators.is_none() && parameters.is_none() && body.is_none() {
                    return None;
                }
                Statement::FunctionDeclaration(self.alloc(FunctionDeclaration {
                    data: self.rewritten(&n.data),
                    decorators: decorators.unwrap_or(n.decorators),
                    parameters: parameters.unwrap_or(n.parameters),
                    body: body.map(|body| self.alloc(body)).or(n.body),
                    ..n.clone()
                }))
            }
            Statement::ClassDeclaration(n) => Statement::ClassDeclaration(self.visit_class(n)?),
            Statement::ModuleDeclaration(n) => {
                let body = n.body.and_then(|body| self.visit_block(body))?;
                Statement::ModuleDeclaration(self.alloc(ModuleDeclaration {
                    data: self.rewritten(&n.data),
                    name: n.name,
                    body: Some(self.alloc(body)),
                }))
            }
            Statement::ExportAssignment(n) => {
                let expression = self.visit_expression(n.expression)?;
                Statement::ExportAssignment(self.alloc(ExportAssignment {
                    data: self.rewritten(&n.data),
                    is_export_equals: n.is_export_equals,
                    expression,
                }))
            }
            Statement::Block(n) => {
                let block = self.visit_block(n)?;
                Statement::Block(self.alloc(block))
            }
            Statement::ExpressionStatement(n) => {
                let expression = self.visit_expression(n.expression)?;
                Statement::ExpressionStatement(self.alloc(ExpressionStatement {
                    data: self.rewritten(&n.data),
                    expression,
                }))
            }
            Statement::IfStatement(n) => {
                let expression = self.visit_expression(n.expression);
                let then_statement = self.visit_statement_ref(n.then_statement);
                let else_statement = n.else_statement.and_then(|stmt| self.visit_statement_ref(stmt));
                if expression.is_none() && then_statement.is_none() && else_statement.is_none() {
                    return None;
                }
                Statement::IfStatement(self.alloc(IfStatement {
                    data: self.rewritten(&n.data),
                    expression: expression.unwrap_or(n.expression),
                    then_statement: then_statement.unwrap_or(n.then_statement),
                    else_statement: else_statement.or(n.else_statement),
                }))
            }
            Statement::DoStatement(n) => {
                let statement = self.visit_statement_ref(n.statement);
                let expression = self.visit_expression(n.expression);
                if statement.is_none() && expression.is_none() {
                    return None;
                }
                Statement::DoStatement(self.alloc(DoStatement {
                    data: self.rewritten(&n.data),
                    statement: statement.unwrap_or(n.statement),
                    expression: expression.unwrap_or(n.expression),
                }))
            }
            Statement::WhileStatement(n) => {
                let expression = self.visit_expression(n.expression);
                let statement = self.visit_statement_ref(n.statement);
                if expression.is_none() && statement.is_none() {
                    return None;
                }
                Statement::WhileStatement(self.alloc(WhileStatement {
                    data: self.rewritten(&n.data),
                    expression: expression.unwrap_or(n.expression),
                    statement: statement.unwrap_or(n.statement),
                }))
            }
            Statement::ForStatement(n) => {
                let initializer = n
                    .initializer
                    .as_ref()
                    .and_then(|initializer| self.visit_for_initializer(initializer));
                let condition = self.visit_optional_expression(n.condition);
                let incrementor = self.visit_optional_expression(n.incrementor);
                let statement = self.visit_statement_ref(n.statement);
                if initializer.is_none() && condition.is_none() && incrementor.is_none() && statement.is_none() {
                    return None;
                }
                Statement::ForStatement(self.alloc(ForStatement {
                    data: self.rewritten(&n.data),
                    initializer: initializer.or_else(|| n.initializer.clone()),
                    condition: condition.or(n.condition),
                    incrementor: incrementor.or(n.incrementor),
                    statement: statement.unwrap_or(n.statement),
                }))
            }
            Statement::ForInStatement(n) => Statement::ForInStatement(self.visit_for_in_or_of(n)?),
            Statement::ForOfStatement(n) => Statement::ForOfStatement(self.visit_for_in_or_of(n)?),
            Statement::ReturnStatement(n) => {
                let expression = self.visit_optional_expression(n.expression)?;
                Statement::ReturnStatement(self.alloc(ReturnStatement {
                    data: self.rewritten(&n.data),
                    expression: Some(expression),
                }))
            }
            Statement::SwitchStatement(n) => {
                let expression = self.visit_expression(n.expression);
                let clauses = self.visit_list(n.clauses, |this, clause| {
                    let expression = this.visit_optional_expression(clause.expression);
                    let statements = this.visit_list(clause.statements, Self::visit_statement);
                    if expression.is_none() && statements.is_none() {
                        return None;
                    }
                    Some(CaseOrDefaultClause {
                        data: this.rewritten(&clause.data),
                        expression: expression.or(clause.expression),
                        statements: statements.unwrap_or(clause.statements),
                    })
                });
                if expression.is_none() && clauses.is_none() {
                    return None;
                }
                Statement::SwitchStatement(self.alloc(SwitchStatement {
                    data: self.rewritten(&n.data),
                    expression: expression.unwrap_or(n.expression),
                    clauses: clauses.unwrap_or(n.clauses),
                }))
            }
            Statement::LabeledStatement(n) => {
                let statement = self.visit_statement_ref(n.statement)?;
                Statement::LabeledStatement(self.alloc(LabeledStatement {
                    data: self.rewritten(&n.data),
                    label: n.label.clone(),
                    statement,
                }))
            }
            Statement::ThrowStatement(n) => {
                let expression = self.visit_expression(n.expression)?;
                Statement::ThrowStatement(self.alloc(ThrowStatement {
                    data: self.rewritten(&n.data),
                    expression,
                }))
            }
            Statement::TryStatement(n) => {
                let try_block = self.visit_block(&n.try_block);
                let catch_clause = n.catch_clause.as_ref().and_then(|clause| self.visit_catch_clause(clause));
                let finally_block = n.finally_block.as_ref().and_then(|block| self.visit_block(block));
                if try_block.is_none() && catch_clause.is_none() && finally_block.is_none() {
                    return None;
                }
                Statement::TryStatement(self.alloc(TryStatement {
                    data: self.rewritten(&n.data),
                    try_block: try_block.unwrap_or_else(|| n.try_block.clone()),
                    catch_clause: catch_clause.or_else(|| n.catch_clause.clone()),
                    finally_block: finally_block.or_else(|| n.finally_block.clone()),
                }))
            }
            Statement::ImportDeclaration(_)
            | Statement::ExportDeclaration(_)
            | Statement::EmptyStatement(_)
            | Statement::ContinueStatement(_)
            | Statement::BreakStatement(_)
            | Statement::DebuggerStatement(_)
            | Statement::SkippedStatement(_) => return None,
        })
    }

    fn visit_statement_ref(&mut self, stmt: &'a Statement<'a>) -> Option<&'a Statement<'a>> {
        self.visit_statement(stmt).map(|stmt| self.alloc(stmt))
    }

    fn visit_block(&mut self, n: &'a Block<'a>) -> Option<Block<'a>> {
        let statements = self.visit_list(n.statements, Self::visit_statement)?;
        Some(Block {
            data: self.rewritten(&n.data),
            statements,
        })
    }

    fn visit_declaration_list(&mut self, n: &'a VariableDeclarationList<'a>) -> Option<VariableDeclarationList<'a>> {
        let declarations = self.visit_list(n.declarations, Self::visit_variable_declaration)?;
        Some(VariableDeclarationList {
            data: self.rewritten(&n.data),
            declarations,
        })
    }

    fn visit_variable_declaration(&mut self, n: &'a VariableDeclaration<'a>) -> Option<VariableDeclaration<'a>> {
        let name = self.visit_binding_name(&n.name);
        let initializer = self.visit_optional_expression(n.initializer);
        if name.is_none() && initializer.is_none() {
            return None;
        }
        Some(VariableDeclaration {
            data: self.rewritten(&n.data),
            name: name.unwrap_or_else(|| n.name.clone()),
            initializer: initializer.or(n.initializer),
            ..n.clone()
        })
    }

    fn visit_for_initializer(&mut self, initializer: &'a ForInitializer<'a>) -> Option<ForInitializer<'a>> {
        match *initializer {
            ForInitializer::VariableDeclarationList(list) => self
                .visit_declaration_list(list)
                .map(|list| ForInitializer::VariableDeclarationList(self.alloc(list))),
            ForInitializer::Expression(expr) => self.visit_expression(expr).map(ForInitializer::Expression),
        }
    }

    fn visit_for_in_or_of(&mut self, n: &'a ForInOrOfStatement<'a>) -> Option<&'a ForInOrOfStatement<'a>> {
        let initializer = self.visit_for_initializer(&n.initializer);
        let expression = self.visit_expression(n.expression);
        let statement = self.visit_statement_ref(n.statement);
        if initializer.is_none() && expression.is_none() && statement.is_none() {
            return None;
        }
        Some(self.alloc(ForInOrOfStatement {
            data: self.rewritten(&n.data),
            await_modifier: n.await_modifier,
            initializer: initializer.unwrap_or_else(|| n.initializer.clone()),
            expression: expression.unwrap_or(n.expression),
            statement: statement.unwrap_or(n.statement),
        }))
    }

    fn visit_catch_clause(&mut self, n: &'a CatchClause<'a>) -> Option<CatchClause<'a>> {
        let variable_declaration = n
            .variable_declaration
            .as_ref()
            .and_then(|declaration| self.visit_variable_declaration(declaration));
        let block = self.visit_block(&n.block);
        if variable_declaration.is_none() && block.is_none() {
            return None;
        }
        Some(CatchClause {
            data: self.rewritten(&n.data),
            variable_declaration: variable_declaration.or_else(|| n.variable_declaration.clone()),
            block: block.unwrap_or_else(|| n.block.clone()),
        })
    }
}
