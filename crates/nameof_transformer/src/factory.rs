//! Arena-backed construction of generated and rewritten nodes.

use std::cell::{Cell, RefCell};

use bumpalo::Bump;
use nameof_ast::*;
use nameof_core::TextRange;
use nameof_printer::escape_template_text;
use rustc_hash::FxHashMap;

/// Allocates nodes for one file's transformation.
///
/// Ids continue after the parser's, so original and generated nodes never
/// share one. Generated nodes have no range; the range of the call they
/// replaced is kept on the side so errors about them still point somewhere.
pub struct NodeFactory<'a> {
    arena: &'a Bump,
    next_id: Cell<u32>,
    origins: RefCell<FxHashMap<NodeId, TextRange>>,
}

impl<'a> NodeFactory<'a> {
    pub fn new(arena: &'a Bump, first_id: u32) -> Self {
        Self {
            arena,
            next_id: Cell::new(first_id),
            origins: RefCell::new(FxHashMap::default()),
        }
    }

    /// Factory numbering after the nodes of `source_file`.
    pub fn for_source_file(arena: &'a Bump, source_file: &SourceFile<'a>) -> Self {
        Self::new(arena, source_file.node_count)
    }

    #[inline]
    pub fn arena(&self) -> &'a Bump {
        self.arena
    }

    pub fn next_id(&self) -> NodeId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        NodeId(id)
    }

    /// Number of ids handed out so far, parser ids included.
    pub fn node_count(&self) -> u32 {
        self.next_id.get()
    }

    #[inline]
    pub fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    pub fn alloc_list<T>(&self, items: Vec<T>) -> &'a [T] {
        if items.is_empty() {
            return &[];
        }
        self.arena.alloc_slice_fill_iter(items)
    }

    pub fn alloc_str(&self, text: &str) -> &'a str {
        self.arena.alloc_str(text)
    }

    /// Header for a copy of `data` whose children changed.
    pub fn rewritten(&self, data: &NodeData) -> NodeData {
        data.rewritten(self.next_id())
    }

    fn synthesized(&self, kind: SyntaxKind) -> NodeData {
        NodeData::synthesized(kind, self.next_id())
    }

    // ========================================================================
    // Origins
    // ========================================================================

    /// Remember that the generated node `id` replaced the text at `range`.
    pub fn record_origin(&self, id: NodeId, range: TextRange) {
        if !range.is_synthesized() {
            self.origins.borrow_mut().insert(id, range);
        }
    }

    pub fn origin(&self, id: NodeId) -> Option<TextRange> {
        self.origins.borrow().get(&id).copied()
    }

    // ========================================================================
    // Literals
    // ========================================================================

    /// A double-quoted string literal.
    pub fn string_literal(&self, text: &str) -> &'a Expression<'a> {
        let literal = self.alloc(StringLiteral {
            data: self.synthesized(SyntaxKind::StringLiteral),
            text: self.alloc_str(text),
            is_single_quote: false,
        });
        self.alloc(Expression::StringLiteral(literal))
    }

    pub fn no_substitution_template(&self, text: &str) -> &'a Expression<'a> {
        let piece = self.alloc(self.template_piece(SyntaxKind::NoSubstitutionTemplateLiteral, text));
        self.alloc(Expression::NoSubstitutionTemplateLiteral(piece))
    }

    /// A template literal interleaving `parts` with `expressions`.
    ///
    /// `parts` has one entry more than `expressions`; without expressions
    /// the result is a no-substitution template.
    pub fn template_expression(&self, parts: &[String], expressions: Vec<Expression<'a>>) -> &'a Expression<'a> {
        let (head, rest) = match parts.split_first() {
            Some(split) => split,
            None => return self.no_substitution_template(""),
        };
        if expressions.is_empty() {
            return self.no_substitution_template(&parts.concat());
        }

        let span_count = expressions.len();
        let spans: Vec<TemplateSpan<'a>> = expressions
            .into_iter()
            .enumerate()
            .map(|(i, expression)| {
                let kind = if i + 1 == span_count {
                    SyntaxKind::TemplateTail
                } else {
                    SyntaxKind::TemplateMiddle
                };
                let text = rest.get(i).map(String::as_str).unwrap_or("");
                TemplateSpan {
                    data: self.synthesized(SyntaxKind::TemplateSpan),
                    expression: self.alloc(expression),
                    literal: self.template_piece(kind, text),
                }
            })
            .collect();

        let template = self.alloc(TemplateExpression {
            data: self.synthesized(SyntaxKind::TemplateExpression),
            head: self.template_piece(SyntaxKind::TemplateHead, head),
            template_spans: self.alloc_list(spans),
        });
        self.alloc(Expression::TemplateExpression(template))
    }

    fn template_piece(&self, kind: SyntaxKind, text: &str) -> TemplateLiteralPiece<'a> {
        TemplateLiteralPiece {
            data: self.synthesized(kind),
            text: self.alloc_str(text),
            raw_text: self.alloc_str(&escape_template_text(text)),
        }
    }

    pub fn array_literal(&self, elements: Vec<Expression<'a>>) -> &'a Expression<'a> {
        let array = self.alloc(ArrayLiteralExpression {
            data: self.synthesized(SyntaxKind::ArrayLiteralExpression),
            elements: self.alloc_list(elements),
        });
        self.alloc(Expression::ArrayLiteralExpression(array))
    }

    /// An identifier with the given text, used for code that has no
    /// expression form of its own.
    pub fn identifier(&self, text: &str) -> &'a Expression<'a> {
        let identifier = self.alloc(Identifier {
            data: self.synthesized(SyntaxKind::Identifier),
            text: self.alloc_str(text),
        });
        self.alloc(Expression::Identifier(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nameof_printer::print_expression;

    #[test]
    fn test_ids_continue_after_first_id() {
        let arena = Bump::new();
        let factory = NodeFactory::new(&arena, 10);
        assert_eq!(factory.next_id(), NodeId(10));
        assert_eq!(factory.next_id(), NodeId(11));
        assert_eq!(factory.node_count(), 12);
    }

    #[test]
    fn test_generated_string_is_synthesized() {
        let arena = Bump::new();
        let factory = NodeFactory::new(&arena, 0);
        let literal = factory.string_literal("log");
        assert!(literal.data().flags.contains(NodeFlags::SYNTHESIZED));
        assert!(literal.range().is_synthesized());
        assert_eq!(print_expression(literal, None), "\"log\"");
    }

    #[test]
    fn test_template_without_expressions_collapses() {
        let arena = Bump::new();
        let factory = NodeFactory::new(&arena, 0);
        let template = factory.template_expression(&["a.b".to_string()], Vec::new());
        assert!(matches!(template, Expression::NoSubstitutionTemplateLiteral(_)));
        assert_eq!(print_expression(template, None), "`a.b`");
    }

    #[test]
    fn test_template_with_expressions() {
        let arena = Bump::new();
        let factory = NodeFactory::new(&arena, 0);
        let hole = factory.identifier("i").clone();
        let template = factory.template_expression(&["a[".to_string(), "].b`".to_string()], vec![hole]);
        assert_eq!(print_expression(template, None), "`a[${i}].b\\``");
    }

    #[test]
    fn test_origins_ignore_synthesized_ranges() {
        let arena = Bump::new();
        let factory = NodeFactory::new(&arena, 0);
        factory.record_origin(NodeId(1), TextRange::new(3, 9));
        factory.record_origin(NodeId(2), TextRange::SYNTHESIZED);
        assert_eq!(factory.origin(NodeId(1)), Some(TextRange::new(3, 9)));
        assert_eq!(factory.origin(NodeId(2)), None);
    }
}
