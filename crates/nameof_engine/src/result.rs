//! Resolution results and the builder that folds a path into one.

use crate::node::IndexValue;

/// What a call resolves to, before the host turns it into a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NameofResult<N> {
    Plain {
        text: String,
    },
    /// `parts.len() == expressions.len() + 1`.
    Template {
        parts: Vec<String>,
        expressions: Vec<N>,
    },
    /// An argument that already is a generated literal.
    Node {
        node: N,
    },
}

impl<N> NameofResult<N> {
    pub fn plain(text: impl Into<String>) -> Self {
        NameofResult::Plain { text: text.into() }
    }

    /// The interpolated text `parts[0]${expr0}parts[1]...` of a template,
    /// or the text of a plain result.
    pub fn render_text(&self, mut render_expression: impl FnMut(&N) -> String) -> Option<String> {
        match self {
            NameofResult::Plain { text } => Some(text.clone()),
            NameofResult::Template { parts, expressions } => {
                let mut out = String::new();
                for (i, part) in parts.iter().enumerate() {
                    out.push_str(part);
                    if let Some(expression) = expressions.get(i) {
                        out.push_str("${");
                        out.push_str(&render_expression(expression));
                        out.push('}');
                    }
                }
                Some(out)
            }
            NameofResult::Node { .. } => None,
        }
    }
}

/// Accumulates path steps into a plain string or a template.
#[derive(Debug)]
pub struct ResultBuilder<N> {
    current: String,
    template_parts: Vec<String>,
    expressions: Vec<N>,
}

impl<N> ResultBuilder<N> {
    pub fn new() -> Self {
        Self {
            current: String::new(),
            template_parts: Vec::new(),
            expressions: Vec::new(),
        }
    }

    /// An identifier or property step.
    pub fn add_name(&mut self, value: &str) {
        if !self.current.is_empty() {
            self.current.push('.');
        }
        self.current.push_str(value);
    }

    pub fn add_index(&mut self, value: &IndexValue) {
        self.current.push('[');
        self.current.push_str(&value.to_accessor());
        self.current.push(']');
    }

    /// Commit the buffer and open a hole for `expression`, bracketed like an
    /// index access.
    pub fn add_interpolation(&mut self, expression: N) {
        self.current.push('[');
        self.template_parts.push(std::mem::take(&mut self.current));
        self.current.push(']');
        self.expressions.push(expression);
    }

    pub fn finish(mut self) -> NameofResult<N> {
        if self.expressions.is_empty() {
            NameofResult::Plain { text: self.current }
        } else {
            self.template_parts.push(self.current);
            NameofResult::Template {
                parts: self.template_parts,
                expressions: self.expressions,
            }
        }
    }
}

impl<N> Default for ResultBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_and_indexes() {
        let mut builder = ResultBuilder::<()>::new();
        builder.add_name("console");
        builder.add_name("log");
        builder.add_index(&IndexValue::String("a".into()));
        builder.add_index(&IndexValue::Number(0.0));
        builder.add_name("length");
        assert_eq!(builder.finish(), NameofResult::plain("console.log[\"a\"][0].length"));
    }

    #[test]
    fn test_leading_index() {
        let mut builder = ResultBuilder::<()>::new();
        builder.add_index(&IndexValue::Number(1.0));
        builder.add_name("x");
        assert_eq!(builder.finish(), NameofResult::plain("[1].x"));
    }

    #[test]
    fn test_interpolation_builds_template() {
        let mut builder = ResultBuilder::new();
        builder.add_name("console");
        builder.add_name("log");
        builder.add_interpolation("i");
        builder.add_name("toString");
        let result = builder.finish();
        assert_eq!(
            result,
            NameofResult::Template {
                parts: vec!["console.log[".into(), "].toString".into()],
                expressions: vec!["i"],
            }
        );
        assert_eq!(
            result.render_text(|e| e.to_string()).as_deref(),
            Some("console.log[${i}].toString")
        );
    }

    #[test]
    fn test_template_invariant_with_adjacent_interpolations() {
        let mut builder = ResultBuilder::new();
        builder.add_name("a");
        builder.add_interpolation(1);
        builder.add_interpolation(2);
        match builder.finish() {
            NameofResult::Template { parts, expressions } => {
                assert_eq!(parts.len(), expressions.len() + 1);
                assert_eq!(parts, vec!["a[", "][", "]"]);
            }
            other => panic!("expected template, got {:?}", other),
        }
    }
}
