//! Turns engine errors into diagnostics.

use nameof_diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticCollection};
use nameof_engine::{ErrorSink, NameofError, NodeLocation};

use crate::host::HostNode;

/// Collects every resolution error of one file as an error diagnostic.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: DiagnosticCollection,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> DiagnosticCollection {
        self.diagnostics
    }
}

impl<'a> ErrorSink<HostNode<'a>> for DiagnosticSink {
    fn report(&mut self, location: NodeLocation, error: NameofError<HostNode<'a>>) {
        let range = error.node.range();
        let span = (!range.is_synthesized()).then(|| range.to_span());
        let mut diagnostic = Diagnostic::from_text(
            location.file_path,
            span,
            error.code(),
            DiagnosticCategory::Error,
            error.to_string(),
        );
        if let (Some(line), Some(column)) = (location.line, location.column) {
            diagnostic = diagnostic.at_position(line, column);
        }
        self.diagnostics.add(diagnostic);
    }
}
