//! nameof_scanner: Lexer for TypeScript and JavaScript source text.
//!
//! Produces tokens on demand for the parser, with support for:
//! - All JavaScript/TypeScript punctuation and keywords
//! - Template literals (rescanned at each substitution boundary)
//! - Regular expression literals (rescanned on request)
//! - Unicode identifiers

mod char_codes;
mod scanner;

pub use scanner::{Scanner, ScannerState};
