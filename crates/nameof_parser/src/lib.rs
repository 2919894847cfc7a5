//! nameof_parser: Recursive descent parser for TypeScript and JavaScript.
//!
//! Parses the scanner's token stream into the arena-allocated AST from
//! `nameof_ast`. Runtime code is parsed structurally; type-only
//! declarations are recognized and kept as opaque skipped statements.

pub mod parser;
pub mod precedence;
pub mod utilities;

pub use parser::{parse_source_text, ParseResult, Parser};
