//! nameof_ast: Syntax tree definitions for the TypeScript subset the
//! nameof transformer reads and rewrites.
//!
//! This module defines the AST node types, the SyntaxKind enum, node flags,
//! and a visitor over arena-allocated trees.

pub mod accessors;
pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
pub use visitor::AstVisitor;
