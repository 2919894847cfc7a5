//! nameof_core: Core utilities shared by every nameof pipeline stage.
//!
//! Provides text positions, line maps, and the bump arena that owns the
//! syntax trees built and rewritten during a transformation run.

pub mod arena;
pub mod text;

pub use arena::TransformArena;
pub use text::{LineAndColumn, LineMap, TextPos, TextRange, TextSpan};
