//! nameof_engine: AST-agnostic resolution of `nameof` calls.
//!
//! A host binding describes its syntax tree through the capability traits in
//! [`host`]; the [`NameofEngine`] detects `nameof(...)`, `nameof.full(...)`,
//! `nameof.split(...)`, `nameof.array(...)` and `nameof.interpolate(...)`
//! calls, resolves the names they refer to, and asks the host to build the
//! replacement literal. Errors never escape [`NameofEngine::transform`]; they
//! are reported to the configured [`ErrorSink`] and the original node is kept.

pub mod call;
pub mod context;
pub mod engine;
pub mod error;
pub mod host;
pub mod mutation;
pub mod node;
pub mod result;
pub mod segment;

pub use call::{FunctionKind, NameofCall};
pub use context::TransformContext;
pub use engine::{NameofEngine, Resolution};
pub use error::{EngineResult, NameofError, NameofErrorKind};
pub use host::{
    ArraySupport, CollectingSink, ErrorSink, HostBinding, HostSyntax, HostTypes, NodeClassifier,
    NodeLocation, NodeParser, ResultDumper, SourceAccess, DEFAULT_NAMEOF_NAME,
};
pub use mutation::MutationTracker;
pub use node::{format_number, IndexValue, ParsedNode, PathPartCandidate};
pub use result::{NameofResult, ResultBuilder};
pub use segment::Segment;
