//! nameof_transformer: Replaces `nameof` calls in TypeScript and JavaScript
//! source.
//!
//! [`AstHost`] binds the syntax tree of `nameof_ast` to the resolution
//! engine. [`transform_source_file`] walks one parsed file through it;
//! [`replace_in_text`] and [`replace_in_files`] patch source text, keeping
//! everything but the replaced calls byte for byte.

pub mod error;
pub mod factory;
pub mod host;
pub mod macro_import;
pub mod replace;
pub mod sink;
pub mod transformer;

pub use error::TransformError;
pub use factory::NodeFactory;
pub use host::{AstHost, FileContext, HostNode};
pub use macro_import::{find_macro_imports, MacroImport};
pub use replace::{apply_replacements, replace_in_files, replace_in_text, FileResult, OutputMode, ReplaceResult};
pub use sink::DiagnosticSink;
pub use transformer::{transform_source_file, NameofTransformer, Replacement, TransformOutput};
