//! The normalized shape of a detected `nameof` call.

use std::fmt;

/// The accessor after the marker: `nameof.full(...)` is [`FunctionKind::Full`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Typed,
    Full,
    Split,
    Array,
    /// `nameof.toArray(...)`, kept for older code bases.
    LegacyArray,
    Interpolate,
}

impl FunctionKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "typed" => Some(FunctionKind::Typed),
            "full" => Some(FunctionKind::Full),
            "split" => Some(FunctionKind::Split),
            "array" => Some(FunctionKind::Array),
            "toArray" => Some(FunctionKind::LegacyArray),
            "interpolate" => Some(FunctionKind::Interpolate),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FunctionKind::Typed => "typed",
            FunctionKind::Full => "full",
            FunctionKind::Split => "split",
            FunctionKind::Array => "array",
            FunctionKind::LegacyArray => "toArray",
            FunctionKind::Interpolate => "interpolate",
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A detected call site. Built per call, never stored.
#[derive(Debug, Clone)]
pub struct NameofCall<N> {
    pub source: N,
    /// `None` for the bare `nameof(...)` form and for unknown accessors.
    pub function: Option<FunctionKind>,
    /// The accessor as written, set whenever the callee had one.
    pub function_name: Option<String>,
    pub type_arguments: Vec<N>,
    pub arguments: Vec<N>,
}

impl<N> NameofCall<N> {
    /// Whether the callee named an accessor this engine does not know.
    pub fn is_unknown_function(&self) -> bool {
        self.function.is_none() && self.function_name.is_some()
    }

    /// `nameof.full`, `nameof.split`, ... for messages.
    pub fn display_name(&self, nameof: &str) -> String {
        match (&self.function_name, self.function) {
            (Some(name), _) => format!("{}.{}", nameof, name),
            (None, Some(kind)) => format!("{}.{}", nameof, kind),
            (None, None) => nameof.to_string(),
        }
    }

    /// Arguments when present, otherwise type arguments.
    pub fn targets(&self) -> &[N] {
        if self.arguments.is_empty() {
            &self.type_arguments
        } else {
            &self.arguments
        }
    }
}
