//! Flag types and identifiers attached to AST nodes.

use std::fmt;

bitflags::bitflags! {
    /// Flags for AST nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        const NONE                          = 0;
        const LET                           = 1 << 0;
        const CONST                         = 1 << 1;
        /// Created by a transformation; has no source text.
        const SYNTHESIZED                   = 1 << 2;
        /// Original node whose children were replaced; its range still
        /// locates it but its source text is stale.
        const REWRITTEN                     = 1 << 3;
        const OPTIONAL_CHAIN                = 1 << 4;
        const THIS_NODE_HAS_ERROR           = 1 << 5;
        const JAVASCRIPT_FILE               = 1 << 6;
        const JSX                           = 1 << 7;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();
    }
}

impl NodeFlags {
    /// Whether the node's range can be used to slice its source text.
    #[inline]
    pub fn has_source_text(self) -> bool {
        !self.intersects(NodeFlags::SYNTHESIZED | NodeFlags::REWRITTEN)
    }
}

bitflags::bitflags! {
    /// Modifier flags for declarations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u32 {
        const NONE              = 0;
        const EXPORT            = 1 << 0;
        const AMBIENT           = 1 << 1;
        const PUBLIC            = 1 << 2;
        const PRIVATE           = 1 << 3;
        const PROTECTED         = 1 << 4;
        const STATIC            = 1 << 5;
        const READONLY          = 1 << 6;
        const ACCESSOR          = 1 << 7;
        const ABSTRACT          = 1 << 8;
        const ASYNC             = 1 << 9;
        const DEFAULT           = 1 << 10;
        const CONST             = 1 << 11;
        const OVERRIDE          = 1 << 12;
        const DECORATOR         = 1 << 13;

        const ACCESSIBILITY_MODIFIER = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
        const PARAMETER_PROPERTY_MODIFIER = Self::ACCESSIBILITY_MODIFIER.bits() | Self::READONLY.bits() | Self::OVERRIDE.bits();
    }
}

bitflags::bitflags! {
    /// Flags describing the token the scanner just produced.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u32 {
        const NONE                    = 0;
        const PRECEDING_LINE_BREAK    = 1 << 0;
        const UNTERMINATED            = 1 << 1;
        const SCIENTIFIC              = 1 << 2;
        const HEX_SPECIFIER           = 1 << 3;
        const BINARY_SPECIFIER        = 1 << 4;
        const OCTAL_SPECIFIER         = 1 << 5;
        const CONTAINS_SEPARATOR      = 1 << 6;
        const UNICODE_ESCAPE          = 1 << 7;
        const CONTAINS_INVALID_ESCAPE = 1 << 8;
        const SINGLE_QUOTE            = 1 << 9;
    }
}

/// Unique identifier for an AST node within one transformation run.
///
/// The parser numbers original nodes densely from zero; nodes created
/// while rewriting continue the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_text_availability() {
        assert!(NodeFlags::NONE.has_source_text());
        assert!(NodeFlags::CONST.has_source_text());
        assert!(!NodeFlags::SYNTHESIZED.has_source_text());
        assert!(!(NodeFlags::REWRITTEN | NodeFlags::LET).has_source_text());
    }

    #[test]
    fn test_node_id_validity() {
        assert!(NodeId(0).is_valid());
        assert!(!NodeId::INVALID.is_valid());
        assert_eq!(NodeId(7).to_string(), "#7");
    }
}
