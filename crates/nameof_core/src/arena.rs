//! Arena allocation for syntax trees.
//!
//! The parser allocates every node of a file from one bump arena, and the
//! transformer allocates the nodes it generates from the same arena, so a
//! rewritten tree can freely mix original and generated nodes.

use bumpalo::Bump;

/// One arena per file being transformed.
///
/// Dropping the arena frees the parsed tree and every generated node at once.
pub struct TransformArena {
    bump: Bump,
}

impl TransformArena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create an arena sized for roughly `source_len` bytes of input.
    ///
    /// Trees take a small multiple of their source size, so this avoids
    /// most chunk growth for typical files.
    pub fn for_source(source_len: usize) -> Self {
        Self {
            bump: Bump::with_capacity(source_len.saturating_mul(4)),
        }
    }

    /// The underlying bump allocator, handed to the parser and the host.
    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Bytes currently held by the arena.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for TransformArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_str_outlives_source() {
        let arena = TransformArena::new();
        let text = {
            let owned = String::from("console.log");
            arena.alloc_str(&owned)
        };
        assert_eq!(text, "console.log");
    }

    #[test]
    fn test_for_source_preallocates() {
        let arena = TransformArena::for_source(1024);
        assert!(arena.allocated_bytes() >= 1024);
    }
}
