//! Traversal-scoped state.

use indexmap::IndexMap;

use crate::host::HostTypes;

/// State for one traversal of one tree.
///
/// Created by the driver before the walk and handed back to
/// [`NameofEngine::finish`](crate::NameofEngine::finish) afterwards, which
/// reports interpolations that no `full` call consumed.
pub struct TransformContext<'c, H: HostTypes> {
    host_context: &'c H::Context,
    pending_interpolations: IndexMap<H::Key, H::Node>,
}

impl<'c, H: HostTypes> TransformContext<'c, H> {
    pub fn new(host_context: &'c H::Context) -> Self {
        Self {
            host_context,
            pending_interpolations: IndexMap::new(),
        }
    }

    #[inline]
    pub fn host_context(&self) -> &'c H::Context {
        self.host_context
    }

    pub(crate) fn record_interpolation(&mut self, key: H::Key, node: H::Node) {
        self.pending_interpolations.insert(key, node);
    }

    /// Mark an interpolation as used. Returns whether it was pending.
    pub(crate) fn consume_interpolation(&mut self, key: &H::Key) -> bool {
        self.pending_interpolations.shift_remove(key).is_some()
    }

    pub fn pending_interpolations(&self) -> impl Iterator<Item = &H::Node> {
        self.pending_interpolations.values()
    }

    pub(crate) fn into_pending(self) -> impl Iterator<Item = H::Node> {
        self.pending_interpolations.into_values()
    }
}
