//! Walk-scoped namespace tracking.

use tsdecl_core::ScopeMode;

/// The namespace most recently entered during a walk.
///
/// Owned by one walker; nothing here is shared between walks.
#[derive(Debug, Clone, Default)]
pub struct NamespaceContext {
    mode: ScopeMode,
    current: Option<String>,
    saved: Vec<Option<String>>,
}

impl NamespaceContext {
    #[must_use]
    pub const fn new(mode: ScopeMode) -> Self {
        Self {
            mode,
            current: None,
            saved: Vec::new(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> ScopeMode {
        self.mode
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Overwrite the current namespace.
    pub fn set_context(&mut self, name: impl Into<String>) {
        self.current = Some(name.into());
    }

    /// Enter a namespace body. In stack mode the enclosing namespace is saved
    /// so [`NamespaceContext::exit`] can restore it.
    pub fn enter(&mut self, name: impl Into<String>) {
        if self.mode == ScopeMode::Stack {
            self.saved.push(self.current.take());
        }
        self.set_context(name);
    }

    /// Leave a namespace body. Flat mode keeps the inner namespace current.
    pub fn exit(&mut self) {
        if self.mode == ScopeMode::Stack
            && let Some(outer) = self.saved.pop()
        {
            self.current = outer;
        }
    }

    /// Forget all state; the mode is kept.
    pub fn reset(&mut self) {
        self.current = None;
        self.saved.clear();
    }
}
