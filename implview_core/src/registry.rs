// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use std::fmt;

use crate::table::ImplementorTable;

/// Callback a host viewer installs to consume freshly loaded tables.
///
/// Loading is single-threaded and run-to-completion, so the hook is plain
/// `FnMut` with no `Send` bound.
pub type RegisterHook = Box<dyn FnMut(ImplementorTable)>;

/// The hand-off point between generated implementor data files and the host
/// viewer.
///
/// rustdoc's data files do this through a pair of page globals: each file
/// calls `register_implementors` if the page has installed it, and stashes
/// its table in `pending_implementors` otherwise. This registry is the same
/// two-channel contract as an explicit object: a table submitted while a
/// hook is installed is handed to the hook synchronously, exactly once, and
/// the pending buffer is left alone; a table submitted with no hook lands in
/// the pending buffer until the host drains it.
///
/// The pending buffer holds one table. A later submit overwrites an
/// undrained one, and the earlier table is gone - last-write-wins, accepted
/// by the single-consumer design. Submitting never fails; if an installed
/// hook panics, that panic propagates to the submitter.
#[derive(Default)]
pub struct ImplementorRegistry {
    hook: Option<RegisterHook>,
    pending: Option<ImplementorTable>,
}

impl ImplementorRegistry {
    /// Creates a registry with no hook installed
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the hook already installed
    pub fn with_hook<F>(hook: F) -> Self
    where
        F: FnMut(ImplementorTable) + 'static,
    {
        Self {
            hook: Some(Box::new(hook)),
            pending: None,
        }
    }

    /// Installs the register hook. Does not touch the pending buffer: a
    /// table buffered before the hook arrived still has to be collected
    /// with [`drain_pending`](Self::drain_pending) - that transition belongs
    /// to the host, not to the submitter.
    pub fn install_hook<F>(&mut self, hook: F)
    where
        F: FnMut(ImplementorTable) + 'static,
    {
        self.hook = Some(Box::new(hook));
    }

    pub fn hook_installed(&self) -> bool {
        self.hook.is_some()
    }

    /// Hands off a freshly built table: invoke the hook if one is installed,
    /// otherwise overwrite the pending buffer.
    ///
    /// Every submit dispatches - deduplication, if any is wanted, is the
    /// hook's business.
    pub fn submit(&mut self, table: ImplementorTable) {
        match self.hook.as_mut() {
            Some(hook) => hook(table),
            None => self.pending = Some(table),
        }
    }

    /// Single-crate convenience: wraps the fragments in a one-entry table
    /// and submits it.
    pub fn register(&mut self, name: impl Into<String>, fragments: Vec<String>) {
        self.submit(ImplementorTable::from_entries([(name.into(), fragments)]));
    }

    /// Peeks at the buffered table, if any
    pub fn pending(&self) -> Option<&ImplementorTable> {
        self.pending.as_ref()
    }

    /// Takes the buffered table, leaving the buffer empty
    pub fn drain_pending(&mut self) -> Option<ImplementorTable> {
        self.pending.take()
    }
}

impl fmt::Debug for ImplementorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplementorRegistry")
            .field("hook_installed", &self.hook.is_some())
            .field("pending", &self.pending)
            .finish()
    }
}
