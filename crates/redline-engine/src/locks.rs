use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Per-pair mutual exclusion with try-lock semantics.
///
/// A mutating operation holds its pair's slot for the whole operation.
/// Acquisition never blocks: a busy slot is reported to the caller, who
/// retries after the in-flight operation completes. Slots for distinct
/// pairs are independent.
#[derive(Clone, Default)]
pub(crate) struct PairLocks {
    busy: Arc<Mutex<HashSet<String>>>,
}

impl PairLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to take the slot for `service`. Returns `None` when it is held.
    pub fn acquire(&self, service: &str) -> Option<PairGuard> {
        let mut busy = self.busy.lock().unwrap_or_else(|e| e.into_inner());
        if busy.insert(service.to_string()) {
            Some(PairGuard {
                service: service.to_string(),
                busy: Arc::clone(&self.busy),
            })
        } else {
            None
        }
    }
}

/// Releases the slot on drop, even when the holding operation panicked.
pub(crate) struct PairGuard {
    service: String,
    busy: Arc<Mutex<HashSet<String>>>,
}

impl Drop for PairGuard {
    fn drop(&mut self) {
        let mut busy = self.busy.lock().unwrap_or_else(|e| e.into_inner());
        busy.remove(&self.service);
    }
}
