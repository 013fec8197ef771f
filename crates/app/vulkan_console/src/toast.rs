//! Transient success and failure notifications.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            ToastKind::Success => "ok",
            ToastKind::Error => "error",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

/// Toasts pushed since the last time the console showed them.
#[derive(Debug, Default)]
pub struct Toasts {
    pending: Vec<Toast>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        log::debug!("toast {kind:?}: {message}");
        self.pending.push(Toast { kind, message });
    }

    /// Take every pending toast, oldest first.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_queue_in_order() {
        let mut toasts = Toasts::default();
        toasts.success("Status updated!");
        toasts.error("Failed to update status.");

        let drained = toasts.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].to_string(), "[ok] Status updated!");
        assert_eq!(drained[1].to_string(), "[error] Failed to update status.");
        assert!(toasts.drain().is_empty());
    }
}
