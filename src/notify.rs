//! Transient toast notifications. One toast is visible at a time; a newer one
//! replaces it. The view dismisses it after the configured duration.
use leptos::*;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn class(self) -> &'static str {
        match self {
            Severity::Success => "toast toast-success",
            Severity::Error => "toast toast-error",
            Severity::Warning => "toast toast-warning",
            Severity::Info => "toast toast-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone, Copy)]
pub struct Notifier {
    current: RwSignal<Option<Toast>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            current: create_rw_signal(None),
        }
    }

    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        self.current.set(Some(Toast {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
        }));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, Severity::Error);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(message, Severity::Warning);
    }

    /// Hides the toast, but only if it is still the one identified by `id`.
    pub fn dismiss(&self, id: Uuid) {
        self.current.update(|current| {
            if current.as_ref().is_some_and(|toast| toast.id == id) {
                *current = None;
            }
        });
    }

    pub fn signal(&self) -> ReadSignal<Option<Toast>> {
        self.current.read_only()
    }

    pub fn current(&self) -> Option<Toast> {
        self.current.get_untracked()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
