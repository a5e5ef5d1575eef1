//! UI feedback as plain data.
//!
//! The controller never renders anything; it queues `Notice` values and the
//! embedding UI drains them each frame. Toasts map to transient
//! notifications, field notices map to inline form errors.

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A single piece of user-visible feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Transient notification, e.g. "Created" or "Delete failed".
    Toast { level: Level, message: String },
    /// Inline error attached to a form field, e.g. a rejected title.
    Field { field: &'static str, message: String },
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice::Toast {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice::Toast {
            level: Level::Error,
            message: message.into(),
        }
    }

    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Notice::Field {
            field,
            message: message.into(),
        }
    }

    /// True for both error toasts and field errors.
    pub fn is_error(&self) -> bool {
        match self {
            Notice::Toast { level, .. } => *level == Level::Error,
            Notice::Field { .. } => true,
        }
    }
}
