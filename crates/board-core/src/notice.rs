//! User Notices
//!
//! Transient toast messages raised by the synchronizer.

use crate::config::ToastTimings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

impl NoticeKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "toast success",
            NoticeKind::Info => "toast info",
            NoticeKind::Error => "toast error",
        }
    }

    /// Auto-dismiss delay; success notices are shorter
    pub fn dismiss_after_ms(&self, timings: &ToastTimings) -> u32 {
        match self {
            NoticeKind::Success => timings.success_ms,
            _ => timings.other_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

/// Sink for user-visible notices
pub trait Notifier {
    fn notify(&self, notice: Notice);
}
