//! Derived selection snapshot and host-facing notices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::RecordRow;

/// Position of a selected row within the current visible sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHandle<K> {
    /// Index into the flattened visible-row sequence.
    pub index: usize,
    /// Identity of the row's record.
    pub key: K,
}

/// Read-only snapshot of the current selection, recomputed on every
/// selection change and pushed to the host's registered context callback.
#[derive(Debug, Clone)]
pub struct SelectionContext<T: RecordRow> {
    /// Handles of the selected rows that are currently visible.
    pub selected_rows: Vec<RowHandle<T::Key>>,
    /// The selected records, in key order. Records that are gone from the
    /// record set are skipped.
    pub selected_records: Vec<T>,
    /// The selected keys, in key order.
    pub selected_keys: Vec<T::Key>,
}

impl<T: RecordRow> SelectionContext<T> {
    /// A snapshot with nothing selected.
    pub fn empty() -> Self {
        Self {
            selected_rows: Vec::new(),
            selected_records: Vec::new(),
            selected_keys: Vec::new(),
        }
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected_keys.is_empty()
    }
}

impl<T: RecordRow> Default for SelectionContext<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-facing notification the host should surface.
///
/// The engine never paints; where the surrounding widget would pop a toast
/// or dialog, the engine hands back a `Notice` and the host decides how to
/// show it.
///
/// # Example
///
/// ```
/// use trellis::context::Notice;
///
/// let notice = Notice::warning("Please select at least 1 record");
/// assert_eq!(notice.to_string(), "warning: Please select at least 1 record");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// An informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// A warning the user should act on.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        write!(f, "{level}: {}", self.message)
    }
}
