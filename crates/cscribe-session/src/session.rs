//! State kept for one open document.

use std::time::{Duration, Instant};

use crate::guard::EditGuard;

/// Controller-owned state for one tracked document.
///
/// Created when the document opens and dropped when it closes. Holds no
/// document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSession {
    language_id: String,
    cursor_line: Option<u32>,
    header_due: Option<Instant>,
    prototype_due: Option<Instant>,
    guard: EditGuard,
}

impl DocumentSession {
    pub(crate) fn new(language_id: impl Into<String>) -> Self {
        Self {
            language_id: language_id.into(),
            cursor_line: None,
            header_due: None,
            prototype_due: None,
            guard: EditGuard::Idle,
        }
    }

    /// Language identifier reported when the document opened.
    #[must_use]
    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    /// Line the cursor was last seen on.
    #[must_use]
    pub const fn cursor_line(&self) -> Option<u32> {
        self.cursor_line
    }

    /// When the pending header pass runs.
    #[must_use]
    pub const fn header_due(&self) -> Option<Instant> {
        self.header_due
    }

    /// When the pending prototype pass runs.
    #[must_use]
    pub const fn prototype_due(&self) -> Option<Instant> {
        self.prototype_due
    }

    /// The re-entrancy guard.
    #[must_use]
    pub const fn guard(&self) -> EditGuard {
        self.guard
    }

    /// Earliest instant at which a pending pass can run.
    ///
    /// A pass that falls due while the guard is held waits for the guard.
    #[must_use]
    pub fn next_deadline(&self, edit_timeout: Duration) -> Option<Instant> {
        let pass = self.header_due.into_iter().chain(self.prototype_due).min()?;
        Some(
            self.guard
                .release_deadline(edit_timeout)
                .map_or(pass, |release| pass.max(release)),
        )
    }

    pub(crate) const fn guard_mut(&mut self) -> &mut EditGuard {
        &mut self.guard
    }

    pub(crate) const fn move_cursor(&mut self, line: u32) -> Option<u32> {
        self.cursor_line.replace(line)
    }

    pub(crate) const fn forget_cursor(&mut self) {
        self.cursor_line = None;
    }

    pub(crate) fn schedule_headers(&mut self, now: Instant, delay: Duration) {
        self.header_due = now.checked_add(delay);
    }

    /// Replaces any pending prototype pass.
    pub(crate) fn schedule_prototypes(&mut self, now: Instant, delay: Duration) {
        self.prototype_due = now.checked_add(delay);
    }

    pub(crate) fn take_due_headers(&mut self, now: Instant) -> bool {
        self.header_due.take_if(|due| *due <= now).is_some()
    }

    pub(crate) fn take_due_prototypes(&mut self, now: Instant) -> bool {
        self.prototype_due.take_if(|due| *due <= now).is_some()
    }
}
