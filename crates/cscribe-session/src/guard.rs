//! Per-document re-entrancy guard.

use std::time::{Duration, Instant};

/// Tracks whether a document is absorbing one of the controller's own edits.
///
/// While held, change and selection events for the document are dropped and
/// due passes wait. The guard releases `guard_release` after the edit lands,
/// immediately when it fails, and after `edit_timeout` when the host never
/// confirms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditGuard {
    /// No edit is outstanding.
    #[default]
    Idle,
    /// An edit was sent and awaits confirmation.
    InFlight {
        /// When the edit was sent.
        since: Instant,
    },
    /// The edit landed; the echoed changes are still arriving.
    Cooling {
        /// When the guard releases.
        until: Instant,
    },
}

/// Why a held guard was released by [`EditGuard::expire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Expiry {
    Cooled,
    TimedOut,
}

impl EditGuard {
    /// Whether events for the document must be ignored at `now`.
    #[must_use]
    pub fn is_held(&self, now: Instant) -> bool {
        match *self {
            Self::Idle => false,
            Self::InFlight { .. } => true,
            Self::Cooling { until } => now < until,
        }
    }

    /// Instant at which the guard releases without further input.
    #[must_use]
    pub fn release_deadline(&self, edit_timeout: Duration) -> Option<Instant> {
        match *self {
            Self::Idle => None,
            Self::InFlight { since } => since.checked_add(edit_timeout),
            Self::Cooling { until } => Some(until),
        }
    }

    pub(crate) const fn begin(&mut self, now: Instant) {
        *self = Self::InFlight { since: now };
    }

    pub(crate) fn complete(&mut self, now: Instant, hold: Duration) {
        *self = now
            .checked_add(hold)
            .map_or(Self::Idle, |until| Self::Cooling { until });
    }

    pub(crate) const fn release(&mut self) {
        *self = Self::Idle;
    }

    /// Releases a guard whose cooling period or edit timeout has passed.
    pub(crate) fn expire(&mut self, now: Instant, edit_timeout: Duration) -> Option<Expiry> {
        let expiry = match *self {
            Self::Idle => None,
            Self::InFlight { since } => since
                .checked_add(edit_timeout)
                .filter(|deadline| now >= *deadline)
                .map(|_| Expiry::TimedOut),
            Self::Cooling { until } => (now >= until).then_some(Expiry::Cooled),
        };
        if expiry.is_some() {
            self.release();
        }
        expiry
    }
}
