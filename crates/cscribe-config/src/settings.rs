//! Feature switches and debounce timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_EDIT_TIMEOUT_MS, DEFAULT_GUARD_RELEASE_MS, DEFAULT_HEADER_DELAY_MS,
    DEFAULT_PROTOTYPE_DELAY_MS,
};

/// Which passes run for C documents.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag switches one independent pass"
)]
pub struct Features {
    /// Append missing `;` on newline and cursor movement.
    pub semicolons: bool,
    /// Insert missing `#include` lines.
    pub headers: bool,
    /// Insert forward declarations for functions defined after `main`.
    pub prototypes: bool,
    /// Publish diagnostics on save.
    pub diagnostics: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            semicolons: true,
            headers: true,
            prototypes: true,
            diagnostics: true,
        }
    }
}

/// Debounce delays and guard timing, in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Timing {
    /// Delay before a header pass.
    pub header_delay_ms: u64,
    /// Delay before a prototype pass.
    pub prototype_delay_ms: u64,
    /// Hold time of the re-entrancy guard after an edit completes.
    pub guard_release_ms: u64,
    /// Time after which an unconfirmed edit releases the guard.
    pub edit_timeout_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            header_delay_ms: DEFAULT_HEADER_DELAY_MS,
            prototype_delay_ms: DEFAULT_PROTOTYPE_DELAY_MS,
            guard_release_ms: DEFAULT_GUARD_RELEASE_MS,
            edit_timeout_ms: DEFAULT_EDIT_TIMEOUT_MS,
        }
    }
}

impl Timing {
    /// Delay before a header pass.
    #[must_use]
    pub const fn header_delay(&self) -> Duration {
        Duration::from_millis(self.header_delay_ms)
    }

    /// Delay before a prototype pass.
    #[must_use]
    pub const fn prototype_delay(&self) -> Duration {
        Duration::from_millis(self.prototype_delay_ms)
    }

    /// Hold time of the re-entrancy guard after an edit completes.
    #[must_use]
    pub const fn guard_release(&self) -> Duration {
        Duration::from_millis(self.guard_release_ms)
    }

    /// Time after which an unconfirmed edit releases the guard.
    #[must_use]
    pub const fn edit_timeout(&self) -> Duration {
        Duration::from_millis(self.edit_timeout_ms)
    }
}

/// Partial settings supplied by an editor client at startup.
///
/// Field names are camelCase to match LSP `initializationOptions`; every
/// field is optional and only present values replace configured ones.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientOverrides {
    /// Feature switch overrides.
    pub features: FeatureOverrides,
    /// Timing overrides.
    pub timing: TimingOverrides,
}

/// Optional replacements for [`Features`].
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureOverrides {
    /// Replaces [`Features::semicolons`].
    pub semicolons: Option<bool>,
    /// Replaces [`Features::headers`].
    pub headers: Option<bool>,
    /// Replaces [`Features::prototypes`].
    pub prototypes: Option<bool>,
    /// Replaces [`Features::diagnostics`].
    pub diagnostics: Option<bool>,
}

/// Optional replacements for [`Timing`].
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TimingOverrides {
    /// Replaces [`Timing::header_delay_ms`].
    pub header_delay_ms: Option<u64>,
    /// Replaces [`Timing::prototype_delay_ms`].
    pub prototype_delay_ms: Option<u64>,
    /// Replaces [`Timing::guard_release_ms`].
    pub guard_release_ms: Option<u64>,
    /// Replaces [`Timing::edit_timeout_ms`].
    pub edit_timeout_ms: Option<u64>,
}

impl Features {
    pub(crate) const fn apply(&mut self, overrides: FeatureOverrides) {
        if let Some(value) = overrides.semicolons {
            self.semicolons = value;
        }
        if let Some(value) = overrides.headers {
            self.headers = value;
        }
        if let Some(value) = overrides.prototypes {
            self.prototypes = value;
        }
        if let Some(value) = overrides.diagnostics {
            self.diagnostics = value;
        }
    }
}

impl Timing {
    pub(crate) const fn apply(&mut self, overrides: TimingOverrides) {
        if let Some(value) = overrides.header_delay_ms {
            self.header_delay_ms = value;
        }
        if let Some(value) = overrides.prototype_delay_ms {
            self.prototype_delay_ms = value;
        }
        if let Some(value) = overrides.guard_release_ms {
            self.guard_release_ms = value;
        }
        if let Some(value) = overrides.edit_timeout_ms {
            self.edit_timeout_ms = value;
        }
    }
}
