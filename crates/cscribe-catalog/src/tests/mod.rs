//! Unit tests for the function catalog.

use crate::{ReferenceEntry, references};



/// The documented entry named exactly `name`.
fn documented_entry(name: &str) -> Option<&'static ReferenceEntry> {
    references().iter().find(|entry| entry.name == name)
}
