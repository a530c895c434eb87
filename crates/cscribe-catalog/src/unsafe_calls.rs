//! Library calls with a bounded replacement.

use serde::Serialize;

/// An unbounded library call paired with its bounded alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsafeFunction {
    /// The call that should be avoided.
    pub unsafe_name: &'static str,
    /// The call to suggest instead.
    pub safe_name: &'static str,
}

/// Unsafe-call table, scanned in this order.
pub static UNSAFE_FUNCTIONS: &[UnsafeFunction] = &[
    UnsafeFunction {
        unsafe_name: "gets",
        safe_name: "fgets",
    },
    UnsafeFunction {
        unsafe_name: "strcpy",
        safe_name: "strncpy",
    },
    UnsafeFunction {
        unsafe_name: "strcat",
        safe_name: "strncat",
    },
    UnsafeFunction {
        unsafe_name: "sprintf",
        safe_name: "snprintf",
    },
    UnsafeFunction {
        unsafe_name: "vsprintf",
        safe_name: "vsnprintf",
    },
];

/// Returns the table row for `name` when it is a flagged call.
#[must_use]
pub fn unsafe_function(name: &str) -> Option<&'static UnsafeFunction> {
    UNSAFE_FUNCTIONS.iter().find(|entry| entry.unsafe_name == name)
}
