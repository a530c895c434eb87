//! Shared fixtures for session tests.

mod recording_host;
mod world;

use std::time::{Duration, Instant};

use rstest::fixture;

use cscribe_config::Config;

pub use recording_host::{EditMode, RecordingHost};
pub use world::TestWorld;

use crate::{DocumentId, SessionController};

/// A helper called from `main` and defined after it.
pub const HELPER_AFTER_MAIN: &str = "#include <stdio.h>\n\nint main(void) {\n    helper();\n    return 0;\n}\n\nvoid helper(void) {\n    puts(\"hi\");\n}\n";

/// One unsafe copy and one unchecked `fopen`.
pub const RISKY_MAIN: &str = "#include <stdio.h>\n#include <string.h>\n\nint main(void) {\n    char buf[8];\n    strcpy(buf, \"hi\");\n    FILE *f = fopen(\"a.txt\", \"r\");\n    return 0;\n}\n";

#[fixture]
pub fn sample_document() -> DocumentId {
    DocumentId::new("file:///workspace/main.c")
}

#[fixture]
pub fn controller() -> SessionController {
    SessionController::new(Config::default())
}

#[fixture]
pub fn start() -> Instant {
    Instant::now()
}

/// `start` advanced by `millis`.
pub fn at(start: Instant, millis: u64) -> Instant {
    start + Duration::from_millis(millis)
}
