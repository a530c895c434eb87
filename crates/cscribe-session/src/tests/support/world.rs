//! BDD test world wrapping a controller and a recording host.

use std::time::Instant;

use cscribe_config::Config;
use cscribe_syntax::{Position, Range, SourceBuffer};

use super::{EditMode, RecordingHost, at};
use crate::{DocumentId, EventDisposition, SessionController, TextChange};

/// Shared state exercised by BDD step implementations.
pub struct TestWorld {
    /// Controller under test.
    pub controller: SessionController,
    /// Host receiving edits and diagnostics.
    pub host: RecordingHost,
    /// Document the steps act on.
    pub document: DocumentId,
    start: Instant,
    elapsed_ms: u64,
    /// Disposition returned by the last event.
    pub last_disposition: Option<EventDisposition>,
    /// Header deadline recorded by [`Self::remember_header_deadline`].
    pub remembered_header_due: Option<Instant>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self {
            controller: SessionController::new(Config::default()),
            host: RecordingHost::default(),
            document: DocumentId::new("file:///workspace/main.c"),
            start: Instant::now(),
            elapsed_ms: 0,
            last_disposition: None,
            remembered_header_due: None,
        }
    }
}

impl TestWorld {
    /// Current simulated time.
    pub fn now(&self) -> Instant {
        at(self.start, self.elapsed_ms)
    }

    pub fn set_edit_mode(&mut self, mode: EditMode) {
        self.host.edit_mode = mode;
    }

    pub fn open(&mut self, name: &str, language_id: &str, text: &str) {
        self.document = DocumentId::new(format!("file:///workspace/{name}"));
        self.host.set_text(&self.document, text);
        let now = self.now();
        self.controller
            .did_open(self.document.clone(), language_id, now);
    }

    /// Advances the clock and lets due passes run.
    pub fn advance(&mut self, millis: u64) {
        self.elapsed_ms += millis;
        let now = self.now();
        self.controller.poll(&mut self.host, now);
    }

    /// Inserts `inserted` at `position` in the host and reports the change.
    pub fn type_text(&mut self, position: Position, inserted: &str) {
        let text = self.host.text(&self.document);
        let edit = cscribe_syntax::EditOperation {
            insert_at: position,
            text: inserted.to_owned(),
            undo: cscribe_syntax::UndoBehaviour::MergeWithPrevious,
            origin: cscribe_syntax::EditOrigin::Terminator,
        };
        let updated = edit.apply(&text).expect("typing position exists");
        self.host.set_text(&self.document, updated);
        let change = TextChange::incremental(Range::new(position, position), inserted);
        let now = self.now();
        self.last_disposition = Some(self.controller.did_change(
            &mut self.host,
            &self.document,
            &[change],
            now,
        ));
    }

    /// Types a newline at the end of `line`.
    pub fn type_newline(&mut self, line: usize) {
        let text = self.host.text(&self.document);
        let end = SourceBuffer::new(&text)
            .line_end(line)
            .expect("line exists");
        self.type_text(end, "\n");
    }

    /// Types a space at the end of the document.
    pub fn type_space(&mut self) {
        let text = self.host.text(&self.document);
        let end = SourceBuffer::new(&text).end();
        self.type_text(end, " ");
    }

    pub fn save(&mut self) {
        let now = self.now();
        self.last_disposition = Some(self.controller.did_save(&mut self.host, &self.document, now));
    }

    pub fn remember_header_deadline(&mut self) {
        self.remembered_header_due = self
            .controller
            .session(&self.document)
            .and_then(|session| session.header_due());
    }
}
