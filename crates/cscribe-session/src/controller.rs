//! Event handling and pass scheduling.

use std::collections::BTreeMap;
use std::time::Instant;

use cscribe_config::{Config, Timing};
use cscribe_syntax::{
    EditOperation, SourceBuffer, compute_missing_headers, compute_missing_prototypes, scan,
    terminator_edit,
};
use tracing::{debug, info, trace, warn};

use crate::errors::{HostOperation, SessionError};
use crate::guard::{EditGuard, Expiry};
use crate::host::{DocumentId, EditOutcome, EditStatus, EditorHost, TextChange};
use crate::session::DocumentSession;

const PASS_TARGET: &str = "cscribe_session::pass";
const GUARD_TARGET: &str = "cscribe_session::guard";

/// What the controller did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// The event was processed.
    Handled,
    /// The document is not tracked.
    Untracked,
    /// The document's guard is held; the event was dropped.
    Guarded,
}

/// Owns every [`DocumentSession`] and turns editor events into passes.
#[derive(Debug, Clone)]
pub struct SessionController {
    config: Config,
    sessions: BTreeMap<DocumentId, DocumentSession>,
    active: Option<DocumentId>,
}

impl SessionController {
    /// Creates a controller with no open documents.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            sessions: BTreeMap::new(),
            active: None,
        }
    }

    /// Settings the controller runs with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Session state for `document`, if tracked.
    #[must_use]
    pub fn session(&self, document: &DocumentId) -> Option<&DocumentSession> {
        self.sessions.get(document)
    }

    /// The document that last received focus.
    #[must_use]
    pub const fn active_document(&self) -> Option<&DocumentId> {
        self.active.as_ref()
    }

    /// Starts tracking `document` when its language is handled.
    ///
    /// Schedules header and prototype passes. Returns whether the document
    /// is tracked.
    pub fn did_open(&mut self, document: DocumentId, language_id: &str, now: Instant) -> bool {
        if !self.config.handles_language(language_id) {
            debug!(
                target: PASS_TARGET,
                uri = %document,
                language = language_id,
                "ignoring document in unhandled language"
            );
            return false;
        }
        let mut session = DocumentSession::new(language_id);
        schedule(&self.config, &mut session, now);
        debug!(target: PASS_TARGET, uri = %document, event = "open", "tracking document");
        self.sessions.insert(document, session);
        true
    }

    /// Handles content changes already applied by the host.
    ///
    /// A typed newline triggers the terminator check on the line it was
    /// typed on. Every handled change restarts the header and prototype
    /// timers.
    pub fn did_change(
        &mut self,
        host: &mut dyn EditorHost,
        document: &DocumentId,
        changes: &[TextChange],
        now: Instant,
    ) -> EventDisposition {
        let Self {
            config, sessions, ..
        } = self;
        let Some(session) = sessions.get_mut(document) else {
            return EventDisposition::Untracked;
        };
        if session.guard().is_held(now) {
            trace!(target: GUARD_TARGET, uri = %document, event = "change", "guard held; change ignored");
            return EventDisposition::Guarded;
        }
        if config.features.semicolons {
            for line in changes.iter().filter_map(TextChange::newline_line) {
                match check_terminator(host, document, session, line, now, config.timing) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(error) => report(&error),
                }
            }
        }
        schedule(config, session, now);
        EventDisposition::Handled
    }

    /// Handles a cursor move to `line`.
    ///
    /// Leaving a line runs the terminator check on it.
    pub fn cursor_moved(
        &mut self,
        host: &mut dyn EditorHost,
        document: &DocumentId,
        line: u32,
        now: Instant,
    ) -> EventDisposition {
        let Self {
            config, sessions, ..
        } = self;
        let Some(session) = sessions.get_mut(document) else {
            return EventDisposition::Untracked;
        };
        if session.guard().is_held(now) {
            trace!(target: GUARD_TARGET, uri = %document, event = "cursor", "guard held; cursor move ignored");
            return EventDisposition::Guarded;
        }
        let previous = session.move_cursor(line);
        if !config.features.semicolons {
            return EventDisposition::Handled;
        }
        if let Some(left) = previous.filter(|left| *left != line) {
            let left_index = usize::try_from(left).unwrap_or(usize::MAX);
            if let Err(error) =
                check_terminator(host, document, session, left_index, now, config.timing)
            {
                report(&error);
            }
        }
        EventDisposition::Handled
    }

    /// Publishes the full diagnostic set and schedules a header pass.
    pub fn did_save(
        &mut self,
        host: &mut dyn EditorHost,
        document: &DocumentId,
        now: Instant,
    ) -> EventDisposition {
        let Self {
            config, sessions, ..
        } = self;
        let Some(session) = sessions.get_mut(document) else {
            return EventDisposition::Untracked;
        };
        if config.features.diagnostics
            && let Err(error) = publish_diagnostics(host, document)
        {
            report(&error);
        }
        if config.features.headers {
            session.schedule_headers(now, config.timing.header_delay());
        }
        EventDisposition::Handled
    }

    /// Clears diagnostics and drops the session.
    pub fn did_close(&mut self, host: &mut dyn EditorHost, document: &DocumentId) -> EventDisposition {
        if self.sessions.remove(document).is_none() {
            return EventDisposition::Untracked;
        }
        if self.active.as_ref() == Some(document) {
            self.active = None;
        }
        if let Err(source) = host.clear_diagnostics(document) {
            report(&SessionError::host(
                document.clone(),
                HostOperation::ClearDiagnostics,
                source,
            ));
        }
        debug!(target: PASS_TARGET, uri = %document, event = "close", "session dropped");
        EventDisposition::Handled
    }

    /// Records `document` as active and resets its cursor tracking.
    pub fn focus_changed(&mut self, document: &DocumentId) -> EventDisposition {
        let Some(session) = self.sessions.get_mut(document) else {
            return EventDisposition::Untracked;
        };
        session.forget_cursor();
        self.active = Some(document.clone());
        EventDisposition::Handled
    }

    /// Settles an edit the host reported as [`EditStatus::Pending`].
    pub fn edit_settled(&mut self, document: &DocumentId, outcome: EditOutcome, now: Instant) {
        let release = self.config.timing.guard_release();
        let Some(session) = self.sessions.get_mut(document) else {
            return;
        };
        let guard = session.guard_mut();
        if !matches!(*guard, EditGuard::InFlight { .. }) {
            debug!(target: GUARD_TARGET, uri = %document, ?outcome, "late edit confirmation ignored");
            return;
        }
        match outcome {
            EditOutcome::Applied => {
                guard.complete(now, release);
                trace!(target: GUARD_TARGET, uri = %document, "edit applied; guard cooling");
            }
            EditOutcome::Failed => {
                guard.release();
                warn!(target: GUARD_TARGET, uri = %document, "host failed to apply edit; guard released");
            }
        }
    }

    /// Runs every pass that is due at `now`.
    ///
    /// A document whose guard is held keeps its due passes for later. Once
    /// a pass issues an edit, the document's remaining passes wait for the
    /// guard to release.
    pub fn poll(&mut self, host: &mut dyn EditorHost, now: Instant) {
        let Self {
            config, sessions, ..
        } = self;
        let timing = config.timing;
        for (document, session) in sessions.iter_mut() {
            match session.guard_mut().expire(now, timing.edit_timeout()) {
                Some(Expiry::TimedOut) => warn!(
                    target: GUARD_TARGET,
                    uri = %document,
                    "edit was not confirmed in time; guard released"
                ),
                Some(Expiry::Cooled) => {
                    trace!(target: GUARD_TARGET, uri = %document, "guard released");
                }
                None => {}
            }
            if session.guard().is_held(now) {
                continue;
            }
            if session.take_due_headers(now) {
                match run_header_pass(host, document, session, now, timing) {
                    Ok(true) => continue,
                    Ok(false) => {}
                    Err(error) => report(&error),
                }
            }
            if session.take_due_prototypes(now)
                && let Err(error) = run_prototype_pass(host, document, session, now, timing)
            {
                report(&error);
            }
        }
    }

    /// Earliest instant at which [`Self::poll`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let edit_timeout = self.config.timing.edit_timeout();
        self.sessions
            .values()
            .filter_map(|session| session.next_deadline(edit_timeout))
            .min()
    }
}

fn schedule(config: &Config, session: &mut DocumentSession, now: Instant) {
    if config.features.headers {
        session.schedule_headers(now, config.timing.header_delay());
    }
    if config.features.prototypes {
        session.schedule_prototypes(now, config.timing.prototype_delay());
    }
}

fn read_text(host: &dyn EditorHost, document: &DocumentId) -> Result<String, SessionError> {
    host.document_text(document)
        .ok_or_else(|| SessionError::missing_text(document.clone()))
}

/// Sends `edit` and arms the guard. The guard is released again when the
/// host rejects the edit.
fn apply(
    host: &mut dyn EditorHost,
    document: &DocumentId,
    session: &mut DocumentSession,
    edit: &EditOperation,
    now: Instant,
    timing: Timing,
) -> Result<(), SessionError> {
    let guard = session.guard_mut();
    guard.begin(now);
    match host.apply_edit(document, edit) {
        Ok(EditStatus::Applied) => {
            guard.complete(now, timing.guard_release());
            Ok(())
        }
        Ok(EditStatus::Pending) => Ok(()),
        Err(source) => {
            guard.release();
            Err(SessionError::host(
                document.clone(),
                HostOperation::ApplyEdit,
                source,
            ))
        }
    }
}

fn check_terminator(
    host: &mut dyn EditorHost,
    document: &DocumentId,
    session: &mut DocumentSession,
    line: usize,
    now: Instant,
    timing: Timing,
) -> Result<bool, SessionError> {
    let text = read_text(host, document)?;
    let Some(edit) = terminator_edit(&SourceBuffer::new(&text), line) else {
        return Ok(false);
    };
    debug!(target: PASS_TARGET, uri = %document, line, "appending terminator");
    apply(host, document, session, &edit, now, timing)?;
    Ok(true)
}

fn run_header_pass(
    host: &mut dyn EditorHost,
    document: &DocumentId,
    session: &mut DocumentSession,
    now: Instant,
    timing: Timing,
) -> Result<bool, SessionError> {
    let text = read_text(host, document)?;
    let buffer = SourceBuffer::new(&text);
    let missing = compute_missing_headers(&buffer);
    let Some(edit) = missing.to_edit(&buffer) else {
        trace!(target: PASS_TARGET, uri = %document, "no headers missing");
        return Ok(false);
    };
    debug!(
        target: PASS_TARGET,
        uri = %document,
        headers = ?missing.headers,
        "inserting headers"
    );
    apply(host, document, session, &edit, now, timing)?;
    Ok(true)
}

fn run_prototype_pass(
    host: &mut dyn EditorHost,
    document: &DocumentId,
    session: &mut DocumentSession,
    now: Instant,
    timing: Timing,
) -> Result<bool, SessionError> {
    let text = read_text(host, document)?;
    let Some(missing) = compute_missing_prototypes(&SourceBuffer::new(&text)) else {
        trace!(target: PASS_TARGET, uri = %document, "no include or main; prototypes skipped");
        return Ok(false);
    };
    let Some(edit) = missing.to_edit() else {
        return Ok(false);
    };
    debug!(
        target: PASS_TARGET,
        uri = %document,
        count = missing.candidates.len(),
        "inserting prototypes"
    );
    apply(host, document, session, &edit, now, timing)?;
    Ok(true)
}

fn publish_diagnostics(host: &mut dyn EditorHost, document: &DocumentId) -> Result<(), SessionError> {
    let text = read_text(host, document)?;
    let diagnostics = scan(&SourceBuffer::new(&text));
    info!(
        target: PASS_TARGET,
        uri = %document,
        count = diagnostics.len(),
        "publishing diagnostics"
    );
    host.publish_diagnostics(document, diagnostics)
        .map_err(|source| {
            SessionError::host(document.clone(), HostOperation::PublishDiagnostics, source)
        })
}

fn report(error: &SessionError) {
    warn!(
        target: PASS_TARGET,
        operation = %error.operation(),
        error = %error,
        "background pass failed"
    );
}
