//! Behavioural tests for the session controller using `rstest-bdd`.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use cscribe_syntax::EditOrigin;

use crate::EventDisposition;
use crate::EditGuard;
use crate::tests::support::{EditMode, HELPER_AFTER_MAIN, RISKY_MAIN, TestWorld};

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

fn unquote(raw: &str) -> &str {
    raw.trim_matches('"')
}

#[given("the host confirms edits later")]
fn given_deferred_host(world: &RefCell<TestWorld>) {
    world.borrow_mut().set_edit_mode(EditMode::Deferred);
}

#[given("the host rejects edits")]
fn given_rejecting_host(world: &RefCell<TestWorld>) {
    world.borrow_mut().set_edit_mode(EditMode::Reject);
}

#[given("an open C document containing {text}")]
fn given_open_c_document(world: &RefCell<TestWorld>, text: String) {
    world.borrow_mut().open("main.c", "c", unquote(&text));
}

#[given("an open C document with a helper defined after main")]
fn given_helper_after_main(world: &RefCell<TestWorld>) {
    world.borrow_mut().open("main.c", "c", HELPER_AFTER_MAIN);
}

#[given("an open C document with an unsafe copy and an unchecked fopen")]
fn given_risky_document(world: &RefCell<TestWorld>) {
    world.borrow_mut().open("main.c", "c", RISKY_MAIN);
}

#[given("a document in language {language} containing {text}")]
fn given_other_language(world: &RefCell<TestWorld>, language: String, text: String) {
    world
        .borrow_mut()
        .open("main.py", unquote(&language), unquote(&text));
}

#[when("a newline is typed at the end of line {line}")]
fn when_newline_typed(world: &RefCell<TestWorld>, line: usize) {
    world.borrow_mut().type_newline(line);
}

#[when("a space is typed")]
fn when_space_typed(world: &RefCell<TestWorld>) {
    world.borrow_mut().type_space();
}

#[when("the header deadline is remembered")]
fn when_header_deadline_remembered(world: &RefCell<TestWorld>) {
    world.borrow_mut().remember_header_deadline();
}

#[when("{count} changes arrive {gap} ms apart")]
fn when_change_burst(world: &RefCell<TestWorld>, count: usize, gap: u64) {
    let mut w = world.borrow_mut();
    for _ in 0..count {
        w.advance(gap);
        w.type_space();
    }
}

#[when("{millis} ms pass")]
fn when_time_passes(world: &RefCell<TestWorld>, millis: u64) {
    world.borrow_mut().advance(millis);
}

#[when("the document is saved")]
fn when_saved(world: &RefCell<TestWorld>) {
    world.borrow_mut().save();
}

#[when("the unsafe copy is removed and the document is saved")]
fn when_unsafe_copy_removed(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let document = w.document.clone();
    let fixed = w
        .host
        .text(&document)
        .replace("strcpy(buf, \"hi\");", "buf[0] = 'h';");
    w.host.set_text(&document, fixed);
    w.save();
}

#[then("{count} edit has been requested")]
fn then_edit_count(world: &RefCell<TestWorld>, count: usize) {
    assert_eq!(world.borrow().host.edits.len(), count);
}

#[then("{count} edits have been requested")]
fn then_edits_count(world: &RefCell<TestWorld>, count: usize) {
    assert_eq!(world.borrow().host.edits.len(), count);
}

#[then("the last event was guarded")]
fn then_last_guarded(world: &RefCell<TestWorld>) {
    assert_eq!(
        world.borrow().last_disposition,
        Some(EventDisposition::Guarded)
    );
}

#[then("the last event was handled")]
fn then_last_handled(world: &RefCell<TestWorld>) {
    assert_eq!(
        world.borrow().last_disposition,
        Some(EventDisposition::Handled)
    );
}

#[then("the last event was untracked")]
fn then_last_untracked(world: &RefCell<TestWorld>) {
    assert_eq!(
        world.borrow().last_disposition,
        Some(EventDisposition::Untracked)
    );
}

#[then("the header deadline is unchanged")]
fn then_header_deadline_unchanged(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let current = w
        .controller
        .session(&w.document)
        .and_then(|session| session.header_due());
    assert!(w.remembered_header_due.is_some());
    assert_eq!(current, w.remembered_header_due);
}

#[then("the guard is idle")]
fn then_guard_idle(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    let session = w.controller.session(&w.document).expect("document tracked");
    assert_eq!(session.guard(), EditGuard::Idle);
}

#[then("no prototype has been inserted")]
fn then_no_prototype(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    assert!(
        w.host
            .edits
            .iter()
            .all(|(_, edit)| edit.origin != EditOrigin::Prototypes)
    );
}

#[then("a prototype for {name} has been inserted")]
fn then_prototype_inserted(world: &RefCell<TestWorld>, name: String) {
    let w = world.borrow();
    let expected = format!("{}(", unquote(&name));
    let inserted = w
        .host
        .edits
        .iter()
        .find(|(_, edit)| edit.origin == EditOrigin::Prototypes)
        .expect("a prototype edit");
    assert!(inserted.1.text.contains(&expected), "{:?}", inserted.1.text);
}

#[then("{count} diagnostics are published")]
fn then_diagnostics_published(world: &RefCell<TestWorld>, count: usize) {
    let w = world.borrow();
    let published = w.host.last_published().expect("diagnostics published");
    assert_eq!(published.len(), count, "{published:?}");
}

#[then("no pass is pending")]
fn then_no_pass_pending(world: &RefCell<TestWorld>) {
    assert!(world.borrow().controller.next_deadline().is_none());
}

#[scenario(
    path = "tests/features/session_controller.feature",
    name = "Changes are ignored while an edit settles"
)]
fn changes_ignored_while_settling(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_controller.feature",
    name = "Each change restarts the prototype timer"
)]
fn change_restarts_prototype_timer(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_controller.feature",
    name = "A rejected edit releases the guard"
)]
fn rejected_edit_releases_guard(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_controller.feature",
    name = "Saving publishes the full diagnostic set"
)]
fn save_publishes_full_set(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_controller.feature",
    name = "Documents in other languages are ignored"
)]
fn other_languages_ignored(world: RefCell<TestWorld>) {
    drop(world);
}
