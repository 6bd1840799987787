use crate::*;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use scroll_restorer::{
    HistoryState, RestorePhase, RestorerHost, RestorerOptions, ScrollBehavior, ScrollPosition,
    StateValue, state_key,
};

#[derive(Debug, Default)]
struct SimPage {
    state: Option<HistoryState>,
    position: ScrollPosition,
    document_height: f64,
    viewport_height: f64,
    manual_restoration_calls: usize,
}

impl RestorerHost for SimPage {
    fn history_state(&self) -> Option<HistoryState> {
        self.state.clone()
    }

    fn replace_history_state(&mut self, state: HistoryState) {
        self.state = Some(state);
    }

    fn scroll_position(&self) -> ScrollPosition {
        self.position
    }

    fn scroll_to(&mut self, position: ScrollPosition, _behavior: ScrollBehavior) {
        self.position = position;
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn anchor_top(&self, _id: &str) -> Option<f64> {
        None
    }

    fn scroll_anchor_into_view(&mut self, _id: &str, _behavior: ScrollBehavior) -> bool {
        false
    }

    fn set_manual_scroll_restoration(&mut self) {
        self.manual_restoration_calls += 1;
    }
}

fn tall_page() -> SimPage {
    SimPage {
        document_height: 2000.0,
        viewport_height: 800.0,
        ..SimPage::default()
    }
}

#[test]
fn activation_is_idempotent() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);

    let mut session = Session::new();
    let first = session.activate(RestorerOptions::new(), || {
        counter.fetch_add(1, Ordering::SeqCst);
        tall_page()
    });
    let second = session.activate(RestorerOptions::new(), || {
        built.fetch_add(1, Ordering::SeqCst);
        tall_page()
    });

    assert!(first.same_engine(&second));
    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert_eq!(first.with(|r| r.host().manual_restoration_calls), 1);
}

#[test]
fn deactivate_returns_session_to_uninitialized() {
    let mut session = Session::new();
    let handle = session.activate(RestorerOptions::new(), tall_page);
    assert!(session.is_active());

    // A pending wait is canceled by teardown.
    handle.wait_for_anchor("#missing", 0);
    assert_eq!(handle.phase(), RestorePhase::AwaitingAnchor);

    session.deactivate();
    assert!(!session.is_active());
    assert!(session.handle().is_none());
    assert_eq!(handle.phase(), RestorePhase::Idle);

    // The next activation builds a fresh engine.
    let fresh = session.activate(RestorerOptions::new(), tall_page);
    assert!(!fresh.same_engine(&handle));
    assert_eq!(fresh.with(|r| r.host().manual_restoration_calls), 1);
}

#[test]
fn handle_drives_the_full_restore_flow() {
    let mut session = Session::new();
    let handle = session.activate(RestorerOptions::new(), tall_page);

    handle.with(|r| r.host_mut().position = ScrollPosition::new(0.0, 700.0));
    handle.handle_scroll(0);
    assert_eq!(handle.saved_position(), Some(ScrollPosition::new(0.0, 700.0)));

    handle.handle_popstate(1000);
    handle.with(|r| r.host_mut().position = ScrollPosition::origin());
    handle.handle_navigation_finished(None, 1050);

    assert_eq!(
        handle.with(|r| r.host().scroll_position()),
        ScrollPosition::new(0.0, 700.0)
    );
    assert_eq!(
        handle.with(|r| r.host().state.as_ref().unwrap()
            .get(&state_key("is_navigating_history"))
            .cloned()),
        Some(StateValue::Bool(false))
    );
}

#[test]
fn clones_share_the_engine() {
    let mut session = Session::new();
    let handle = session.activate(RestorerOptions::new(), tall_page);
    let other = handle.clone();

    other.disable();
    assert!(!handle.is_enabled());
    handle.enable();
    assert!(other.is_enabled());
}

#[test]
fn handle_delegates_anchor_waits() {
    let mut session = Session::new();
    let handle = session.activate(RestorerOptions::new(), tall_page);

    handle.wait_for_anchor("#late", 0);
    assert_eq!(handle.phase(), RestorePhase::AwaitingAnchor);

    // The deadline passing through `tick` resolves the wait.
    assert_eq!(handle.tick(5000), RestorePhase::Idle);
}
