// Example: one session, many activation sites.
//
// The adapter flow is typically:
// 1) the application shell owns a `Session` for its whole lifetime
// 2) every component that needs the restorer calls `activate` and gets the
//    same handle back
// 3) platform event listeners forward popstate/navigation/scroll/mutation
//    events through any clone of the handle
use scroll_restorer::{
    HistoryState, RestorerHost, RestorerOptions, ScrollBehavior, ScrollPosition,
};
use scroll_restorer_adapter::Session;

#[derive(Default)]
struct Page {
    state: Option<HistoryState>,
    position: ScrollPosition,
    document_height: f64,
    viewport_height: f64,
}

impl RestorerHost for Page {
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
}

fn main() {
    let mut session = Session::new();

    let handle = session.activate(RestorerOptions::new(), || Page {
        document_height: 2400.0,
        viewport_height: 800.0,
        ..Page::default()
    });
    // A second activation site gets the cached engine back.
    let again = session.activate(RestorerOptions::new(), Page::default);
    println!("same engine: {}", handle.same_engine(&again));

    // Scroll, navigate away and back, restore.
    handle.with(|r| r.host_mut().position = ScrollPosition::new(0.0, 950.0));
    handle.handle_scroll(0);
    handle.handle_popstate(3_000);
    handle.with(|r| r.host_mut().position = ScrollPosition::origin());
    handle.handle_navigation_finished(None, 3_050);

    println!("viewport = {:?}", handle.with(|r| r.host().scroll_position()));

    session.deactivate();
    println!("active after teardown: {}", session.is_active());
}
