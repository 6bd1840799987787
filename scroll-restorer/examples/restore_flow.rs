// Example: restoring a saved position across a back navigation while the
// page is still streaming in lazy content.
use scroll_restorer::{
    HistoryState, RestorerHost, RestorerOptions, ScrollBehavior, ScrollPosition, ScrollRestorer,
};

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
    let page = Page {
        document_height: 3000.0,
        viewport_height: 800.0,
        ..Page::default()
    };
    let mut r = ScrollRestorer::new(RestorerOptions::new(), page);

    // The user scrolls down; throttled ticks persist the position.
    r.host_mut().position = ScrollPosition::new(0.0, 1400.0);
    r.handle_scroll(0);
    println!("saved = {:?}", r.saved_position());

    // Navigate away: the next page is short until its content loads.
    r.host_mut().position = ScrollPosition::origin();
    r.host_mut().document_height = 900.0;

    // ...and back. The popstate flags the transition as history navigation.
    r.handle_popstate(5_000);
    r.handle_navigation_finished(None, 5_050);
    println!("phase after navigation = {:?}", r.phase());

    // Lazy content lands; the mutation notification completes the restore.
    r.host_mut().document_height = 3000.0;
    r.handle_mutation(5_400);
    println!("phase = {:?}", r.phase());
    println!("viewport = {:?}", r.host().scroll_position());
}
