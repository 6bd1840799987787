// Example: scrolling to an in-page anchor that is rendered asynchronously,
// with a fixed header offset.
use scroll_restorer::{
    HistoryState, RestoreEvent, RestorerHost, RestorerOptions, ScrollBehavior, ScrollPosition,
    ScrollRestorer, WaitStatus,
};

#[derive(Default)]
struct Page {
    state: Option<HistoryState>,
    position: ScrollPosition,
    document_height: f64,
    viewport_height: f64,
    anchors: Vec<(String, f64)>,
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

    fn anchor_top(&self, id: &str) -> Option<f64> {
        self.anchors
            .iter()
            .find(|(anchor, _)| anchor == id)
            .map(|(_, top)| *top)
    }

    fn scroll_anchor_into_view(&mut self, id: &str, _behavior: ScrollBehavior) -> bool {
        let Some(top) = self.anchor_top(id) else {
            return false;
        };
        self.position = ScrollPosition::new(self.position.x, top);
        true
    }
}

fn main() {
    let page = Page {
        document_height: 2400.0,
        viewport_height: 800.0,
        ..Page::default()
    };
    // 64 px fixed header: anchor scrolls land just below it.
    let options = RestorerOptions::new()
        .with_anchor_offset_value(64.0)
        .with_on_restore(Some(|event: RestoreEvent| println!("outcome: {event:?}")));
    let mut r = ScrollRestorer::new(options, page);

    // The comments section has not rendered yet.
    let status = r.wait_for_anchor("#comments", 0);
    assert_eq!(status, WaitStatus::Pending);
    println!("waiting, phase = {:?}", r.phase());

    // It appears 300 ms later; the mutation notification finishes the job.
    r.host_mut().anchors.push(("comments".into(), 1800.0));
    r.handle_mutation(300);
    println!("viewport = {:?}", r.host().scroll_position());
}
