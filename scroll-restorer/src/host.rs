use crate::{HistoryState, ScrollBehavior, ScrollPosition};

/// The platform surface a [`crate::ScrollRestorer`] drives.
///
/// The engine holds no platform objects of its own: an adapter implements
/// this trait over the real page (or a simulation) and forwards navigation,
/// scroll, and mutation events into the engine with timestamps.
///
/// History access follows a "replace, don't push" discipline: the engine
/// only ever merges into the current entry's bag and writes it back via
/// [`RestorerHost::replace_history_state`]; it never creates entries.
pub trait RestorerHost {
    /// The current history entry's side-channel bag, or `None` when the
    /// underlying value is not a key/value record.
    fn history_state(&self) -> Option<HistoryState>;

    /// Replaces the current history entry's bag in place.
    fn replace_history_state(&mut self, state: HistoryState);

    /// Live viewport scroll offsets.
    fn scroll_position(&self) -> ScrollPosition;

    /// Scrolls the viewport to an absolute position.
    fn scroll_to(&mut self, position: ScrollPosition, behavior: ScrollBehavior);

    /// Full scrollable document height, in pixels.
    fn document_height(&self) -> f64;

    /// Visible viewport height, in pixels.
    fn viewport_height(&self) -> f64;

    /// Absolute top of the element with the given id, falling back to a
    /// name-attribute match. `None` when no such element exists yet.
    fn anchor_top(&self, id: &str) -> Option<f64>;

    /// Places the element with the given id directly in view. Returns
    /// whether the element was found.
    fn scroll_anchor_into_view(&mut self, id: &str, behavior: ScrollBehavior) -> bool;

    /// Claims sole scroll authority from the platform (suppresses native
    /// scroll restoration). Called once per session activation; hosts
    /// without a native mechanism can keep the default no-op.
    fn set_manual_scroll_restoration(&mut self) {}
}
