use alloc::string::{String, ToString};

use crate::history::{self, HistoryState, StateValue};
use crate::{
    RestoreEvent, RestorePhase, RestorerHost, RestorerOptions, ScrollBehavior, ScrollPosition,
    WaitStatus,
};

/// Window after a popstate during which a (0, 0) scroll observation is
/// suspected to be the platform resetting the viewport on its own.
pub const QUIRK_WINDOW_MS: u64 = 2000;

/// Slack added to the height check when deciding whether a saved position
/// is reachable, absorbing sub-pixel layout variance.
pub const HEIGHT_SLACK_PX: f64 = 10.0;

/// At most one of these exists at a time; starting a new wait cancels the
/// previous one.
#[derive(Clone, Debug)]
enum PendingRestore {
    /// The document is not tall enough for the target yet.
    Position {
        target: ScrollPosition,
        deadline_ms: u64,
    },
    /// The anchor element has not appeared yet. `fall_back_state` is the
    /// side-channel snapshot captured when the wait started; a timeout
    /// restores from it when the navigation was flagged as history.
    Anchor {
        hash: String,
        deadline_ms: u64,
        fall_back_state: Option<HistoryState>,
    },
}

impl PendingRestore {
    fn deadline_ms(&self) -> u64 {
        match self {
            Self::Position { deadline_ms, .. } | Self::Anchor { deadline_ms, .. } => *deadline_ms,
        }
    }
}

/// A headless scroll-restoration engine.
///
/// On every completed navigation it decides whether to scroll to an anchor,
/// restore a saved position, or reset to the top, waiting out lazily
/// rendered content when the target is not reachable yet.
///
/// The engine is event-driven: the adapter forwards platform events as
/// method calls carrying `now_ms`, and all waits are absolute deadlines
/// resolved by whichever of a mutation notification or a [`Self::tick`]
/// reaches them first. Effects go through the [`RestorerHost`] seam.
pub struct ScrollRestorer<H> {
    options: RestorerOptions,
    host: H,
    enabled: bool,
    pending: Option<PendingRestore>,
    quirk_armed: bool,
    last_tick_ms: Option<u64>,
}

impl<H: RestorerHost> core::fmt::Debug for ScrollRestorer<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollRestorer")
            .field("options", &self.options)
            .field("enabled", &self.enabled)
            .field("phase", &self.phase())
            .field("quirk_armed", &self.quirk_armed)
            .field("last_tick_ms", &self.last_tick_ms)
            .finish_non_exhaustive()
    }
}

impl<H: RestorerHost> ScrollRestorer<H> {
    pub fn new(options: RestorerOptions, host: H) -> Self {
        let enabled = options.enabled;
        rdebug!(
            options.debug,
            enabled,
            lazy_timeout_ms = options.lazy_timeout_ms,
            throttle_ms = options.throttle_ms,
            "ScrollRestorer::new"
        );
        Self {
            options,
            host,
            enabled,
            pending: None,
            quirk_armed: false,
            last_tick_ms: None,
        }
    }

    pub fn options(&self) -> &RestorerOptions {
        &self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn phase(&self) -> RestorePhase {
        match &self.pending {
            None => RestorePhase::Idle,
            Some(PendingRestore::Position { .. }) => RestorePhase::AwaitingHeight,
            Some(PendingRestore::Anchor { .. }) => RestorePhase::AwaitingAnchor,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Resumes tracking. Skipped positions are not replayed; the next
    /// scroll tick persists normally.
    pub fn enable(&mut self) {
        self.enabled = true;
        rdebug!(self.options.debug, "scroll restoration enabled");
    }

    /// Stops persisting positions and cancels any pending restore.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.cancel_pending_restore();
        rdebug!(self.options.debug, "scroll restoration disabled");
    }

    /// Drops the pending restore target, if any, without producing an
    /// outcome.
    pub fn cancel_pending_restore(&mut self) {
        if self.pending.take().is_some() {
            rdebug!(self.options.debug, "canceled pending restore");
        }
    }

    /// Persists the current viewport position into the side-channel.
    pub fn save_position(&mut self, now_ms: u64) {
        let position = self.host.scroll_position();
        self.save_position_at(position, now_ms);
    }

    /// Persists a given position into the side-channel, stamping the memo
    /// timestamp. Negative components clamp to 0. No-op while disabled.
    pub fn save_position_at(&mut self, position: ScrollPosition, now_ms: u64) {
        if !self.enabled {
            return;
        }
        let position = ScrollPosition::new(position.x, position.y);
        self.merge_state([
            (history::state_key("x"), StateValue::Number(position.x)),
            (history::state_key("y"), StateValue::Number(position.y)),
            (
                history::state_key("memo_timestamp"),
                StateValue::Number(now_ms as f64),
            ),
        ]);
        rdebug!(
            self.options.debug,
            x = position.x,
            y = position.y,
            "saved scroll position"
        );
    }

    /// Reads the saved position without side effects.
    pub fn saved_position(&self) -> Option<ScrollPosition> {
        history::scroll_from_state(self.host.history_state().as_ref())
    }

    /// Unsets the saved coordinates and memo timestamp. Fields are written
    /// as [`StateValue::Unset`] rather than removed, keeping the entry's
    /// key layout stable.
    pub fn clear_saved_position(&mut self) {
        let Some(mut state) = self.host.history_state() else {
            return;
        };
        state.insert(history::state_key("x"), StateValue::Unset);
        state.insert(history::state_key("y"), StateValue::Unset);
        state.insert(history::state_key("memo_timestamp"), StateValue::Unset);
        self.host.replace_history_state(state);
        rdebug!(self.options.debug, "cleared saved scroll position");
    }

    /// Cancels any pending restore, clears the saved position, and scrolls
    /// to the origin. Works even while disabled.
    pub fn scroll_to_top(&mut self, behavior: Option<ScrollBehavior>) {
        self.cancel_pending_restore();
        self.clear_saved_position();
        let behavior = behavior.unwrap_or(self.options.scroll_behavior);
        self.host.scroll_to(ScrollPosition::origin(), behavior);
        rdebug!(self.options.debug, "scrolled to top");
        self.emit(RestoreEvent::ResetToTop);
    }

    /// Scrolls to the element named by a hash fragment. Returns whether the
    /// element was found.
    ///
    /// A zero resolved offset places the element directly in view; a
    /// nonzero offset scrolls to the element's top minus the offset,
    /// keeping the current horizontal position.
    pub fn scroll_to_anchor(&mut self, hash: &str) -> bool {
        let Some(id) = anchor_id(hash) else {
            return false;
        };
        let offset = self.options.anchor_offset.resolve();
        let behavior = self.options.anchor_behavior;
        let found = if offset == 0.0 {
            self.host.scroll_anchor_into_view(id, behavior)
        } else {
            match self.host.anchor_top(id) {
                Some(top) => {
                    let x = self.host.scroll_position().x;
                    self.host
                        .scroll_to(ScrollPosition::new(x, top - offset), behavior);
                    true
                }
                None => false,
            }
        };
        if found {
            rdebug!(self.options.debug, id, offset, "scrolled to anchor");
        }
        found
    }

    /// Tries [`Self::scroll_to_anchor`] immediately; when the element is
    /// absent, arms an anchor wait bounded by `lazy_timeout_ms`. Mutations
    /// retry the lookup; the first success or the deadline produces the
    /// single [`RestoreEvent::AnchorResolved`] outcome.
    pub fn wait_for_anchor(&mut self, hash: &str, now_ms: u64) -> WaitStatus {
        self.wait_for_anchor_inner(hash, now_ms, None)
    }

    fn wait_for_anchor_inner(
        &mut self,
        hash: &str,
        now_ms: u64,
        fall_back_state: Option<HistoryState>,
    ) -> WaitStatus {
        if self.scroll_to_anchor(hash) {
            self.cancel_pending_restore();
            self.emit(RestoreEvent::AnchorResolved {
                hash: hash.to_string(),
                found: true,
            });
            return WaitStatus::Resolved(true);
        }
        if anchor_id(hash).is_none() {
            self.emit(RestoreEvent::AnchorResolved {
                hash: hash.to_string(),
                found: false,
            });
            if fall_back_state.is_some() {
                self.restore_from_state(fall_back_state.as_ref(), now_ms);
            }
            return WaitStatus::Resolved(false);
        }

        self.cancel_pending_restore();
        rdebug!(self.options.debug, hash, "waiting for anchor");
        self.pending = Some(PendingRestore::Anchor {
            hash: hash.to_string(),
            deadline_ms: now_ms.saturating_add(self.options.lazy_timeout_ms),
            fall_back_state,
        });
        WaitStatus::Pending
    }

    /// Reconciles scroll state after a completed navigation.
    ///
    /// `hash` is the current route's fragment, if any. With a fragment the
    /// anchor waiter runs, falling back to the saved position when the
    /// anchor never appears on a history navigation. Without one, a history
    /// navigation restores the saved position (and clears the navigation
    /// flag); a fresh navigation resets to the top.
    pub fn handle_navigation_finished(&mut self, hash: Option<&str>, now_ms: u64) {
        if !self.enabled {
            return;
        }
        rdebug!(self.options.debug, ?hash, "navigation finished");
        // A completed navigation supersedes whatever the previous one was
        // still waiting for.
        self.cancel_pending_restore();

        let state = self.host.history_state();

        if let Some(hash) = hash.filter(|h| !h.is_empty()) {
            let fall_back = if history::is_navigating_history(state.as_ref()) {
                state
            } else {
                None
            };
            self.wait_for_anchor_inner(hash, now_ms, fall_back);
            return;
        }

        if history::is_navigating_history(state.as_ref()) {
            self.restore_from_state(state.as_ref(), now_ms);
            // The saved coordinates stay; only the flag is consumed.
            self.merge_state([(
                history::state_key("is_navigating_history"),
                StateValue::Bool(false),
            )]);
        } else {
            self.host
                .scroll_to(ScrollPosition::origin(), self.options.scroll_behavior);
            rdebug!(self.options.debug, "fresh navigation, reset to top");
            self.emit(RestoreEvent::ResetToTop);
        }
    }

    /// Marks the start of a back/forward transition: cancels pending work,
    /// arms the reset compensator, and stamps the history-navigation flag
    /// and popstate timestamp into the side-channel.
    pub fn handle_popstate(&mut self, now_ms: u64) {
        rdebug!(self.options.debug, now_ms, "popstate");
        self.cancel_pending_restore();
        self.quirk_armed = true;
        self.merge_state([
            (
                history::state_key("is_navigating_history"),
                StateValue::Number(1.0),
            ),
            (
                history::state_key("popstate_timestamp"),
                StateValue::Number(now_ms as f64),
            ),
        ]);
    }

    /// Observes the viewport scroll. Events inside the throttle window are
    /// dropped; an accepted tick is first offered to the reset compensator
    /// and otherwise persists the current position.
    pub fn handle_scroll(&mut self, now_ms: u64) {
        if !self.enabled {
            return;
        }
        if let Some(last) = self.last_tick_ms {
            if now_ms.saturating_sub(last) < self.options.throttle_ms {
                return;
            }
        }
        self.last_tick_ms = Some(now_ms);

        let position = self.host.scroll_position();
        rtrace!(
            self.options.debug,
            x = position.x,
            y = position.y,
            "scroll tick"
        );
        if !self.compensate_history_reset(position, now_ms) {
            self.save_position_at(position, now_ms);
        }
    }

    /// Reacts to a DOM mutation: retries the pending anchor lookup or
    /// height check. A mutation arriving at or past the deadline resolves
    /// the wait as a timeout instead.
    pub fn handle_mutation(&mut self, now_ms: u64) {
        let Some(deadline) = self.pending.as_ref().map(PendingRestore::deadline_ms) else {
            return;
        };
        if now_ms >= deadline {
            self.resolve_timeout(now_ms);
            return;
        }

        match self.pending.take() {
            Some(PendingRestore::Position {
                target,
                deadline_ms,
            }) => {
                if self.try_scroll_to(target) {
                    rdebug!(self.options.debug, "pending scroll restoration successful");
                    self.emit(RestoreEvent::PositionRestored {
                        position: target,
                        forced: false,
                    });
                } else {
                    self.pending = Some(PendingRestore::Position {
                        target,
                        deadline_ms,
                    });
                }
            }
            Some(PendingRestore::Anchor {
                hash,
                deadline_ms,
                fall_back_state,
            }) => {
                if self.scroll_to_anchor(&hash) {
                    self.emit(RestoreEvent::AnchorResolved { hash, found: true });
                } else {
                    self.pending = Some(PendingRestore::Anchor {
                        hash,
                        deadline_ms,
                        fall_back_state,
                    });
                }
            }
            None => {}
        }
    }

    /// Advances deadline handling. Adapters call this from their timer
    /// primitive; a tick at or past the pending deadline produces the
    /// timeout outcome. Returns the phase after the tick.
    pub fn tick(&mut self, now_ms: u64) -> RestorePhase {
        if let Some(deadline) = self.pending.as_ref().map(PendingRestore::deadline_ms) {
            if now_ms >= deadline {
                self.resolve_timeout(now_ms);
            }
        }
        self.phase()
    }

    fn resolve_timeout(&mut self, now_ms: u64) {
        match self.pending.take() {
            Some(PendingRestore::Position { target, .. }) => {
                // Give up waiting for the document to grow and apply the
                // last known target unconditionally.
                self.host.scroll_to(target, self.options.scroll_behavior);
                rdebug!(
                    self.options.debug,
                    x = target.x,
                    y = target.y,
                    "gave up waiting, forced scroll"
                );
                self.emit(RestoreEvent::PositionRestored {
                    position: target,
                    forced: true,
                });
            }
            Some(PendingRestore::Anchor {
                hash,
                fall_back_state,
                ..
            }) => {
                rdebug!(self.options.debug, hash, "anchor timeout reached");
                self.emit(RestoreEvent::AnchorResolved { hash, found: false });
                if fall_back_state.is_some() {
                    self.restore_from_state(fall_back_state.as_ref(), now_ms);
                }
            }
            None => {}
        }
    }

    fn restore_from_state(&mut self, state: Option<&HistoryState>, now_ms: u64) {
        let Some(target) = history::scroll_from_state(state) else {
            return;
        };
        rdebug!(
            self.options.debug,
            x = target.x,
            y = target.y,
            "restoring scroll from history state"
        );

        if self.try_scroll_to(target) {
            self.cancel_pending_restore();
            self.emit(RestoreEvent::PositionRestored {
                position: target,
                forced: false,
            });
            return;
        }

        // The document has not grown past the target yet; wait for it.
        rdebug!(
            self.options.debug,
            y = target.y,
            "document too short, queuing restore"
        );
        self.cancel_pending_restore();
        self.pending = Some(PendingRestore::Position {
            target,
            deadline_ms: now_ms.saturating_add(self.options.lazy_timeout_ms),
        });
    }

    fn try_scroll_to(&mut self, target: ScrollPosition) -> bool {
        let max_scroll_y = self.host.document_height() - self.host.viewport_height();
        if target.y <= max_scroll_y + HEIGHT_SLACK_PX {
            self.host.scroll_to(target, self.options.scroll_behavior);
            true
        } else {
            false
        }
    }

    /// Detects the platform resetting the viewport to the origin right
    /// after a back/forward navigation. A claimed tick re-invokes
    /// saved-position restoration instead of persisting (0, 0) and
    /// consumes the arm; unclaimed ticks leave the arm in place.
    fn compensate_history_reset(&mut self, position: ScrollPosition, now_ms: u64) -> bool {
        if !(position.is_origin() && self.quirk_armed) {
            return false;
        }
        let state = self.host.history_state();
        let recent_popstate = history::timestamp_from_state("popstate_timestamp", state.as_ref())
            .is_some_and(|ts| (now_ms as f64) - ts < QUIRK_WINDOW_MS as f64);
        if recent_popstate && history::is_navigating_history(state.as_ref()) {
            rdebug!(
                self.options.debug,
                "reverting spurious scroll reset after history navigation"
            );
            self.restore_from_state(state.as_ref(), now_ms);
            self.quirk_armed = false;
            return true;
        }
        false
    }

    fn merge_state(&mut self, entries: impl IntoIterator<Item = (String, StateValue)>) {
        // Re-read before merging: the bag is shared with the host
        // navigation system and may have changed since the last read.
        let mut state = self.host.history_state().unwrap_or_default();
        for (key, value) in entries {
            state.insert(key, value);
        }
        self.host.replace_history_state(state);
    }

    fn emit(&self, event: RestoreEvent) {
        if let Some(cb) = &self.options.on_restore {
            cb(event);
        }
    }
}

/// Strips one leading fragment marker; a blank id is no anchor at all.
fn anchor_id(hash: &str) -> Option<&str> {
    let id = hash.strip_prefix('#').unwrap_or(hash);
    (!id.is_empty()).then_some(id)
}
