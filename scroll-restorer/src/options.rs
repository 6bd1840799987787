use alloc::sync::Arc;

use crate::{RestoreEvent, ScrollBehavior};

/// Tracker persistence throttle, in milliseconds.
///
/// Chosen to be larger than typical scroll-event bursts while still
/// capturing the final rest position before a navigation occurs.
pub const MEMO_INTERVAL_MS: u64 = 601;

/// A callback fired whenever a restore decision concludes.
///
/// This is how asynchronous outcomes (anchor waits, lazy-height waits)
/// reach the adapter.
pub type OnRestoreCallback = Arc<dyn Fn(RestoreEvent) + Send + Sync>;

/// Pixel offset applied when scrolling to anchors.
#[derive(Clone)]
pub enum AnchorOffset {
    /// A fixed pixel offset.
    Value(f64),
    /// A lazily evaluated offset provider (called once per anchor scroll).
    Provider(Arc<dyn Fn() -> f64 + Send + Sync>),
}

impl AnchorOffset {
    pub(crate) fn resolve(&self) -> f64 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for AnchorOffset {
    fn default() -> Self {
        Self::Value(0.0)
    }
}

impl core::fmt::Debug for AnchorOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`crate::ScrollRestorer`].
///
/// Cheap to clone: callback fields are stored in `Arc`s.
#[derive(Clone)]
pub struct RestorerOptions {
    /// Master switch; `false` starts the engine inert until `enable()`.
    pub enabled: bool,

    /// Upper bound for anchor-wait and height-wait retries, in milliseconds.
    pub lazy_timeout_ms: u64,

    /// Behavior for restoring saved positions and scrolling to top.
    pub scroll_behavior: ScrollBehavior,

    /// Behavior for anchor scrolls.
    pub anchor_behavior: ScrollBehavior,

    /// Pixel offset (or offset provider) applied to anchor scrolls.
    pub anchor_offset: AnchorOffset,

    /// Tracker persistence throttle; at most one side-channel write per
    /// window. Defaults to [`MEMO_INTERVAL_MS`].
    pub throttle_ms: u64,

    /// Runtime gate for decision-level trace output.
    pub debug: bool,

    /// Optional callback fired when a restore decision concludes.
    pub on_restore: Option<OnRestoreCallback>,
}

impl RestorerOptions {
    pub fn new() -> Self {
        Self {
            enabled: true,
            lazy_timeout_ms: 5000,
            scroll_behavior: ScrollBehavior::Instant,
            anchor_behavior: ScrollBehavior::Smooth,
            anchor_offset: AnchorOffset::default(),
            throttle_ms: MEMO_INTERVAL_MS,
            debug: false,
            on_restore: None,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_lazy_timeout_ms(mut self, lazy_timeout_ms: u64) -> Self {
        self.lazy_timeout_ms = lazy_timeout_ms;
        self
    }

    pub fn with_scroll_behavior(mut self, scroll_behavior: ScrollBehavior) -> Self {
        self.scroll_behavior = scroll_behavior;
        self
    }

    pub fn with_anchor_behavior(mut self, anchor_behavior: ScrollBehavior) -> Self {
        self.anchor_behavior = anchor_behavior;
        self
    }

    pub fn with_anchor_offset(mut self, anchor_offset: AnchorOffset) -> Self {
        self.anchor_offset = anchor_offset;
        self
    }

    pub fn with_anchor_offset_value(mut self, offset: f64) -> Self {
        self.anchor_offset = AnchorOffset::Value(offset);
        self
    }

    pub fn with_anchor_offset_provider(
        mut self,
        offset: impl Fn() -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.anchor_offset = AnchorOffset::Provider(Arc::new(offset));
        self
    }

    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_on_restore(
        mut self,
        on_restore: Option<impl Fn(RestoreEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_restore = on_restore.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for RestorerOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for RestorerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RestorerOptions")
            .field("enabled", &self.enabled)
            .field("lazy_timeout_ms", &self.lazy_timeout_ms)
            .field("scroll_behavior", &self.scroll_behavior)
            .field("anchor_behavior", &self.anchor_behavior)
            .field("anchor_offset", &self.anchor_offset)
            .field("throttle_ms", &self.throttle_ms)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
