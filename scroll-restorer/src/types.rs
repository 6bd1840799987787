use alloc::string::String;

/// A viewport scroll position in pixels.
///
/// Components are always non-negative; use [`ScrollPosition::new`] to clamp
/// raw host coordinates.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

impl ScrollPosition {
    /// Creates a position, clamping negative components to 0.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.max(0.0),
            y: y.max(0.0),
        }
    }

    /// The (0, 0) position.
    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn is_origin(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// How a scroll should be performed by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollBehavior {
    /// Jump to the target position without animation.
    #[default]
    Instant,
    /// Animate towards the target position.
    Smooth,
}

/// The restoration engine's current wait state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestorePhase {
    /// Nothing pending.
    Idle,
    /// An anchor target was not found yet; mutations retry until the deadline.
    AwaitingAnchor,
    /// The document is not tall enough for a saved position yet; mutations
    /// retry the height check until the deadline.
    AwaitingHeight,
}

/// The outcome of starting an anchor wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitStatus {
    /// The wait concluded synchronously; the payload is "anchor found".
    Resolved(bool),
    /// The anchor is absent so far. The outcome arrives through the
    /// `on_restore` callback as [`RestoreEvent::AnchorResolved`].
    Pending,
}

/// A concluded restore decision, reported through `on_restore`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestoreEvent {
    /// An anchor wait produced its single outcome (found or timed out).
    AnchorResolved { hash: String, found: bool },
    /// A saved position was applied. `forced` is set when the lazy-wait
    /// deadline elapsed and the scroll was applied unconditionally.
    PositionRestored {
        position: ScrollPosition,
        forced: bool,
    },
    /// A fresh navigation (or an explicit `scroll_to_top`) reset the
    /// viewport to the origin.
    ResetToTop,
}
