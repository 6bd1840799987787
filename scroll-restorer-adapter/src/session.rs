use std::sync::{Arc, Mutex, PoisonError};

use scroll_restorer::{
    RestorePhase, RestorerHost, RestorerOptions, ScrollBehavior, ScrollPosition, ScrollRestorer,
    WaitStatus,
};

/// A session-scoped registry guaranteeing a single active restorer.
///
/// An application shell keeps one `Session` for its lifetime and calls
/// [`Session::activate`] from wherever the restorer is requested; only the
/// first call builds the engine and claims scroll authority from the
/// platform, every later call returns the cached handle.
pub struct Session<H> {
    active: Option<SessionHandle<H>>,
}

impl<H: RestorerHost> Session<H> {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Activates the session, building the engine on first use.
    ///
    /// `make_host` is only invoked when the session is uninitialized, and
    /// `set_manual_scroll_restoration` is called on the fresh host exactly
    /// once. Repeated activation ignores `options` and returns the cached
    /// handle unchanged.
    pub fn activate(
        &mut self,
        options: RestorerOptions,
        make_host: impl FnOnce() -> H,
    ) -> SessionHandle<H> {
        if let Some(handle) = &self.active {
            return handle.clone();
        }
        let mut host = make_host();
        host.set_manual_scroll_restoration();
        let handle = SessionHandle {
            inner: Arc::new(Mutex::new(ScrollRestorer::new(options, host))),
        };
        self.active = Some(handle.clone());
        handle
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The cached handle, when the session has been activated.
    pub fn handle(&self) -> Option<SessionHandle<H>> {
        self.active.clone()
    }

    /// Tears the session down: cancels pending work and returns the
    /// registry to uninitialized, so the next [`Session::activate`] builds
    /// a fresh engine. Outstanding handles keep their (now detached)
    /// engine alive but the session no longer refers to it.
    pub fn deactivate(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.cancel_pending_restore();
        }
    }
}

impl<H: RestorerHost> Default for Session<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> core::fmt::Debug for Session<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("active", &self.active.is_some())
            .finish()
    }
}

/// A cloneable, mutex-guarded handle to the session's engine.
///
/// All delegations lock, run, and unlock; the single mutex preserves the
/// ordering guarantee the engine relies on (navigation handling completes
/// before the next scroll tick is processed).
pub struct SessionHandle<H> {
    inner: Arc<Mutex<ScrollRestorer<H>>>,
}

impl<H> Clone for SessionHandle<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> core::fmt::Debug for SessionHandle<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionHandle").finish_non_exhaustive()
    }
}

impl<H: RestorerHost> SessionHandle<H> {
    /// Runs `f` with exclusive access to the engine.
    ///
    /// This is the escape hatch for anything the delegations below do not
    /// cover (host access, options inspection).
    pub fn with<R>(&self, f: impl FnOnce(&mut ScrollRestorer<H>) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Whether two handles refer to the same engine.
    pub fn same_engine(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn save_position(&self, now_ms: u64) {
        self.with(|r| r.save_position(now_ms));
    }

    pub fn save_position_at(&self, position: ScrollPosition, now_ms: u64) {
        self.with(|r| r.save_position_at(position, now_ms));
    }

    pub fn saved_position(&self) -> Option<ScrollPosition> {
        self.with(|r| r.saved_position())
    }

    pub fn clear_saved_position(&self) {
        self.with(|r| r.clear_saved_position());
    }

    pub fn scroll_to_anchor(&self, hash: &str) -> bool {
        self.with(|r| r.scroll_to_anchor(hash))
    }

    pub fn wait_for_anchor(&self, hash: &str, now_ms: u64) -> WaitStatus {
        self.with(|r| r.wait_for_anchor(hash, now_ms))
    }

    pub fn cancel_pending_restore(&self) {
        self.with(|r| r.cancel_pending_restore());
    }

    pub fn scroll_to_top(&self, behavior: Option<ScrollBehavior>) {
        self.with(|r| r.scroll_to_top(behavior));
    }

    pub fn enable(&self) {
        self.with(|r| r.enable());
    }

    pub fn disable(&self) {
        self.with(|r| r.disable());
    }

    pub fn is_enabled(&self) -> bool {
        self.with(|r| r.is_enabled())
    }

    pub fn phase(&self) -> RestorePhase {
        self.with(|r| r.phase())
    }

    pub fn handle_popstate(&self, now_ms: u64) {
        self.with(|r| r.handle_popstate(now_ms));
    }

    pub fn handle_navigation_finished(&self, hash: Option<&str>, now_ms: u64) {
        self.with(|r| r.handle_navigation_finished(hash, now_ms));
    }

    pub fn handle_scroll(&self, now_ms: u64) {
        self.with(|r| r.handle_scroll(now_ms));
    }

    pub fn handle_mutation(&self, now_ms: u64) {
        self.with(|r| r.handle_mutation(now_ms));
    }

    pub fn tick(&self, now_ms: u64) -> RestorePhase {
        self.with(|r| r.tick(now_ms))
    }
}
