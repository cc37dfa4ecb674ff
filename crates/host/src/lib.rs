//! Host window-system boundary.
//!
//! The layout engine never talks to a compositor directly; it consumes the
//! capabilities below as an opaque handle. A shell embedding the engine
//! implements [`WindowSystem`] over its compositor objects; tests and
//! headless embeddings use [`HeadlessWindowSystem`].

use std::sync::Mutex;

use scrollgrid_core_model::{Rect, WindowId};
use tracing::debug;

/// Capabilities the engine needs from the host shell.
///
/// All methods take `&self`: backends are expected to synchronize
/// internally, since the engine shares one handle between the pipeline and
/// the view layer.
pub trait WindowSystem: Send + Sync {
    /// Current frame of a window, absolute coordinates. `None` when the
    /// window is gone.
    fn frame(&self, window: WindowId) -> Option<Rect>;

    /// Work area of the monitor the window is on (excludes panels/docks).
    fn work_area(&self, window: WindowId) -> Rect;

    /// Move/resize a window, absolute coordinates.
    fn set_frame(&self, window: WindowId, rect: Rect);

    /// Ask the window to take input focus. The host answers with a
    /// focus-changed notification of its own; the engine never assumes
    /// the request succeeded.
    fn request_focus(&self, window: WindowId, timestamp: u32);

    /// MRU-ordered window handles of the active workspace, most recent
    /// first. A strict permutation of the currently open windows.
    fn mru_windows(&self) -> Vec<WindowId>;
}

#[derive(Debug)]
struct HeadlessState {
    windows: Vec<(WindowId, Rect)>,
    mru: Vec<WindowId>,
    placements: Vec<(WindowId, Rect)>,
    focus_requests: Vec<(WindowId, u32)>,
}

/// In-memory [`WindowSystem`] with a scripted window table.
///
/// Keeps a real MRU list and records every placement and focus request so
/// tests can assert on the engine's outward behavior.
#[derive(Debug)]
pub struct HeadlessWindowSystem {
    work_area: Rect,
    state: Mutex<HeadlessState>,
}

impl HeadlessWindowSystem {
    /// Create a headless host with a single monitor work area.
    pub fn new(work_area: Rect) -> Self {
        Self {
            work_area,
            state: Mutex::new(HeadlessState {
                windows: Vec::new(),
                mru: Vec::new(),
                placements: Vec::new(),
                focus_requests: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HeadlessState> {
        // A poisoned lock means a prior test panicked; the state is still
        // plain data, so continue with it.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a window at `frame` and make it the most recently used.
    pub fn open_window(&self, window: WindowId, frame: Rect) {
        let mut state = self.lock();
        state.windows.retain(|&(w, _)| w != window);
        state.windows.push((window, frame));
        state.mru.retain(|&w| w != window);
        state.mru.insert(0, window);
    }

    /// Drop a window from the table and the MRU ordering.
    pub fn close_window(&self, window: WindowId) {
        let mut state = self.lock();
        state.windows.retain(|&(w, _)| w != window);
        state.mru.retain(|&w| w != window);
    }

    /// Simulate the host granting focus: moves the window to the front of
    /// the MRU ordering. The caller then feeds the matching focus-changed
    /// notification into the engine.
    pub fn focus_window(&self, window: WindowId) {
        let mut state = self.lock();
        state.mru.retain(|&w| w != window);
        state.mru.insert(0, window);
    }

    /// Every `set_frame` call made so far, in order.
    pub fn placements(&self) -> Vec<(WindowId, Rect)> {
        self.lock().placements.clone()
    }

    /// Every `request_focus` call made so far, in order.
    pub fn focus_requests(&self) -> Vec<(WindowId, u32)> {
        self.lock().focus_requests.clone()
    }

    /// The frame a window was last placed at (or opened with).
    pub fn current_frame(&self, window: WindowId) -> Option<Rect> {
        self.lock()
            .windows
            .iter()
            .find(|&&(w, _)| w == window)
            .map(|&(_, rect)| rect)
    }
}

impl WindowSystem for HeadlessWindowSystem {
    fn frame(&self, window: WindowId) -> Option<Rect> {
        self.current_frame(window)
    }

    fn work_area(&self, _window: WindowId) -> Rect {
        self.work_area
    }

    fn set_frame(&self, window: WindowId, rect: Rect) {
        let mut state = self.lock();
        if let Some(entry) = state.windows.iter_mut().find(|(w, _)| *w == window) {
            entry.1 = rect;
        } else {
            debug!(window, "set_frame for unknown window ignored");
        }
        state.placements.push((window, rect));
    }

    fn request_focus(&self, window: WindowId, timestamp: u32) {
        debug!(window, timestamp, "focus requested");
        self.lock().focus_requests.push((window, timestamp));
    }

    fn mru_windows(&self) -> Vec<WindowId> {
        self.lock().mru.clone()
    }
}
