//! Intent submission side of the pipeline.
//!
//! Generators are cheap clones of the queue's sender half. Host adapters
//! and command frontends hold one and translate their stimuli into
//! intents; ordering is whatever order `submit` is called in, and nothing
//! is ever reordered afterwards.

use scrollgrid_core_model::WindowId;
use scrollgrid_host::WindowSystem;
use tokio::sync::mpsc;
use tracing::warn;

use crate::intent::{Intent, LayoutCommand};

/// Handle for feeding intents into the pipeline.
#[derive(Debug, Clone)]
pub struct EventGenerator {
    tx: mpsc::UnboundedSender<Intent>,
}

impl EventGenerator {
    /// Create a generator and the receiver half the pipeline drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Intent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn submit(&self, intent: Intent) {
        if self.tx.send(intent).is_err() {
            warn!(?intent, "intent dropped, pipeline is gone");
        }
    }

    pub fn window_opened(&self, window: WindowId) {
        self.submit(Intent::WindowOpened(window));
    }

    pub fn window_closing(&self, window: WindowId) {
        self.submit(Intent::WindowClosing(window));
    }

    pub fn window_focused(&self, window: WindowId) {
        self.submit(Intent::WindowFocused(window));
    }

    pub fn command(&self, command: LayoutCommand) {
        self.submit(Intent::Command(command));
    }

    pub fn shutdown(&self) {
        self.submit(Intent::Shutdown);
    }

    /// Replay windows that were already open when the engine started.
    ///
    /// Emits one `WindowOpened` per window, oldest first, so insertion
    /// order reproduces the host's MRU order and the most recent window
    /// ends up focused. Returns the number of windows captured.
    pub fn capture_open_windows(&self, host: &dyn WindowSystem) -> usize {
        let windows = host.mru_windows();
        for &window in windows.iter().rev() {
            self.window_opened(window);
        }
        windows.len()
    }
}
