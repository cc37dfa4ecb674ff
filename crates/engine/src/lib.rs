//! Scrollgrid engine: the serialized event pipeline around the layout
//! model.
//!
//! Everything that can change workspace state arrives as an [`Intent`]
//! on one FIFO queue and is interpreted by one [`EventProcessor`], one
//! intent at a time. Host adapters feed the queue through an
//! [`EventGenerator`]; adopted models are pushed back to the host by the
//! view layer. There are no other mutation paths, which is what makes
//! "model reflects events in arrival order" a property rather than a
//! hope.

pub mod config;
pub mod diagnostics;
pub mod generator;
pub mod intent;
pub mod manager;
pub mod processor;
pub mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use scrollgrid_host::WindowSystem;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{Config, SettingsHandle};
pub use generator::EventGenerator;
pub use intent::{Intent, LayoutCommand};
pub use processor::{EngineError, EventProcessor, Transition};

/// The assembled pipeline: queue, processor, and host handle.
pub struct Engine {
    host: Arc<dyn WindowSystem>,
    settings: SettingsHandle,
    generator: EventGenerator,
    rx: mpsc::UnboundedReceiver<Intent>,
    processor: EventProcessor,
}

impl Engine {
    /// Wire up a pipeline over a host.
    pub fn new(config: Config, host: Arc<dyn WindowSystem>) -> Self {
        let settings = SettingsHandle::new(config);
        let (generator, rx) = EventGenerator::channel();
        let processor = EventProcessor::new(host.clone(), settings.clone());
        Self { host, settings, generator, rx, processor }
    }

    /// A handle for submitting intents. Clone freely.
    pub fn generator(&self) -> EventGenerator {
        self.generator.clone()
    }

    /// A handle for reading and replacing the configuration.
    pub fn settings(&self) -> SettingsHandle {
        self.settings.clone()
    }

    /// Drain the queue until shutdown.
    ///
    /// One intent per iteration, with a cooperative yield between
    /// intents so a burst cannot starve the rest of the runtime. Returns
    /// the processor so callers can inspect the final state.
    pub async fn run(mut self) -> EventProcessor {
        info!("event pipeline running");
        while let Some(intent) = self.rx.recv().await {
            let transition = self.processor.process(intent);
            if matches!(transition, Transition::Adopted) {
                if let Some(model) = self.processor.model() {
                    view::apply_grid(self.host.as_ref(), &model.grid());
                }
            }
            if matches!(intent, Intent::Shutdown) {
                break;
            }
            tokio::task::yield_now().await;
        }
        info!("event pipeline stopped");
        self.processor
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (normally the
/// configured `behavior.log_level`) is used.
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log level: {default_level}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))?;

    Ok(())
}
