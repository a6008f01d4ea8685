pub mod serializer;
pub mod structured;
pub mod subscribe;
pub mod verbose;

pub use serializer::{EventPayload, EventSerializer, TaskField};
pub use structured::{StateFilter, StructuredRenderer, StructuredRendererOptions};
pub use subscribe::subscribe_tree;
pub use verbose::{VerboseRenderer, VerboseRendererOptions};

use crate::drains::Drain;
use crate::logger::{Logger, LoggerOptions};
use crate::task::Task;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Static properties of a renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RendererCapabilities {
    /// Renders correctly when the output is not a terminal.
    pub non_tty: bool,
}

pub trait Renderer: Send + Sync {
    /// Subscribe to the task tree. Calling it twice subscribes twice.
    fn render(&self);

    /// Mark the session as finished. Listeners stay attached, so events
    /// raised during teardown are still rendered.
    fn end(&self);

    fn capabilities(&self) -> RendererCapabilities;
}

/// Whether a renderer is between `render()` and `end()`.
#[derive(Clone, Default)]
pub struct RenderSession(Arc<AtomicBool>);

impl RenderSession {
    pub(crate) fn start(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub(crate) fn finish(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Renderer choice plus its options, e.g.
///
/// ```
/// use taskrender::renderers::RendererConfig;
///
/// let config = RendererConfig::from_json(r#"{"renderer":"structured","messages":["skip"]}"#).unwrap();
/// assert!(matches!(config, RendererConfig::Structured(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "renderer", rename_all = "lowercase")]
pub enum RendererConfig {
    Structured(StructuredRendererOptions),
    Verbose(VerboseRendererOptions),
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig::Verbose(VerboseRendererOptions::default())
    }
}

impl RendererConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse renderer configuration")
    }

    pub fn build(self, tasks: Vec<Task>, drain: Arc<dyn Drain>) -> Box<dyn Renderer> {
        match self {
            RendererConfig::Structured(options) => {
                let logger = Logger::new(LoggerOptions::default(), drain);
                Box::new(StructuredRenderer::with_logger(tasks, options, logger))
            }
            RendererConfig::Verbose(options) => {
                let logger = Logger::new(options.logger.clone(), drain);
                Box::new(VerboseRenderer::with_logger(tasks, options, logger))
            }
        }
    }
}
