use crate::layer::TypecastLayer;
use crate::pipeline::Pipeline;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Configuration of the `tracing` bridge.
///
/// **Fields**
/// - `max_level`: least severe level forwarded to the pipeline.
/// - `context`: fields merged into every forwarded event.
/// - `enable_stdout`: if `true`, a `tracing_subscriber::fmt::Layer` is
///   stacked on top so events are also printed in the plain `fmt` format.
#[derive(Clone, Debug)]
pub struct LayerConfig {
    pub max_level: tracing::Level,
    pub context: Map<String, Value>,
    pub enable_stdout: bool,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            max_level: tracing::Level::TRACE,
            context: Map::new(),
            enable_stdout: false,
        }
    }
}

/// Install a global `tracing` subscriber that forwards events into
/// `pipeline`.
///
/// **Effects**
///
/// Installs a [`Registry`] combined with [`TypecastLayer`] as the
/// global default subscriber, so all `tracing` events in the process are
/// typecast and written to the pipeline's sink. Fails if a global
/// subscriber is already set.
pub fn init_tracing_with_config(pipeline: Arc<Pipeline>, config: LayerConfig) -> Result<(), SetGlobalDefaultError> {
    let layer = TypecastLayer::new(pipeline)
        .with_max_level(config.max_level)
        .with_context(config.context);

    // The two stacks have different types, hence two branches.
    if config.enable_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer();
        let subscriber = Registry::default().with(layer).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::set_global_default(subscriber)
    }
}

/// Initialize the bridge with [`LayerConfig::default`].
pub fn init_tracing(pipeline: Arc<Pipeline>) -> Result<(), SetGlobalDefaultError> {
    init_tracing_with_config(pipeline, LayerConfig::default())
}
