//! Name → logger cache.
//!
//! Registering a name that is already present silently replaces the
//! previous logger; loggers handed out earlier keep working.

use crate::logger::Logger;
use crate::pipeline::{self, Pipeline};
use dashmap::DashMap;
use serde_json::{Map, Value};
use std::sync::{Arc, LazyLock};

/// Loggers created through one [`Pipeline`], keyed by name.
pub struct Registry {
    pipeline: Arc<Pipeline>,
    loggers: DashMap<String, Logger>,
}

impl Registry {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self {
            pipeline,
            loggers: DashMap::new(),
        }
    }

    /// Create a logger for `name` with `fields` as its context and store
    /// it, replacing any logger registered under the same name.
    pub fn get_logger(&self, name: &str, fields: Map<String, Value>) -> Logger {
        let logger = Logger::new(name, fields, Arc::clone(&self.pipeline));
        self.loggers.insert(name.to_string(), logger.clone());
        logger
    }

    /// Logger currently registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<Logger> {
        self.loggers.get(name).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(|| Registry::new(pipeline::global()));

/// Create and register a logger on the process-wide pipeline.
pub fn get_logger(name: &str, fields: Map<String, Value>) -> Logger {
    GLOBAL.get_logger(name, fields)
}

/// Logger registered under `name` in the process-wide registry.
pub fn lookup(name: &str) -> Option<Logger> {
    GLOBAL.lookup(name)
}
