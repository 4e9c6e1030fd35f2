use std::collections::BTreeMap;
use std::fmt;

/// Severity of a log call, written verbatim into the `level` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&tracing::Level> for Level {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            _ => Level::Debug,
        }
    }
}

/// Output channel a sink exposes for a finished line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkMethod {
    Log,
    Info,
    Debug,
    Warn,
    Error,
}

/// Table mapping levels to the sink method that receives their lines.
///
/// Levels without an entry go to [`SinkMethod::Log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRoutes {
    routes: BTreeMap<Level, SinkMethod>,
}

impl LevelRoutes {
    /// Table with no entries: everything goes to `Log`.
    pub fn empty() -> Self {
        Self { routes: BTreeMap::new() }
    }

    pub fn route(mut self, level: Level, method: SinkMethod) -> Self {
        self.routes.insert(level, method);
        self
    }

    pub fn method_for(&self, level: Level) -> SinkMethod {
        self.routes.get(&level).copied().unwrap_or(SinkMethod::Log)
    }
}

impl Default for LevelRoutes {
    fn default() -> Self {
        Self::empty()
            .route(Level::Warn, SinkMethod::Warn)
            .route(Level::Error, SinkMethod::Error)
    }
}
