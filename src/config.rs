use arc_swap::ArcSwap;
use serde::{Deserialize, Deserializer};
use std::sync::{Arc, LazyLock};

/// Default key under which the event timestamp is written.
pub const DEFAULT_TIMESTAMP_KEY: &str = "@timestamp";

/// Options read by every log call.
///
/// **Fields**
/// - `typecast`: when `false`, structured fields are merged into the event
///   as they are, with no key suffixes.
/// - `timestamp`: key for the ISO-8601 timestamp, or `None` to leave the
///   timestamp out. In serialized form `false` disables it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub typecast: bool,
    #[serde(deserialize_with = "timestamp_key")]
    pub timestamp: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            typecast: true,
            timestamp: Some(DEFAULT_TIMESTAMP_KEY.to_string()),
        }
    }
}

impl Config {
    pub fn without_timestamp(mut self) -> Self {
        self.timestamp = None;
        self
    }

    pub fn with_timestamp_key(mut self, key: impl Into<String>) -> Self {
        self.timestamp = Some(key.into());
        self
    }

    pub fn with_typecast(mut self, enabled: bool) -> Self {
        self.typecast = enabled;
        self
    }
}

fn timestamp_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Key(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Flag(false) => Ok(None),
        Raw::Flag(true) => Ok(Some(DEFAULT_TIMESTAMP_KEY.to_string())),
        Raw::Key(key) => Ok(Some(key)),
    }
}

/// Shared, swappable [`Config`].
///
/// Readers take a snapshot with [`ConfigHandle::load`] once per log call;
/// a [`ConfigHandle::store`] becomes visible to the next call. There is no
/// isolation between concurrent writers beyond last-write-wins.
#[derive(Clone, Debug)]
pub struct ConfigHandle {
    inner: Arc<ArcSwap<Config>>,
}

impl ConfigHandle {
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    pub fn load(&self) -> Arc<Config> {
        self.inner.load_full()
    }

    pub fn store(&self, config: Config) {
        self.inner.store(Arc::new(config));
    }

    pub fn update(&self, f: impl Fn(&mut Config)) {
        self.inner.rcu(|current| {
            let mut next = Config::clone(current);
            f(&mut next);
            next
        });
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

static GLOBAL: LazyLock<ConfigHandle> = LazyLock::new(ConfigHandle::default);

/// Process-wide config used by [`get_logger`](crate::registry::get_logger)
/// and the free [`typecast`](crate::typecast::typecast) function.
pub fn global() -> &'static ConfigHandle {
    &GLOBAL
}

/// Snapshot of the process-wide config.
pub fn current() -> Arc<Config> {
    GLOBAL.load()
}

/// Replace the process-wide config.
pub fn set(config: Config) {
    GLOBAL.store(config);
}

/// Modify the process-wide config in place.
pub fn update(f: impl Fn(&mut Config)) {
    GLOBAL.update(f);
}
