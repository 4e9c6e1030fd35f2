//! Environment switches read once per process.
//!
//! The core pipeline never reads the environment itself; these helpers
//! produce a [`Switches`] value that is handed to a
//! [`Pipeline`](crate::pipeline::Pipeline).

use std::sync::OnceLock;

/// Runtime environment name; `development` turns on the text line output.
pub const TYPED_LOG_ENV_ENV: &str = "TYPED_LOG_ENV";

/// Any non-empty value turns every log call into a no-op.
pub const TYPED_LOG_DISABLED_ENV: &str = "TYPED_LOG_DISABLED";

/// Any non-empty value also prints JSON events in development mode.
pub const TYPED_LOG_DEBUG_ENV: &str = "TYPED_LOG_DEBUG";

/// Output mode switches.
///
/// **Fields**
/// - `development`: write a human-readable line per call instead of JSON.
/// - `no_logging`: skip every log call entirely.
/// - `debug`: in development mode, write the JSON event as well.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Switches {
    pub development: bool,
    pub no_logging: bool,
    pub debug: bool,
}

impl Switches {
    /// Production JSON output, logging enabled.
    pub fn production() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build switches from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let set = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());
        Self {
            development: lookup(TYPED_LOG_ENV_ENV).as_deref() == Some("development"),
            no_logging: set(TYPED_LOG_DISABLED_ENV),
            debug: set(TYPED_LOG_DEBUG_ENV),
        }
    }
}

/// Switches from the process environment, read on first use.
pub fn process_switches() -> Switches {
    static SWITCHES: OnceLock<Switches> = OnceLock::new();
    *SWITCHES.get_or_init(Switches::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_empty_environment() {
        assert_eq!(Switches::from_lookup(lookup(&[])), Switches::production());
    }

    #[test]
    fn test_development_and_debug() {
        let switches = Switches::from_lookup(lookup(&[(TYPED_LOG_ENV_ENV, "development"), (TYPED_LOG_DEBUG_ENV, "1")]));
        assert!(switches.development);
        assert!(switches.debug);
        assert!(!switches.no_logging);
    }

    #[test]
    fn test_other_env_names_are_production() {
        let switches = Switches::from_lookup(lookup(&[(TYPED_LOG_ENV_ENV, "staging")]));
        assert!(!switches.development);
    }

    #[test]
    fn test_disabled_needs_a_value() {
        assert!(Switches::from_lookup(lookup(&[(TYPED_LOG_DISABLED_ENV, "yes")])).no_logging);
        assert!(!Switches::from_lookup(lookup(&[(TYPED_LOG_DISABLED_ENV, "")])).no_logging);
    }
}
