//! Runtime configuration.

use serde::{Deserialize, Serialize};

/// Settings for a [`Runtime`](crate::runtime::Runtime).
///
/// The default places no bound on cascades, so a cyclic subscription graph
/// with unconditional reactions runs forever, exactly as wired.
///
/// ```rust
/// use statecast::RuntimeConfig;
///
/// let config = RuntimeConfig::from_json(r#"{ "cascade_limit": 500 }"#).unwrap();
/// assert_eq!(config.cascade_limit, Some(500));
/// assert_eq!(RuntimeConfig::default().cascade_limit, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Maximum number of work items (action calls plus deliveries) a single
    /// top-level call may process.
    pub cascade_limit: Option<usize>,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cascade_limit(mut self, limit: usize) -> Self {
        self.cascade_limit = Some(limit);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
