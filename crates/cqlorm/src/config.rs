//! Session configuration.

use crate::consistency::Consistency;
use serde::{Deserialize, Serialize};

/// Configuration for [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Consistency level new builders start with.
    pub consistency: Consistency,
    /// Execute UPDATE/DELETE statements that have no WHERE predicate.
    ///
    /// When `false`, such statements are refused unless the builder opts in with
    /// `allow_unscoped()`.
    pub allow_unscoped_mutations: bool,
    /// Emit a debug event for every statement handed to the session.
    pub log_queries: bool,
    /// Truncate logged statements to this many bytes.
    pub max_log_length: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            consistency: Consistency::default(),
            allow_unscoped_mutations: false,
            log_queries: false,
            max_log_length: Some(1000),
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default consistency level.
    pub fn consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = consistency;
        self
    }

    /// Allow UPDATE/DELETE without predicates on every builder.
    pub fn allow_unscoped_mutations(mut self, allow: bool) -> Self {
        self.allow_unscoped_mutations = allow;
        self
    }

    /// Enable statement logging.
    pub fn log_queries(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    /// Set the logged statement length limit (`None` disables truncation).
    pub fn max_log_length(mut self, max: Option<usize>) -> Self {
        self.max_log_length = max;
        self
    }
}
