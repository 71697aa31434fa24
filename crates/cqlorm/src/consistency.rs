//! CQL consistency levels.
//!
//! A passthrough value: builders carry it to the session unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// CQL consistency levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Consistency {
    /// Any node, hinted handoff included.
    Any,
    /// Single replica.
    One,
    /// Two replicas.
    Two,
    /// Three replicas.
    Three,
    /// Quorum of replicas.
    #[default]
    Quorum,
    /// All replicas.
    All,
    /// Quorum in the local datacenter.
    LocalQuorum,
    /// Quorum in each datacenter.
    EachQuorum,
    /// Serial, for lightweight transactions.
    Serial,
    /// Local serial, for lightweight transactions.
    LocalSerial,
    /// One replica in the local datacenter.
    LocalOne,
}

impl Consistency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::One => "ONE",
            Self::Two => "TWO",
            Self::Three => "THREE",
            Self::Quorum => "QUORUM",
            Self::All => "ALL",
            Self::LocalQuorum => "LOCAL_QUORUM",
            Self::EachQuorum => "EACH_QUORUM",
            Self::Serial => "SERIAL",
            Self::LocalSerial => "LOCAL_SERIAL",
            Self::LocalOne => "LOCAL_ONE",
        }
    }
}

impl fmt::Display for Consistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
