//! Bridges: dependencies of a zome on other DNAs.

use serde::{Deserialize, Serialize};

use super::zome::empty_object;

/// Whether the DNA can run without the bridged DNA.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgePresence {
    #[default]
    Required,
    Optional,
}

/// A named reference to another DNA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bridge {
    #[serde(default)]
    pub presence: BridgePresence,

    /// Local name the zome uses to call through this bridge.
    #[serde(default)]
    pub handle: String,

    /// How the callee is identified (by address or by the traits it must
    /// expose). Kept as written.
    #[serde(default = "empty_object")]
    pub reference: serde_json::Value,
}

impl Bridge {
    pub fn new(presence: BridgePresence, handle: impl Into<String>) -> Self {
        Self {
            presence,
            handle: handle.into(),
            reference: empty_object(),
        }
    }

    pub fn is_required(&self) -> bool {
        self.presence == BridgePresence::Required
    }
}
