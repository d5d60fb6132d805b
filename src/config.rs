//! Ring configuration
//!
//! A ring can be described in JSON and built in one step:
//!
//! ```json
//! { "hash": "crc32", "members": ["10.0.0.1:6379", "10.0.0.2:6379"] }
//! ```

use crate::hash::HashAlgorithm;
use crate::ring::Ring;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Ring configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingConfig {
    /// Hash algorithm for keys and members
    pub hash: HashAlgorithm,

    /// Initial members, added in order
    pub members: Vec<String>,
}

impl RingConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: RingConfig =
            serde_json::from_str(json).context("Invalid ring configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ring configuration {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("In {}", path.display()))
    }

    /// Check that every member identifier is usable
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(index) = self.members.iter().position(|m| m.trim().is_empty()) {
            bail!("Member #{} has an empty identifier", index);
        }
        Ok(())
    }

    /// Build a ring with the configured algorithm and members
    ///
    /// Members are added in order, so a later member wins a hash collision.
    pub fn build(&self) -> Ring {
        let ring = Ring::with_algorithm(self.hash);
        for member in &self.members {
            ring.add(member);
        }

        info!(
            "Built ring with {} members ({} configured, hash {})",
            ring.len(),
            self.members.len(),
            self.hash
        );
        ring
    }
}
