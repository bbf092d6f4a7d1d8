// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Tunables of the [`UdpAssetProvider`](super::UdpAssetProvider).
///
/// Usually loaded from a RON file; any field left out takes its default.
///
/// ```
/// use aether_agents::ProviderConfig;
///
/// let config = ProviderConfig::from_ron_str("(transfer_timeout_secs: None)").unwrap();
/// assert!(config.transfer_timeout().is_none());
/// assert_eq!(config.name, "Legacy UDP");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Human-readable provider name.
    pub name: String,

    /// Seconds a transfer may go without receiving any data before it is
    /// canceled. The clock restarts on every packet, so a large transfer that
    /// keeps making progress is never cut off. `None` disables timeouts.
    pub transfer_timeout_secs: Option<f64>,

    /// Download priority sent with every request.
    pub request_priority: f32,

    /// When storage is missing or refuses an asset, still hand the completed
    /// bytes to every requester as an uncached asset.
    pub notify_without_storage: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: "Legacy UDP".to_string(),
            transfer_timeout_secs: Some(120.0),
            request_priority: 100.0,
            notify_without_storage: true,
        }
    }
}

impl ProviderConfig {
    /// Parses a configuration from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).context("Failed to parse provider configuration")
    }

    /// Reads and parses a RON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read provider configuration {}", path.display()))?;
        Self::from_ron_str(&text)
            .with_context(|| format!("Invalid provider configuration in {}", path.display()))
    }

    /// The idle timeout, if enabled. Values that are not positive, not
    /// finite, or too large for a [`Duration`] disable it.
    pub fn transfer_timeout(&self) -> Option<Duration> {
        self.transfer_timeout_secs
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}
