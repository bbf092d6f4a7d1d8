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

use aether_core::telemetry::MetricsResult;
use aether_telemetry::{CounterHandle, GaugeHandle, MetricsRegistry};

const NAMESPACE: &str = "udp_assets";

/// Metric handles updated by the UDP asset provider.
#[derive(Debug, Clone)]
pub struct TransferMetrics {
    requests_sent: CounterHandle,
    transfers_completed: CounterHandle,
    transfers_canceled: CounterHandle,
    transfers_timed_out: CounterHandle,
    bytes_received: CounterHandle,
    active_transfers: GaugeHandle,
}

impl TransferMetrics {
    /// Registers every transfer metric in `registry`.
    pub fn register(registry: &MetricsRegistry) -> MetricsResult<Self> {
        Ok(Self {
            requests_sent: registry.register_counter(
                NAMESPACE,
                "requests_sent",
                "Transfer requests put on the wire",
            )?,
            transfers_completed: registry.register_counter(
                NAMESPACE,
                "transfers_completed",
                "Transfers fully received",
            )?,
            transfers_canceled: registry.register_counter(
                NAMESPACE,
                "transfers_canceled",
                "Transfers canceled by the server",
            )?,
            transfers_timed_out: registry.register_counter(
                NAMESPACE,
                "transfers_timed_out",
                "Transfers canceled after going idle",
            )?,
            bytes_received: registry.register_counter(
                NAMESPACE,
                "bytes_received",
                "Bytes of completed assets",
            )?,
            active_transfers: registry.register_gauge(
                NAMESPACE,
                "active_transfers",
                "Transfers currently in flight",
            )?,
        })
    }

    /// Handle counting requests sent.
    pub fn requests_sent(&self) -> &CounterHandle {
        &self.requests_sent
    }

    /// Handle counting completed transfers.
    pub fn transfers_completed(&self) -> &CounterHandle {
        &self.transfers_completed
    }

    /// Handle counting server-side cancellations.
    pub fn transfers_canceled(&self) -> &CounterHandle {
        &self.transfers_canceled
    }

    /// Handle counting idle timeouts.
    pub fn transfers_timed_out(&self) -> &CounterHandle {
        &self.transfers_timed_out
    }

    /// Handle counting bytes of completed assets.
    pub fn bytes_received(&self) -> &CounterHandle {
        &self.bytes_received
    }

    /// Handle tracking transfers in flight.
    pub fn active_transfers(&self) -> &GaugeHandle {
        &self.active_transfers
    }

    pub(crate) fn bump(counter: &CounterHandle, amount: u64) {
        if let Err(e) = counter.increment_by(amount) {
            log::warn!("Failed to update metric {}: {e}", counter.id());
        }
    }

    pub(crate) fn set_active(&self, count: usize) {
        if let Err(e) = self.active_transfers.set(count as f64) {
            log::warn!("Failed to update metric {}: {e}", self.active_transfers.id());
        }
    }
}
