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

use aether_core::asset::{RawAssetHandle, RequestTag};
use aether_core::event::{AssetEvent, EventBus};
use aether_data::transfer::TransferRecord;

/// Publishes transfer notifications onto the asset event bus.
#[derive(Debug, Clone)]
pub struct AssetNotifier {
    sender: flume::Sender<AssetEvent>,
}

impl AssetNotifier {
    /// Publishes through an existing sender.
    pub fn new(sender: flume::Sender<AssetEvent>) -> Self {
        Self { sender }
    }

    /// Publishes onto `bus`.
    pub fn from_bus(bus: &EventBus<AssetEvent>) -> Self {
        Self::new(bus.sender())
    }

    /// Announces the current counters of `record`.
    pub fn progress(&self, record: &TransferRecord) {
        let status = record.status();
        self.publish(AssetEvent::Progress {
            id: record.asset_id(),
            type_name: record.type_name(),
            size: status.size,
            received: status.received,
            received_contiguous: status.received_contiguous,
        });
    }

    /// Announces that `record` will not complete.
    pub fn canceled(&self, record: &TransferRecord) {
        self.publish(AssetEvent::Canceled {
            id: record.asset_id(),
            type_name: record.type_name(),
        });
    }

    /// Announces the finished asset to one requester.
    pub fn ready(&self, asset: &RawAssetHandle, tag: RequestTag) {
        self.publish(AssetEvent::Ready {
            id: asset.id(),
            type_name: asset.type_name(),
            asset: asset.clone(),
            tag,
        });
    }

    fn publish(&self, event: AssetEvent) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to publish asset event: {e}. Receiver likely disconnected.");
        }
    }
}
