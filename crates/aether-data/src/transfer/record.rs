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

use super::{ChunkAssembler, PendingRequest};
use aether_core::asset::{AssetId, AssetTypeCode, RawAsset, RequestTag, TransferStatus};
use std::time::Duration;

/// State of one asset in flight.
///
/// The declared size is unknown until the header arrives, but data packets
/// are accepted before that; the transfer is ready once the gap-free prefix
/// covers the declared size.
#[derive(Debug, Clone)]
pub struct TransferRecord {
    asset_id: AssetId,
    asset_type: AssetTypeCode,
    size: Option<u32>,
    chunks: ChunkAssembler,
    idle: Duration,
    tags: Vec<RequestTag>,
}

impl TransferRecord {
    /// Starts tracking `asset_id`.
    pub fn new(asset_id: AssetId, asset_type: AssetTypeCode) -> Self {
        Self {
            asset_id,
            asset_type,
            size: None,
            chunks: ChunkAssembler::new(),
            idle: Duration::ZERO,
            tags: Vec::new(),
        }
    }

    /// The asset being transferred.
    pub fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    /// The asset's type code.
    pub fn asset_type(&self) -> AssetTypeCode {
        self.asset_type
    }

    /// The asset's canonical type name.
    pub fn type_name(&self) -> &'static str {
        self.asset_type.type_name().unwrap_or_default()
    }

    /// Records the size announced by the header.
    pub fn set_size(&mut self, size: u32) {
        self.size = Some(size);
    }

    /// The declared size, if the header has arrived.
    pub fn size(&self) -> Option<u32> {
        self.size
    }

    /// Stores one packet's worth of data and resets the idle clock.
    pub fn receive_data(&mut self, packet_index: u32, data: Vec<u8>) {
        self.chunks.insert(packet_index, data);
        self.idle = Duration::ZERO;
    }

    /// Total bytes received, possibly with gaps.
    pub fn received(&self) -> u32 {
        self.chunks.received()
    }

    /// Bytes received from offset zero without a gap.
    pub fn received_contiguous(&self) -> u32 {
        self.chunks.received_contiguous()
    }

    /// `true` once the size is known and the gap-free prefix covers it.
    pub fn is_ready(&self) -> bool {
        self.size
            .is_some_and(|size| self.chunks.received_contiguous() >= size)
    }

    /// Copies out the gap-free prefix. For a ready transfer this is exactly
    /// the declared size; surplus bytes past it are dropped.
    pub fn assemble_data(&self) -> Vec<u8> {
        let mut data = self.chunks.assemble_contiguous();
        if let Some(size) = self.size.filter(|_| self.is_ready()) {
            data.truncate(size as usize);
        }
        data
    }

    /// Builds an asset from the gap-free prefix.
    pub fn to_raw_asset(&self) -> RawAsset {
        RawAsset::new(self.asset_id, self.asset_type, self.assemble_data())
    }

    /// Adds frame time to the idle clock.
    pub fn add_time(&mut self, delta: Duration) {
        self.idle = self.idle.saturating_add(delta);
    }

    /// Time since the last packet arrived (or since the request was sent).
    pub fn idle_time(&self) -> Duration {
        self.idle
    }

    /// Adds requester tags, skipping ones already attached.
    pub fn insert_tags(&mut self, tags: &[RequestTag]) {
        for tag in tags {
            if !self.tags.contains(tag) {
                self.tags.push(*tag);
            }
        }
    }

    /// Every requester waiting on this transfer, in request order.
    pub fn tags(&self) -> &[RequestTag] {
        &self.tags
    }

    /// Progress counters. Size reads as zero until the header arrives.
    pub fn status(&self) -> TransferStatus {
        TransferStatus {
            size: self.size.unwrap_or(0),
            received: self.received(),
            received_contiguous: self.received_contiguous(),
        }
    }

    /// Turns the transfer back into a request that can be sent again.
    /// Received data is discarded.
    pub fn into_pending(self) -> PendingRequest {
        PendingRequest {
            asset_id: self.asset_id,
            asset_type: self.asset_type,
            tags: self.tags,
        }
    }
}
