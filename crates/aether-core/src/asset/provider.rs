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

use super::{RawAsset, RequestTag};
use crate::net::InboundMessage;
use std::time::Duration;

/// Progress counters of one in-flight transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferStatus {
    /// Declared total size, zero while the header has not arrived.
    pub size: u32,
    /// Bytes received so far, possibly with gaps.
    pub received: u32,
    /// Bytes received from offset zero without a gap.
    pub received_contiguous: u32,
}

/// A source of assets that fetches them on behalf of callers.
///
/// Providers are driven from a single thread: `update` once per frame and
/// `handle_network_event` for every inbound message, both with exclusive access.
pub trait AssetProvider {
    /// Human-readable name of the provider.
    fn name(&self) -> &str;

    /// Returns `true` if `asset_id` is an identifier this provider can fetch.
    fn is_valid_id(&self, asset_id: &str) -> bool;

    /// Queues a request. Returns `false` without side effects when the id or
    /// type is not acceptable. The actual network request is deferred to the
    /// next [`update`](AssetProvider::update).
    fn request_asset(&mut self, asset_id: &str, asset_type: &str, tag: RequestTag) -> bool;

    /// Returns `true` if a transfer for the asset is currently in flight.
    fn in_progress(&self, asset_id: &str) -> bool;

    /// Returns the gap-free prefix of an in-flight transfer, provided at least
    /// `min_received` bytes of it are available.
    fn get_incomplete_asset(
        &self,
        asset_id: &str,
        asset_type: &str,
        min_received: u32,
    ) -> Option<RawAsset>;

    /// Reports the progress counters of an in-flight transfer.
    fn query_asset_status(&self, asset_id: &str) -> Option<TransferStatus>;

    /// Advances the provider by one frame.
    fn update(&mut self, frame_time: Duration);

    /// Offers an inbound message to the provider. Returns `true` if the
    /// message kind belongs to this provider, whether or not it matched a
    /// live transfer.
    fn handle_network_event(&mut self, message: &mut InboundMessage) -> bool;
}
