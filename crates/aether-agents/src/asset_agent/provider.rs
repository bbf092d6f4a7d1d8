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

//! The provider that fetches assets over the legacy UDP protocol.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use aether_core::asset::{
    AssetId, AssetProvider, AssetStorage, AssetTypeCode, RawAsset, RequestTag, TransferId,
    TransferStatus,
};
use aether_core::event::AssetEvent;
use aether_core::net::{InboundMessage, MessageKind, ProtocolResult, Transport};
use aether_data::transfer::{PendingRequest, PendingRequestQueue, TransferRecord, TransferTable};
use aether_telemetry::MetricsRegistry;

use super::config::ProviderConfig;
use super::handlers::{self, CompletionSink};
use super::metrics::TransferMetrics;
use super::notifier::AssetNotifier;
use super::protocol;

/// Fetches assets from the world server over the UDP transfer channels.
///
/// Textures travel over the image channel and are keyed by their asset id.
/// Every other type uses generic transfers, keyed by a transfer id made up
/// for each request. Requests are queued by
/// [`request_asset`](AssetProvider::request_asset) and go out on the next
/// [`update`](AssetProvider::update); several requests for the same asset
/// share one transfer and each requester's tag gets its own `Ready` event.
///
/// If the connection drops, every transfer in flight goes back to the queue
/// and is requested again from scratch once the transport reconnects.
pub struct UdpAssetProvider {
    config: ProviderConfig,
    timeout: Option<Duration>,
    transport: Arc<dyn Transport>,
    storage: Option<Arc<dyn AssetStorage>>,
    notifier: AssetNotifier,
    metrics: TransferMetrics,
    pending: PendingRequestQueue,
    textures: TransferTable<AssetId>,
    assets: TransferTable<TransferId>,
}

impl UdpAssetProvider {
    /// Creates a provider that sends over `transport` and publishes asset
    /// events through `events`.
    pub fn new(
        config: ProviderConfig,
        transport: Arc<dyn Transport>,
        events: flume::Sender<AssetEvent>,
        registry: &MetricsRegistry,
    ) -> Result<Self> {
        let metrics = TransferMetrics::register(registry)
            .context("Failed to register UDP asset transfer metrics")?;

        log::info!(
            "Asset provider '{}' created (idle timeout: {:?})",
            config.name,
            config.transfer_timeout()
        );

        Ok(Self {
            timeout: config.transfer_timeout(),
            config,
            transport,
            storage: None,
            notifier: AssetNotifier::new(events),
            metrics,
            pending: PendingRequestQueue::new(),
            textures: TransferTable::new(),
            assets: TransferTable::new(),
        })
    }

    /// Attaches the sink that keeps completed assets.
    pub fn with_storage(mut self, storage: Arc<dyn AssetStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// The provider's metric handles.
    pub fn metrics(&self) -> &TransferMetrics {
        &self.metrics
    }

    /// Requests queued but not yet sent.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Texture transfers in flight.
    pub fn texture_transfer_count(&self) -> usize {
        self.textures.len()
    }

    /// Generic asset transfers in flight.
    pub fn asset_transfer_count(&self) -> usize {
        self.assets.len()
    }

    fn find_transfer(&self, asset_id: &AssetId) -> Option<&TransferRecord> {
        self.textures
            .get(asset_id)
            .or_else(|| self.assets.find_by_asset(asset_id).map(|(_, record)| record))
    }

    fn find_transfer_mut(&mut self, asset_id: &AssetId) -> Option<&mut TransferRecord> {
        match self.textures.get_mut(asset_id) {
            Some(record) => Some(record),
            None => self.assets.find_by_asset_mut(asset_id),
        }
    }

    fn find_transfer_by_text(&self, asset_id: &str) -> Option<&TransferRecord> {
        AssetId::parse(asset_id)
            .ok()
            .and_then(|id| self.find_transfer(&id))
    }

    fn active_transfers(&self) -> usize {
        self.textures.len() + self.assets.len()
    }

    /// Puts every transfer in flight back into the request queue.
    fn make_transfers_pending(&mut self) {
        if self.textures.is_empty() && self.assets.is_empty() {
            return;
        }
        let requeued: Vec<PendingRequest> = self
            .textures
            .drain()
            .chain(self.assets.drain())
            .map(|(_, record)| record.into_pending())
            .collect();
        log::info!(
            "Transport disconnected, {} transfers returned to the request queue",
            requeued.len()
        );
        self.pending.extend(requeued);
    }

    fn send_pending_requests(&mut self) {
        let requests: Vec<PendingRequest> = self.pending.drain().collect();
        for request in requests {
            // An id already in flight on either channel only gains tags.
            if let Some(record) = self.find_transfer_mut(&request.asset_id) {
                record.insert_tags(&request.tags);
                continue;
            }
            if request.asset_type.is_texture() {
                self.request_texture(request);
            } else {
                self.request_generic(request);
            }
        }
    }

    fn request_texture(&mut self, request: PendingRequest) {
        log::debug!("Requesting texture {}", request.asset_id);
        let client = self.transport.client_parameters();
        self.transport.send(protocol::texture_request(
            &client,
            request.asset_id,
            self.config.request_priority,
        ));
        TransferMetrics::bump(self.metrics.requests_sent(), 1);

        let mut record = TransferRecord::new(request.asset_id, request.asset_type);
        record.insert_tags(&request.tags);
        self.textures.insert(request.asset_id, record);
    }

    fn request_generic(&mut self, request: PendingRequest) {
        let transfer_id = TransferId::new_random();
        log::debug!(
            "Requesting {} {} as transfer {transfer_id}",
            request.asset_type,
            request.asset_id
        );
        self.transport.send(protocol::transfer_request(
            transfer_id,
            request.asset_id,
            request.asset_type,
            self.config.request_priority,
        ));
        TransferMetrics::bump(self.metrics.requests_sent(), 1);

        let mut record = TransferRecord::new(request.asset_id, request.asset_type);
        record.insert_tags(&request.tags);
        self.assets.insert(transfer_id, record);
    }

    /// Ages every transfer and cancels the ones that went idle for too long.
    fn handle_timeouts(&mut self, frame_time: Duration) {
        let Some(timeout) = self.timeout else {
            return;
        };

        let expired_textures = Self::age(&mut self.textures, frame_time, timeout);
        for id in expired_textures {
            if let Some(record) = self.textures.remove(&id) {
                let client = self.transport.client_parameters();
                self.transport.send(protocol::texture_cancel(&client, id));
                self.timed_out(&record);
            }
        }

        let expired_assets = Self::age(&mut self.assets, frame_time, timeout);
        for transfer_id in expired_assets {
            if let Some(record) = self.assets.remove(&transfer_id) {
                self.transport.send(protocol::transfer_abort(transfer_id));
                self.timed_out(&record);
            }
        }
    }

    fn age(
        table: &mut TransferTable<AssetId>,
        frame_time: Duration,
        timeout: Duration,
    ) -> Vec<AssetId> {
        table
            .iter_mut()
            .filter_map(|(key, record)| {
                record.add_time(frame_time);
                (record.idle_time() >= timeout).then_some(*key)
            })
            .collect()
    }

    fn timed_out(&self, record: &TransferRecord) {
        log::info!(
            "Transfer of {} {} timed out after {:?} without data",
            record.type_name(),
            record.asset_id(),
            record.idle_time()
        );
        self.notifier.canceled(record);
        TransferMetrics::bump(self.metrics.transfers_timed_out(), 1);
    }

    fn dispatch(&mut self, message: &mut InboundMessage) -> Option<ProtocolResult<()>> {
        let sink = CompletionSink {
            notifier: &self.notifier,
            storage: self.storage.as_deref(),
            metrics: &self.metrics,
            notify_without_storage: self.config.notify_without_storage,
        };
        let reader = message.reader.as_mut();
        let result = match message.kind {
            MessageKind::ImageData => handlers::texture_header(&mut self.textures, reader, &sink),
            MessageKind::ImagePacket => handlers::texture_data(&mut self.textures, reader, &sink),
            MessageKind::ImageNotInDatabase => {
                handlers::texture_cancel(&mut self.textures, reader, &sink)
            }
            MessageKind::TransferInfo => handlers::asset_header(&mut self.assets, reader, &sink),
            MessageKind::TransferPacket => handlers::asset_data(&mut self.assets, reader, &sink),
            MessageKind::TransferAbort => handlers::asset_cancel(&mut self.assets, reader, &sink),
            _ => return None,
        };
        Some(result)
    }
}

impl AssetProvider for UdpAssetProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn is_valid_id(&self, asset_id: &str) -> bool {
        AssetId::is_valid(asset_id)
    }

    fn request_asset(&mut self, asset_id: &str, asset_type: &str, tag: RequestTag) -> bool {
        let id = match AssetId::parse(asset_id) {
            Ok(id) if !id.is_nil() => id,
            _ => {
                log::debug!("Rejected request for invalid asset id '{asset_id}'");
                return false;
            }
        };
        let asset_type_code = AssetTypeCode::from_type_name(asset_type);
        if !asset_type_code.is_valid() {
            log::debug!("Rejected request for {id} of unknown type '{asset_type}'");
            return false;
        }

        self.pending
            .push(PendingRequest::new(id, asset_type_code, tag));
        true
    }

    fn in_progress(&self, asset_id: &str) -> bool {
        self.find_transfer_by_text(asset_id).is_some()
    }

    fn get_incomplete_asset(
        &self,
        asset_id: &str,
        _asset_type: &str,
        min_received: u32,
    ) -> Option<RawAsset> {
        // The buffer is labelled with the type the transfer was requested as.
        let record = self.find_transfer_by_text(asset_id)?;
        if record.received_contiguous() < min_received {
            return None;
        }
        Some(record.to_raw_asset())
    }

    fn query_asset_status(&self, asset_id: &str) -> Option<TransferStatus> {
        self.find_transfer_by_text(asset_id).map(TransferRecord::status)
    }

    fn update(&mut self, frame_time: Duration) {
        if !self.transport.is_connected() {
            self.make_transfers_pending();
            self.metrics.set_active(self.active_transfers());
            return;
        }

        self.send_pending_requests();
        self.handle_timeouts(frame_time);
        self.metrics.set_active(self.active_transfers());
    }

    fn handle_network_event(&mut self, message: &mut InboundMessage) -> bool {
        let kind = message.kind;
        let claimed = match self.dispatch(message) {
            None => false,
            Some(Ok(())) => true,
            Some(Err(e)) => {
                log::warn!("Dropped malformed {kind} message: {e}");
                true
            }
        };
        if claimed {
            self.metrics.set_active(self.active_transfers());
        }
        claimed
    }
}
