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

use aether_agents::{ProviderConfig, UdpAssetProvider};
use aether_core::asset::{
    AssetId, AssetProvider, AssetStorage, RawAsset, RawAssetHandle, RequestTag, StorageError,
    StorageResult,
};
use aether_core::event::{AssetEvent, EventBus};
use aether_core::net::{
    ClientParameters, Field, FieldReader, InboundMessage, MessageKind, OutboundMessage, Transport,
};
use aether_data::assets::AssetCache;
use aether_telemetry::MetricsRegistry;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

// --- Test Setup: a transport that records what it sends ---
struct MockTransport {
    connected: AtomicBool,
    client: ClientParameters,
    sent: Mutex<Vec<OutboundMessage>>,
}

impl MockTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            connected: AtomicBool::new(true),
            client: ClientParameters {
                agent_id: AssetId::new_random(),
                session_id: AssetId::new_random(),
            },
            sent: Mutex::new(Vec::new()),
        })
    }

    fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    fn take_sent(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

impl Transport for MockTransport {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn client_parameters(&self) -> ClientParameters {
        self.client
    }

    fn send(&self, message: OutboundMessage) {
        self.sent.lock().unwrap().push(message);
    }
}

struct UnavailableStorage;

impl AssetStorage for UnavailableStorage {
    fn store(&self, _asset: RawAsset) -> StorageResult<RawAssetHandle> {
        Err(StorageError::Unavailable("disk detached".to_string()))
    }
}

struct Harness {
    provider: UdpAssetProvider,
    transport: Arc<MockTransport>,
    cache: Arc<AssetCache>,
    events: EventBus<AssetEvent>,
}

impl Harness {
    fn new() -> Result<Self> {
        Self::with_config(ProviderConfig::default())
    }

    fn with_config(config: ProviderConfig) -> Result<Self> {
        let transport = MockTransport::new();
        let cache = Arc::new(AssetCache::new());
        let events = EventBus::new();
        let provider = UdpAssetProvider::new(
            config,
            transport.clone(),
            events.sender(),
            &MetricsRegistry::new(),
        )?
        .with_storage(cache.clone());
        Ok(Self {
            provider,
            transport,
            cache,
            events,
        })
    }

    fn deliver(&mut self, kind: MessageKind, reader: FieldReader) -> bool {
        self.provider
            .handle_network_event(&mut InboundMessage::new(kind, reader))
    }

    fn ready_tags(events: &[AssetEvent]) -> Vec<RequestTag> {
        events
            .iter()
            .filter_map(|event| match event {
                AssetEvent::Ready { tag, .. } => Some(*tag),
                _ => None,
            })
            .collect()
    }
}

fn image_data(id: AssetId, size: u32, data: &[u8]) -> FieldReader {
    FieldReader::new()
        .with("ID", Field::Uuid(id))
        .with("Codec", Field::U8(2))
        .with("Size", Field::U32(size))
        .with("Packets", Field::U16(2))
        .with("Data", Field::Buffer(data.to_vec()))
}

fn image_packet(id: AssetId, packet: u16, data: &[u8]) -> FieldReader {
    FieldReader::new()
        .with("ID", Field::Uuid(id))
        .with("Packet", Field::U16(packet))
        .with("Data", Field::Buffer(data.to_vec()))
}

fn transfer_info(transfer_id: AssetId, status: i32, size: i32) -> FieldReader {
    FieldReader::new()
        .with("TransferID", Field::Uuid(transfer_id))
        .with("ChannelType", Field::S32(2))
        .with("TargetType", Field::S32(2))
        .with("Status", Field::S32(status))
        .with("Size", Field::S32(size))
}

fn transfer_packet(transfer_id: AssetId, packet: i32, status: i32, data: &[u8]) -> FieldReader {
    FieldReader::new()
        .with("TransferID", Field::Uuid(transfer_id))
        .with("ChannelType", Field::S32(2))
        .with("Packet", Field::S32(packet))
        .with("Status", Field::S32(status))
        .with("Data", Field::Buffer(data.to_vec()))
}

/// The transfer id a generic request was sent under.
fn transfer_id_of(message: &OutboundMessage) -> AssetId {
    assert_eq!(message.kind(), MessageKind::TransferRequest);
    match message.fields()[0] {
        Field::Uuid(id) => id,
        ref other => panic!("expected transfer id, found {other:?}"),
    }
}
// ---

#[test]
fn test_texture_transfer_end_to_end() -> Result<()> {
    // --- 1. Request texture A with tag 7 ---
    let mut h = Harness::new()?;
    let id = AssetId::new_random();
    assert!(h
        .provider
        .request_asset(&id.to_string(), "Texture", RequestTag(7)));
    h.provider.update(FRAME);

    let sent = h.transport.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind(), MessageKind::RequestImage);
    assert_eq!(sent[0].fields()[0], Field::Uuid(h.transport.client.agent_id));
    assert_eq!(sent[0].fields()[2], Field::Uuid(id));

    // --- 2. Header with the first 16 bytes, then packet 1 ---
    let payload: Vec<u8> = (0..32).collect();
    assert!(h.deliver(MessageKind::ImageData, image_data(id, 32, &payload[..16])));
    assert!(h.deliver(MessageKind::ImagePacket, image_packet(id, 1, &payload[16..])));

    // --- 3. Progress(16), Progress(32), Ready(tag 7) ---
    let events = h.events.drain();
    assert_eq!(events.len(), 3);
    assert!(matches!(
        events[0],
        AssetEvent::Progress { size: 32, received: 16, received_contiguous: 16, .. }
    ));
    assert!(matches!(
        events[1],
        AssetEvent::Progress { received: 32, received_contiguous: 32, .. }
    ));
    match &events[2] {
        AssetEvent::Ready {
            id: ready_id,
            type_name,
            asset,
            tag,
        } => {
            assert_eq!(*ready_id, id);
            assert_eq!(*type_name, "Texture");
            assert_eq!(*tag, RequestTag(7));
            assert_eq!(asset.data(), payload.as_slice());
            assert!(asset.ptr_eq(&h.cache.get(&id).expect("texture cached")));
        }
        other => panic!("expected Ready, got {other:?}"),
    }
    assert!(events.iter().all(|event| event.category() == "Asset"));

    assert_eq!(h.provider.texture_transfer_count(), 0);
    assert!(!h.provider.in_progress(&id.to_string()));
    Ok(())
}

#[test]
fn test_duplicate_request_shares_one_transfer() -> Result<()> {
    let mut h = Harness::new()?;
    let id = AssetId::new_random().to_string();

    assert!(h.provider.request_asset(&id, "Mesh", RequestTag(1)));
    assert!(h.provider.request_asset(&id, "Mesh", RequestTag(2)));
    h.provider.update(FRAME);

    let sent = h.transport.take_sent();
    assert_eq!(sent.len(), 1, "one wire request for both tags");
    let transfer_id = transfer_id_of(&sent[0]);

    // Requesting again while in flight merges without another wire request.
    assert!(h.provider.request_asset(&id, "Mesh", RequestTag(3)));
    assert!(h.provider.request_asset(&id, "Mesh", RequestTag(2)));
    h.provider.update(FRAME);
    assert!(h.transport.take_sent().is_empty());

    assert!(h.deliver(MessageKind::TransferInfo, transfer_info(transfer_id, 0, 4)));
    assert!(h.deliver(
        MessageKind::TransferPacket,
        transfer_packet(transfer_id, 0, 1, &[1, 2, 3, 4])
    ));

    let tags = Harness::ready_tags(&h.events.drain());
    assert_eq!(tags, vec![RequestTag(1), RequestTag(2), RequestTag(3)]);
    assert_eq!(h.provider.asset_transfer_count(), 0);
    assert_eq!(h.cache.len(), 1);
    Ok(())
}

#[test]
fn test_incomplete_asset_stops_at_first_gap() -> Result<()> {
    let mut h = Harness::new()?;
    let id = AssetId::new_random();
    let text = id.to_string();
    h.provider.request_asset(&text, "SoundWav", RequestTag(1));
    h.provider.update(FRAME);
    let transfer_id = transfer_id_of(&h.transport.take_sent()[0]);

    h.deliver(MessageKind::TransferInfo, transfer_info(transfer_id, 0, 30));
    h.deliver(MessageKind::TransferPacket, transfer_packet(transfer_id, 0, 0, &[0; 10]));
    h.deliver(MessageKind::TransferPacket, transfer_packet(transfer_id, 2, 0, &[2; 10]));

    let status = h.provider.query_asset_status(&text).expect("transfer in flight");
    assert_eq!(status.size, 30);
    assert_eq!(status.received, 20);
    assert_eq!(status.received_contiguous, 10);

    let partial = h
        .provider
        .get_incomplete_asset(&text, "SoundWav", 5)
        .expect("enough contiguous data");
    assert_eq!(partial.data(), &[0; 10]);
    assert!(h.provider.get_incomplete_asset(&text, "SoundWav", 11).is_none());

    // Filling the gap completes the asset.
    h.deliver(MessageKind::TransferPacket, transfer_packet(transfer_id, 1, 1, &[1; 10]));
    assert!(h.provider.query_asset_status(&text).is_none());
    assert!(h.provider.get_incomplete_asset(&text, "SoundWav", 0).is_none());
    Ok(())
}

#[test]
fn test_reverse_order_delivery_matches_in_order() -> Result<()> {
    let payload: Vec<u8> = (0..24).collect();
    let mut assembled = Vec::new();

    for order in [[0, 1, 2], [2, 1, 0]] {
        let mut h = Harness::new()?;
        let id = AssetId::new_random();
        h.provider.request_asset(&id.to_string(), "Mesh", RequestTag(1));
        h.provider.update(FRAME);
        let transfer_id = transfer_id_of(&h.transport.take_sent()[0]);

        for packet in order {
            let start = packet as usize * 8;
            h.deliver(
                MessageKind::TransferPacket,
                transfer_packet(transfer_id, packet, 0, &payload[start..start + 8]),
            );
        }
        // Data raced ahead of the header; completion happens on the header.
        assert_eq!(h.provider.asset_transfer_count(), 1);
        h.deliver(MessageKind::TransferInfo, transfer_info(transfer_id, 0, 24));

        let ready = h
            .events
            .drain()
            .into_iter()
            .find_map(|event| match event {
                AssetEvent::Ready { asset, .. } => Some(asset),
                _ => None,
            })
            .expect("asset completed");
        assembled.push(ready.data().to_vec());
    }

    assert_eq!(assembled[0], payload);
    assert_eq!(assembled[1], payload);
    Ok(())
}

#[test]
fn test_disconnect_requeues_every_transfer_once() -> Result<()> {
    let mut h = Harness::new()?;
    let texture = AssetId::new_random().to_string();
    let mesh = AssetId::new_random().to_string();
    let sound = AssetId::new_random().to_string();

    h.provider.request_asset(&texture, "Texture", RequestTag(1));
    h.provider.request_asset(&texture, "Texture", RequestTag(2));
    h.provider.request_asset(&mesh, "Mesh", RequestTag(3));
    h.provider.request_asset(&sound, "SoundVorbis", RequestTag(4));
    h.provider.update(FRAME);
    assert_eq!(h.transport.take_sent().len(), 3);

    // --- 1. Connection drops: everything goes back to the queue, silently ---
    h.transport.set_connected(false);
    h.provider.update(FRAME);
    h.provider.update(FRAME);
    assert_eq!(h.provider.pending_count(), 3);
    assert_eq!(h.provider.texture_transfer_count(), 0);
    assert_eq!(h.provider.asset_transfer_count(), 0);
    assert!(h.transport.take_sent().is_empty());
    assert!(!h.provider.in_progress(&mesh));

    // --- 2. Reconnect: each transfer is requested exactly once more ---
    h.transport.set_connected(true);
    h.provider.update(FRAME);
    let resent = h.transport.take_sent();
    assert_eq!(resent.len(), 3);
    assert_eq!(
        resent
            .iter()
            .filter(|m| m.kind() == MessageKind::RequestImage)
            .count(),
        1
    );
    h.provider.update(FRAME);
    assert!(h.transport.take_sent().is_empty());

    // --- 3. Both original tags of the texture survive ---
    let id = AssetId::parse(&texture)?;
    h.deliver(MessageKind::ImageData, image_data(id, 3, &[7, 7, 7]));
    let tags = Harness::ready_tags(&h.events.drain());
    assert_eq!(tags, vec![RequestTag(1), RequestTag(2)]);
    Ok(())
}

#[test]
fn test_failed_status_cancels_generic_transfer() -> Result<()> {
    let mut h = Harness::new()?;
    let id = AssetId::new_random();
    h.provider.request_asset(&id.to_string(), "MaterialScript", RequestTag(5));
    h.provider.update(FRAME);
    let transfer_id = transfer_id_of(&h.transport.take_sent()[0]);

    assert!(h.deliver(MessageKind::TransferInfo, transfer_info(transfer_id, -2, 0)));

    let events = h.events.drain();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        AssetEvent::Canceled { type_name: "MaterialScript", .. }
    ));
    assert_eq!(events[0].asset_id(), id);
    assert_eq!(h.provider.asset_transfer_count(), 0);
    assert_eq!(h.provider.metrics().transfers_canceled().get()?, 1);

    // Late packets for the canceled transfer are ignored.
    assert!(h.deliver(
        MessageKind::TransferPacket,
        transfer_packet(transfer_id, 0, 0, &[1])
    ));
    assert!(h.events.drain().is_empty());
    Ok(())
}

#[test]
fn test_server_side_cancels_remove_transfers() -> Result<()> {
    let mut h = Harness::new()?;
    let texture = AssetId::new_random();
    let mesh = AssetId::new_random();
    h.provider.request_asset(&texture.to_string(), "Texture", RequestTag(1));
    h.provider.request_asset(&mesh.to_string(), "Mesh", RequestTag(2));
    h.provider.update(FRAME);
    let sent = h.transport.take_sent();
    let transfer_id = transfer_id_of(&sent[1]);

    h.deliver(
        MessageKind::ImageNotInDatabase,
        FieldReader::new().with("ID", Field::Uuid(texture)),
    );
    h.deliver(
        MessageKind::TransferAbort,
        FieldReader::new()
            .with("TransferID", Field::Uuid(transfer_id))
            .with("ChannelType", Field::S32(2)),
    );

    let canceled: Vec<AssetId> = h
        .events
        .drain()
        .iter()
        .filter(|event| matches!(event, AssetEvent::Canceled { .. }))
        .map(AssetEvent::asset_id)
        .collect();
    assert_eq!(canceled, vec![texture, mesh]);
    assert_eq!(h.provider.texture_transfer_count(), 0);
    assert_eq!(h.provider.asset_transfer_count(), 0);
    Ok(())
}

#[test]
fn test_invalid_requests_leave_state_unchanged() -> Result<()> {
    let mut h = Harness::new()?;
    h.provider.request_asset(&AssetId::new_random().to_string(), "Mesh", RequestTag(1));
    h.provider.update(FRAME);
    h.transport.take_sent();

    assert!(!h.provider.is_valid_id("1234"));
    assert!(!h.provider.request_asset("1234", "Texture", RequestTag(2)));
    assert!(!h.provider.request_asset(
        "6f2f5c8e-41a0-4b1e-9c3d-0a1b2c3d4e5",
        "Texture",
        RequestTag(2)
    ));
    assert!(!h.provider.request_asset(
        &AssetId::new_random().to_string(),
        "NotAType",
        RequestTag(2)
    ));

    assert_eq!(h.provider.pending_count(), 0);
    assert_eq!(h.provider.texture_transfer_count(), 0);
    assert_eq!(h.provider.asset_transfer_count(), 1);
    h.provider.update(FRAME);
    assert!(h.transport.take_sent().is_empty());
    Ok(())
}

#[test]
fn test_idle_transfers_time_out() -> Result<()> {
    let config = ProviderConfig::from_ron_str("(transfer_timeout_secs: Some(1.0))")?;
    let mut h = Harness::with_config(config)?;
    let texture = AssetId::new_random();
    let mesh = AssetId::new_random();
    h.provider.request_asset(&texture.to_string(), "Texture", RequestTag(1));
    h.provider.request_asset(&mesh.to_string(), "Mesh", RequestTag(2));
    h.provider.update(Duration::ZERO);
    let transfer_id = transfer_id_of(&h.transport.take_sent()[1]);

    // --- 1. Data keeps the texture alive; the mesh goes quiet ---
    h.provider.update(Duration::from_millis(600));
    h.deliver(MessageKind::ImageData, image_data(texture, 100, &[0; 10]));
    h.events.drain();
    h.provider.update(Duration::from_millis(600));

    assert!(h.provider.in_progress(&texture.to_string()));
    assert!(!h.provider.in_progress(&mesh.to_string()));
    let sent = h.transport.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind(), MessageKind::TransferAbort);
    assert_eq!(sent[0].fields()[0], Field::Uuid(transfer_id));

    // --- 2. The texture stalls too and is canceled over the image channel ---
    h.provider.update(Duration::from_millis(600));
    let sent = h.transport.take_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind(), MessageKind::RequestImage);
    assert_eq!(sent[0].fields()[3], Field::S8(-1));

    let canceled: Vec<AssetId> = h
        .events
        .drain()
        .iter()
        .map(AssetEvent::asset_id)
        .collect();
    assert_eq!(canceled, vec![mesh, texture]);
    assert_eq!(h.provider.metrics().transfers_timed_out().get()?, 2);
    Ok(())
}

#[test]
fn test_disabled_timeout_never_cancels() -> Result<()> {
    let config = ProviderConfig::from_ron_str("(transfer_timeout_secs: None)")?;
    let mut h = Harness::with_config(config)?;
    let id = AssetId::new_random().to_string();
    h.provider.request_asset(&id, "Texture", RequestTag(1));
    h.provider.update(FRAME);
    h.provider.update(Duration::from_secs(3600));
    assert!(h.provider.in_progress(&id));
    Ok(())
}

#[test]
fn test_unavailable_storage_still_notifies() -> Result<()> {
    let transport = MockTransport::new();
    let events = EventBus::new();
    let mut provider = UdpAssetProvider::new(
        ProviderConfig::default(),
        transport.clone(),
        events.sender(),
        &MetricsRegistry::new(),
    )?
    .with_storage(Arc::new(UnavailableStorage));

    let id = AssetId::new_random();
    provider.request_asset(&id.to_string(), "Texture", RequestTag(9));
    provider.update(FRAME);
    provider.handle_network_event(&mut InboundMessage::new(
        MessageKind::ImageData,
        image_data(id, 2, &[4, 2]),
    ));

    let ready: Vec<RawAssetHandle> = events
        .drain()
        .into_iter()
        .filter_map(|event| match event {
            AssetEvent::Ready { asset, .. } => Some(asset),
            _ => None,
        })
        .collect();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].data(), &[4, 2]);
    Ok(())
}

#[test]
fn test_unknown_transfers_are_ignored() -> Result<()> {
    let mut h = Harness::new()?;
    let stranger = AssetId::new_random();

    assert!(h.deliver(MessageKind::ImagePacket, image_packet(stranger, 1, &[1])));
    assert!(h.deliver(MessageKind::TransferInfo, transfer_info(stranger, 0, 10)));
    assert!(!h.deliver(MessageKind::Other(7), FieldReader::new()));

    assert!(h.events.drain().is_empty());
    assert_eq!(h.provider.texture_transfer_count(), 0);
    Ok(())
}

#[test]
fn test_request_under_another_type_joins_transfer_in_flight() -> Result<()> {
    let mut h = Harness::new()?;
    let id = AssetId::new_random();
    let text = id.to_string();

    h.provider.request_asset(&text, "Texture", RequestTag(1));
    h.provider.update(FRAME);
    assert_eq!(h.transport.take_sent().len(), 1);

    // Same id, other channel: no second transfer is opened.
    assert!(h.provider.request_asset(&text, "Mesh", RequestTag(2)));
    h.provider.update(FRAME);
    assert!(h.transport.take_sent().is_empty());
    assert_eq!(h.provider.texture_transfer_count(), 1);
    assert_eq!(h.provider.asset_transfer_count(), 0);

    h.deliver(MessageKind::ImageData, image_data(id, 2, &[5, 6]));
    let tags = Harness::ready_tags(&h.events.drain());
    assert_eq!(tags, vec![RequestTag(1), RequestTag(2)]);
    Ok(())
}

#[test]
fn test_incomplete_asset_keeps_transfer_type() -> Result<()> {
    let mut h = Harness::new()?;
    let id = AssetId::new_random();
    let text = id.to_string();
    h.provider.request_asset(&text, "Texture", RequestTag(1));
    h.provider.update(FRAME);
    h.deliver(MessageKind::ImageData, image_data(id, 100, &[1; 10]));

    let partial = h
        .provider
        .get_incomplete_asset(&text, "Mesh", 10)
        .expect("header data available");
    assert_eq!(partial.type_name(), "Texture");
    assert_eq!(partial.len(), 10);
    Ok(())
}

#[test]
fn test_active_gauge_follows_transfers() -> Result<()> {
    let mut h = Harness::new()?;
    let texture = AssetId::new_random();
    h.provider.request_asset(&texture.to_string(), "Texture", RequestTag(1));
    h.provider.request_asset(&AssetId::new_random().to_string(), "Mesh", RequestTag(2));
    h.provider.update(FRAME);
    let active = h.provider.metrics().active_transfers().clone();
    assert_eq!(active.get()?, 2.0);

    // --- 1. A completion lowers the gauge without waiting for update ---
    h.deliver(MessageKind::ImageData, image_data(texture, 1, &[1]));
    assert_eq!(active.get()?, 1.0);

    // --- 2. Requeued transfers are no longer active ---
    h.transport.set_connected(false);
    h.provider.update(FRAME);
    assert_eq!(h.provider.pending_count(), 1);
    assert_eq!(active.get()?, 0.0);
    Ok(())
}

#[test]
fn test_oversized_timeout_config_is_accepted() -> Result<()> {
    let config = ProviderConfig::from_ron_str("(transfer_timeout_secs: Some(1e20))")?;
    let mut h = Harness::with_config(config)?;
    let id = AssetId::new_random().to_string();
    h.provider.request_asset(&id, "Mesh", RequestTag(1));
    h.provider.update(FRAME);
    h.provider.update(Duration::from_secs(3600));
    assert!(h.provider.in_progress(&id));
    Ok(())
}
