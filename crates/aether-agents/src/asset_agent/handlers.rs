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

//! Inbound message handlers.
//!
//! Every handler reads the fields it needs before touching any state, so a
//! malformed message is dropped whole. Messages for transfers that are not in
//! flight (late packets after a cancel, or a server reply to someone else's
//! request) are logged and ignored.

use aether_core::asset::{AssetHandle, AssetId, AssetStorage, TransferId};
use aether_core::net::{MessageReader, ProtocolError, ProtocolResult};
use aether_data::transfer::{TransferRecord, TransferTable};

use super::metrics::TransferMetrics;
use super::notifier::AssetNotifier;
use super::protocol::is_success_status;

/// Where finished and failed transfers go.
pub(crate) struct CompletionSink<'a> {
    pub notifier: &'a AssetNotifier,
    pub storage: Option<&'a dyn AssetStorage>,
    pub metrics: &'a TransferMetrics,
    pub notify_without_storage: bool,
}

impl CompletionSink<'_> {
    fn progress(&self, record: &TransferRecord) {
        self.notifier.progress(record);
    }

    pub(crate) fn canceled(&self, record: &TransferRecord) {
        log::info!(
            "Transfer of {} {} canceled",
            record.type_name(),
            record.asset_id()
        );
        self.notifier.canceled(record);
        TransferMetrics::bump(self.metrics.transfers_canceled(), 1);
    }

    /// Hands the assembled asset to storage and tells every requester.
    fn complete(&self, record: TransferRecord) {
        let stored = match self.storage {
            Some(storage) => storage.store(record.to_raw_asset()).map_err(|e| {
                log::error!("Failed to store asset {}: {e}", record.asset_id());
            }),
            None => {
                log::error!(
                    "No asset storage available for completed asset {}",
                    record.asset_id()
                );
                Err(())
            }
        };

        let handle = match stored {
            Ok(handle) => handle,
            Err(()) if self.notify_without_storage => AssetHandle::new(record.to_raw_asset()),
            Err(()) => return,
        };

        log::debug!(
            "Transfer of {} {} complete, {} bytes",
            handle.type_name(),
            handle.id(),
            handle.len()
        );
        for tag in record.tags() {
            self.notifier.ready(&handle, *tag);
        }
        TransferMetrics::bump(self.metrics.transfers_completed(), 1);
        TransferMetrics::bump(self.metrics.bytes_received(), handle.len() as u64);
    }
}

fn unknown_transfer(kind: &str, key: AssetId) {
    log::warn!("Received {kind} for unknown transfer {key}");
}

/// Publishes progress and, if the transfer has everything, completes it.
fn after_ingest(table: &mut TransferTable<AssetId>, key: AssetId, sink: &CompletionSink) {
    let Some(record) = table.get(&key) else {
        return;
    };
    sink.progress(record);
    if record.is_ready() {
        if let Some(record) = table.remove(&key) {
            sink.complete(record);
        }
    }
}

/// `ImageData`: the texture header. Carries the size and packet 0.
pub(crate) fn texture_header(
    table: &mut TransferTable<AssetId>,
    reader: &mut dyn MessageReader,
    sink: &CompletionSink,
) -> ProtocolResult<()> {
    let id = reader.read_uuid()?;
    if !table.contains_key(&id) {
        unknown_transfer("texture header", id);
        return Ok(());
    }
    reader.skip_field()?; // codec
    let size = reader.read_u32()?;
    reader.skip_field()?; // packet count
    let data = reader.read_buffer()?;

    if let Some(record) = table.get_mut(&id) {
        record.set_size(size);
        record.receive_data(0, data);
    }
    after_ingest(table, id, sink);
    Ok(())
}

/// `ImagePacket`: one texture data packet after the header.
pub(crate) fn texture_data(
    table: &mut TransferTable<AssetId>,
    reader: &mut dyn MessageReader,
    sink: &CompletionSink,
) -> ProtocolResult<()> {
    let id = reader.read_uuid()?;
    if !table.contains_key(&id) {
        unknown_transfer("texture packet", id);
        return Ok(());
    }
    let packet = reader.read_u16()?;
    let data = reader.read_buffer()?;

    if let Some(record) = table.get_mut(&id) {
        record.receive_data(u32::from(packet), data);
    }
    after_ingest(table, id, sink);
    Ok(())
}

/// `ImageNotInDatabase`: the server has no such texture.
pub(crate) fn texture_cancel(
    table: &mut TransferTable<AssetId>,
    reader: &mut dyn MessageReader,
    sink: &CompletionSink,
) -> ProtocolResult<()> {
    let id = reader.read_uuid()?;
    match table.remove(&id) {
        Some(record) => sink.canceled(&record),
        None => unknown_transfer("texture cancel", id),
    }
    Ok(())
}

/// `TransferInfo`: the generic transfer header with status and size.
pub(crate) fn asset_header(
    table: &mut TransferTable<TransferId>,
    reader: &mut dyn MessageReader,
    sink: &CompletionSink,
) -> ProtocolResult<()> {
    let transfer_id = reader.read_uuid()?;
    if !table.contains_key(&transfer_id) {
        unknown_transfer("transfer info", transfer_id);
        return Ok(());
    }
    let _channel = reader.read_s32()?;
    let _target = reader.read_s32()?;
    let status = reader.read_s32()?;
    let size = reader.read_s32()?;

    if !is_success_status(status) {
        log::info!("Transfer {transfer_id} refused with status {status}");
        if let Some(record) = table.remove(&transfer_id) {
            sink.canceled(&record);
        }
        return Ok(());
    }
    let size = u32::try_from(size).map_err(|_| ProtocolError::InvalidValue {
        field: "Size",
        value: i64::from(size),
    })?;

    if let Some(record) = table.get_mut(&transfer_id) {
        record.set_size(size);
    }
    // Packets may have raced ahead of the header.
    after_ingest(table, transfer_id, sink);
    Ok(())
}

/// `TransferPacket`: one generic data packet.
pub(crate) fn asset_data(
    table: &mut TransferTable<TransferId>,
    reader: &mut dyn MessageReader,
    sink: &CompletionSink,
) -> ProtocolResult<()> {
    let transfer_id = reader.read_uuid()?;
    if !table.contains_key(&transfer_id) {
        unknown_transfer("transfer packet", transfer_id);
        return Ok(());
    }
    let _channel = reader.read_s32()?;
    let packet = reader.read_s32()?;
    let status = reader.read_s32()?;

    if !is_success_status(status) {
        log::info!("Transfer {transfer_id} failed with status {status}");
        if let Some(record) = table.remove(&transfer_id) {
            sink.canceled(&record);
        }
        return Ok(());
    }
    let packet = u32::try_from(packet).map_err(|_| ProtocolError::InvalidValue {
        field: "Packet",
        value: i64::from(packet),
    })?;
    let data = reader.read_buffer()?;

    if let Some(record) = table.get_mut(&transfer_id) {
        record.receive_data(packet, data);
    }
    after_ingest(table, transfer_id, sink);
    Ok(())
}

/// `TransferAbort`: the server gave up on a generic transfer.
pub(crate) fn asset_cancel(
    table: &mut TransferTable<TransferId>,
    reader: &mut dyn MessageReader,
    sink: &CompletionSink,
) -> ProtocolResult<()> {
    let transfer_id = reader.read_uuid()?;
    match table.remove(&transfer_id) {
        Some(record) => sink.canceled(&record),
        None => unknown_transfer("transfer abort", transfer_id),
    }
    Ok(())
}
