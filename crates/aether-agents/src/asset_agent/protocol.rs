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

//! Wire constants and outbound message layouts of the legacy UDP asset protocol.

use aether_core::asset::{AssetId, AssetTypeCode, TransferId};
use aether_core::net::{ClientParameters, MessageKind, OutboundMessage};

/// Transfer channel carrying assets.
pub(crate) const CHANNEL_ASSET: i32 = 2;
/// Transfer source: the asset database.
pub(crate) const SOURCE_ASSET: i32 = 2;
/// Transfer status: more data follows.
pub(crate) const STATUS_OK: i32 = 0;
/// Transfer status: last packet.
pub(crate) const STATUS_DONE: i32 = 1;
/// Image type of ordinary textures.
pub(crate) const IMAGE_TYPE_NORMAL: u8 = 0;
/// Discard level asking for the full-resolution image.
pub(crate) const DISCARD_LEVEL_FULL: i8 = 0;
/// Discard level that cancels an image request.
pub(crate) const DISCARD_LEVEL_CANCEL: i8 = -1;
/// Size of the generic transfer info block: asset id then type code.
pub(crate) const ASSET_INFO_LEN: usize = 20;

/// Any status other than ok or done ends the transfer.
pub(crate) fn is_success_status(status: i32) -> bool {
    status == STATUS_OK || status == STATUS_DONE
}

/// The generic transfer info block: 16 id bytes followed by the type code,
/// little-endian, no padding.
pub(crate) fn asset_info_block(asset_id: AssetId, asset_type: AssetTypeCode) -> [u8; ASSET_INFO_LEN] {
    let mut block = [0u8; ASSET_INFO_LEN];
    block[..16].copy_from_slice(asset_id.as_bytes());
    block[16..].copy_from_slice(&asset_type.code().to_le_bytes());
    block
}

fn image_request(
    client: &ClientParameters,
    asset_id: AssetId,
    discard_level: i8,
    priority: f32,
) -> OutboundMessage {
    let mut message = OutboundMessage::new(MessageKind::RequestImage);
    message
        .add_uuid(client.agent_id)
        .add_uuid(client.session_id)
        .set_variable_block_count(1)
        .add_uuid(asset_id)
        .add_s8(discard_level)
        .add_f32(priority)
        .add_u32(0) // starting packet
        .add_u8(IMAGE_TYPE_NORMAL)
        .mark_reliable();
    message
}

/// Requests a full-resolution texture from the first packet.
pub(crate) fn texture_request(
    client: &ClientParameters,
    asset_id: AssetId,
    priority: f32,
) -> OutboundMessage {
    image_request(client, asset_id, DISCARD_LEVEL_FULL, priority)
}

/// Withdraws an image request.
pub(crate) fn texture_cancel(client: &ClientParameters, asset_id: AssetId) -> OutboundMessage {
    image_request(client, asset_id, DISCARD_LEVEL_CANCEL, 0.0)
}

/// Opens a generic asset transfer under a client-chosen transfer id.
pub(crate) fn transfer_request(
    transfer_id: TransferId,
    asset_id: AssetId,
    asset_type: AssetTypeCode,
    priority: f32,
) -> OutboundMessage {
    let mut message = OutboundMessage::new(MessageKind::TransferRequest);
    message
        .add_uuid(transfer_id)
        .add_s32(CHANNEL_ASSET)
        .add_s32(SOURCE_ASSET)
        .add_f32(priority)
        .add_buffer(&asset_info_block(asset_id, asset_type))
        .mark_reliable();
    message
}

/// Abandons a generic asset transfer.
pub(crate) fn transfer_abort(transfer_id: TransferId) -> OutboundMessage {
    let mut message = OutboundMessage::new(MessageKind::TransferAbort);
    message
        .add_uuid(transfer_id)
        .add_s32(CHANNEL_ASSET)
        .mark_reliable();
    message
}
