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

use super::MessageReader;
use std::fmt;

/// Every message kind the asset layer sends or receives.
///
/// Anything else the transport delivers maps to [`MessageKind::Other`] and is
/// left for other subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Client → server: fetch (or cancel) a texture over the image channel.
    RequestImage,
    /// Server → client: texture header plus the first chunk of data.
    ImageData,
    /// Server → client: one further chunk of texture data.
    ImagePacket,
    /// Server → client: the requested texture does not exist.
    ImageNotInDatabase,
    /// Client → server: open a generic asset transfer.
    TransferRequest,
    /// Server → client: generic transfer header with status and size.
    TransferInfo,
    /// Server → client: one chunk of a generic transfer.
    TransferPacket,
    /// Either direction: abandon a generic transfer.
    TransferAbort,
    /// A message outside the asset protocol.
    Other(u32),
}

impl MessageKind {
    const REQUEST_IMAGE: u32 = 0xFFFF_0008;
    const IMAGE_DATA: u32 = 0xFFFF_0009;
    const IMAGE_PACKET: u32 = 0x0000_000A;
    const IMAGE_NOT_IN_DATABASE: u32 = 0xFFFF_0056;
    const TRANSFER_REQUEST: u32 = 0xFFFF_0099;
    const TRANSFER_INFO: u32 = 0xFFFF_009A;
    const TRANSFER_PACKET: u32 = 0x0000_0011;
    const TRANSFER_ABORT: u32 = 0xFFFF_009B;

    /// Maps a numeric message id from the transport.
    pub fn from_id(id: u32) -> Self {
        match id {
            Self::REQUEST_IMAGE => MessageKind::RequestImage,
            Self::IMAGE_DATA => MessageKind::ImageData,
            Self::IMAGE_PACKET => MessageKind::ImagePacket,
            Self::IMAGE_NOT_IN_DATABASE => MessageKind::ImageNotInDatabase,
            Self::TRANSFER_REQUEST => MessageKind::TransferRequest,
            Self::TRANSFER_INFO => MessageKind::TransferInfo,
            Self::TRANSFER_PACKET => MessageKind::TransferPacket,
            Self::TRANSFER_ABORT => MessageKind::TransferAbort,
            other => MessageKind::Other(other),
        }
    }

    /// The numeric message id used by the transport.
    pub fn id(self) -> u32 {
        match self {
            MessageKind::RequestImage => Self::REQUEST_IMAGE,
            MessageKind::ImageData => Self::IMAGE_DATA,
            MessageKind::ImagePacket => Self::IMAGE_PACKET,
            MessageKind::ImageNotInDatabase => Self::IMAGE_NOT_IN_DATABASE,
            MessageKind::TransferRequest => Self::TRANSFER_REQUEST,
            MessageKind::TransferInfo => Self::TRANSFER_INFO,
            MessageKind::TransferPacket => Self::TRANSFER_PACKET,
            MessageKind::TransferAbort => Self::TRANSFER_ABORT,
            MessageKind::Other(id) => id,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Other(id) => write!(f, "Other({id:#010x})"),
            known => write!(f, "{known:?}"),
        }
    }
}

/// One inbound message as delivered by the transport.
pub struct InboundMessage {
    /// What kind of message this is.
    pub kind: MessageKind,
    /// Sequential access to the message's fields.
    pub reader: Box<dyn MessageReader + Send>,
}

impl InboundMessage {
    /// Wraps a reader as an inbound message of the given kind.
    pub fn new(kind: MessageKind, reader: impl MessageReader + Send + 'static) -> Self {
        Self {
            kind,
            reader: Box::new(reader),
        }
    }
}

impl fmt::Debug for InboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InboundMessage")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
