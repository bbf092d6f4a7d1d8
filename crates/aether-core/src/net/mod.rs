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

//! Contracts for the reliable-messaging transport the asset layer rides on.
//!
//! The transport itself (framing, acknowledgement, retransmission, circuit
//! lifecycle) is not implemented here. This module only fixes the shape of
//! what the asset layer consumes from it:
//!
//! - [`MessageKind`]: the closed set of protocol messages the asset layer speaks.
//! - [`OutboundMessage`]: a typed field builder for a message to send.
//! - [`MessageReader`] and [`FieldReader`]: sequential access to an inbound message.
//! - [`Transport`]: connectivity, session parameters, and sending.

mod error;
mod field;
mod message;
mod outbound;
mod transport;

pub use error::{ProtocolError, ProtocolResult};
pub use field::{Field, FieldReader, MessageReader};
pub use message::{InboundMessage, MessageKind};
pub use outbound::OutboundMessage;
pub use transport::{ClientParameters, Transport};
