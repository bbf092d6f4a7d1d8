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

use super::OutboundMessage;
use crate::asset::AssetId;

/// Session identity the server expects on client requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientParameters {
    /// The logged-in agent.
    pub agent_id: AssetId,
    /// The current session.
    pub session_id: AssetId,
}

/// The reliable-messaging transport, as seen by the asset layer.
///
/// Implementations own framing, acknowledgement and retransmission. Sending
/// takes `&self` because the transport is shared with other subsystems and
/// queues messages internally.
pub trait Transport: Send + Sync {
    /// Returns `true` while a circuit to the world server is up.
    fn is_connected(&self) -> bool;

    /// The identity of the current session.
    fn client_parameters(&self) -> ClientParameters;

    /// Hands a finished message to the transport for delivery.
    fn send(&self, message: OutboundMessage);
}
