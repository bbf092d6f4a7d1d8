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

use super::{Field, MessageKind};
use crate::asset::AssetId;

/// A message under construction, ready to be handed to a [`Transport`](super::Transport).
///
/// Fields are appended in wire order. The variable block count, when set,
/// tells the transport how many times the trailing block repeats.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    kind: MessageKind,
    fields: Vec<Field>,
    block_count: Option<u8>,
    reliable: bool,
}

impl OutboundMessage {
    /// Starts building a message of the given kind.
    pub fn new(kind: MessageKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
            block_count: None,
            reliable: false,
        }
    }

    /// Appends a 128-bit identifier.
    pub fn add_uuid(&mut self, value: AssetId) -> &mut Self {
        self.push(Field::Uuid(value))
    }

    /// Appends a signed 8-bit integer.
    pub fn add_s8(&mut self, value: i8) -> &mut Self {
        self.push(Field::S8(value))
    }

    /// Appends an unsigned 8-bit integer.
    pub fn add_u8(&mut self, value: u8) -> &mut Self {
        self.push(Field::U8(value))
    }

    /// Appends an unsigned 16-bit integer.
    pub fn add_u16(&mut self, value: u16) -> &mut Self {
        self.push(Field::U16(value))
    }

    /// Appends an unsigned 32-bit integer.
    pub fn add_u32(&mut self, value: u32) -> &mut Self {
        self.push(Field::U32(value))
    }

    /// Appends a signed 32-bit integer.
    pub fn add_s32(&mut self, value: i32) -> &mut Self {
        self.push(Field::S32(value))
    }

    /// Appends a 32-bit float.
    pub fn add_f32(&mut self, value: f32) -> &mut Self {
        self.push(Field::F32(value))
    }

    /// Appends a length-prefixed byte buffer.
    pub fn add_buffer(&mut self, value: &[u8]) -> &mut Self {
        self.push(Field::Buffer(value.to_vec()))
    }

    /// Declares how many times the following variable block repeats.
    pub fn set_variable_block_count(&mut self, count: u8) -> &mut Self {
        self.block_count = Some(count);
        self
    }

    /// Asks the transport to retransmit until acknowledged.
    pub fn mark_reliable(&mut self) -> &mut Self {
        self.reliable = true;
        self
    }

    /// The message kind.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// The appended fields, in wire order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The variable block count, if one was declared.
    pub fn block_count(&self) -> Option<u8> {
        self.block_count
    }

    /// Whether the message must be delivered reliably.
    pub fn is_reliable(&self) -> bool {
        self.reliable
    }

    fn push(&mut self, field: Field) -> &mut Self {
        self.fields.push(field);
        self
    }
}
