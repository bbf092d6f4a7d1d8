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

use super::{ProtocolError, ProtocolResult};
use crate::asset::AssetId;

/// A single typed field of a protocol message.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Signed 8-bit integer.
    S8(i8),
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Signed 32-bit integer.
    S32(i32),
    /// 32-bit float.
    F32(f32),
    /// 128-bit identifier.
    Uuid(AssetId),
    /// Length-prefixed byte buffer.
    Buffer(Vec<u8>),
}

impl Field {
    /// Short name of the field's wire type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Field::S8(_) => "s8",
            Field::U8(_) => "u8",
            Field::U16(_) => "u16",
            Field::U32(_) => "u32",
            Field::S32(_) => "s32",
            Field::F32(_) => "f32",
            Field::Uuid(_) => "uuid",
            Field::Buffer(_) => "buffer",
        }
    }
}

macro_rules! typed_read {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty, $label:literal) => {
        $(#[$doc])*
        fn $name(&mut self) -> ProtocolResult<$ty> {
            match self.next_field($label)? {
                Field::$variant(value) => Ok(value),
                other => Err(ProtocolError::TypeMismatch {
                    expected: $label,
                    found: other.type_name(),
                }),
            }
        }
    };
}

/// Sequential, cursor-based access to the fields of an inbound message.
///
/// Implementors only provide cursor movement. The typed reads are derived from
/// [`next_field`](MessageReader::next_field) and fail with
/// [`ProtocolError::TypeMismatch`] without guessing at conversions.
pub trait MessageReader {
    /// Returns the field under the cursor and advances past it.
    /// `expected` names what the caller is about to read, for error reporting.
    fn next_field(&mut self, expected: &'static str) -> ProtocolResult<Field>;

    /// Advances the cursor past the current field without reading it.
    fn skip_field(&mut self) -> ProtocolResult<()>;

    /// Moves the cursor forward to the next field called `name`.
    fn skip_to_field(&mut self, name: &str) -> ProtocolResult<()>;

    typed_read!(
        /// Reads a signed 8-bit integer.
        read_s8, S8, i8, "s8"
    );
    typed_read!(
        /// Reads an unsigned 8-bit integer.
        read_u8, U8, u8, "u8"
    );
    typed_read!(
        /// Reads an unsigned 16-bit integer.
        read_u16, U16, u16, "u16"
    );
    typed_read!(
        /// Reads an unsigned 32-bit integer.
        read_u32, U32, u32, "u32"
    );
    typed_read!(
        /// Reads a signed 32-bit integer.
        read_s32, S32, i32, "s32"
    );
    typed_read!(
        /// Reads a 32-bit float.
        read_f32, F32, f32, "f32"
    );
    typed_read!(
        /// Reads a 128-bit identifier.
        read_uuid, Uuid, AssetId, "uuid"
    );
    typed_read!(
        /// Reads a byte buffer.
        read_buffer, Buffer, Vec<u8>, "buffer"
    );
}

/// An in-memory message made of named fields.
///
/// Transport integrations decode a datagram into one of these; tests build
/// them by hand.
///
/// ```
/// use aether_core::net::{Field, FieldReader, MessageReader};
///
/// let mut reader = FieldReader::new()
///     .with("Codec", Field::U8(2))
///     .with("Size", Field::U32(1024));
/// reader.skip_field().unwrap();
/// assert_eq!(reader.read_u32().unwrap(), 1024);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldReader {
    fields: Vec<(String, Field)>,
    cursor: usize,
}

impl FieldReader {
    /// Creates an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a named field.
    pub fn with(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.push((name.into(), field));
        self
    }
}

impl MessageReader for FieldReader {
    fn next_field(&mut self, expected: &'static str) -> ProtocolResult<Field> {
        let (_, field) = self
            .fields
            .get(self.cursor)
            .ok_or(ProtocolError::EndOfMessage { expected })?;
        self.cursor += 1;
        Ok(field.clone())
    }

    fn skip_field(&mut self) -> ProtocolResult<()> {
        if self.cursor >= self.fields.len() {
            return Err(ProtocolError::EndOfMessage { expected: "any" });
        }
        self.cursor += 1;
        Ok(())
    }

    fn skip_to_field(&mut self, name: &str) -> ProtocolResult<()> {
        let offset = self.fields[self.cursor.min(self.fields.len())..]
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| ProtocolError::UnknownField(name.to_string()))?;
        self.cursor += offset;
        Ok(())
    }
}
