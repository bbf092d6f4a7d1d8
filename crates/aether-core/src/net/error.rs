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

/// Errors raised while reading an inbound message.
///
/// These never reach the caller who requested an asset. The provider logs
/// them and drops the offending message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProtocolError {
    /// The message ran out of fields before `expected` could be read.
    #[error("message ended while reading {expected}")]
    EndOfMessage {
        /// The field type that was being read.
        expected: &'static str,
    },

    /// The next field exists but holds a different type.
    #[error("expected {expected} field, found {found}")]
    TypeMismatch {
        /// The field type that was being read.
        expected: &'static str,
        /// The field type actually present.
        found: &'static str,
    },

    /// No field with this name follows the read cursor.
    #[error("no field named '{0}' in the remainder of the message")]
    UnknownField(String),

    /// A field carried a value the protocol does not allow.
    #[error("invalid value {value} for {field}")]
    InvalidValue {
        /// The field name.
        field: &'static str,
        /// The offending value.
        value: i64,
    },
}

/// Result type for message reading.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
