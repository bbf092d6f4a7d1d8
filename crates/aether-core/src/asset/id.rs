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

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Length of the canonical hyphenated textual form.
const TEXT_LEN: usize = 36;
/// Byte positions of the hyphens in the canonical textual form.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// A globally unique, 128-bit identifier for a logical asset.
///
/// The world server addresses assets by this value, and the texture channel
/// also uses it as the key of the transfer itself.
///
/// Parsing is strict: only the 36-character hyphenated form is accepted. The
/// looser forms `uuid` would otherwise tolerate (simple, braced, URN) are
/// rejected, because ids arrive from scene data written by other clients and
/// must compare equal as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(Uuid);

/// The reason an asset identifier failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid asset id '{0}'")]
pub struct InvalidAssetId(pub String);

impl AssetId {
    /// The all-zero identifier. Never a real asset.
    pub const NIL: AssetId = AssetId(Uuid::nil());

    /// Creates a new, random (version 4) `AssetId`.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps raw identifier bytes as received on the wire.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Returns the identifier's 16 raw bytes in wire order.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Returns `true` for the all-zero identifier.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Checks that `text` is a canonical hyphenated identifier without
    /// allocating.
    pub fn is_valid(text: &str) -> bool {
        let bytes = text.as_bytes();
        bytes.len() == TEXT_LEN
            && bytes.iter().enumerate().all(|(i, b)| {
                if HYPHENS.contains(&i) {
                    *b == b'-'
                } else {
                    b.is_ascii_hexdigit()
                }
            })
    }

    /// Parses the canonical hyphenated form.
    pub fn parse(text: &str) -> Result<Self, InvalidAssetId> {
        if !Self::is_valid(text) {
            return Err(InvalidAssetId(text.to_string()));
        }
        Uuid::parse_str(text)
            .map(Self)
            .map_err(|_| InvalidAssetId(text.to_string()))
    }
}

impl Default for AssetId {
    /// The nil identifier.
    fn default() -> Self {
        Self::NIL
    }
}

impl From<Uuid> for AssetId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for AssetId {
    type Err = InvalidAssetId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// The server-facing handle of one generic asset transfer.
///
/// The generic asset channel multiplexes by this handle rather than by asset id,
/// so two transfers of the same asset never share a key on the wire.
pub type TransferId = AssetId;

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "6f2f5c8e-41a0-4b1e-9c3d-0a1b2c3d4e5f";

    #[test]
    fn parses_canonical_form() {
        let id = AssetId::parse(SAMPLE).expect("valid id");
        assert_eq!(id.to_string(), SAMPLE);
        assert!(!id.is_nil());
    }

    #[test]
    fn accepts_uppercase_hex() {
        let upper = SAMPLE.to_uppercase();
        assert!(AssetId::is_valid(&upper));
        assert_eq!(AssetId::parse(&upper).unwrap().to_string(), SAMPLE);
    }

    #[test]
    fn rejects_loose_forms() {
        assert!(!AssetId::is_valid("6f2f5c8e41a04b1e9c3d0a1b2c3d4e5f"));
        assert!(!AssetId::is_valid("{6f2f5c8e-41a0-4b1e-9c3d-0a1b2c3d4e5f}"));
        assert!(!AssetId::is_valid("6f2f5c8e-41a0-4b1e-9c3d-0a1b2c3d4e5"));
        assert!(!AssetId::is_valid("6f2f5c8e-41a0-4b1e-9c3d-0a1b2c3d4e5g"));
        assert!(!AssetId::is_valid("6f2f5c8e_41a0-4b1e-9c3d-0a1b2c3d4e5f"));
        assert!(AssetId::parse("").is_err());
    }

    #[test]
    fn bytes_round_trip_through_wire_form() {
        let id = AssetId::parse(SAMPLE).unwrap();
        assert_eq!(AssetId::from_bytes(*id.as_bytes()), id);
    }

    #[test]
    fn random_ids_are_distinct() {
        assert_ne!(AssetId::new_random(), AssetId::new_random());
        assert!(AssetId::NIL.is_nil());
    }
}
