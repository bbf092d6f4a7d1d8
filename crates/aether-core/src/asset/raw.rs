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

use super::{Asset, AssetHandle, AssetId, AssetTypeCode};

/// The undecoded bytes of one asset, exactly as they arrived over the wire.
///
/// Decoding is someone else's job. The transfer layer only knows the id, the
/// type and the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAsset {
    id: AssetId,
    asset_type: AssetTypeCode,
    data: Vec<u8>,
}

impl Asset for RawAsset {}

/// A shared handle to received asset bytes. This is what notifications carry.
pub type RawAssetHandle = AssetHandle<RawAsset>;

impl RawAsset {
    /// Creates a new raw asset.
    pub fn new(id: AssetId, asset_type: AssetTypeCode, data: Vec<u8>) -> Self {
        Self {
            id,
            asset_type,
            data,
        }
    }

    /// The asset's identifier.
    pub fn id(&self) -> AssetId {
        self.id
    }

    /// The asset's type code.
    pub fn asset_type(&self) -> AssetTypeCode {
        self.asset_type
    }

    /// The asset's canonical type name, empty for an invalid code.
    pub fn type_name(&self) -> &'static str {
        self.asset_type.type_name().unwrap_or_default()
    }

    /// The asset's bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no bytes are held.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
