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

use super::Assets;
use aether_core::asset::{
    AssetHandle, AssetId, AssetStorage, RawAsset, RawAssetHandle, StorageError, StorageResult,
};
use std::sync::RwLock;

/// The default [`AssetStorage`] sink: keeps every completed asset in memory.
///
/// Storing an id a second time replaces the earlier bytes; the previously
/// returned handles stay valid and keep the old data alive.
#[derive(Default)]
pub struct AssetCache {
    assets: RwLock<Assets<RawAsset>>,
}

impl AssetCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored handle for `id`, if any.
    pub fn get(&self, id: &AssetId) -> Option<RawAssetHandle> {
        self.assets.read().ok()?.get(id).cloned()
    }

    /// Number of cached assets.
    pub fn len(&self) -> usize {
        self.assets.read().map(|a| a.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetStorage for AssetCache {
    fn store(&self, asset: RawAsset) -> StorageResult<RawAssetHandle> {
        let id = asset.id();
        let handle = AssetHandle::new(asset);
        let mut assets = self
            .assets
            .write()
            .map_err(|_| StorageError::Unavailable("asset cache lock poisoned".to_string()))?;
        assets.insert(id, handle.clone());
        log::debug!("Cached asset {id} ({} bytes)", handle.len());
        Ok(handle)
    }
}
