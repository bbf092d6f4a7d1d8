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

//! A generic, type-safe storage for received asset handles.

use aether_core::asset::{Asset, AssetHandle, AssetId};
use std::collections::HashMap;

/// An in-memory map from asset id to a shared handle, for one asset type `A`.
///
/// Any given asset is stored once. Later lookups return a clone of the same
/// handle.
pub struct Assets<A: Asset> {
    storage: HashMap<AssetId, AssetHandle<A>>,
}

impl<A: Asset> Default for Assets<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Asset> Assets<A> {
    /// Creates a new, empty asset storage.
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
        }
    }

    /// Inserts an asset handle, replacing any previous handle for `id`.
    pub fn insert(&mut self, id: AssetId, handle: AssetHandle<A>) {
        self.storage.insert(id, handle);
    }

    /// Retrieves the handle stored for `id`.
    pub fn get(&self, id: &AssetId) -> Option<&AssetHandle<A>> {
        self.storage.get(id)
    }

    /// Checks if an asset with the specified id exists in the storage.
    pub fn contains(&self, id: &AssetId) -> bool {
        self.storage.contains_key(id)
    }

    /// Number of stored assets.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}
