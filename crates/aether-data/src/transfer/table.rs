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

use super::TransferRecord;
use aether_core::asset::AssetId;
use std::collections::HashMap;
use std::hash::Hash;

/// Transfer records of one channel, keyed by the channel's wire key.
///
/// Textures are keyed by asset id. Generic assets are keyed by the transfer
/// handle the client made up for the request, so finding one by asset id
/// takes a scan ([`find_by_asset`](TransferTable::find_by_asset)).
#[derive(Debug, Clone)]
pub struct TransferTable<K> {
    records: HashMap<K, TransferRecord>,
}

impl<K> Default for TransferTable<K> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> TransferTable<K> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning any record it replaced.
    pub fn insert(&mut self, key: K, record: TransferRecord) -> Option<TransferRecord> {
        self.records.insert(key, record)
    }

    /// Looks up a record by wire key.
    pub fn get(&self, key: &K) -> Option<&TransferRecord> {
        self.records.get(key)
    }

    /// Looks up a record by wire key for mutation.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut TransferRecord> {
        self.records.get_mut(key)
    }

    /// Removes and returns a record.
    pub fn remove(&mut self, key: &K) -> Option<TransferRecord> {
        self.records.remove(key)
    }

    /// Returns `true` if a record exists under `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.records.contains_key(key)
    }

    /// Finds the record transferring `asset_id`. Linear in the table size.
    pub fn find_by_asset(&self, asset_id: &AssetId) -> Option<(K, &TransferRecord)> {
        self.records
            .iter()
            .find(|(_, record)| record.asset_id() == *asset_id)
            .map(|(key, record)| (*key, record))
    }

    /// Mutable variant of [`find_by_asset`](TransferTable::find_by_asset).
    pub fn find_by_asset_mut(&mut self, asset_id: &AssetId) -> Option<&mut TransferRecord> {
        self.records
            .values_mut()
            .find(|record| record.asset_id() == *asset_id)
    }

    /// Iterates mutably over all records in no particular order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut TransferRecord)> {
        self.records.iter_mut()
    }

    /// Removes every record, yielding them in no particular order.
    pub fn drain(&mut self) -> impl Iterator<Item = (K, TransferRecord)> + '_ {
        self.records.drain()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
