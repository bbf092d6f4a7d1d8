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

use super::{AssetId, RawAsset, RawAssetHandle};

/// Errors reported by an [`AssetStorage`] sink.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The sink exists but cannot accept writes right now.
    #[error("asset storage is unavailable: {0}")]
    Unavailable(String),

    /// The sink refused this particular asset.
    #[error("asset {id} was rejected by storage: {reason}")]
    Rejected {
        /// The asset that was refused.
        id: AssetId,
        /// Why it was refused.
        reason: String,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// The sink that keeps completed assets.
///
/// The transfer layer hands over a finished buffer and gets back the handle
/// that is forwarded to every waiting requester. Caching policy lives behind
/// this trait.
pub trait AssetStorage: Send + Sync {
    /// Stores a completed asset and returns the handle callers should share.
    fn store(&self, asset: RawAsset) -> StorageResult<RawAssetHandle>;
}
