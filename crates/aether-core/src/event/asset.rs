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

use crate::asset::{AssetId, RawAssetHandle, RequestTag};

/// Name of the category every asset notification is published under.
pub const ASSET_EVENT_CATEGORY: &str = "Asset";

/// A notification about one asset transfer.
#[derive(Debug, Clone)]
pub enum AssetEvent {
    /// More bytes of a transfer have arrived.
    Progress {
        /// The asset being transferred.
        id: AssetId,
        /// Canonical type name.
        type_name: &'static str,
        /// Declared size, zero while unknown.
        size: u32,
        /// Bytes received, possibly with gaps.
        received: u32,
        /// Bytes received from offset zero without a gap.
        received_contiguous: u32,
    },

    /// The transfer ended without producing the asset.
    Canceled {
        /// The asset that will not arrive.
        id: AssetId,
        /// Canonical type name.
        type_name: &'static str,
    },

    /// The asset is complete. One of these is sent per requesting tag.
    Ready {
        /// The completed asset.
        id: AssetId,
        /// Canonical type name.
        type_name: &'static str,
        /// Shared handle to the asset bytes.
        asset: RawAssetHandle,
        /// The tag of the request this notification answers.
        tag: RequestTag,
    },
}

impl AssetEvent {
    /// The category this event is published under.
    pub fn category(&self) -> &'static str {
        ASSET_EVENT_CATEGORY
    }

    /// The asset this event is about.
    pub fn asset_id(&self) -> AssetId {
        match self {
            AssetEvent::Progress { id, .. }
            | AssetEvent::Canceled { id, .. }
            | AssetEvent::Ready { id, .. } => *id,
        }
    }
}
