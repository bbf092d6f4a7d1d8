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

use aether_core::asset::{AssetId, AssetTypeCode, RequestTag};
use std::collections::VecDeque;

/// A caller's interest in an asset that has not been put on the wire yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// The wanted asset.
    pub asset_id: AssetId,
    /// Its type, already validated.
    pub asset_type: AssetTypeCode,
    /// Every requester this entry speaks for.
    pub tags: Vec<RequestTag>,
}

impl PendingRequest {
    /// A request on behalf of a single caller.
    pub fn new(asset_id: AssetId, asset_type: AssetTypeCode, tag: RequestTag) -> Self {
        Self {
            asset_id,
            asset_type,
            tags: vec![tag],
        }
    }
}

/// FIFO buffer between "asset requested" and "request sent".
///
/// Entries for the same asset are not coalesced here; the provider merges them
/// into one transfer when it drains the queue.
#[derive(Debug, Clone, Default)]
pub struct PendingRequestQueue {
    requests: VecDeque<PendingRequest>,
}

impl PendingRequestQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a request at the back.
    pub fn push(&mut self, request: PendingRequest) {
        self.requests.push_back(request);
    }

    /// Removes every request, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = PendingRequest> + '_ {
        self.requests.drain(..)
    }

    /// Number of queued requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl Extend<PendingRequest> for PendingRequestQueue {
    fn extend<I: IntoIterator<Item = PendingRequest>>(&mut self, iter: I) {
        self.requests.extend(iter);
    }
}
