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

use super::Asset;
use std::{ops::Deref, sync::Arc};

/// Shared ownership of a completed asset.
///
/// One transfer can answer several requesters. Storage hands back a single
/// handle, and every `Ready` notification carries a clone of it, so all
/// requesters see the same bytes without copying them.
#[derive(Debug)]
pub struct AssetHandle<T: Asset>(Arc<T>);

impl<T: Asset> AssetHandle<T> {
    /// Wraps a finished asset.
    pub fn new(asset: T) -> Self {
        Self(Arc::new(asset))
    }

    /// Returns `true` if both handles share one allocation, i.e. they came
    /// from the same store call.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Asset> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Asset> Deref for AssetHandle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Blob(Vec<u8>);

    impl Asset for Blob {}

    #[test]
    fn clones_share_the_asset() {
        let handle = AssetHandle::new(Blob(vec![1, 2, 3]));
        let copy = handle.clone();

        assert!(handle.ptr_eq(&copy));
        assert_eq!(copy.0.0, vec![1, 2, 3]);
        assert!(!handle.ptr_eq(&AssetHandle::new(Blob(vec![1, 2, 3]))));
    }
}
