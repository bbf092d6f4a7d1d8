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

//! Provides the foundational traits and primitive types for the asset system.
//!
//! This module defines the "common language" for all asset transfer operations.
//! It contains the contracts that other crates implement or use, but it has no
//! knowledge of how assets travel over the wire or where they are cached.
//!
//! The key components are:
//! - [`AssetId`]: the 128-bit identifier of a logical asset.
//! - [`AssetTypeCode`]: the closed set of asset types the wire protocol knows.
//! - [`RequestTag`]: a caller's correlation token for one request.
//! - [`RawAsset`] and [`AssetHandle`]: the completed byte buffer and its shared handle.
//! - The [`AssetProvider`] and [`AssetStorage`] seams.

mod handle;
mod id;
mod kind;
mod provider;
mod raw;
mod storage;
mod tag;

pub use handle::*;
pub use id::*;
pub use kind::*;
pub use provider::*;
pub use raw::*;
pub use storage::*;
pub use tag::*;

/// A marker trait for types that can be managed by the asset system.
///
/// The supertraits make it possible to hand an asset to any thread once it has
/// been received, even though the transfer itself is single-threaded.
///
/// # Examples
///
/// ```
/// use aether_core::asset::Asset;
///
/// struct Texture {
///     // ... fields
/// }
///
/// impl Asset for Texture {}
/// ```
pub trait Asset: Send + Sync + 'static {}
