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

//! Provides foundational primitives for event-driven communication.
//!
//! The [`EventBus`] is a generic, thread-safe MPSC channel. Asset
//! notifications are defined here as [`AssetEvent`] so every consumer agrees on
//! their shape without depending on the provider crate.

mod asset;
mod bus;

pub use self::asset::{AssetEvent, ASSET_EVENT_CATEGORY};
pub use self::bus::EventBus;
