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

//! Acts as the agent for UDP asset transfers.
//!
//! This module provides the tactical logic for fetching assets from a world
//! server over the legacy UDP asset protocol. Callers queue requests through
//! the [`AssetProvider`](aether_core::asset::AssetProvider) interface; once per
//! frame the provider puts them on the wire, and inbound protocol messages are
//! demultiplexed into the matching transfer until it completes or is canceled.
//!
//! Two channels are spoken:
//! - the image channel for textures, keyed by asset id;
//! - the generic transfer channel for everything else, keyed by a transfer id
//!   the client generates per request.

mod config;
mod handlers;
mod metrics;
mod notifier;
mod protocol;
mod provider;

pub use config::ProviderConfig;
pub use metrics::TransferMetrics;
pub use notifier::AssetNotifier;
pub use provider::UdpAssetProvider;
