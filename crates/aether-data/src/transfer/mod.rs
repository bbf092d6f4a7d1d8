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

//! In-flight transfer state.
//!
//! A [`TransferRecord`] follows one asset from the moment its request goes on
//! the wire until it completes, is canceled, or is put back into the
//! [`PendingRequestQueue`] after a connection loss. Records live in a
//! [`TransferTable`], one table per transfer channel.

mod chunks;
mod pending;
mod record;
mod table;

pub use chunks::ChunkAssembler;
pub use pending::{PendingRequest, PendingRequestQueue};
pub use record::TransferRecord;
pub use table::TransferTable;
