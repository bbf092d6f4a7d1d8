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

use std::collections::BTreeMap;

/// Reassembles packet-indexed chunks that may arrive in any order.
///
/// Chunks are keyed by packet index, so the byte offset of packet `k` is the
/// total length of packets `0..k`. The gap-free prefix (how many leading
/// packets are present, and how many bytes they hold) is maintained on every
/// insert, so neither counter needs a rescan.
#[derive(Debug, Clone, Default)]
pub struct ChunkAssembler {
    chunks: BTreeMap<u32, Vec<u8>>,
    received: u32,
    contiguous_packets: u64,
    contiguous_bytes: u32,
}

fn byte_len(data: &[u8]) -> u32 {
    u32::try_from(data.len()).unwrap_or(u32::MAX)
}

impl ChunkAssembler {
    /// Creates an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the chunk for `packet_index`. A repeated index replaces the
    /// earlier chunk.
    pub fn insert(&mut self, packet_index: u32, data: Vec<u8>) {
        let len = byte_len(&data);

        if let Some(previous) = self.chunks.insert(packet_index, data) {
            let old_len = byte_len(&previous);
            self.received = self.received.saturating_sub(old_len).saturating_add(len);
            if u64::from(packet_index) < self.contiguous_packets {
                self.contiguous_bytes = self
                    .contiguous_bytes
                    .saturating_sub(old_len)
                    .saturating_add(len);
            }
            return;
        }

        self.received = self.received.saturating_add(len);
        if u64::from(packet_index) == self.contiguous_packets {
            self.extend_prefix();
        }
    }

    fn extend_prefix(&mut self) {
        while let Ok(next) = u32::try_from(self.contiguous_packets) {
            let Some(chunk) = self.chunks.get(&next) else {
                break;
            };
            self.contiguous_bytes = self.contiguous_bytes.saturating_add(byte_len(chunk));
            self.contiguous_packets += 1;
        }
    }

    /// Total bytes held, gaps included.
    pub fn received(&self) -> u32 {
        self.received
    }

    /// Bytes held in the gap-free prefix starting at packet zero.
    pub fn received_contiguous(&self) -> u32 {
        self.contiguous_bytes
    }

    /// Copies out the gap-free prefix, never anything past the first gap.
    pub fn assemble_contiguous(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.contiguous_bytes as usize);
        for chunk in self.chunks.values().take(self.contiguous_packets as usize) {
            data.extend_from_slice(chunk);
        }
        data
    }
}
