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

/// An unbounded, multi-producer channel for one kind of event.
///
/// Producers get their own [`flume::Sender`] through [`EventBus::sender`];
/// the owner of the bus consumes from [`EventBus::receiver`] or takes
/// everything queued at once with [`EventBus::drain`]. The bus is generic so
/// the core crate never needs to know which events other crates define.
#[derive(Debug)]
pub struct EventBus<T: Clone + Send + Sync + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> EventBus<T> {
    /// Opens a new, empty bus.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Queues `event`. A bus always holds its own receiver, so this only
    /// fails if the channel was torn down underneath it; that is logged.
    pub fn publish(&self, event: T) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to publish event: {e}");
        }
    }

    /// A new producer handle.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// The consuming end.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Takes every queued event, oldest first, without blocking.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Number of events waiting.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if no event is waiting.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
