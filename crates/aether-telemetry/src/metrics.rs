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

//! In-memory metric registry.
//!
//! Registration hands back a typed handle; updates through the handle go
//! straight to the shared store, so the registry and every handle see the
//! same values.

use aether_core::telemetry::{Metric, MetricId, MetricValue, MetricsError, MetricsResult};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

type Store = Arc<RwLock<HashMap<MetricId, Metric>>>;

/// Shared registry of counters and gauges. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct MetricsRegistry {
    store: Store,
}

impl MetricsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a counter starting at zero. Registering an existing id
    /// resets it.
    pub fn register_counter(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> MetricsResult<CounterHandle> {
        let id = self.register(namespace, name, description, MetricValue::Counter(0))?;
        Ok(CounterHandle {
            id,
            store: self.store.clone(),
        })
    }

    /// Registers a gauge starting at zero.
    pub fn register_gauge(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> MetricsResult<GaugeHandle> {
        let id = self.register(namespace, name, description, MetricValue::Gauge(0.0))?;
        Ok(GaugeHandle {
            id,
            store: self.store.clone(),
        })
    }

    fn register(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        value: MetricValue,
    ) -> MetricsResult<MetricId> {
        let id = MetricId::new(namespace, name);
        let metric = Metric {
            id: id.clone(),
            description: description.into(),
            value,
        };
        let mut store = self.store.write().map_err(|_| MetricsError::Poisoned)?;
        if store.insert(id.clone(), metric).is_some() {
            log::debug!("Metric {id} registered again, value reset");
        }
        Ok(id)
    }

    /// Returns a copy of one metric.
    pub fn get_metric(&self, id: &MetricId) -> MetricsResult<Metric> {
        let store = self.store.read().map_err(|_| MetricsError::Poisoned)?;
        store
            .get(id)
            .cloned()
            .ok_or_else(|| MetricsError::NotRegistered(id.clone()))
    }

    /// Every metric in `namespace`, ordered by name.
    pub fn snapshot(&self, namespace: &str) -> MetricsResult<Vec<Metric>> {
        let store = self.store.read().map_err(|_| MetricsError::Poisoned)?;
        let mut metrics: Vec<Metric> = store
            .values()
            .filter(|metric| metric.id.namespace == namespace)
            .cloned()
            .collect();
        metrics.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(metrics)
    }

    /// Logs every metric in `namespace` at info level.
    pub fn log_summary(&self, namespace: &str) {
        match self.snapshot(namespace) {
            Ok(metrics) => {
                for metric in metrics {
                    log::info!("{} = {} ({})", metric.id, metric.value, metric.description);
                }
            }
            Err(e) => log::warn!("Cannot read metrics for '{namespace}': {e}"),
        }
    }

    /// Number of registered metrics.
    pub fn metric_count(&self) -> usize {
        self.store.read().map(|store| store.len()).unwrap_or(0)
    }
}

fn update<T>(
    store: &Store,
    id: &MetricId,
    apply: impl FnOnce(&mut MetricValue) -> Option<T>,
    expected: &'static str,
) -> MetricsResult<T> {
    let mut store = store.write().map_err(|_| MetricsError::Poisoned)?;
    let metric = store
        .get_mut(id)
        .ok_or_else(|| MetricsError::NotRegistered(id.clone()))?;
    apply(&mut metric.value).ok_or_else(|| MetricsError::WrongKind {
        id: id.clone(),
        expected,
    })
}

/// Write handle of a registered counter.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    id: MetricId,
    store: Store,
}

impl CounterHandle {
    /// Adds one and returns the new count.
    pub fn increment(&self) -> MetricsResult<u64> {
        self.increment_by(1)
    }

    /// Adds `amount` and returns the new count.
    pub fn increment_by(&self, amount: u64) -> MetricsResult<u64> {
        update(
            &self.store,
            &self.id,
            |value| match value {
                MetricValue::Counter(count) => {
                    *count = count.saturating_add(amount);
                    Some(*count)
                }
                MetricValue::Gauge(_) => None,
            },
            "counter",
        )
    }

    /// The current count.
    pub fn get(&self) -> MetricsResult<u64> {
        update(&self.store, &self.id, |value| value.as_counter(), "counter")
    }

    /// The counter's id.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

/// Write handle of a registered gauge.
#[derive(Debug, Clone)]
pub struct GaugeHandle {
    id: MetricId,
    store: Store,
}

impl GaugeHandle {
    /// Replaces the gauge's level.
    pub fn set(&self, level: f64) -> MetricsResult<()> {
        update(
            &self.store,
            &self.id,
            |value| match value {
                MetricValue::Gauge(current) => {
                    *current = level;
                    Some(())
                }
                MetricValue::Counter(_) => None,
            },
            "gauge",
        )
    }

    /// The current level.
    pub fn get(&self) -> MetricsResult<f64> {
        update(&self.store, &self.id, |value| value.as_gauge(), "gauge")
    }

    /// The gauge's id.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}
