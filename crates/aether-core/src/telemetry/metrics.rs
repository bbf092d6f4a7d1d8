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

use std::fmt;

/// Identifies a metric as `namespace:name`, e.g. `udp_assets:bytes_received`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricId {
    /// The subsystem that owns the metric.
    pub namespace: String,
    /// The metric's name within the namespace.
    pub name: String,
}

impl MetricId {
    /// Builds an id from its two parts.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// The current value of a metric. The variant fixes the metric's kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    /// Monotonic count, e.g. requests sent.
    Counter(u64),
    /// Point-in-time level, e.g. transfers in flight.
    Gauge(f64),
}

impl MetricValue {
    /// `"counter"` or `"gauge"`.
    pub fn kind(&self) -> &'static str {
        match self {
            MetricValue::Counter(_) => "counter",
            MetricValue::Gauge(_) => "gauge",
        }
    }

    /// The count, if this is a counter.
    pub fn as_counter(&self) -> Option<u64> {
        match self {
            MetricValue::Counter(v) => Some(*v),
            MetricValue::Gauge(_) => None,
        }
    }

    /// The level, if this is a gauge.
    pub fn as_gauge(&self) -> Option<f64> {
        match self {
            MetricValue::Gauge(v) => Some(*v),
            MetricValue::Counter(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Counter(v) => write!(f, "{v}"),
            MetricValue::Gauge(v) => write!(f, "{v:.2}"),
        }
    }
}

/// A registered metric and its latest value.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// Where the metric is registered.
    pub id: MetricId,
    /// What the metric measures.
    pub description: String,
    /// The latest value.
    pub value: MetricValue,
}

/// Result type for metric operations.
pub type MetricsResult<T> = Result<T, MetricsError>;

/// Failures of metric registration and updates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricsError {
    /// No metric is registered under this id.
    #[error("metric {0} is not registered")]
    NotRegistered(MetricId),

    /// The metric exists with another kind.
    #[error("metric {id} is not a {expected}")]
    WrongKind {
        /// The metric that was addressed.
        id: MetricId,
        /// The kind the operation needs.
        expected: &'static str,
    },

    /// The shared metric store is unusable after a panic.
    #[error("metric store lock poisoned")]
    Poisoned,
}
