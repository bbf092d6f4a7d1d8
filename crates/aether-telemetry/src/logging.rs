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

//! Process-wide logger installation.
//!
//! Library code only ever talks to the `log` facade. Binaries and test
//! harnesses call one of these once at start-up.

use env_logger::{Builder, Env};

/// Installs `env_logger`, honouring `RUST_LOG` and defaulting to `info`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    init_logging_with_filter("info");
}

/// Installs `env_logger` with `default_filter` used when `RUST_LOG` is unset.
pub fn init_logging_with_filter(default_filter: &str) {
    let result = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();

    if result.is_ok() {
        log::debug!("Logger initialized with default filter '{default_filter}'.");
    }
}
