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

//! Configuration for a watchdog service.

use std::time::Duration;

/// Configuration for a watchdog service.
#[derive(Debug, Clone)]
pub struct WatchdogConfig {
    /// Delay between checker wake-ups. Each wake-up runs one evaluation pass
    /// over the registry.
    pub wake_interval: Duration,
    /// Length of the measurement window applied to every watched thread.
    pub window: Duration,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            wake_interval: Duration::from_millis(500),
            window: Duration::from_millis(1000),
        }
    }
}
