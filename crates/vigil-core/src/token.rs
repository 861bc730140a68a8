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

//! Opaque identity for watched threads.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Opaque, caller-supplied identity of a monitored thread.
///
/// The watchdog never interprets the value; it is only a registry key. Hosts
/// pick whatever is stable for the lifetime of the watch: an OS thread id, a
/// worker-pool slot, a plain counter. This keeps the core decoupled from any
/// specific thread-identification facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WatchToken(u64);

impl WatchToken {
    /// Creates a token from a raw identity value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identity value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for WatchToken {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl Display for WatchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thread-{}", self.0)
    }
}
