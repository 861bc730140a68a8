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

//! Error taxonomy of the watchdog.

use crate::token::WatchToken;
use std::fmt::Display;

/// A specialized `Result` type for watchdog operations.
pub type WatchResult<T> = Result<T, WatchError>;

/// An error that can occur while driving the watchdog.
///
/// Every variant signals a caller bug, not a runtime condition the watchdog
/// recovers from: errors surface synchronously and the watchdog performs no
/// retry. Diagnostic-capture failures are not part of this taxonomy; the
/// checker logs those per-entry and keeps evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchError {
    /// The process-wide watchdog was initialized a second time.
    AlreadyInitialized,
    /// A watch was requested for a token that already has a counter.
    AlreadyWatching(WatchToken),
    /// An unwatch or tick was requested for a token with no counter.
    NotWatching(WatchToken),
}

impl Display for WatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchError::AlreadyInitialized => write!(f, "Watchdog already initialized"),
            WatchError::AlreadyWatching(token) => write!(f, "Already watching {token}"),
            WatchError::NotWatching(token) => write!(f, "Not watching {token}"),
        }
    }
}

impl std::error::Error for WatchError {}
