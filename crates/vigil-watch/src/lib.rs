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

//! # Vigil Watch
//!
//! The engine of the Vigil thread watchdog: the [`WatchRegistry`] mapping
//! watch tokens to tick counters, and the [`WatchdogService`] that wakes on a
//! fixed interval, evaluates every expired window, and triggers diagnostic
//! capture for threads at or below their minimum tick rate.
//!
//! Hosts that want exactly one watchdog per process can use the [`global`]
//! module; everything else works through explicit [`WatchdogService`]
//! handles, so independent instances coexist (and are trivially testable).

#![warn(missing_docs)]

pub mod global;
pub mod registry;
pub mod service;

pub use registry::{WatchRegistry, WatchedThread};
pub use service::WatchdogService;
