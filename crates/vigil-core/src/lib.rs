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

//! # Vigil Core
//!
//! Foundational crate containing the value types, error taxonomy, and
//! collaborator traits of the Vigil thread watchdog.
//!
//! This crate defines the "common language" of the watchdog: what a watched
//! thread's identity looks like ([`WatchToken`]), how its progress is
//! accounted ([`TickCounter`]), and the contracts through which the checker
//! talks to its host ([`ThreadInspector`], [`ReportSink`]). The `vigil-watch`
//! crate runs the checker over these types, and `vigil-infra` provides the
//! concrete host-side implementations.

#![warn(missing_docs)]

pub mod config;
pub mod counter;
pub mod error;
pub mod inspect;
pub mod report;
pub mod token;

pub use config::WatchdogConfig;
pub use counter::TickCounter;
pub use error::{WatchError, WatchResult};
pub use inspect::{ReportSink, ThreadInspector};
pub use report::{LockInfo, ThreadProbe, ThreadReport, ThreadRunState};
pub use token::WatchToken;
