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

//! Collaborator traits at the boundary between the checker and its host.
//!
//! The checker's responsibility ends at asking a [`ThreadInspector`] for a
//! thread's execution state and handing the finished [`ThreadReport`] to a
//! [`ReportSink`]. Concrete implementations live in `vigil-infra`; hosts with
//! richer runtimes (a VM with lock introspection, a signal-based stack
//! sampler) plug in their own.

use crate::report::{ThreadProbe, ThreadReport};
use crate::token::WatchToken;
use std::fmt::Debug;

/// Host-side collaborator that captures a thread's execution state.
pub trait ThreadInspector: Send + Sync + Debug + 'static {
    /// Captures the name, run state, lock holdings, and call stack of the
    /// thread identified by `token`. `label` is the label supplied at
    /// registration, typically the thread's name.
    ///
    /// Failures surface to the checker, which logs them and keeps evaluating
    /// the rest of the registry; one thread's capture failure never aborts an
    /// evaluation pass.
    fn inspect(&self, token: WatchToken, label: &str) -> anyhow::Result<ThreadProbe>;
}

/// Consumer of finished thread reports.
///
/// How a report is rendered (console, file, telemetry pipeline) is entirely
/// the sink's decision.
pub trait ReportSink: Send + Sync + Debug + 'static {
    /// Consumes one report for a flagged thread.
    fn emit(&self, report: &ThreadReport);
}
