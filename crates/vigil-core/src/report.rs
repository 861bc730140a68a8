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

//! Diagnostic report data for flagged threads.
//!
//! A [`ThreadProbe`] is the raw execution-state snapshot an inspector
//! captures from the host; the checker merges it with the counter data into
//! the [`ThreadReport`] handed to report sinks. All types are serde-friendly
//! so hosts can ship reports into a telemetry pipeline unchanged.

use crate::token::WatchToken;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Coarse run state of an OS thread at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThreadRunState {
    /// Running or runnable on a CPU.
    Runnable,
    /// Sleeping or parked, waiting for a timer or wake-up.
    Sleeping,
    /// Blocked on a lock, I/O, or an uninterruptible wait.
    Blocked,
    /// Terminated but not yet reaped.
    Zombie,
    /// The host could not determine the state.
    #[default]
    Unknown,
}

impl Display for ThreadRunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            ThreadRunState::Runnable => "RUNNABLE",
            ThreadRunState::Sleeping => "SLEEPING",
            ThreadRunState::Blocked => "BLOCKED",
            ThreadRunState::Zombie => "ZOMBIE",
            ThreadRunState::Unknown => "UNKNOWN",
        };
        write!(f, "{state}")
    }
}

/// A monitor or lock a thread held at capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockInfo {
    /// Host-specific description of the lock (address, type, name).
    pub description: String,
    /// The stack frame that acquired the lock, if the host tracks it.
    pub frame: Option<String>,
}

/// Raw execution-state snapshot returned by a
/// [`ThreadInspector`](crate::inspect::ThreadInspector).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadProbe {
    /// The thread's name as known to the host, if resolvable.
    pub name: Option<String>,
    /// The thread's run state.
    pub state: ThreadRunState,
    /// Monitors or locks the thread held.
    pub locked_monitors: Vec<LockInfo>,
    /// Call-stack snapshot, outermost frame last. Empty when the host cannot
    /// capture foreign-thread stacks.
    pub frames: Vec<String>,
}

/// Structured record emitted for a thread whose tick count fell at or below
/// its configured minimum. Rendering is the sink's business, not the core's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadReport {
    /// Identity of the flagged thread.
    pub token: WatchToken,
    /// Thread name: the probe's if resolved, otherwise the registered label.
    pub name: String,
    /// Run state at capture time.
    pub state: ThreadRunState,
    /// Ticks observed in the expired window.
    pub observed_ticks: u64,
    /// The minimum the window was evaluated against.
    pub min_rate: i64,
    /// Monitors or locks the thread held.
    pub locked_monitors: Vec<LockInfo>,
    /// Call-stack snapshot, if the inspector captured one.
    pub frames: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_defaults_to_unknown_state() {
        let probe = ThreadProbe::default();
        assert_eq!(probe.state, ThreadRunState::Unknown);
        assert!(probe.name.is_none());
        assert!(probe.locked_monitors.is_empty());
        assert!(probe.frames.is_empty());
    }

    #[test]
    fn report_serializes_for_telemetry_pipelines() {
        let report = ThreadReport {
            token: WatchToken::new(3),
            name: "worker-3".to_string(),
            state: ThreadRunState::Blocked,
            observed_ticks: 2,
            min_rate: 5,
            locked_monitors: vec![LockInfo {
                description: "world-state mutex".to_string(),
                frame: Some("game::world::step".to_string()),
            }],
            frames: vec!["game::world::step".to_string()],
        };

        let json = serde_json::to_string(&report).unwrap();
        let back: ThreadReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
