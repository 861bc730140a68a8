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

//! Thread inspector backed by the `sysinfo` process table.

use anyhow::{anyhow, bail};
use std::fmt;
use std::sync::Mutex;
use sysinfo::{ProcessStatus, ProcessesToUpdate, System};
use vigil_core::{ThreadInspector, ThreadProbe, ThreadRunState, WatchToken};

// Linux truncates thread names at 15 bytes (TASK_COMM_LEN minus the NUL).
const TASK_NAME_MAX: usize = 15;

/// Inspector that resolves watched threads through the OS process table.
///
/// The registered label is matched against the OS thread names of the current
/// process, so monitored threads should be spawned through
/// `thread::Builder::name` with the same label they register under. The probe
/// reports the thread's scheduler state; stack frames and lock holdings are
/// host-runtime facilities the OS does not expose for foreign threads, so
/// those fields stay empty. Hosts with richer runtimes supply their own
/// [`ThreadInspector`].
pub struct SysinfoInspector {
    system: Mutex<System>,
}

impl SysinfoInspector {
    /// Creates an inspector with an empty process table; the table is
    /// refreshed on every capture.
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SysinfoInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SysinfoInspector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SysinfoInspector").finish_non_exhaustive()
    }
}

impl ThreadInspector for SysinfoInspector {
    fn inspect(&self, token: WatchToken, label: &str) -> anyhow::Result<ThreadProbe> {
        let mut system = self.system.lock().unwrap();
        system.refresh_processes(ProcessesToUpdate::All, true);

        let pid = sysinfo::get_current_pid()
            .map_err(|err| anyhow!("cannot resolve the current pid: {err}"))?;
        let process = system
            .process(pid)
            .ok_or_else(|| anyhow!("current process missing from the process table"))?;

        let Some(tasks) = process.tasks() else {
            // Platform without per-task enumeration: name from the label,
            // state unknown.
            return Ok(ThreadProbe {
                name: Some(label.to_string()),
                ..ThreadProbe::default()
            });
        };

        for task_pid in tasks {
            let Some(task) = system.process(*task_pid) else {
                continue;
            };
            let name = task.name().to_string_lossy();
            if matches_label(&name, label) {
                return Ok(ThreadProbe {
                    name: Some(name.into_owned()),
                    state: map_status(task.status()),
                    locked_monitors: Vec::new(),
                    frames: Vec::new(),
                });
            }
        }

        bail!("no OS thread named '{label}' in the current process ({token})")
    }
}

/// Matches an OS task name against the registered label, tolerating the
/// kernel's truncation of long names.
fn matches_label(task_name: &str, label: &str) -> bool {
    if task_name == label {
        return true;
    }
    task_name.len() == TASK_NAME_MAX
        && label.len() > TASK_NAME_MAX
        && label.as_bytes().starts_with(task_name.as_bytes())
}

fn map_status(status: ProcessStatus) -> ThreadRunState {
    match status {
        ProcessStatus::Run | ProcessStatus::Waking => ThreadRunState::Runnable,
        ProcessStatus::Sleep | ProcessStatus::Idle | ProcessStatus::Parked => {
            ThreadRunState::Sleeping
        }
        ProcessStatus::Stop
        | ProcessStatus::Tracing
        | ProcessStatus::LockBlocked
        | ProcessStatus::UninterruptibleDiskSleep => ThreadRunState::Blocked,
        ProcessStatus::Zombie | ProcessStatus::Dead => ThreadRunState::Zombie,
        _ => ThreadRunState::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn label_matching_tolerates_kernel_truncation() {
        assert!(matches_label("vigil-healthy", "vigil-healthy"));
        assert!(matches_label(
            "a-very-long-wor",
            "a-very-long-worker-name"
        ));
        assert!(!matches_label("vigil-healthy", "vigil-stalled"));
        // A short label must match exactly, not by prefix.
        assert!(!matches_label("vigil", "vigil-healthy"));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn resolves_a_named_thread_of_this_process() {
        let stop = Arc::new(AtomicBool::new(false));
        let worker_stop = Arc::clone(&stop);
        let worker = thread::Builder::new()
            .name("vigil-probe".to_string())
            .spawn(move || {
                while !worker_stop.load(Ordering::Relaxed) {
                    thread::sleep(Duration::from_millis(5));
                }
            })
            .unwrap();

        let inspector = SysinfoInspector::new();
        let probe = inspector
            .inspect(WatchToken::new(1), "vigil-probe")
            .expect("named thread should be resolvable");
        assert_eq!(probe.name.as_deref(), Some("vigil-probe"));
        assert!(probe.frames.is_empty());

        stop.store(true, Ordering::Relaxed);
        worker.join().unwrap();
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn unknown_label_is_a_capture_failure() {
        let inspector = SysinfoInspector::new();
        assert!(inspector
            .inspect(WatchToken::new(2), "vigil-no-such")
            .is_err());
    }
}
