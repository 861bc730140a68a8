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

//! Optional process-wide watchdog instance.
//!
//! The service itself is an explicit handle, so libraries and tests can run
//! as many independent watchdogs as they like. Hosts that want the classic
//! one-per-process setup initialize it here once; a second initialization
//! fails with [`WatchError::AlreadyInitialized`].

use crate::service::WatchdogService;
use std::sync::{Arc, OnceLock};
use vigil_core::{ReportSink, ThreadInspector, WatchError, WatchResult, WatchdogConfig};

static INSTANCE: OnceLock<Arc<WatchdogService>> = OnceLock::new();

/// Initializes the process-wide watchdog and starts its checker on a
/// dedicated background thread.
///
/// Fails with [`WatchError::AlreadyInitialized`] if the process-wide
/// watchdog already exists; the losing caller's service is never started.
pub fn init(
    config: WatchdogConfig,
    inspector: Arc<dyn ThreadInspector>,
    sink: Arc<dyn ReportSink>,
) -> WatchResult<Arc<WatchdogService>> {
    let service = Arc::new(WatchdogService::new(config, inspector, sink));
    INSTANCE
        .set(Arc::clone(&service))
        .map_err(|_| WatchError::AlreadyInitialized)?;
    service.start();
    Ok(service)
}

/// Initializes the process-wide watchdog and runs its checker on the calling
/// thread, blocking until another thread calls `stop` on the instance.
///
/// For deterministic or embedded setups that dedicate a thread of their own
/// to the checker. Fails with [`WatchError::AlreadyInitialized`] like
/// [`init`].
pub fn init_inline(
    config: WatchdogConfig,
    inspector: Arc<dyn ThreadInspector>,
    sink: Arc<dyn ReportSink>,
) -> WatchResult<()> {
    let service = Arc::new(WatchdogService::new(config, inspector, sink));
    INSTANCE
        .set(Arc::clone(&service))
        .map_err(|_| WatchError::AlreadyInitialized)?;
    service.run_inline();
    Ok(())
}

/// Returns the process-wide watchdog, if initialized.
pub fn instance() -> Option<Arc<WatchdogService>> {
    INSTANCE.get().cloned()
}
