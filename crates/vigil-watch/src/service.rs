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

//! The checker service: wake, evaluate, reset, repeat.

use crate::registry::WatchRegistry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use vigil_core::{
    ReportSink, ThreadInspector, ThreadProbe, ThreadReport, WatchResult, WatchToken,
    WatchdogConfig,
};

/// The watchdog checker service.
///
/// Owns the watch registry and the periodic evaluation cycle. It is the sole
/// writer of window resets and the sole trigger of diagnostic capture. The
/// cycle runs either on a dedicated background thread ([`start`]) or on the
/// caller's thread ([`run_inline`]); [`poll_now`] runs a single pass for
/// hosts that drive the cadence themselves.
///
/// The service never creates or controls the monitored threads; it only
/// detects and reports slowness.
///
/// [`start`]: WatchdogService::start
/// [`run_inline`]: WatchdogService::run_inline
/// [`poll_now`]: WatchdogService::poll_now
#[derive(Debug)]
pub struct WatchdogService {
    config: WatchdogConfig,
    registry: WatchRegistry,
    running: Arc<AtomicBool>,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
    inspector: Arc<dyn ThreadInspector>,
    sink: Arc<dyn ReportSink>,
}

impl WatchdogService {
    /// Creates a new service. The evaluation cycle does not run until
    /// [`start`](Self::start) or [`run_inline`](Self::run_inline) is called.
    pub fn new(
        config: WatchdogConfig,
        inspector: Arc<dyn ThreadInspector>,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        let registry = WatchRegistry::new(config.window);
        Self {
            config,
            registry,
            running: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
            inspector,
            sink,
        }
    }

    /// The service's registry. Remains inspectable after [`stop`](Self::stop).
    pub fn registry(&self) -> &WatchRegistry {
        &self.registry
    }

    /// The service's configuration.
    pub fn config(&self) -> &WatchdogConfig {
        &self.config
    }

    /// Starts watching a thread. See [`WatchRegistry::watch`].
    pub fn watch(
        &self,
        token: WatchToken,
        label: impl Into<String>,
        min_rate: i64,
    ) -> WatchResult<()> {
        self.registry.watch(token, label, min_rate)
    }

    /// Stops watching a thread. See [`WatchRegistry::unwatch`].
    pub fn unwatch(&self, token: WatchToken) -> WatchResult<()> {
        self.registry.unwatch(token)
    }

    /// Records one tick for a watched thread. See [`WatchRegistry::tick`].
    pub fn tick(&self, token: WatchToken) -> WatchResult<()> {
        self.registry.tick(token)
    }

    /// True while the evaluation cycle is scheduled.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Starts the evaluation cycle on a dedicated background thread. No-op if
    /// the cycle is already running.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let running = Arc::clone(&self.running);
        let registry = self.registry.clone();
        let inspector = Arc::clone(&self.inspector);
        let sink = Arc::clone(&self.sink);
        let wake_interval = self.config.wake_interval;

        let handle = thread::spawn(move || {
            log::info!("Watchdog checker thread started.");
            run_cycle(
                &registry,
                &running,
                wake_interval,
                inspector.as_ref(),
                sink.as_ref(),
            );
            log::info!("Watchdog checker thread stopped.");
        });
        *self.handle.lock().unwrap() = Some(handle);
    }

    /// Runs the evaluation cycle on the calling thread, blocking until
    /// [`stop`](Self::stop) is called from elsewhere. No-op if the cycle is
    /// already running.
    pub fn run_inline(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        log::info!("Watchdog checker running inline.");
        run_cycle(
            &self.registry,
            &self.running,
            self.config.wake_interval,
            self.inspector.as_ref(),
            self.sink.as_ref(),
        );
        log::info!("Watchdog inline checker stopped.");
    }

    /// Runs exactly one evaluation pass, regardless of the wake timer.
    /// Returns the number of flagged threads.
    ///
    /// Intended for hosts that embed the watchdog in their own loop and for
    /// deterministic tests.
    pub fn poll_now(&self) -> usize {
        evaluate_pass(
            &self.registry,
            Instant::now(),
            self.inspector.as_ref(),
            self.sink.as_ref(),
        )
    }

    /// Signals the cycle to exit on its next wake and joins the background
    /// thread if one exists. Cooperative: an in-flight sleep or evaluation
    /// pass completes first. The registry remains inspectable afterwards.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.lock().unwrap().take() {
            let _ = handle.join();
        }
    }
}

/// The wake/evaluate/reset cycle. A plain timed sleep; the running flag is
/// re-checked after each wake so `stop` exits the cycle without a further
/// evaluation pass.
fn run_cycle(
    registry: &WatchRegistry,
    running: &AtomicBool,
    wake_interval: Duration,
    inspector: &dyn ThreadInspector,
    sink: &dyn ReportSink,
) {
    while running.load(Ordering::Relaxed) {
        thread::sleep(wake_interval);
        if !running.load(Ordering::Relaxed) {
            break;
        }
        evaluate_pass(registry, Instant::now(), inspector, sink);
    }
}

/// One evaluation pass: capture and report every expired, under-rate entry.
///
/// A capture failure is logged and the entry is still reported with a default
/// probe (registered label, unknown state), so a broken inspector never hides
/// a slow thread or stalls the rest of the registry.
fn evaluate_pass(
    registry: &WatchRegistry,
    now: Instant,
    inspector: &dyn ThreadInspector,
    sink: &dyn ReportSink,
) -> usize {
    registry.evaluate(now, |token, entry| {
        let counter = entry.counter();
        let probe = match inspector.inspect(token, entry.label()) {
            Ok(probe) => probe,
            Err(err) => {
                log::warn!(
                    "Watchdog: capture failed for {token} ('{}'): {err:#}",
                    entry.label()
                );
                ThreadProbe::default()
            }
        };

        let report = ThreadReport {
            token,
            name: probe
                .name
                .unwrap_or_else(|| entry.label().to_string()),
            state: probe.state,
            observed_ticks: counter.ticks(),
            min_rate: counter.min_rate(),
            locked_monitors: probe.locked_monitors,
            frames: probe.frames,
        };
        log::debug!(
            "Watchdog: {token} ('{}') at {}/{} ticks this window",
            report.name,
            report.observed_ticks,
            report.min_rate
        );
        sink.emit(&report);
    })
}
