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

// Vigil Sandbox
// Runs the watchdog against one healthy and one deliberately stalling worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use vigil_core::{WatchResult, WatchToken, WatchdogConfig};
use vigil_infra::{LogReportSink, SysinfoInspector};
use vigil_watch::WatchdogService;

const HEALTHY: WatchToken = WatchToken::new(1);
const STALLED: WatchToken = WatchToken::new(2);

// 50 ticks per 1000 ms window; the workers aim for ~100/s.
const MIN_RATE: i64 = 50;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let service = Arc::new(WatchdogService::new(
        WatchdogConfig::default(),
        Arc::new(SysinfoInspector::new()),
        Arc::new(LogReportSink),
    ));
    service.start();

    let stop = Arc::new(AtomicBool::new(false));
    let healthy = spawn_worker("vigil-healthy", HEALTHY, &service, &stop, None);
    let stalled = spawn_worker(
        "vigil-stalled",
        STALLED,
        &service,
        &stop,
        // Freezes for 3 s partway through; the checker should dump it.
        Some(Duration::from_secs(2)),
    );

    thread::sleep(Duration::from_secs(8));
    stop.store(true, Ordering::Relaxed);
    let _ = healthy.join();
    let _ = stalled.join();

    service.stop();
    log::info!("Sandbox done.");
    Ok(())
}

fn spawn_worker(
    name: &'static str,
    token: WatchToken,
    service: &Arc<WatchdogService>,
    stop: &Arc<AtomicBool>,
    stall_after: Option<Duration>,
) -> thread::JoinHandle<()> {
    let service = Arc::clone(service);
    let stop = Arc::clone(stop);
    thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            if let Err(err) = run_worker(name, token, &service, &stop, stall_after) {
                log::error!("{name}: {err}");
            }
        })
        .expect("failed to spawn worker")
}

fn run_worker(
    name: &str,
    token: WatchToken,
    service: &WatchdogService,
    stop: &AtomicBool,
    stall_after: Option<Duration>,
) -> WatchResult<()> {
    service.watch(token, name, MIN_RATE)?;
    let started = Instant::now();
    let mut stalled = false;

    while !stop.load(Ordering::Relaxed) {
        service.tick(token)?;
        if let Some(after) = stall_after {
            if !stalled && started.elapsed() >= after {
                log::info!("{name}: simulating a stall");
                thread::sleep(Duration::from_secs(3));
                stalled = true;
                log::info!("{name}: recovered");
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
    service.unwatch(token)
}
