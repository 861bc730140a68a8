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

//! Cross-thread integration tests: the background checker against live
//! ticking workers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use vigil_core::{ThreadInspector, ThreadProbe, WatchToken, WatchdogConfig};
use vigil_infra::ChannelReportSink;
use vigil_watch::WatchdogService;

/// Inspector double that resolves every thread by its registered label.
#[derive(Debug)]
struct LabelInspector;

impl ThreadInspector for LabelInspector {
    fn inspect(&self, _token: WatchToken, label: &str) -> anyhow::Result<ThreadProbe> {
        Ok(ThreadProbe {
            name: Some(label.to_string()),
            ..ThreadProbe::default()
        })
    }
}

#[test]
fn stalled_thread_is_flagged_by_the_background_checker() {
    let (sink, reports) = ChannelReportSink::new();
    let config = WatchdogConfig {
        wake_interval: Duration::from_millis(50),
        window: Duration::from_millis(100),
    };
    let service = WatchdogService::new(config, Arc::new(LabelInspector), Arc::new(sink));

    let token = WatchToken::new(1);
    service.watch(token, "stalled-worker", 5).unwrap();
    service.start();

    // The worker never ticks; the checker must flag it within a few windows.
    let report = reports
        .recv_timeout(Duration::from_secs(2))
        .expect("stalled worker should be flagged");
    assert_eq!(report.token, token);
    assert_eq!(report.name, "stalled-worker");
    assert!(report.observed_ticks as i64 <= report.min_rate);

    service.stop();
    assert!(!service.is_running());
}

#[test]
fn fifty_concurrent_workers_above_rate_are_never_flagged() {
    let (sink, reports) = ChannelReportSink::new();
    let config = WatchdogConfig {
        wake_interval: Duration::from_millis(500),
        window: Duration::from_millis(1000),
    };
    let service = Arc::new(WatchdogService::new(
        config,
        Arc::new(LabelInspector),
        Arc::new(sink),
    ));
    service.start();

    let stop = Arc::new(AtomicBool::new(false));
    let mut workers = Vec::new();
    for id in 0..50u64 {
        let service = Arc::clone(&service);
        let stop = Arc::clone(&stop);
        workers.push(thread::spawn(move || {
            let token = WatchToken::new(id);
            service.watch(token, format!("worker-{id}"), 50).unwrap();
            let mut ticks = 0u64;
            while !stop.load(Ordering::Relaxed) {
                service.tick(token).unwrap();
                ticks += 1;
                thread::sleep(Duration::from_millis(2));
            }
            service.unwatch(token).unwrap();
            ticks
        }));
    }

    thread::sleep(Duration::from_secs(3));
    stop.store(true, Ordering::Relaxed);
    for worker in workers {
        let ticks = worker.join().unwrap();
        // ~500 ticks/s for ~3 s; anything wildly outside means corruption.
        assert!(ticks > 100, "implausibly low tick count: {ticks}");
    }
    service.stop();

    assert!(
        reports.try_recv().is_err(),
        "no worker above its minimum rate may be flagged"
    );
    assert!(service.registry().is_empty());
}

#[test]
fn inline_checker_blocks_until_stopped() {
    let (sink, _reports) = ChannelReportSink::new();
    let config = WatchdogConfig {
        wake_interval: Duration::from_millis(10),
        window: Duration::from_millis(20),
    };
    let service = Arc::new(WatchdogService::new(
        config,
        Arc::new(LabelInspector),
        Arc::new(sink),
    ));

    let inline = {
        let service = Arc::clone(&service);
        thread::spawn(move || service.run_inline())
    };

    thread::sleep(Duration::from_millis(100));
    assert!(service.is_running());

    service.stop();
    inline.join().expect("inline checker should return after stop");
    assert!(!service.is_running());
}
