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

//! Report sink rendering through the `log` facade.

use vigil_core::{ReportSink, ThreadReport};

/// Renders flagged-thread reports as a classic server watchdog dump: a
/// banner, the run state, lock holdings, and the captured stack, all at warn
/// level through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReportSink;

impl ReportSink for LogReportSink {
    fn emit(&self, report: &ThreadReport) {
        log::warn!("================================================");
        log::warn!(
            "Thread is under its minimum tick rate ({}): {}/{} ticks this window",
            report.name,
            report.observed_ticks,
            report.min_rate
        );
        log::warn!("\tState: {}", report.state);

        if !report.locked_monitors.is_empty() {
            log::warn!("\tThread is locked!");
            for monitor in &report.locked_monitors {
                match &monitor.frame {
                    Some(frame) => {
                        log::warn!("\t\tLocked on frame: {frame} ({})", monitor.description)
                    }
                    None => log::warn!("\t\tLocked: {}", monitor.description),
                }
            }
        }

        if report.frames.is_empty() {
            log::warn!("\tNo stack snapshot available for this thread.");
        } else {
            log::warn!("Current stacktrace:");
            for frame in &report.frames {
                log::warn!("\t\t{frame}");
            }
        }
        log::warn!("================================================");
    }
}
