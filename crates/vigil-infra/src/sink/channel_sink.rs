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

//! Report sink forwarding over a channel.

use crossbeam_channel::{Receiver, Sender};
use vigil_core::{ReportSink, ThreadReport};

/// Forwards flagged-thread reports over a channel so the host consumes them
/// as a stream (telemetry pipeline, alerting task, test harness).
///
/// Emission never blocks the checker: with a bounded channel, reports that do
/// not fit are dropped.
#[derive(Debug, Clone)]
pub struct ChannelReportSink {
    tx: Sender<ThreadReport>,
}

impl ChannelReportSink {
    /// Creates an unbounded sink and its receiving end.
    pub fn new() -> (Self, Receiver<ThreadReport>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }

    /// Creates a sink that buffers at most `capacity` reports. When the
    /// buffer is full, new reports are dropped.
    pub fn bounded(capacity: usize) -> (Self, Receiver<ThreadReport>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self { tx }, rx)
    }
}

impl ReportSink for ChannelReportSink {
    fn emit(&self, report: &ThreadReport) {
        if self.tx.try_send(report.clone()).is_err() {
            log::debug!(
                "ChannelReportSink: buffer full or receiver gone, dropping report for {}",
                report.token
            );
        }
    }
}
