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

//! Registry mapping watch tokens to tick counters.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use vigil_core::{TickCounter, WatchError, WatchResult, WatchToken};

/// A watched thread's registry entry: its human label and its counter.
#[derive(Debug)]
pub struct WatchedThread {
    label: String,
    counter: TickCounter,
}

impl WatchedThread {
    /// The label supplied at registration, typically the thread's name.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The thread's tick counter.
    pub fn counter(&self) -> &TickCounter {
        &self.counter
    }
}

/// A thread-safe registry of watched threads.
///
/// All structural mutations (insert/remove) and evaluation passes happen
/// under one exclusive lock. The tick hot path holds that lock only for the
/// lookup and performs the increment on the entry afterwards, so monitored
/// threads never contend with each other and only briefly with the checker.
#[derive(Debug, Clone)]
pub struct WatchRegistry {
    entries: Arc<Mutex<HashMap<WatchToken, Arc<WatchedThread>>>>,
    window: Duration,
}

impl WatchRegistry {
    /// Creates an empty registry whose counters use the given window length.
    pub fn new(window: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            window,
        }
    }

    /// Starts watching a thread. The entry becomes visible to the checker on
    /// its next wake.
    ///
    /// Fails with [`WatchError::AlreadyWatching`] if the token is already
    /// registered.
    pub fn watch(
        &self,
        token: WatchToken,
        label: impl Into<String>,
        min_rate: i64,
    ) -> WatchResult<()> {
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(&token) {
            return Err(WatchError::AlreadyWatching(token));
        }
        let label = label.into();
        log::info!("WatchRegistry: watching {token} ('{label}', min rate {min_rate}/window)");
        entries.insert(
            token,
            Arc::new(WatchedThread {
                label,
                counter: TickCounter::new(min_rate, self.window),
            }),
        );
        Ok(())
    }

    /// Stops watching a thread. Removal is immediate and unconditional; an
    /// entry removed mid-window is simply absent at the next evaluation.
    ///
    /// Fails with [`WatchError::NotWatching`] if the token is not registered.
    pub fn unwatch(&self, token: WatchToken) -> WatchResult<()> {
        let mut entries = self.entries.lock().unwrap();
        match entries.remove(&token) {
            Some(_) => {
                log::info!("WatchRegistry: no longer watching {token}");
                Ok(())
            }
            None => Err(WatchError::NotWatching(token)),
        }
    }

    /// Records one tick for a watched thread. This is the hot path: the
    /// registry lock is held only for the lookup and the increment happens on
    /// the entry after the lock is released.
    ///
    /// Fails with [`WatchError::NotWatching`] if the token is not registered.
    pub fn tick(&self, token: WatchToken) -> WatchResult<()> {
        let entry = self.entries.lock().unwrap().get(&token).cloned();
        match entry {
            Some(entry) => {
                entry.counter().add_tick();
                Ok(())
            }
            None => Err(WatchError::NotWatching(token)),
        }
    }

    /// Returns the number of watched threads.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Returns true if no thread is watched.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Returns the entry for a token, if watched.
    pub fn get(&self, token: WatchToken) -> Option<Arc<WatchedThread>> {
        self.entries.lock().unwrap().get(&token).cloned()
    }

    /// Runs one evaluation pass at `now`, under the registry lock.
    ///
    /// Every entry whose window has expired is compared against its minimum;
    /// entries at or below it (inclusive) are handed to `flagged` before
    /// their counter is reset. The window rolls over unconditionally, flagged
    /// or not. Entries whose window is still open are skipped untouched.
    /// Iteration order is unspecified; entries are independent.
    ///
    /// Returns the number of flagged entries.
    pub fn evaluate<F>(&self, now: Instant, mut flagged: F) -> usize
    where
        F: FnMut(WatchToken, &WatchedThread),
    {
        let entries = self.entries.lock().unwrap();
        let mut count = 0;
        for (token, entry) in entries.iter() {
            let counter = entry.counter();
            if !counter.is_window_expired(now) {
                continue;
            }
            if counter.under_threshold() {
                flagged(*token, entry);
                count += 1;
            }
            counter.reset(now);
        }
        count
    }
}
