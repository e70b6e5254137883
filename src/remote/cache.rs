//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Veri.
//! The Veri project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Inference Cache
//!
//! In-memory, process-local memoization of inference answers.
//!
//! Keys combine a task scope with the first 100 characters of the input and
//! its total character length. Entries expire once their age reaches the TTL
//! and are never returned afterwards. When the cache is full the oldest entry
//! is evicted. Time comes from a [`VeriClock`], so tests can drive expiry with
//! a [`VeriManualClock`] instead of sleeping.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const KEY_PREFIX_CHARS: usize = 100;

/// Millisecond time source.
pub trait VeriClock: Debug + Send + Sync {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct VeriSystemClock;

impl VeriClock for VeriSystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Default, Clone)]
pub struct VeriManualClock {
    now: Arc<AtomicU64>,
}

impl VeriManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }
}

impl VeriClock for VeriManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// `(scope, first 100 chars, char length)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VeriCacheKey {
    pub scope: String,
    pub prefix: String,
    pub length: usize,
}

impl VeriCacheKey {
    pub fn new(scope: impl Into<String>, text: &str) -> Self {
        Self {
            scope: scope.into(),
            prefix: text.chars().take(KEY_PREFIX_CHARS).collect(),
            length: text.chars().count(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VeriCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub expirations: u64,
}

#[derive(Debug)]
struct Entry {
    value: Value,
    stored_at_ms: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<VeriCacheKey, Entry>,
    stats: VeriCacheStats,
}

#[derive(Debug)]
pub struct VeriInferenceCache {
    ttl_ms: u64,
    max_entries: usize,
    clock: Arc<dyn VeriClock>,
    inner: Mutex<Inner>,
}

impl VeriInferenceCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self::with_clock(ttl, max_entries, Arc::new(VeriSystemClock))
    }

    pub fn with_clock(ttl: Duration, max_entries: usize, clock: Arc<dyn VeriClock>) -> Self {
        Self {
            ttl_ms: ttl.as_millis() as u64,
            max_entries: max_entries.max(1),
            clock,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave an entry half-written.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn expired(&self, entry: &Entry, now: u64) -> bool {
        now.saturating_sub(entry.stored_at_ms) >= self.ttl_ms
    }

    pub fn get(&self, key: &VeriCacheKey) -> Option<Value> {
        let now = self.clock.now_ms();
        let mut inner = self.lock();
        let expired = match inner.entries.get(key) {
            None => {
                inner.stats.misses += 1;
                log::debug!("veri.cache: miss {}", key.scope);
                return None;
            }
            Some(entry) => self.expired(entry, now),
        };
        if expired {
            inner.entries.remove(key);
            inner.stats.expirations += 1;
            inner.stats.misses += 1;
            log::debug!("veri.cache: expired {}", key.scope);
            return None;
        }
        inner.stats.hits += 1;
        log::debug!("veri.cache: hit {}", key.scope);
        inner.entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: VeriCacheKey, value: Value) {
        let now = self.clock.now_ms();
        let mut inner = self.lock();
        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.max_entries {
            let oldest = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at_ms)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                inner.entries.remove(&oldest);
                inner.stats.evictions += 1;
                log::debug!("veri.cache: full, evicted oldest {}", oldest.scope);
            }
        }
        inner.entries.insert(
            key,
            Entry {
                value,
                stored_at_ms: now,
            },
        );
        inner.stats.inserts += 1;
    }

    /// Drops expired entries and returns how many were removed.
    pub fn prune_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let mut inner = self.lock();
        let before = inner.entries.len();
        let ttl_ms = self.ttl_ms;
        inner
            .entries
            .retain(|_, entry| now.saturating_sub(entry.stored_at_ms) < ttl_ms);
        let removed = before - inner.entries.len();
        inner.stats.expirations += removed as u64;
        if removed > 0 {
            log::debug!("veri.cache: pruned {removed} expired entries");
        }
        removed
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
        log::debug!("veri.cache: cleared");
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> VeriCacheStats {
        self.lock().stats
    }
}
