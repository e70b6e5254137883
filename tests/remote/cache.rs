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

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use veri::{VeriCacheKey, VeriInferenceCache, VeriManualClock};

fn cache_with_clock(ttl: Duration, max: usize) -> (VeriInferenceCache, VeriManualClock) {
    let clock = VeriManualClock::new(1_000);
    let cache = VeriInferenceCache::with_clock(ttl, max, Arc::new(clock.clone()));
    (cache, clock)
}

#[test]
fn entries_expire_exactly_at_the_ttl() {
    let (cache, clock) = cache_with_clock(Duration::from_secs(10), 8);
    let key = VeriCacheKey::new("sentiment", "The market rallied.");
    cache.insert(key.clone(), json!({ "value": 1 }));

    clock.advance(Duration::from_millis(9_999));
    assert_eq!(cache.get(&key), Some(json!({ "value": 1 })));

    clock.advance(Duration::from_millis(1));
    assert!(cache.get(&key).is_none());
    assert!(cache.is_empty());

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.expirations, 1);
}

#[test]
fn scopes_do_not_share_entries() {
    let (cache, _clock) = cache_with_clock(Duration::from_secs(60), 8);
    cache.insert(VeriCacheKey::new("sentiment", "same text"), json!("s"));
    assert!(cache.get(&VeriCacheKey::new("emotion", "same text")).is_none());
    assert_eq!(cache.get(&VeriCacheKey::new("sentiment", "same text")), Some(json!("s")));
}

#[test]
fn texts_sharing_a_long_prefix_collide_only_at_equal_length() {
    let (cache, _clock) = cache_with_clock(Duration::from_secs(60), 8);
    let base = "p".repeat(120);
    cache.insert(VeriCacheKey::new("ner", &format!("{base}A")), json!("first"));

    // same prefix and length: treated as the same input
    assert_eq!(
        cache.get(&VeriCacheKey::new("ner", &format!("{base}B"))),
        Some(json!("first"))
    );
    assert!(cache.get(&VeriCacheKey::new("ner", &format!("{base}BB"))).is_none());
}

#[test]
fn prune_and_clear() {
    let (cache, clock) = cache_with_clock(Duration::from_secs(5), 8);
    cache.insert(VeriCacheKey::new("t", "old"), json!(1));
    clock.advance(Duration::from_secs(3));
    cache.insert(VeriCacheKey::new("t", "new"), json!(2));
    clock.advance(Duration::from_secs(3));

    assert_eq!(cache.prune_expired(), 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&VeriCacheKey::new("t", "new")), Some(json!(2)));

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn overwriting_a_key_does_not_evict() {
    let (cache, clock) = cache_with_clock(Duration::from_secs(60), 2);
    cache.insert(VeriCacheKey::new("t", "a"), json!(1));
    clock.advance(Duration::from_millis(1));
    cache.insert(VeriCacheKey::new("t", "b"), json!(2));
    cache.insert(VeriCacheKey::new("t", "a"), json!(3));

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.stats().evictions, 0);
    assert_eq!(cache.get(&VeriCacheKey::new("t", "a")), Some(json!(3)));
}

#[test]
fn cache_is_shared_across_threads() {
    let (cache, _clock) = cache_with_clock(Duration::from_secs(60), 64);
    let cache = Arc::new(cache);
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let cache = cache.clone();
            std::thread::spawn(move || {
                for j in 0..8 {
                    cache.insert(VeriCacheKey::new("t", &format!("{i}-{j}")), json!(j));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(cache.len(), 32);
}
