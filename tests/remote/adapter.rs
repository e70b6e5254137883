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

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{ScriptMode, ScriptedBackend};
use veri::{
    VeriConfig, VeriEmotionType, VeriInferenceCache, VeriInferenceSource, VeriManualClock,
    VeriMlAdapter, VeriSentimentLabel, VeriTask,
};

const TEXT: &str = "The new vaccine trial reported encouraging results across all age groups.";

fn adapter(mode: ScriptMode, config: VeriConfig) -> (VeriMlAdapter, Arc<ScriptedBackend>) {
    let backend = Arc::new(ScriptedBackend::new(mode));
    let adapter = VeriMlAdapter::with_backend(&config, backend.clone()).unwrap();
    (adapter, backend)
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[tokio::test]
async fn healthy_answers_are_parsed_and_then_served_from_cache() {
    let (adapter, backend) = adapter(ScriptMode::Healthy, VeriConfig::default());

    let first = adapter.sentiment(TEXT).await;
    assert_eq!(first.source, VeriInferenceSource::Remote);
    assert_eq!(first.value.label, VeriSentimentLabel::Positive);
    assert!((first.value.polarity - 0.8).abs() < 1e-9);

    let second = adapter.sentiment(TEXT).await;
    assert_eq!(second.source, VeriInferenceSource::Cache);
    assert_eq!(second.value, first.value);
    assert_eq!(backend.calls(), 1);
    assert_eq!(adapter.remote_attempts(), 1);
}

#[tokio::test]
async fn emotion_covers_every_category() {
    let (adapter, _backend) = adapter(ScriptMode::Healthy, VeriConfig::default());
    let emotion = adapter.emotion(TEXT).await;
    assert_eq!(emotion.value.dominant_emotion, VeriEmotionType::Joy);
    assert_eq!(emotion.value.emotions.len(), VeriEmotionType::ALL.len());
    assert_eq!(emotion.value.emotional_appeal, 70);
}

#[tokio::test(start_paused = true)]
async fn model_loading_is_retried_with_backoff() {
    let config = VeriConfig::default().max_retries(3).retry_delay_ms(1_000);
    let (adapter, backend) = adapter(ScriptMode::LoadingFor(2), config);

    let started = tokio::time::Instant::now();
    let result = adapter.sentiment(TEXT).await;

    assert_eq!(result.source, VeriInferenceSource::Remote);
    assert_eq!(backend.calls(), 3);
    assert_eq!(adapter.remote_attempts(), 3);
    // 1s after the first 503, 2s after the second
    assert!(started.elapsed() >= Duration::from_millis(3_000));
}

#[tokio::test(start_paused = true)]
async fn retries_stop_at_the_configured_limit() {
    let config = VeriConfig::default().max_retries(2).retry_delay_ms(10);
    let (adapter, backend) = adapter(ScriptMode::LoadingFor(usize::MAX), config);

    let result = adapter.sentiment(TEXT).await;
    assert!(result.is_fallback());
    assert_eq!(backend.calls(), 3);
}

#[tokio::test]
async fn other_failures_are_not_retried() {
    let config = VeriConfig::default().max_retries(3).retry_delay_ms(10);
    let (adapter, backend) = adapter(ScriptMode::FailAll, config);

    let result = adapter.sentiment(TEXT).await;
    assert!(result.is_fallback());
    assert_eq!(backend.calls(), 1);
    assert_eq!(result.value, adapter.local().sentiment(TEXT));
}

#[tokio::test(start_paused = true)]
async fn timeouts_fall_back_without_retrying() {
    let config = VeriConfig::default().task_timeout_ms(VeriTask::Emotion, 50);
    let (adapter, backend) = adapter(ScriptMode::Slow(Duration::from_secs(60)), config);

    let result = adapter.emotion(TEXT).await;
    assert_eq!(result.source, VeriInferenceSource::Fallback);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn malformed_payloads_fall_back_and_the_fallback_is_cached() {
    let (adapter, backend) = adapter(ScriptMode::Malformed, VeriConfig::default());

    let first = adapter.summarize(TEXT).await;
    assert!(first.is_fallback());
    assert_eq!(first.value, TEXT);

    let second = adapter.summarize(TEXT).await;
    assert_eq!(second.source, VeriInferenceSource::Fallback);
    assert_eq!(second.value, first.value);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn fallbacks_are_retried_when_not_cached() {
    let config = VeriConfig::default().cache_fallbacks(false);
    let (adapter, backend) = adapter(ScriptMode::FailAll, config);

    adapter.entities(TEXT).await;
    adapter.entities(TEXT).await;
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn zero_shot_label_sets_are_cached_separately() {
    let (adapter, backend) = adapter(ScriptMode::Healthy, VeriConfig::default());
    let topics = labels(&["Science", "Sports"]);
    let tones = labels(&["calm", "angry", "neutral"]);

    let topic = adapter.zero_shot(TEXT, &topics).await;
    let tone = adapter.zero_shot(TEXT, &tones).await;
    let again = adapter.zero_shot(TEXT, &topics).await;

    assert_eq!(topic.value[0].label, "Science");
    assert!((topic.value[0].score - 0.7).abs() < 1e-9);
    assert_eq!(tone.value[0].label, "calm");
    assert_eq!(again.source, VeriInferenceSource::Cache);
    assert_eq!(backend.calls(), 2);

    let (_, request) = &backend.requests()[0];
    assert_eq!(request.candidate_labels.as_deref(), Some(topics.as_slice()));
}

#[tokio::test]
async fn degenerate_inputs_never_reach_the_backend() {
    let (adapter, backend) = adapter(ScriptMode::Healthy, VeriConfig::default());

    assert!(adapter.zero_shot(TEXT, &[]).await.value.is_empty());
    let empty = adapter.sentiment("   ").await;
    assert!(empty.is_fallback());
    assert_eq!(empty.value.label, VeriSentimentLabel::Neutral);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn long_inputs_are_truncated_to_the_task_budget() {
    let (adapter, backend) = adapter(ScriptMode::Healthy, VeriConfig::default());
    let long = "Stocks moved sideways today. ".repeat(200);

    adapter.sentiment(&long).await;
    adapter.summarize(&long).await;

    let requests = backend.requests();
    let budget = VeriConfig::default().sentiment.max_input_chars;
    assert!(requests[0].1.inputs.chars().count() <= budget);
    assert!(requests[0].1.inputs.ends_with('.'));
    assert_eq!(requests[1].1.max_length, Some(130));
    assert_eq!(requests[1].1.min_length, Some(30));
}

#[tokio::test]
async fn expired_entries_are_fetched_again() {
    let clock = VeriManualClock::new(0);
    let config = VeriConfig::default().cache_ttl_secs(60);
    let cache = Arc::new(VeriInferenceCache::with_clock(
        Duration::from_secs(60),
        16,
        Arc::new(clock.clone()),
    ));
    let (adapter, backend) = adapter(ScriptMode::Healthy, config);
    let adapter = adapter.with_cache(cache);

    adapter.sentiment(TEXT).await;
    clock.advance(Duration::from_secs(59));
    assert_eq!(adapter.sentiment(TEXT).await.source, VeriInferenceSource::Cache);
    clock.advance(Duration::from_secs(1));
    assert_eq!(adapter.sentiment(TEXT).await.source, VeriInferenceSource::Remote);
    assert_eq!(backend.calls(), 2);

    adapter.clear_cache();
    assert!(adapter.cache().is_empty());
}

#[tokio::test]
async fn http_backend_without_token_falls_back_locally() {
    let config = VeriConfig::default().inference_url("http://127.0.0.1:9");
    let adapter = VeriMlAdapter::new(&config).unwrap();
    let result = adapter.sentiment(TEXT).await;
    assert!(result.is_fallback());
    assert_eq!(adapter.remote_attempts(), 1);
}
