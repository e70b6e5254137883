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

//! # Inference Adapter
//!
//! [`VeriMlAdapter`] turns a raw [`VeriInferenceBackend`] into five typed,
//! infallible calls. For each call it:
//!
//! 1. truncates the input to the task's input budget,
//! 2. answers from the cache when it can,
//! 3. calls the backend under the task timeout, retrying only HTTP 503
//!    ("model loading") with a linear backoff; a timeout or any other error
//!    ends the attempt immediately,
//! 4. validates the JSON shape into strict types,
//! 5. on any failure, logs a warning and answers with the local fallback.
//!
//! Both remote answers and (by default) fallback answers are cached, so a
//! repeated call within the TTL never reaches the backend.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use xxhash_rust::xxh3::xxh3_64;

use crate::config::VeriConfig;
use crate::errors::{Result, VeriError};
use crate::normalize::truncate_for_model;
use crate::remote::cache::{VeriCacheKey, VeriInferenceCache};
use crate::remote::fallback::{emotion_result, VeriLocalFallback};
use crate::remote::http::VeriHttpBackend;
use crate::remote::{VeriInference, VeriInferenceBackend, VeriInferenceRequest, VeriLabelScore, VeriTask};
use crate::result::{
    VeriEmotionAnalysisResult, VeriEmotionType, VeriEntity, VeriEntityGroup, VeriSentiment,
    VeriSentimentLabel,
};

pub struct VeriMlAdapter {
    backend: Arc<dyn VeriInferenceBackend>,
    cache: Arc<VeriInferenceCache>,
    fallback: VeriLocalFallback,
    config: VeriConfig,
    attempts: AtomicUsize,
}

impl std::fmt::Debug for VeriMlAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VeriMlAdapter")
            .field("backend", &self.backend.name())
            .field("cache_entries", &self.cache.len())
            .field("attempts", &self.remote_attempts())
            .finish()
    }
}

impl VeriMlAdapter {
    /// Adapter over the HTTP backend described by `config`.
    pub fn new(config: &VeriConfig) -> Result<Self> {
        let backend = Arc::new(VeriHttpBackend::new(config)?);
        Self::with_backend(config, backend)
    }

    pub fn with_backend(config: &VeriConfig, backend: Arc<dyn VeriInferenceBackend>) -> Result<Self> {
        config.validate()?;
        let cache = Arc::new(VeriInferenceCache::new(
            Duration::from_secs(config.cache_ttl_secs),
            config.cache_max_entries,
        ));
        Ok(Self {
            backend,
            cache,
            fallback: VeriLocalFallback::new()?,
            config: config.clone(),
            attempts: AtomicUsize::new(0),
        })
    }

    /// Replaces the cache, e.g. with one driven by a manual clock.
    pub fn with_cache(mut self, cache: Arc<VeriInferenceCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &Arc<VeriInferenceCache> {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Backend invocations so far, retries included.
    pub fn remote_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &VeriConfig {
        &self.config
    }

    /// The local stand-ins used when a call falls back.
    pub fn local(&self) -> &VeriLocalFallback {
        &self.fallback
    }

    pub async fn sentiment(&self, text: &str) -> VeriInference<VeriSentiment> {
        self.run(
            VeriTask::Sentiment,
            VeriTask::Sentiment.as_str().to_string(),
            text,
            |input| VeriInferenceRequest::new(input),
            parse_sentiment,
            |input| self.fallback.sentiment(input),
        )
        .await
    }

    pub async fn emotion(&self, text: &str) -> VeriInference<VeriEmotionAnalysisResult> {
        self.run(
            VeriTask::Emotion,
            VeriTask::Emotion.as_str().to_string(),
            text,
            |input| VeriInferenceRequest::new(input),
            parse_emotion,
            |input| self.fallback.emotion(input),
        )
        .await
    }

    /// Scores `labels` against `text`, highest first.
    pub async fn zero_shot(&self, text: &str, labels: &[String]) -> VeriInference<Vec<VeriLabelScore>> {
        if labels.is_empty() {
            return VeriInference::fallback(Vec::new());
        }
        self.run(
            VeriTask::ZeroShot,
            zero_shot_scope(labels),
            text,
            |input| VeriInferenceRequest::new(input).with_labels(labels),
            |value| parse_zero_shot(value, labels),
            |_| self.fallback.zero_shot(labels),
        )
        .await
    }

    pub async fn entities(&self, text: &str) -> VeriInference<Vec<VeriEntity>> {
        self.run(
            VeriTask::Ner,
            VeriTask::Ner.as_str().to_string(),
            text,
            |input| VeriInferenceRequest::new(input),
            |value| parse_entities(value, text.trim()),
            |_| Vec::new(),
        )
        .await
    }

    pub async fn summarize(&self, text: &str) -> VeriInference<String> {
        let max_words = self.config.summary_max_length;
        let min_words = self.config.summary_min_length;
        self.run(
            VeriTask::Summarization,
            VeriTask::Summarization.as_str().to_string(),
            text,
            |input| VeriInferenceRequest::new(input).with_lengths(max_words, min_words),
            parse_summary,
            |input| self.fallback.summary(input, max_words),
        )
        .await
    }

    async fn run<T, B, P, F>(
        &self,
        task: VeriTask,
        scope: String,
        text: &str,
        build: B,
        parse: P,
        fallback: F,
    ) -> VeriInference<T>
    where
        T: Serialize + DeserializeOwned,
        B: FnOnce(&str) -> VeriInferenceRequest,
        P: FnOnce(&Value) -> Result<T>,
        F: FnOnce(&str) -> T,
    {
        let input = truncate_for_model(text.trim(), self.config.task(task).max_input_chars);
        if input.is_empty() {
            return VeriInference::fallback(fallback(&input));
        }

        let key = VeriCacheKey::new(scope, &input);
        if let Some(hit) = self.lookup(&key) {
            return hit;
        }

        let request = build(&input);
        match self.call(task, &request).await.and_then(|value| parse(&value)) {
            Ok(value) => {
                self.store(key, &value, false);
                VeriInference::remote(value)
            }
            Err(err) => {
                log::warn!("veri.remote: {task} failed ({err}); using local fallback");
                let value = fallback(&input);
                if self.config.cache_fallbacks {
                    self.store(key, &value, true);
                }
                VeriInference::fallback(value)
            }
        }
    }

    async fn call(&self, task: VeriTask, request: &VeriInferenceRequest) -> Result<Value> {
        let timeout_ms = self.config.task(task).timeout_ms;
        let mut attempt: u32 = 0;
        loop {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            let outcome = tokio::time::timeout(
                Duration::from_millis(timeout_ms),
                self.backend.infer(task, request),
            )
            .await;
            match outcome {
                Err(_) => {
                    return Err(VeriError::RemoteTimeout {
                        task: task.as_str().to_string(),
                        timeout_ms,
                    })
                }
                Ok(Err(err)) if err.is_model_loading() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.retry_delay_ms.saturating_mul(attempt as u64);
                    log::warn!(
                        "veri.remote: {task} model loading, retry {attempt}/{} in {delay}ms",
                        self.config.max_retries
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Ok(result) => return result,
            }
        }
    }

    fn lookup<T: DeserializeOwned>(&self, key: &VeriCacheKey) -> Option<VeriInference<T>> {
        let raw = self.cache.get(key)?;
        let was_fallback = raw.get("fallback").and_then(Value::as_bool).unwrap_or(false);
        let value = serde_json::from_value(raw.get("value")?.clone()).ok()?;
        Some(if was_fallback {
            VeriInference::fallback(value)
        } else {
            VeriInference::cached(value)
        })
    }

    fn store<T: Serialize>(&self, key: VeriCacheKey, value: &T, fallback: bool) {
        match serde_json::to_value(value) {
            Ok(value) => self.cache.insert(key, json!({ "value": value, "fallback": fallback })),
            Err(err) => log::warn!("veri.remote: cannot cache {}: {err}", key.scope),
        }
    }
}

/// Cache scope for a zero-shot call: label sets must not share entries.
pub fn zero_shot_scope(labels: &[String]) -> String {
    format!(
        "{}:{:016x}",
        VeriTask::ZeroShot.as_str(),
        xxh3_64(labels.join("\u{1f}").as_bytes())
    )
}

fn finite_score(task: VeriTask, value: Option<&Value>) -> Result<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|s| s.is_finite())
        .map(|s| s.clamp(0.0, 1.0))
        .ok_or_else(|| VeriError::bad_response(task.as_str(), "missing or non-finite score"))
}

/// Accepts `[{label, score}]` and `[[{label, score}]]`.
pub fn parse_label_scores(task: VeriTask, value: &Value) -> Result<Vec<VeriLabelScore>> {
    let outer = value
        .as_array()
        .ok_or_else(|| VeriError::bad_response(task.as_str(), "expected an array"))?;
    let items = match outer.first() {
        Some(Value::Array(inner)) => inner,
        _ => outer,
    };
    if items.is_empty() {
        return Err(VeriError::bad_response(task.as_str(), "empty label list"));
    }
    items
        .iter()
        .map(|item| {
            let label = item
                .get("label")
                .and_then(Value::as_str)
                .ok_or_else(|| VeriError::bad_response(task.as_str(), "item without label"))?;
            Ok(VeriLabelScore::new(label, finite_score(task, item.get("score"))?))
        })
        .collect()
}

fn sentiment_label(label: &str) -> Option<VeriSentimentLabel> {
    match label.trim().to_uppercase().as_str() {
        "POSITIVE" | "POS" | "LABEL_1" => Some(VeriSentimentLabel::Positive),
        "NEGATIVE" | "NEG" | "LABEL_0" => Some(VeriSentimentLabel::Negative),
        "NEUTRAL" | "NEU" => Some(VeriSentimentLabel::Neutral),
        _ => None,
    }
}

pub fn parse_sentiment(value: &Value) -> Result<VeriSentiment> {
    let scores = parse_label_scores(VeriTask::Sentiment, value)?;
    let mut labelled = Vec::with_capacity(scores.len());
    for entry in &scores {
        let label = sentiment_label(&entry.label).ok_or_else(|| {
            VeriError::bad_response("sentiment", format!("unknown label '{}'", entry.label))
        })?;
        labelled.push((label, entry.score));
    }
    let (label, score) = labelled
        .iter()
        .copied()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .ok_or_else(|| VeriError::bad_response("sentiment", "no scores"))?;
    let mass = |wanted: VeriSentimentLabel| {
        labelled
            .iter()
            .filter(|(l, _)| *l == wanted)
            .map(|(_, s)| *s)
            .fold(0.0_f64, f64::max)
    };
    // single-label answers imply the complement for the other side
    let (positive, negative) = match (label, labelled.len()) {
        (VeriSentimentLabel::Positive, 1) => (score, 1.0 - score),
        (VeriSentimentLabel::Negative, 1) => (1.0 - score, score),
        _ => (mass(VeriSentimentLabel::Positive), mass(VeriSentimentLabel::Negative)),
    };
    Ok(VeriSentiment {
        label,
        score,
        polarity: (positive - negative).clamp(-1.0, 1.0),
    })
}

pub fn parse_emotion(value: &Value) -> Result<VeriEmotionAnalysisResult> {
    let scores: Vec<(VeriEmotionType, f64)> = parse_label_scores(VeriTask::Emotion, value)?
        .into_iter()
        .filter_map(|entry| VeriEmotionType::from_label(&entry.label).map(|kind| (kind, entry.score)))
        .collect();
    if scores.is_empty() {
        return Err(VeriError::bad_response("emotion", "no recognised emotion labels"));
    }
    Ok(emotion_result(&scores))
}

/// Validates `{labels, scores}` parallel arrays against the requested labels.
pub fn parse_zero_shot(value: &Value, requested: &[String]) -> Result<Vec<VeriLabelScore>> {
    let task = VeriTask::ZeroShot;
    let body = match value {
        Value::Array(items) if items.len() == 1 => &items[0],
        other => other,
    };
    let labels = body
        .get("labels")
        .and_then(Value::as_array)
        .ok_or_else(|| VeriError::bad_response(task.as_str(), "missing labels array"))?;
    let scores = body
        .get("scores")
        .and_then(Value::as_array)
        .ok_or_else(|| VeriError::bad_response(task.as_str(), "missing scores array"))?;
    if labels.len() != scores.len() || labels.is_empty() {
        return Err(VeriError::bad_response(
            task.as_str(),
            format!("{} labels vs {} scores", labels.len(), scores.len()),
        ));
    }

    let mut out = Vec::with_capacity(labels.len());
    for (label, score) in labels.iter().zip(scores) {
        let label = label
            .as_str()
            .ok_or_else(|| VeriError::bad_response(task.as_str(), "non-string label"))?;
        if !requested.iter().any(|r| r == label) {
            return Err(VeriError::bad_response(
                task.as_str(),
                format!("unexpected label '{label}'"),
            ));
        }
        out.push(VeriLabelScore::new(label, finite_score(task, Some(score))?));
    }
    out.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(out)
}

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// Accepts `entity_group` or `type` for the class and `word`, `entity` or
/// `text` for the surface form; otherwise the span is read from `source`.
pub fn parse_entities(value: &Value, source: &str) -> Result<Vec<VeriEntity>> {
    let task = VeriTask::Ner;
    let items = match value.as_array() {
        Some(outer) => match outer.first() {
            Some(Value::Array(inner)) => inner,
            _ => outer,
        },
        None => return Err(VeriError::bad_response(task.as_str(), "expected an array")),
    };

    items
        .iter()
        .map(|item| {
            let entity_type = item
                .get("entity_group")
                .or_else(|| item.get("type"))
                .and_then(Value::as_str)
                .map(|t| t.trim_start_matches("B-").trim_start_matches("I-").to_string())
                .ok_or_else(|| VeriError::bad_response(task.as_str(), "entity without type"))?;
            let start = item.get("start").and_then(Value::as_u64).unwrap_or(0) as usize;
            let end = item.get("end").and_then(Value::as_u64).unwrap_or(start as u64) as usize;
            let text = ["word", "entity", "text"]
                .iter()
                .find_map(|k| item.get(*k).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| char_slice(source, start, end));
            Ok(VeriEntity {
                text: text.trim().to_string(),
                entity_type,
                score: finite_score(task, item.get("score"))?,
                start,
                end: end.max(start),
            })
        })
        .collect()
}

pub fn parse_summary(value: &Value) -> Result<String> {
    let body = match value {
        Value::Array(items) if items.len() == 1 => &items[0],
        other => other,
    };
    body.get("summary_text")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| VeriError::bad_response("summarization", "missing summary_text"))
}

/// Groups entities by type, merging mentions of the same surface text
/// case-insensitively. The first spelling seen is kept.
pub fn group_entities(entities: &[VeriEntity]) -> BTreeMap<String, Vec<VeriEntityGroup>> {
    let mut grouped: BTreeMap<String, Vec<VeriEntityGroup>> = BTreeMap::new();
    for entity in entities {
        if entity.text.is_empty() {
            continue;
        }
        let bucket = grouped.entry(entity.entity_type.clone()).or_default();
        let needle = entity.text.to_lowercase();
        match bucket.iter_mut().find(|g| g.entity.to_lowercase() == needle) {
            Some(group) => group.count += 1,
            None => bucket.push(VeriEntityGroup {
                entity: entity.text.clone(),
                entity_type: entity.entity_type.clone(),
                count: 1,
            }),
        }
    }
    grouped
}
