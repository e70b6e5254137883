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

//! Scripted inference backend shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use veri::errors::{Result, VeriError};
use veri::remote::{VeriInferenceBackend, VeriInferenceRequest, VeriTask};

#[derive(Clone, Debug)]
pub enum ScriptMode {
    /// Canned, well-formed answers for every task.
    Healthy,
    /// Every call fails with HTTP 500.
    FailAll,
    /// The first `n` calls answer 503, later calls are healthy.
    LoadingFor(usize),
    /// Every call sleeps before answering healthily.
    Slow(Duration),
    /// Calls for one task sleep before answering, the rest answer at once.
    SlowTask(VeriTask, Duration),
    /// Calls for one task panic inside the backend.
    PanicFor(VeriTask),
    /// Every call answers with a payload of the wrong shape.
    Malformed,
    /// Like `Healthy`, but zero-shot always ranks the first label at 0.7.
    Confident,
}

#[derive(Debug)]
pub struct ScriptedBackend {
    mode: ScriptMode,
    calls: AtomicUsize,
    seen: Mutex<Vec<(VeriTask, VeriInferenceRequest)>>,
}

impl ScriptedBackend {
    pub fn new(mode: ScriptMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(VeriTask, VeriInferenceRequest)> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls_for(&self, task: VeriTask) -> usize {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| *t == task)
            .count()
    }
}

/// Healthy answer for `task`. Zero-shot answers rank the first requested
/// label at 0.7 unless more than ten labels were asked for and `confident`
/// is off, in which case the distribution is uniform.
pub fn canned(task: VeriTask, request: &VeriInferenceRequest, confident: bool) -> Value {
    match task {
        VeriTask::Sentiment => json!([[
            { "label": "POSITIVE", "score": 0.9 },
            { "label": "NEGATIVE", "score": 0.1 }
        ]]),
        VeriTask::Emotion => json!([[
            { "label": "joy", "score": 0.6 },
            { "label": "neutral", "score": 0.3 },
            { "label": "anger", "score": 0.1 }
        ]]),
        VeriTask::ZeroShot => {
            let labels = request.candidate_labels.clone().unwrap_or_default();
            let n = labels.len().max(1) as f64;
            let scores: Vec<f64> = if labels.len() > 10 && !confident {
                labels.iter().map(|_| 1.0 / n).collect()
            } else {
                let rest = if labels.len() > 1 { 0.3 / (n - 1.0) } else { 0.0 };
                (0..labels.len())
                    .map(|i| if i == 0 { 0.7 } else { rest })
                    .collect()
            };
            json!({ "sequence": request.inputs, "labels": labels, "scores": scores })
        }
        VeriTask::Ner => json!([
            { "entity_group": "ORG", "word": "NASA", "score": 0.99, "start": 0, "end": 4 }
        ]),
        VeriTask::Summarization => json!([{ "summary_text": "A short summary." }]),
    }
}

#[async_trait]
impl VeriInferenceBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn infer(&self, task: VeriTask, request: &VeriInferenceRequest) -> Result<Value> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((task, request.clone()));
        match &self.mode {
            ScriptMode::Healthy => Ok(canned(task, request, false)),
            ScriptMode::FailAll => Err(VeriError::unavailable(
                task.as_str(),
                Some(500),
                "scripted failure",
            )),
            ScriptMode::LoadingFor(n) if call < *n => Err(VeriError::unavailable(
                task.as_str(),
                Some(503),
                "model is loading",
            )),
            ScriptMode::LoadingFor(_) => Ok(canned(task, request, false)),
            ScriptMode::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(canned(task, request, false))
            }
            ScriptMode::SlowTask(slow, delay) => {
                if *slow == task {
                    tokio::time::sleep(*delay).await;
                }
                Ok(canned(task, request, false))
            }
            ScriptMode::PanicFor(broken) if *broken == task => {
                panic!("scripted panic in {}", task.as_str())
            }
            ScriptMode::PanicFor(_) => Ok(canned(task, request, false)),
            ScriptMode::Malformed => Ok(json!({ "unexpected": true })),
            ScriptMode::Confident => Ok(canned(task, request, true)),
        }
    }
}
