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

//! # Remote Inference Module
//!
//! Access to the five remote inference tasks (sentiment, emotion, zero-shot
//! classification, named entities, summarization).
//!
//! - **backend**: [`VeriInferenceBackend`] sends one JSON request and returns
//!   the raw JSON answer. [`http::VeriHttpBackend`] is the production
//!   implementation; tests plug in scripted backends.
//! - **cache**: [`cache::VeriInferenceCache`], TTL-bounded memoization keyed by
//!   task scope and a text fingerprint.
//! - **fallback**: deterministic local stand-ins for every task.
//! - **adapter**: [`adapter::VeriMlAdapter`] combines the three. Its methods
//!   never fail; every answer says whether it came from the remote endpoint,
//!   the cache or a fallback.

pub mod adapter;
pub mod cache;
pub mod fallback;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::Result;
use crate::result::VeriInferenceSource;

pub use adapter::VeriMlAdapter;
pub use cache::{VeriCacheKey, VeriCacheStats, VeriClock, VeriInferenceCache, VeriManualClock, VeriSystemClock};
pub use http::VeriHttpBackend;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VeriTask {
    Sentiment,
    Emotion,
    ZeroShot,
    Ner,
    Summarization,
}

impl VeriTask {
    pub const ALL: [VeriTask; 5] = [
        VeriTask::Sentiment,
        VeriTask::Emotion,
        VeriTask::ZeroShot,
        VeriTask::Ner,
        VeriTask::Summarization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VeriTask::Sentiment => "sentiment",
            VeriTask::Emotion => "emotion",
            VeriTask::ZeroShot => "zero_shot",
            VeriTask::Ner => "ner",
            VeriTask::Summarization => "summarization",
        }
    }
}

impl std::fmt::Display for VeriTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of one inference call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VeriInferenceRequest {
    pub inputs: String,
    pub candidate_labels: Option<Vec<String>>,
    pub max_length: Option<usize>,
    pub min_length: Option<usize>,
}

impl VeriInferenceRequest {
    pub fn new(inputs: impl Into<String>) -> Self {
        Self {
            inputs: inputs.into(),
            ..Self::default()
        }
    }

    pub fn with_labels(mut self, labels: &[String]) -> Self {
        self.candidate_labels = Some(labels.to_vec());
        self
    }

    pub fn with_lengths(mut self, max_length: usize, min_length: usize) -> Self {
        self.max_length = Some(max_length);
        self.min_length = Some(min_length);
        self
    }

    /// JSON body as posted to the endpoint.
    pub fn to_payload(&self) -> Value {
        let mut body = json!({ "inputs": self.inputs });
        if let Some(labels) = &self.candidate_labels {
            body["candidate_labels"] = json!(labels);
        }
        if let Some(max) = self.max_length {
            body["max_length"] = json!(max);
        }
        if let Some(min) = self.min_length {
            body["min_length"] = json!(min);
        }
        body
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VeriLabelScore {
    pub label: String,
    pub score: f64,
}

impl VeriLabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Validated zero-shot answer, sorted by descending score.
pub type VeriZeroShot = Vec<VeriLabelScore>;

/// An inference value tagged with where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct VeriInference<T> {
    pub value: T,
    pub source: VeriInferenceSource,
}

impl<T> VeriInference<T> {
    pub fn remote(value: T) -> Self {
        Self {
            value,
            source: VeriInferenceSource::Remote,
        }
    }

    pub fn cached(value: T) -> Self {
        Self {
            value,
            source: VeriInferenceSource::Cache,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            source: VeriInferenceSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == VeriInferenceSource::Fallback
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> VeriInference<U> {
        VeriInference {
            value: f(self.value),
            source: self.source,
        }
    }
}

/// Transport for inference calls.
///
/// Implementations return the endpoint's raw JSON answer, or a remote error
/// (`RemoteUnavailable` with the HTTP status when there is one). Shape
/// validation is the adapter's job.
#[async_trait]
pub trait VeriInferenceBackend: Send + Sync {
    fn name(&self) -> &str {
        "backend"
    }

    async fn infer(&self, task: VeriTask, request: &VeriInferenceRequest) -> Result<Value>;
}
