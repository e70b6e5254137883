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

//! Runtime configuration for the analysis pipeline.
//!
//! Values are resolved from defaults, then an optional YAML document, then
//! the `VERI_*` environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VeriError};
use crate::remote::VeriTask;

pub const ENV_API_TOKEN: &str = "VERI_API_TOKEN";
pub const ENV_INFERENCE_URL: &str = "VERI_INFERENCE_URL";
pub const ENV_ANALYSIS_DEADLINE_MS: &str = "VERI_ANALYSIS_DEADLINE_MS";

/// Model, timeout and input budget for one inference task.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VeriTaskSettings {
    pub model: String,
    pub timeout_ms: u64,
    pub max_input_chars: usize,
}

impl VeriTaskSettings {
    fn new(model: &str, timeout_ms: u64, max_input_chars: usize) -> Self {
        Self {
            model: model.to_string(),
            timeout_ms,
            max_input_chars,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VeriConfig {
    pub inference_url: String,
    pub api_token: Option<String>,
    pub sentiment: VeriTaskSettings,
    pub emotion: VeriTaskSettings,
    pub zero_shot: VeriTaskSettings,
    pub ner: VeriTaskSettings,
    pub summarization: VeriTaskSettings,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: usize,
    pub cache_fallbacks: bool,
    pub chunk_max_chars: usize,
    pub short_input_threshold: usize,
    pub model_fallacy_threshold: f64,
    pub summary_min_chars: usize,
    pub summary_max_length: usize,
    pub summary_min_length: usize,
    pub analysis_deadline_ms: Option<u64>,
}

impl Default for VeriConfig {
    fn default() -> Self {
        Self {
            inference_url: "https://api-inference.huggingface.co/models".to_string(),
            api_token: None,
            sentiment: VeriTaskSettings::new(
                "distilbert-base-uncased-finetuned-sst-2-english",
                10_000,
                2_000,
            ),
            emotion: VeriTaskSettings::new(
                "j-hartmann/emotion-english-distilroberta-base",
                10_000,
                2_000,
            ),
            zero_shot: VeriTaskSettings::new("facebook/bart-large-mnli", 30_000, 1_000),
            ner: VeriTaskSettings::new("dslim/bert-base-NER", 20_000, 5_000),
            summarization: VeriTaskSettings::new("facebook/bart-large-cnn", 60_000, 4_000),
            max_retries: 3,
            retry_delay_ms: 1_000,
            cache_ttl_secs: 24 * 60 * 60,
            cache_max_entries: 1_000,
            cache_fallbacks: true,
            chunk_max_chars: 500,
            short_input_threshold: 100,
            model_fallacy_threshold: 0.4,
            summary_min_chars: 500,
            summary_max_length: 130,
            summary_min_length: 30,
            analysis_deadline_ms: None,
        }
    }
}

impl VeriConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a YAML document; missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: VeriConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&raw)
    }

    /// Defaults overlaid with the `VERI_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env()
    }

    /// Applies the `VERI_*` environment variables on top of `self`.
    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(token) = std::env::var(ENV_API_TOKEN) {
            if !token.trim().is_empty() {
                self.api_token = Some(token.trim().to_string());
            }
        }
        if let Ok(url) = std::env::var(ENV_INFERENCE_URL) {
            if !url.trim().is_empty() {
                self.inference_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        if let Ok(raw) = std::env::var(ENV_ANALYSIS_DEADLINE_MS) {
            let ms = raw.trim().parse::<u64>().map_err(|e| {
                VeriError::Config(format!("{ENV_ANALYSIS_DEADLINE_MS} must be an integer: {e}"))
            })?;
            self.analysis_deadline_ms = Some(ms);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_max_chars == 0 {
            return Err(VeriError::Config("chunk_max_chars must be positive".into()));
        }
        if self.cache_ttl_secs == 0 {
            return Err(VeriError::Config("cache_ttl_secs must be positive".into()));
        }
        if self.summary_min_length > self.summary_max_length {
            return Err(VeriError::Config(
                "summary_min_length must not exceed summary_max_length".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.model_fallacy_threshold) {
            return Err(VeriError::Config(
                "model_fallacy_threshold must lie in [0, 1]".into(),
            ));
        }
        for task in VeriTask::ALL {
            let settings = self.task(task);
            if settings.timeout_ms == 0 || settings.max_input_chars == 0 {
                return Err(VeriError::Config(format!(
                    "task '{}' needs a positive timeout and input budget",
                    task.as_str()
                )));
            }
        }
        Ok(())
    }

    pub fn task(&self, task: VeriTask) -> &VeriTaskSettings {
        match task {
            VeriTask::Sentiment => &self.sentiment,
            VeriTask::Emotion => &self.emotion,
            VeriTask::ZeroShot => &self.zero_shot,
            VeriTask::Ner => &self.ner,
            VeriTask::Summarization => &self.summarization,
        }
    }

    /// Endpoint for `task`: `<inference_url>/<model>`.
    pub fn endpoint(&self, task: VeriTask) -> String {
        format!(
            "{}/{}",
            self.inference_url.trim_end_matches('/'),
            self.task(task).model
        )
    }

    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn inference_url(mut self, url: impl Into<String>) -> Self {
        self.inference_url = url.into();
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn retry_delay_ms(mut self, ms: u64) -> Self {
        self.retry_delay_ms = ms;
        self
    }

    pub fn cache_ttl_secs(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = secs;
        self
    }

    pub fn cache_max_entries(mut self, entries: usize) -> Self {
        self.cache_max_entries = entries;
        self
    }

    pub fn cache_fallbacks(mut self, enabled: bool) -> Self {
        self.cache_fallbacks = enabled;
        self
    }

    pub fn chunk_max_chars(mut self, chars: usize) -> Self {
        self.chunk_max_chars = chars;
        self
    }

    pub fn analysis_deadline_ms(mut self, ms: Option<u64>) -> Self {
        self.analysis_deadline_ms = ms;
        self
    }

    /// Overrides the timeout of a single task.
    pub fn task_timeout_ms(mut self, task: VeriTask, ms: u64) -> Self {
        match task {
            VeriTask::Sentiment => self.sentiment.timeout_ms = ms,
            VeriTask::Emotion => self.emotion.timeout_ms = ms,
            VeriTask::ZeroShot => self.zero_shot.timeout_ms = ms,
            VeriTask::Ner => self.ner.timeout_ms = ms,
            VeriTask::Summarization => self.summarization.timeout_ms = ms,
        }
        self
    }
}
