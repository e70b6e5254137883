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

//! # Result Composer
//!
//! [`VeriAnalyzer::analyze_content`] is the single entry point. One call:
//!
//! 1. normalizes the input into a [`VeriDocument`],
//! 2. starts every rule detector on the blocking pool,
//! 3. issues every remote call concurrently (sentiment, emotion, framing,
//!    topic, entities, summary and one fallacy classification per chunk),
//! 4. waits for all of them, substituting the stage default and marking the
//!    dimension `error` wherever a stage failed or panicked,
//! 5. refines bias, computes the composite scores and assembles the result.
//!
//! The call never fails. A panic in the composer itself still yields a fully
//! shaped result with every dimension marked `error`.

use std::any::Any;
use std::collections::BTreeMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::future::join_all;
use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};

use crate::config::VeriConfig;
use crate::detector::{execute_detector, VeriDetector};
use crate::detectors::{
    VeriBiasDetector, VeriCitationDetector, VeriDarkPatternDetector, VeriFallacyDetector,
    VeriManipulationDetector, VeriManipulationSignals,
};
use crate::errors::{Result, VeriError};
use crate::normalize::{VeriDocument, VeriNormalizer};
use crate::remote::adapter::group_entities;
use crate::remote::{VeriInference, VeriInferenceBackend, VeriLabelScore, VeriMlAdapter};
use crate::result::{
    VeriBiasAnalysis, VeriContentAnalysisResult, VeriDarkPattern, VeriDetectionSource,
    VeriEmotionAnalysisResult, VeriEntity, VeriFallacy, VeriFallacyType,
    VeriFramingScores, VeriInferenceSource, VeriLoadingState, VeriManipulationAnalysis,
    VeriRecommendedAction, VeriSentiment, VeriSpan, VeriStageStatus, VeriTactic, UNKNOWN_TOPIC,
};
use crate::scoring::{VeriScoreInputs, VeriScoreWeights};

pub const TOPIC_LABELS: &[&str] = &[
    "Politics",
    "Business",
    "Technology",
    "Science",
    "Health",
    "Sports",
    "Entertainment",
    "World",
    "Environment",
    "Opinion",
];

pub const OBJECTIVE_LABEL: &str = "objective reporting";
pub const BIASED_FRAMING_LABEL: &str = "biased framing";
pub const EMOTIONAL_LABEL: &str = "emotional language";

pub const WORDS_PER_MINUTE: f64 = 200.0;
pub const AVOID_THRESHOLD: f64 = 0.7;
pub const READ_CRITICALLY_THRESHOLD: f64 = 0.4;

const MAX_MODEL_EXCERPT_CHARS: usize = 200;

/// Everything the remote fan-out produced.
struct RemoteOutcome {
    sentiment: Result<VeriInference<VeriSentiment>>,
    emotion: Result<VeriInference<VeriEmotionAnalysisResult>>,
    framing: Result<VeriInference<Vec<VeriLabelScore>>>,
    topic: Result<VeriInference<Vec<VeriLabelScore>>>,
    entities: Result<VeriInference<Vec<VeriEntity>>>,
    summary: Result<VeriInference<String>>,
    chunk_fallacies: Result<Vec<VeriInference<Vec<VeriLabelScore>>>>,
}

/// Content analysis pipeline.
///
/// Cheap to share behind an `Arc`; all state lives in the inference cache.
pub struct VeriAnalyzer {
    config: VeriConfig,
    normalizer: VeriNormalizer,
    adapter: Arc<VeriMlAdapter>,
    weights: VeriScoreWeights,
    fallacy_labels: Vec<String>,
    topic_labels: Vec<String>,
    framing_labels: Vec<String>,
    fallacy_detector: Arc<dyn VeriDetector<Output = Vec<VeriFallacy>>>,
    bias_detector: Arc<dyn VeriDetector<Output = VeriBiasAnalysis>>,
    dark_pattern_detector: Arc<dyn VeriDetector<Output = Vec<VeriDarkPattern>>>,
    manipulation_detector: Arc<dyn VeriDetector<Output = VeriManipulationSignals>>,
    citation_detector: Arc<dyn VeriDetector<Output = usize>>,
}

impl std::fmt::Debug for VeriAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VeriAnalyzer")
            .field("adapter", &self.adapter)
            .field("chunk_max_chars", &self.config.chunk_max_chars)
            .field("deadline_ms", &self.config.analysis_deadline_ms)
            .finish()
    }
}

impl VeriAnalyzer {
    /// Analyzer talking to the HTTP inference endpoints in `config`.
    pub fn new(config: VeriConfig) -> Result<Self> {
        let adapter = Arc::new(VeriMlAdapter::new(&config)?);
        Self::with_adapter(config, adapter)
    }

    pub fn with_backend(config: VeriConfig, backend: Arc<dyn VeriInferenceBackend>) -> Result<Self> {
        let adapter = Arc::new(VeriMlAdapter::with_backend(&config, backend)?);
        Self::with_adapter(config, adapter)
    }

    pub fn with_adapter(config: VeriConfig, adapter: Arc<VeriMlAdapter>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            normalizer: VeriNormalizer::from_config(&config),
            adapter,
            weights: VeriScoreWeights::default(),
            fallacy_labels: VeriFallacyType::ALL
                .iter()
                .map(|t| t.label().to_string())
                .collect(),
            topic_labels: TOPIC_LABELS.iter().map(|l| l.to_string()).collect(),
            framing_labels: [OBJECTIVE_LABEL, BIASED_FRAMING_LABEL, EMOTIONAL_LABEL]
                .iter()
                .map(|l| l.to_string())
                .collect(),
            fallacy_detector: Arc::new(VeriFallacyDetector::new()?),
            bias_detector: Arc::new(VeriBiasDetector::new()?),
            dark_pattern_detector: Arc::new(VeriDarkPatternDetector::new()?),
            manipulation_detector: Arc::new(VeriManipulationDetector::new()?),
            citation_detector: Arc::new(VeriCitationDetector::new()?),
            config,
        })
    }

    pub fn with_weights(mut self, weights: VeriScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_fallacy_detector(mut self, detector: Arc<dyn VeriDetector<Output = Vec<VeriFallacy>>>) -> Self {
        self.fallacy_detector = detector;
        self
    }

    pub fn with_bias_detector(mut self, detector: Arc<dyn VeriDetector<Output = VeriBiasAnalysis>>) -> Self {
        self.bias_detector = detector;
        self
    }

    pub fn with_dark_pattern_detector(
        mut self,
        detector: Arc<dyn VeriDetector<Output = Vec<VeriDarkPattern>>>,
    ) -> Self {
        self.dark_pattern_detector = detector;
        self
    }

    pub fn with_manipulation_detector(
        mut self,
        detector: Arc<dyn VeriDetector<Output = VeriManipulationSignals>>,
    ) -> Self {
        self.manipulation_detector = detector;
        self
    }

    pub fn with_citation_detector(mut self, detector: Arc<dyn VeriDetector<Output = usize>>) -> Self {
        self.citation_detector = detector;
        self
    }

    pub fn adapter(&self) -> &Arc<VeriMlAdapter> {
        &self.adapter
    }

    pub fn config(&self) -> &VeriConfig {
        &self.config
    }

    pub fn weights(&self) -> &VeriScoreWeights {
        &self.weights
    }

    /// Analyzes `content` (HTML or plain text). Never fails.
    pub async fn analyze_content(&self, content: &str) -> VeriContentAnalysisResult {
        let started = Instant::now();
        match AssertUnwindSafe(self.compose(content, started)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                log::error!("veri.pipeline: analysis aborted: {message}");
                let mut result = VeriContentAnalysisResult::failed(format!("analysis aborted: {message}"));
                result.metadata.processing_time_ms = started.elapsed().as_millis() as u64;
                result
            }
        }
    }

    async fn compose(&self, content: &str, started: Instant) -> VeriContentAnalysisResult {
        let document = Arc::new(self.normalizer.normalize(content));
        log::debug!(
            "veri.pipeline: {} chars, html={}, {} chunks",
            document.char_count,
            document.is_html,
            document.chunks.len()
        );

        let fallacy_task = spawn_detector(self.fallacy_detector.clone(), document.clone());
        let bias_task = spawn_detector(self.bias_detector.clone(), document.clone());
        let dark_task = spawn_detector(self.dark_pattern_detector.clone(), document.clone());
        let manipulation_task = spawn_detector(self.manipulation_detector.clone(), document.clone());
        let citation_task = spawn_detector(self.citation_detector.clone(), document.clone());

        let deadline = self.config.analysis_deadline_ms.map(Duration::from_millis);
        let remote = match deadline {
            Some(limit) => match tokio::time::timeout(limit, self.remote_fan_out(&document)).await {
                Ok(outcome) => Some(outcome),
                Err(_) => {
                    log::warn!(
                        "veri.pipeline: remote analysis exceeded the {}ms deadline",
                        limit.as_millis()
                    );
                    None
                }
            },
            None => Some(self.remote_fan_out(&document).await),
        };

        let (fallacies, bias, dark_patterns, signals, citations) = tokio::join!(
            settle("detect.fallacy", fallacy_task),
            settle("detect.bias", bias_task),
            settle("detect.dark_patterns", dark_task),
            settle("detect.manipulation", manipulation_task),
            settle("detect.citations", citation_task),
        );

        let mut result = VeriContentAnalysisResult::default();
        let mut state = VeriLoadingState::all(VeriStageStatus::Complete);
        let mut warnings = document.warnings.clone();

        let rule_fallacies = match fallacies {
            Ok(found) => found,
            Err(err) => {
                note(&err, &mut warnings);
                state.fallacies = VeriStageStatus::Error;
                Vec::new()
            }
        };
        let mut bias = match bias {
            Ok(bias) => bias,
            Err(err) => {
                note(&err, &mut warnings);
                state.bias = VeriStageStatus::Error;
                VeriBiasAnalysis::default()
            }
        };
        let dark_patterns = match dark_patterns {
            Ok(found) => found,
            Err(err) => {
                note(&err, &mut warnings);
                state.dark_patterns = VeriStageStatus::Error;
                Vec::new()
            }
        };
        let signals = match signals {
            Ok(signals) => signals,
            Err(err) => {
                note(&err, &mut warnings);
                state.manipulation = VeriStageStatus::Error;
                VeriManipulationSignals::default()
            }
        };
        let citation_count = match citations {
            Ok(count) => count,
            Err(err) => {
                note(&err, &mut warnings);
                state.scores = VeriStageStatus::Error;
                0
            }
        };

        let metadata = &mut result.metadata;
        let timed_out = remote.is_none();
        let remote = match remote {
            Some(outcome) => outcome,
            None => {
                let err = VeriError::stage(
                    "remote",
                    format!(
                        "deadline of {}ms exceeded; local fallbacks used",
                        self.config.analysis_deadline_ms.unwrap_or_default()
                    ),
                );
                note(&err, &mut warnings);
                self.deadline_outcome(&document)
            }
        };

        result.sentiment = match remote.sentiment {
            Ok(inference) => {
                metadata.sources.sentiment = inference.source;
                inference.value
            }
            Err(err) => {
                note(&err, &mut warnings);
                state.sentiment = VeriStageStatus::Error;
                self.adapter.local().sentiment(&document.text)
            }
        };
        result.emotion_analysis = match remote.emotion {
            Ok(inference) => {
                metadata.sources.emotion = inference.source;
                inference.value
            }
            Err(err) => {
                note(&err, &mut warnings);
                state.emotion = VeriStageStatus::Error;
                self.adapter.local().emotion(&document.text)
            }
        };
        metadata.framing = match remote.framing {
            Ok(inference) => {
                metadata.sources.framing = inference.source;
                framing_scores(&inference.value)
            }
            Err(err) => {
                note(&err, &mut warnings);
                state.scores = VeriStageStatus::Error;
                VeriFramingScores::default()
            }
        };
        match remote.topic {
            Ok(inference) => {
                metadata.sources.topic = inference.source;
                let top = inference.value.first().filter(|_| !inference.is_fallback());
                match top {
                    Some(top) => {
                        metadata.topic = top.label.clone();
                        metadata.topic_confidence = top.score;
                    }
                    None => {
                        metadata.topic = UNKNOWN_TOPIC.to_string();
                        metadata.topic_confidence = 0.0;
                    }
                }
            }
            Err(err) => {
                note(&err, &mut warnings);
                state.topic = VeriStageStatus::Error;
            }
        }
        match remote.entities {
            Ok(inference) => {
                metadata.sources.entities = inference.source;
                metadata.grouped_entities = group_entities(&inference.value);
                metadata.entities = inference.value;
            }
            Err(err) => {
                note(&err, &mut warnings);
                state.entities = VeriStageStatus::Error;
            }
        }
        match remote.summary {
            Ok(inference) => {
                metadata.sources.summary = inference.source;
                metadata.summary = inference.value;
            }
            Err(err) => {
                note(&err, &mut warnings);
                state.summary = VeriStageStatus::Error;
            }
        }
        let model_fallacies = match remote.chunk_fallacies {
            Ok(per_chunk) => {
                metadata.sources.fallacies = combined_source(&per_chunk);
                self.model_fallacies(&document, &per_chunk, &rule_fallacies)
            }
            Err(err) => {
                note(&err, &mut warnings);
                state.fallacies = VeriStageStatus::Error;
                Vec::new()
            }
        };
        if timed_out {
            state.sentiment = VeriStageStatus::Error;
            state.emotion = VeriStageStatus::Error;
            state.entities = VeriStageStatus::Error;
            state.topic = VeriStageStatus::Error;
            state.summary = VeriStageStatus::Error;
        }

        let mut logical_fallacies = rule_fallacies;
        logical_fallacies.extend(model_fallacies);

        let inputs = VeriScoreInputs {
            fallacy_count: logical_fallacies.len(),
            framing: metadata.framing,
            topic: metadata.topic.clone(),
            citation_count,
            word_count: document.word_count,
        };
        let scores = self.weights.aggregate(&inputs, &mut bias);

        metadata.word_count = document.word_count;
        metadata.char_count = document.char_count;
        metadata.sentence_count = document.sentence_count;
        metadata.reading_time_minutes = reading_time(document.word_count);
        metadata.citation_count = citation_count;
        metadata.is_html = document.is_html;
        metadata.limited_analysis = document.limited_analysis;
        metadata.chunk_count = document.chunks.len();
        metadata.warnings = warnings;
        metadata.analyzed_at = Utc::now();
        metadata.processing_time_ms = started.elapsed().as_millis() as u64;

        let tactics = derive_tactics(&dark_patterns, &signals, &logical_fallacies);
        result.manipulation_analysis = VeriManipulationAnalysis {
            recommended_action: recommend(&signals, scores.manipulation),
            doomscroll: signals.doomscroll,
            outrage_bait: signals.outrage_bait,
            dark_patterns,
            tactics,
        };
        result.logical_fallacies = logical_fallacies;
        result.bias_analysis = bias;
        result.manipulation_score = scores.manipulation;
        result.quality_score = scores.quality;
        result.loading_state = state;

        log::info!(
            "veri.pipeline: analyzed {} chars in {}ms: {} fallacies, bias {} ({:.2}), manipulation {:.2}, quality {:.2}",
            result.metadata.char_count,
            result.metadata.processing_time_ms,
            result.logical_fallacies.len(),
            result.bias_analysis.bias_type,
            result.bias_analysis.confidence,
            result.manipulation_score,
            result.quality_score
        );
        result
    }

    async fn remote_fan_out(&self, document: &VeriDocument) -> RemoteOutcome {
        let adapter = &self.adapter;
        let text = document.text.as_str();
        let wants_summary = document.char_count >= self.config.summary_min_chars;

        let summary = async {
            if wants_summary {
                adapter.summarize(text).await
            } else {
                VeriInference::fallback(String::new())
            }
        };
        let chunks = join_all(
            document
                .chunks
                .iter()
                .map(|chunk| adapter.zero_shot(&chunk.text, &self.fallacy_labels)),
        );

        let (sentiment, emotion, framing, topic, entities, summary, chunk_fallacies) = tokio::join!(
            guarded("remote.sentiment", adapter.sentiment(text)),
            guarded("remote.emotion", adapter.emotion(text)),
            guarded("remote.framing", adapter.zero_shot(text, &self.framing_labels)),
            guarded("remote.topic", adapter.zero_shot(text, &self.topic_labels)),
            guarded("remote.entities", adapter.entities(text)),
            guarded("remote.summary", summary),
            guarded("remote.fallacies", chunks),
        );
        RemoteOutcome {
            sentiment,
            emotion,
            framing,
            topic,
            entities,
            summary,
            chunk_fallacies,
        }
    }

    /// Local-only outcome used once the deadline has passed.
    fn deadline_outcome(&self, document: &VeriDocument) -> RemoteOutcome {
        let local = self.adapter.local();
        let text = document.text.as_str();
        let summary = if document.char_count >= self.config.summary_min_chars {
            local.summary(text, self.config.summary_max_length)
        } else {
            String::new()
        };
        RemoteOutcome {
            sentiment: Ok(VeriInference::fallback(local.sentiment(text))),
            emotion: Ok(VeriInference::fallback(local.emotion(text))),
            framing: Ok(VeriInference::fallback(local.zero_shot(&self.framing_labels))),
            topic: Ok(VeriInference::fallback(local.zero_shot(&self.topic_labels))),
            entities: Ok(VeriInference::fallback(Vec::new())),
            summary: Ok(VeriInference::fallback(summary)),
            chunk_fallacies: Ok(Vec::new()),
        }
    }

    /// Fallacy types the classifier scored above the threshold on any chunk
    /// and the rules did not already report. The best-scoring chunk wins
    /// each type; ties go to the earliest chunk.
    fn model_fallacies(
        &self,
        document: &VeriDocument,
        per_chunk: &[VeriInference<Vec<VeriLabelScore>>],
        rule_fallacies: &[VeriFallacy],
    ) -> Vec<VeriFallacy> {
        let threshold = self.config.model_fallacy_threshold;
        let mut best: BTreeMap<VeriFallacyType, VeriFallacy> = BTreeMap::new();
        for (chunk, inference) in document.chunks.iter().zip(per_chunk) {
            if inference.is_fallback() {
                continue;
            }
            for label in &inference.value {
                let Some(kind) = VeriFallacyType::from_label(&label.label) else {
                    continue;
                };
                if label.score <= threshold || rule_fallacies.iter().any(|f| f.fallacy_type == kind) {
                    continue;
                }
                let replace = match best.get(&kind) {
                    None => true,
                    Some(current) => {
                        label.score > current.confidence
                            || (label.score == current.confidence && chunk.start < current.span.start)
                    }
                };
                if replace {
                    best.insert(
                        kind,
                        VeriFallacy {
                            fallacy_type: kind,
                            confidence: label.score.clamp(0.0, 1.0),
                            explanation: kind.explanation().to_string(),
                            excerpt: chunk.text.chars().take(MAX_MODEL_EXCERPT_CHARS).collect(),
                            span: VeriSpan::new(chunk.start, chunk.end),
                            source: VeriDetectionSource::Model,
                        },
                    );
                }
            }
        }
        best.into_values().collect()
    }
}

fn note(err: &VeriError, warnings: &mut Vec<String>) {
    log::warn!("veri.pipeline: {err}");
    warnings.push(err.to_string());
}

fn spawn_detector<O>(
    detector: Arc<dyn VeriDetector<Output = O>>,
    document: Arc<VeriDocument>,
) -> JoinHandle<Result<O>>
where
    O: Send + 'static,
{
    tokio::task::spawn_blocking(move || execute_detector(detector.as_ref(), &document))
}

async fn settle<O>(stage: &'static str, handle: JoinHandle<Result<O>>) -> Result<O> {
    let joined: std::result::Result<Result<O>, JoinError> = handle.await;
    match joined {
        Ok(result) => result,
        Err(err) if err.is_panic() => Err(VeriError::stage(
            stage,
            format!("panicked: {}", panic_message(err.into_panic().as_ref())),
        )),
        Err(err) => Err(VeriError::stage(stage, err.to_string())),
    }
}

async fn guarded<F: Future>(stage: &'static str, future: F) -> Result<F::Output> {
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| VeriError::stage(stage, format!("panicked: {}", panic_message(panic.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn combined_source(per_chunk: &[VeriInference<Vec<VeriLabelScore>>]) -> VeriInferenceSource {
    let sources: Vec<VeriInferenceSource> = per_chunk.iter().map(|i| i.source).collect();
    if sources.contains(&VeriInferenceSource::Remote) {
        VeriInferenceSource::Remote
    } else if sources.contains(&VeriInferenceSource::Cache) {
        VeriInferenceSource::Cache
    } else {
        VeriInferenceSource::Fallback
    }
}

fn framing_scores(scores: &[VeriLabelScore]) -> VeriFramingScores {
    let defaults = VeriFramingScores::default();
    let find = |label: &str, default: f64| {
        scores
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.score.clamp(0.0, 1.0))
            .unwrap_or(default)
    };
    VeriFramingScores {
        objectivity: find(OBJECTIVE_LABEL, defaults.objectivity),
        biased_framing: find(BIASED_FRAMING_LABEL, defaults.biased_framing),
        emotional_language: find(EMOTIONAL_LABEL, defaults.emotional_language),
    }
}

fn reading_time(words: usize) -> f64 {
    (words as f64 / WORDS_PER_MINUTE * 10.0).round() / 10.0
}

/// Named tactics derived from dark patterns, doomscroll/outrage flags and
/// emotionally manipulative fallacies.
pub fn derive_tactics(
    dark_patterns: &[VeriDarkPattern],
    signals: &VeriManipulationSignals,
    fallacies: &[VeriFallacy],
) -> Vec<VeriTactic> {
    let mut tactics: Vec<VeriTactic> = Vec::new();
    let mut push = |name: &str, description: &str, confidence: f64| {
        match tactics.iter_mut().find(|t| t.name == name) {
            Some(existing) => existing.confidence = existing.confidence.max(confidence),
            None => tactics.push(VeriTactic {
                name: name.to_string(),
                description: description.to_string(),
                confidence: confidence.clamp(0.0, 1.0),
            }),
        }
    };

    for pattern in dark_patterns {
        push(pattern.pattern_type.as_str(), &pattern.description, pattern.confidence);
    }
    if signals.doomscroll.is_doomscroll {
        push(
            "DOOMSCROLL",
            "Catastrophic framing that encourages anxious, compulsive reading.",
            signals.doomscroll.score,
        );
    }
    if signals.outrage_bait.is_outrage_bait {
        push(
            "OUTRAGE_BAIT",
            "Inflammatory wording that provokes anger-driven engagement.",
            signals.outrage_bait.score,
        );
    }
    for fallacy in fallacies {
        let tactic = match fallacy.fallacy_type {
            VeriFallacyType::AppealToEmotion => Some(("EMOTIONAL_MANIPULATION", "Emotional pressure used in place of evidence.")),
            VeriFallacyType::Bandwagon => Some(("SOCIAL_PROOF", "Pressure to agree because others supposedly do.")),
            VeriFallacyType::AdHominem => Some(("PERSONAL_ATTACKS", "Discrediting people instead of engaging arguments.")),
            VeriFallacyType::FalseDichotomy => Some(("FALSE_CHOICE", "Complex issues reduced to two options.")),
            VeriFallacyType::SlipperySlope => Some(("FEAR_OF_ESCALATION", "Unsupported chains of extreme consequences.")),
            _ => None,
        };
        if let Some((name, description)) = tactic {
            push(name, description, fallacy.confidence);
        }
    }
    tactics
}

pub fn recommend(signals: &VeriManipulationSignals, manipulation: f64) -> VeriRecommendedAction {
    let doom = signals.doomscroll.is_doomscroll;
    let outrage = signals.outrage_bait.is_outrage_bait;
    if (doom && outrage) || manipulation > AVOID_THRESHOLD {
        VeriRecommendedAction::Avoid
    } else if doom {
        VeriRecommendedAction::TakeBreak
    } else if outrage || manipulation > READ_CRITICALLY_THRESHOLD {
        VeriRecommendedAction::ReadCritically
    } else {
        VeriRecommendedAction::ReadNormally
    }
}
