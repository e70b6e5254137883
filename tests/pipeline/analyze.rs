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
use proptest::prelude::*;
use veri::errors::{Result, VeriError};
use veri::normalize::VeriDocument;
use veri::{
    VeriAnalyzer, VeriBiasAnalysis, VeriBiasType, VeriConfig, VeriDetectionSource, VeriDetector,
    VeriFallacyType, VeriInferenceSource, VeriRecommendedAction, VeriSentimentLabel,
    VeriStageStatus, VeriTask,
};

const ARTICLE: &str = "NASA announced on Monday that its new telescope captured detailed images of a distant galaxy. \
    According to the agency, the observations will help researchers study how stars form. \
    The team said the data would be released to universities later this year.";

fn analyzer(mode: ScriptMode, config: VeriConfig) -> (VeriAnalyzer, Arc<ScriptedBackend>) {
    let backend = Arc::new(ScriptedBackend::new(mode));
    let analyzer = VeriAnalyzer::with_backend(config, backend.clone()).unwrap();
    (analyzer, backend)
}

fn assert_unit(value: f64) {
    assert!((0.0..=1.0).contains(&value), "{value} outside [0, 1]");
}

#[tokio::test]
async fn empty_content_yields_a_complete_default_result() {
    let (analyzer, backend) = analyzer(ScriptMode::Healthy, VeriConfig::default());
    let result = analyzer.analyze_content("").await;

    assert_eq!(backend.calls(), 0);
    assert!(result.logical_fallacies.is_empty());
    assert_eq!(result.bias_analysis.bias_type, VeriBiasType::Center);
    assert_eq!(result.metadata.word_count, 0);
    assert!(result.metadata.limited_analysis);
    assert_eq!(result.metadata.topic, "Unknown");
    assert!(result.metadata.summary.is_empty());
    assert!(!result.loading_state.has_errors());
    assert_unit(result.manipulation_score);
    assert_unit(result.quality_score);

    let json = result.to_json();
    for key in [
        "logicalFallacies",
        "biasAnalysis",
        "metadata",
        "manipulationScore",
        "qualityScore",
        "emotionAnalysis",
        "sentiment",
        "manipulationAnalysis",
        "loadingState",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}

#[tokio::test]
async fn healthy_backend_fills_every_remote_dimension() {
    let (analyzer, backend) = analyzer(ScriptMode::Healthy, VeriConfig::default());
    let result = analyzer.analyze_content(ARTICLE).await;

    assert_eq!(result.sentiment.label, VeriSentimentLabel::Positive);
    assert_eq!(result.metadata.sources.sentiment, VeriInferenceSource::Remote);
    assert_eq!(result.metadata.topic, "Politics");
    assert!((result.metadata.topic_confidence - 0.7).abs() < 1e-9);
    assert!((result.metadata.framing.objectivity - 0.7).abs() < 1e-9);
    assert_eq!(result.metadata.grouped_entities["ORG"][0].entity, "NASA");
    assert!(result.metadata.citation_count >= 2);
    assert!(!result.loading_state.has_errors());

    // short article: no summary request
    assert!(result.metadata.summary.is_empty());
    assert_eq!(backend.calls_for(VeriTask::Summarization), 0);
}

#[tokio::test]
async fn long_articles_are_summarized() {
    let (analyzer, backend) = analyzer(ScriptMode::Healthy, VeriConfig::default());
    let long = format!("{ARTICLE} {ARTICLE} {ARTICLE}");
    let result = analyzer.analyze_content(&long).await;

    assert_eq!(result.metadata.summary, "A short summary.");
    assert_eq!(backend.calls_for(VeriTask::Summarization), 1);
    assert!(result.metadata.chunk_count >= 2);
}

#[tokio::test]
async fn every_remote_failure_degrades_to_local_fallbacks() {
    let (analyzer, backend) = analyzer(ScriptMode::FailAll, VeriConfig::default());
    let text = "A terrible failure and a deadly disaster hit the region, officials said.";
    let result = analyzer.analyze_content(text).await;

    assert!(backend.calls() > 0);
    let sources = &result.metadata.sources;
    for source in [
        sources.sentiment,
        sources.emotion,
        sources.framing,
        sources.topic,
        sources.entities,
        sources.fallacies,
    ] {
        assert_eq!(source, VeriInferenceSource::Fallback);
    }
    assert_eq!(result.sentiment, analyzer.adapter().local().sentiment(text));
    assert_eq!(result.sentiment.label, VeriSentimentLabel::Negative);
    assert_eq!(result.metadata.topic, "Unknown");
    assert!(result.metadata.entities.is_empty());
    assert!(!result.loading_state.has_errors());
    assert_unit(result.manipulation_score);
    assert_unit(result.quality_score);
}

#[tokio::test]
async fn repeated_analysis_is_served_from_cache() {
    let (analyzer, backend) = analyzer(ScriptMode::Healthy, VeriConfig::default());

    let first = analyzer.analyze_content(ARTICLE).await;
    let calls = backend.calls();
    let attempts = analyzer.adapter().remote_attempts();
    let mut second = analyzer.analyze_content(ARTICLE).await;

    assert_eq!(backend.calls(), calls);
    assert_eq!(analyzer.adapter().remote_attempts(), attempts);
    assert_eq!(second.metadata.sources.sentiment, VeriInferenceSource::Cache);

    second.metadata.sources = first.metadata.sources.clone();
    second.metadata.analyzed_at = first.metadata.analyzed_at;
    second.metadata.processing_time_ms = first.metadata.processing_time_ms;
    assert_eq!(second, first);
}

#[tokio::test]
async fn html_input_feeds_markup_detectors() {
    let (analyzer, _backend) = analyzer(ScriptMode::FailAll, VeriConfig::default());
    let html = r#"<html><body>
        <h1>Deal of the day</h1>
        <p>Hurry, offer ends tonight! Read the <a href="https://example.org/terms">terms</a>.</p>
        <div class="countdown-timer">00:10:00</div>
        <script>console.log("tracking")</script>
        </body></html>"#;
    let result = analyzer.analyze_content(html).await;

    assert!(result.metadata.is_html);
    assert!(result.metadata.citation_count >= 1);
    let patterns = &result.manipulation_analysis.dark_patterns;
    assert!(patterns.iter().any(|p| p.confidence == 0.7));
    assert!(patterns.iter().any(|p| p.confidence == 0.6));
    assert!(result
        .manipulation_analysis
        .tactics
        .iter()
        .any(|t| t.name == "URGENCY"));
}

#[tokio::test]
async fn doomscroll_content_recommends_a_break() {
    let (analyzer, _backend) = analyzer(ScriptMode::FailAll, VeriConfig::default());
    let result = analyzer
        .analyze_content("Pandemic catastrophe: economic collapse feared as crisis deepens and disaster looms.")
        .await;

    let manipulation = &result.manipulation_analysis;
    assert!(manipulation.doomscroll.is_doomscroll);
    assert!(!manipulation.outrage_bait.is_outrage_bait);
    assert_eq!(manipulation.recommended_action, VeriRecommendedAction::TakeBreak);
    assert!(manipulation.tactics.iter().any(|t| t.name == "DOOMSCROLL"));
}

#[tokio::test]
async fn confident_classifier_adds_model_fallacies() {
    let (analyzer, _backend) = analyzer(ScriptMode::Confident, VeriConfig::default());
    let result = analyzer
        .analyze_content("Everyone knows the plan works. We should adopt it without delay.")
        .await;

    let model: Vec<_> = result
        .logical_fallacies
        .iter()
        .filter(|f| f.source == VeriDetectionSource::Model)
        .collect();
    assert_eq!(model.len(), 1);
    assert_eq!(model[0].fallacy_type, VeriFallacyType::AdHominem);
    assert!((model[0].confidence - 0.7).abs() < 1e-9);
    assert!(result
        .logical_fallacies
        .iter()
        .any(|f| f.fallacy_type == VeriFallacyType::Bandwagon && f.source == VeriDetectionSource::Rule));
}

#[tokio::test]
async fn deadline_marks_remote_dimensions_as_errors() {
    let config = VeriConfig::default().analysis_deadline_ms(Some(50));
    let (analyzer, _backend) = analyzer(ScriptMode::Slow(Duration::from_secs(5)), config);

    let started = std::time::Instant::now();
    let result = analyzer.analyze_content(ARTICLE).await;
    assert!(started.elapsed() < Duration::from_secs(5));

    let state = &result.loading_state;
    for status in [state.sentiment, state.emotion, state.entities, state.topic, state.summary] {
        assert_eq!(status, VeriStageStatus::Error);
    }
    assert_eq!(state.fallacies, VeriStageStatus::Complete);
    assert_eq!(state.bias, VeriStageStatus::Complete);
    assert_eq!(result.metadata.sources.sentiment, VeriInferenceSource::Fallback);
    assert!(result.metadata.warnings.iter().any(|w| w.contains("deadline")));
    assert_unit(result.manipulation_score);
}

#[tokio::test(start_paused = true)]
async fn remote_calls_are_issued_concurrently() {
    let delay = Duration::from_secs(1);
    let (analyzer, backend) = analyzer(ScriptMode::Slow(delay), VeriConfig::default());
    let long = format!("{ARTICLE} {ARTICLE} {ARTICLE}");

    let started = tokio::time::Instant::now();
    let result = analyzer.analyze_content(&long).await;
    let elapsed = started.elapsed();

    assert!(result.metadata.chunk_count >= 2);
    // sentiment, emotion, framing, topic, entities, summary and one call per chunk
    assert!(backend.calls() >= 6 + result.metadata.chunk_count);
    assert!(elapsed >= delay);
    assert!(elapsed < delay * 2, "remote calls ran one after another: {elapsed:?}");
    assert_eq!(result.metadata.sources.sentiment, VeriInferenceSource::Remote);
    assert_eq!(result.metadata.sources.fallacies, VeriInferenceSource::Remote);
}

#[tokio::test(start_paused = true)]
async fn a_slow_task_does_not_hold_up_the_others() {
    let config = VeriConfig::default().task_timeout_ms(VeriTask::Ner, 50);
    let (analyzer, backend) = analyzer(
        ScriptMode::SlowTask(VeriTask::Ner, Duration::from_secs(60)),
        config,
    );

    let started = tokio::time::Instant::now();
    let result = analyzer.analyze_content(ARTICLE).await;
    assert!(started.elapsed() < Duration::from_secs(1));

    let sources = &result.metadata.sources;
    assert_eq!(sources.entities, VeriInferenceSource::Fallback);
    assert!(result.metadata.entities.is_empty());
    for source in [sources.sentiment, sources.emotion, sources.framing, sources.topic] {
        assert_eq!(source, VeriInferenceSource::Remote);
    }
    assert_eq!(result.metadata.topic, "Politics");
    assert_eq!(backend.calls_for(VeriTask::Ner), 1);
}

#[tokio::test]
async fn a_panicking_framing_stage_marks_the_scores() {
    let (analyzer, _backend) = analyzer(ScriptMode::PanicFor(VeriTask::ZeroShot), VeriConfig::default());
    let result = analyzer.analyze_content(ARTICLE).await;

    assert_eq!(result.loading_state.scores, VeriStageStatus::Error);
    assert_eq!(result.metadata.sources.sentiment, VeriInferenceSource::Remote);
    assert_eq!(result.loading_state.sentiment, VeriStageStatus::Complete);
    assert!(result.metadata.warnings.iter().any(|w| w.contains("remote.framing")));
    assert_unit(result.manipulation_score);
    assert_unit(result.quality_score);
}

#[derive(Debug)]
struct PanickingBias;

impl VeriDetector for PanickingBias {
    type Output = VeriBiasAnalysis;

    fn name(&self) -> &'static str {
        "detect.bias.panicking"
    }

    fn detect(&self, _document: &VeriDocument) -> Result<VeriBiasAnalysis> {
        panic!("lexicon exploded")
    }
}

#[derive(Debug)]
struct FailingCitations;

impl VeriDetector for FailingCitations {
    type Output = usize;

    fn name(&self) -> &'static str {
        "detect.citations.failing"
    }

    fn detect(&self, _document: &VeriDocument) -> Result<usize> {
        Err(VeriError::internal("citation index offline"))
    }
}

#[tokio::test]
async fn failing_detectors_only_mark_their_own_dimension() {
    let (analyzer, _backend) = analyzer(ScriptMode::FailAll, VeriConfig::default());
    let analyzer = analyzer
        .with_bias_detector(Arc::new(PanickingBias))
        .with_citation_detector(Arc::new(FailingCitations));
    let result = analyzer.analyze_content(ARTICLE).await;

    assert_eq!(result.loading_state.bias, VeriStageStatus::Error);
    assert_eq!(result.loading_state.fallacies, VeriStageStatus::Complete);
    assert_eq!(result.loading_state.manipulation, VeriStageStatus::Complete);
    assert_eq!(result.bias_analysis.bias_type, VeriBiasType::Center);
    assert_eq!(result.metadata.citation_count, 0);
    // the scores were computed from a defaulted citation count
    assert_eq!(result.loading_state.scores, VeriStageStatus::Error);

    let warnings = result.metadata.warnings.join("\n");
    assert!(warnings.contains("lexicon exploded"));
    assert!(warnings.contains("citation index offline"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn scores_are_always_in_unit_range(content in "[a-zA-Z !?.,<>/]{0,300}") {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (analyzer, _backend) = analyzer(ScriptMode::FailAll, VeriConfig::default());
        let result = runtime.block_on(analyzer.analyze_content(&content));

        prop_assert!((0.0..=1.0).contains(&result.manipulation_score));
        prop_assert!((0.0..=1.0).contains(&result.quality_score));
        prop_assert!((0.0..=1.0).contains(&result.bias_analysis.confidence));
        prop_assert!(result.emotion_analysis.emotional_appeal <= 100);
    }
}
