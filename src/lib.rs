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

//! # Veri Core Library
//!
//! Veri turns raw article text (HTML or plain) into a structured, always
//! complete content analysis: logical fallacies, political bias, sentiment,
//! emotional tone, manipulation tactics, and composite quality and
//! manipulation scores.
//!
//! ## Module Overview
//!
//! - **normalize**: HTML detection, text extraction and chunking
//! - **detector**: The [`VeriDetector`] trait shared by rule-based analyzers
//! - **detectors**: Fallacy, bias, dark-pattern, doomscroll/outrage and
//!   citation detectors with their data tables
//! - **remote**: Inference backend, adapter, cache and local fallbacks
//! - **scoring**: Composite scores and bias-confidence refinement
//! - **pipeline**: The result composer, [`VeriAnalyzer`]
//! - **result**: The serializable result model
//! - **config**: [`VeriConfig`] defaults, YAML and environment loading
//! - **errors**: [`VeriError`] and the crate [`Result`] alias
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veri::{VeriAnalyzer, VeriConfig};
//!
//! # async fn run() -> veri::Result<()> {
//! let analyzer = VeriAnalyzer::new(VeriConfig::from_env()?)?;
//! let result = analyzer
//!     .analyze_content("<p>Experts say this is true because science tells us so.</p>")
//!     .await;
//! println!("{}", result.to_json());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Normalize**: one [`VeriDocument`] per call
//! 2. **Detect**: rule detectors run on the blocking pool
//! 3. **Infer**: remote calls run concurrently; each one answers from the
//!    cache, the endpoint or a deterministic local fallback
//! 4. **Score**: bias is refined with framing signals, then both composite
//!    scores are computed
//! 5. **Compose**: every dimension is filled, failed ones with their default
//!    and an `error` marker
//!
//! ## Error Handling
//!
//! Construction and configuration return `Result<T, VeriError>`.
//! [`VeriAnalyzer::analyze_content`] itself never fails.

#![allow(non_snake_case)]

pub mod config;
pub mod detector;
pub mod detectors;
pub mod errors;
pub mod normalize;
pub mod pipeline;
pub mod remote;
pub mod result;
pub mod scoring;

pub use config::{VeriConfig, VeriTaskSettings};
pub use detector::{execute_detector, VeriDetector};
pub use detectors::{
    VeriBiasDetector, VeriCitationDetector, VeriDarkPatternDetector, VeriFallacyDetector,
    VeriManipulationDetector, VeriManipulationSignals, VeriTermMatcher,
};
pub use errors::{Result, VeriError};
pub use normalize::{VeriChunk, VeriDocument, VeriNormalizer};
pub use pipeline::VeriAnalyzer;
pub use remote::{
    VeriCacheKey, VeriCacheStats, VeriClock, VeriHttpBackend, VeriInference, VeriInferenceBackend,
    VeriInferenceCache, VeriInferenceRequest, VeriLabelScore, VeriManualClock, VeriMlAdapter,
    VeriSystemClock, VeriTask,
};
pub use result::{
    VeriAnalysisMetadata, VeriBiasAnalysis, VeriBiasScores, VeriBiasType, VeriContentAnalysisResult,
    VeriDarkPattern, VeriDarkPatternType, VeriDetectionSource, VeriDoomscroll, VeriEmotionAnalysisResult,
    VeriEmotionScore, VeriEmotionType, VeriEntity, VeriEntityGroup, VeriFallacy, VeriFallacyType,
    VeriFramingScores, VeriInferenceSource, VeriLoadingState, VeriManipulationAnalysis,
    VeriOutrageBait, VeriRecommendedAction, VeriSentiment, VeriSentimentLabel, VeriSourceMap,
    VeriSpan, VeriStageStatus, VeriTactic,
};
pub use scoring::{VeriBiasAdjustment, VeriScoreInputs, VeriScoreWeights, VeriScores};
