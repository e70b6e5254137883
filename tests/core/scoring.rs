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

use proptest::prelude::*;
use veri::{
    VeriBiasAdjustment, VeriBiasAnalysis, VeriBiasType, VeriFramingScores, VeriScoreInputs,
    VeriScoreWeights,
};

fn bias(kind: VeriBiasType, confidence: f64) -> VeriBiasAnalysis {
    VeriBiasAnalysis {
        bias_type: kind,
        confidence,
        ..VeriBiasAnalysis::default()
    }
}

fn framing(objectivity: f64, biased: f64, emotional: f64) -> VeriFramingScores {
    VeriFramingScores {
        objectivity,
        biased_framing: biased,
        emotional_language: emotional,
    }
}

#[test]
fn manipulation_saturates_at_five_fallacies() {
    let weights = VeriScoreWeights::default();
    let center = VeriBiasAnalysis::default();
    let five = weights.manipulation_score(5, &center, 0.0, "World");
    let nine = weights.manipulation_score(9, &center, 0.0, "World");
    assert!((five - 0.5).abs() < 1e-9);
    assert_eq!(five, nine);
}

#[test]
fn opinion_topic_lowers_manipulation() {
    let weights = VeriScoreWeights::default();
    let leaning = bias(VeriBiasType::LeftStrong, 0.8);
    let news = weights.manipulation_score(2, &leaning, 0.5, "Politics");
    let opinion = weights.manipulation_score(2, &leaning, 0.5, "Opinion");
    assert!((news - opinion - 0.1).abs() < 1e-9);
    assert_eq!(weights.manipulation_score(0, &VeriBiasAnalysis::default(), 0.0, "Opinion"), 0.0);
}

#[test]
fn quality_rewards_citations_length_and_objectivity() {
    let weights = VeriScoreWeights::default();
    let best = weights.quality_score(3, 500, 1.0, 0.0);
    assert!((best - 1.0).abs() < 1e-9);
    let bare = weights.quality_score(0, 0, 0.0, 1.0);
    assert_eq!(bare, 0.0);
    let middling = weights.quality_score(1, 250, 0.5, 0.5);
    assert!((middling - (0.1 + 0.1 + 0.1 + 0.15)).abs() < 1e-9);
}

#[test]
fn objectivity_reduces_confidence_without_reclassifying_strong_readings() {
    let weights = VeriScoreWeights::default();
    let mut reading = bias(VeriBiasType::RightStrong, 0.9);
    let adjustment = weights.refine_bias(&mut reading, &framing(0.7, 0.1, 0.1));
    assert_eq!(adjustment, VeriBiasAdjustment::Reduced);
    assert_eq!(reading.bias_type, VeriBiasType::RightStrong);
    assert!((reading.confidence - 0.9 * (1.0 - 0.7 * 0.75)).abs() < 1e-9);
    assert!(reading.explanation.contains("objective"));
}

#[test]
fn framing_signals_raise_confidence_up_to_the_cap() {
    let weights = VeriScoreWeights::default();
    let mut reading = bias(VeriBiasType::LeftModerate, 0.6);
    assert_eq!(
        weights.refine_bias(&mut reading, &framing(0.2, 0.8, 0.1)),
        VeriBiasAdjustment::Increased
    );
    assert!((reading.confidence - (0.6 + 0.8 * 0.3)).abs() < 1e-9);

    let mut high = bias(VeriBiasType::LeftModerate, 0.9);
    weights.refine_bias(&mut high, &framing(0.1, 0.2, 1.0));
    assert!((high.confidence - 0.95).abs() < 1e-9);
}

#[test]
fn neutral_framing_leaves_bias_alone() {
    let weights = VeriScoreWeights::default();
    let mut reading = bias(VeriBiasType::LeftSlight, 0.55);
    let before = reading.clone();
    assert_eq!(
        weights.refine_bias(&mut reading, &VeriFramingScores::default()),
        VeriBiasAdjustment::Unchanged
    );
    assert_eq!(reading, before);
}

#[test]
fn aggregate_scores_the_refined_bias() {
    let weights = VeriScoreWeights::default();
    let mut reading = bias(VeriBiasType::RightModerate, 0.5);
    let inputs = VeriScoreInputs {
        fallacy_count: 0,
        framing: framing(0.9, 0.05, 0.0),
        topic: "World".to_string(),
        citation_count: 0,
        word_count: 0,
    };
    let scores = weights.aggregate(&inputs, &mut reading);
    assert_eq!(reading.bias_type, VeriBiasType::Center);
    assert_eq!(scores.manipulation, 0.0);
    assert!((scores.quality - (0.2 * 0.9 + 0.3)).abs() < 1e-9);
}

fn any_bias_type() -> impl Strategy<Value = VeriBiasType> {
    (-4i8..=4).prop_map(VeriBiasType::from_ordinal)
}

proptest! {
    #[test]
    fn scores_stay_in_unit_range(
        fallacies in 0usize..40,
        kind in any_bias_type(),
        confidence in 0.0f64..=1.0,
        objectivity in 0.0f64..=1.0,
        biased in 0.0f64..=1.0,
        emotional in 0.0f64..=1.0,
        citations in 0usize..20,
        words in 0usize..5_000,
        opinion in any::<bool>(),
    ) {
        let weights = VeriScoreWeights::default();
        let mut reading = bias(kind, confidence);
        let inputs = VeriScoreInputs {
            fallacy_count: fallacies,
            framing: framing(objectivity, biased, emotional),
            topic: if opinion { "Opinion".to_string() } else { "Science".to_string() },
            citation_count: citations,
            word_count: words,
        };
        let scores = weights.aggregate(&inputs, &mut reading);
        prop_assert!((0.0..=1.0).contains(&scores.manipulation));
        prop_assert!((0.0..=1.0).contains(&scores.quality));
        prop_assert!((0.0..=1.0).contains(&reading.confidence));
    }
}
