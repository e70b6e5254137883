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

//! # Score Aggregator
//!
//! Composite scores and bias-confidence refinement.
//!
//! ```text
//! manipulation = clamp01(0.5 * min(fallacies / 5, 1)
//!                      + 0.3 * (bias == CENTER ? 0 : bias confidence)
//!                      + 0.2 * emotional language
//!                      - 0.1 if topic == "Opinion")
//! quality      = clamp01(0.3 * min(citations / 3, 1)
//!                      + 0.2 * min(words / 500, 1)
//!                      + 0.2 * objectivity
//!                      + 0.3 * (1 - manipulation))
//! ```
//!
//! The weights are fixed. They live in [`VeriScoreWeights`] so tests can read
//! and vary them, but they are not part of [`crate::VeriConfig`].

use serde::{Deserialize, Serialize};

use crate::result::{VeriBiasAnalysis, VeriBiasType, VeriFramingScores};

pub const OPINION_TOPIC: &str = "Opinion";

/// Clamps into `[0, 1]`; NaN maps to 0.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VeriScoreWeights {
    pub fallacy_weight: f64,
    pub fallacy_saturation: f64,
    pub bias_weight: f64,
    pub emotional_weight: f64,
    pub opinion_discount: f64,

    pub citation_weight: f64,
    pub citation_saturation: f64,
    pub length_weight: f64,
    pub length_saturation: f64,
    pub objectivity_weight: f64,
    pub integrity_weight: f64,

    pub objectivity_threshold: f64,
    pub objectivity_damping: f64,
    pub center_floor: f64,
    pub framing_threshold: f64,
    pub emotional_threshold: f64,
    pub emotional_factor: f64,
    pub boost_factor: f64,
    pub max_confidence: f64,
}

impl Default for VeriScoreWeights {
    fn default() -> Self {
        Self {
            fallacy_weight: 0.5,
            fallacy_saturation: 5.0,
            bias_weight: 0.3,
            emotional_weight: 0.2,
            opinion_discount: 0.1,

            citation_weight: 0.3,
            citation_saturation: 3.0,
            length_weight: 0.2,
            length_saturation: 500.0,
            objectivity_weight: 0.2,
            integrity_weight: 0.3,

            objectivity_threshold: 0.6,
            objectivity_damping: 0.75,
            center_floor: 0.25,
            framing_threshold: 0.5,
            emotional_threshold: 0.6,
            emotional_factor: 0.8,
            boost_factor: 0.3,
            max_confidence: 0.95,
        }
    }
}

/// What the refinement step did to a bias reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VeriBiasAdjustment {
    Unchanged,
    Reduced,
    ReclassifiedCenter,
    Increased,
}

/// Final composite scores for one analysis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VeriScores {
    pub manipulation: f64,
    pub quality: f64,
}

/// Everything the aggregator reads.
#[derive(Clone, Debug, Default)]
pub struct VeriScoreInputs {
    pub fallacy_count: usize,
    pub framing: VeriFramingScores,
    pub topic: String,
    pub citation_count: usize,
    pub word_count: usize,
}

impl VeriScoreWeights {
    pub fn manipulation_score(
        &self,
        fallacy_count: usize,
        bias: &VeriBiasAnalysis,
        emotional_language: f64,
        topic: &str,
    ) -> f64 {
        let fallacies = (fallacy_count as f64 / self.fallacy_saturation).min(1.0);
        let bias_signal = if bias.bias_type == VeriBiasType::Center {
            0.0
        } else {
            clamp01(bias.confidence)
        };
        let opinion = if topic == OPINION_TOPIC {
            -self.opinion_discount
        } else {
            0.0
        };
        clamp01(
            self.fallacy_weight * fallacies
                + self.bias_weight * bias_signal
                + self.emotional_weight * clamp01(emotional_language)
                + opinion,
        )
    }

    pub fn quality_score(
        &self,
        citation_count: usize,
        word_count: usize,
        objectivity: f64,
        manipulation: f64,
    ) -> f64 {
        let citations = (citation_count as f64 / self.citation_saturation).min(1.0);
        let length = (word_count as f64 / self.length_saturation).min(1.0);
        clamp01(
            self.citation_weight * citations
                + self.length_weight * length
                + self.objectivity_weight * clamp01(objectivity)
                + self.integrity_weight * (1.0 - clamp01(manipulation)),
        )
    }

    /// Adjusts bias confidence with the independent framing signals and
    /// appends the rationale to the explanation.
    pub fn refine_bias(&self, bias: &mut VeriBiasAnalysis, framing: &VeriFramingScores) -> VeriBiasAdjustment {
        let objectivity = clamp01(framing.objectivity);
        let biased = clamp01(framing.biased_framing);
        let emotional = clamp01(framing.emotional_language);

        if objectivity > self.objectivity_threshold && !bias.bias_type.is_center() {
            let before = bias.confidence;
            bias.confidence = clamp01(before * (1.0 - objectivity * self.objectivity_damping));
            if bias.confidence < self.center_floor {
                bias.bias_type = VeriBiasType::Center;
                bias.scores = bias.scores.centered();
                push_rationale(
                    bias,
                    format!(
                        "Reclassified as CENTER: the text reads as objective (objectivity {objectivity:.2}), leaving too little confidence in a lean."
                    ),
                );
                return VeriBiasAdjustment::ReclassifiedCenter;
            }
            push_rationale(
                bias,
                format!(
                    "Confidence lowered from {before:.2} to {:.2} because the text reads as objective (objectivity {objectivity:.2}).",
                    bias.confidence
                ),
            );
            return VeriBiasAdjustment::Reduced;
        }

        if biased > self.framing_threshold || emotional > self.emotional_threshold {
            let before = bias.confidence;
            let signal = biased.max(emotional * self.emotional_factor);
            bias.confidence = clamp01((before + signal * self.boost_factor).min(self.max_confidence));
            push_rationale(
                bias,
                format!(
                    "Confidence raised from {before:.2} to {:.2} by biased framing ({biased:.2}) and emotional language ({emotional:.2}).",
                    bias.confidence
                ),
            );
            return VeriBiasAdjustment::Increased;
        }

        VeriBiasAdjustment::Unchanged
    }

    /// Refines `bias` in place, then computes both composite scores from
    /// the refined reading.
    pub fn aggregate(&self, inputs: &VeriScoreInputs, bias: &mut VeriBiasAnalysis) -> VeriScores {
        self.refine_bias(bias, &inputs.framing);
        let manipulation = self.manipulation_score(
            inputs.fallacy_count,
            bias,
            inputs.framing.emotional_language,
            &inputs.topic,
        );
        let quality = self.quality_score(
            inputs.citation_count,
            inputs.word_count,
            inputs.framing.objectivity,
            manipulation,
        );
        VeriScores {
            manipulation,
            quality,
        }
    }
}

fn push_rationale(bias: &mut VeriBiasAnalysis, rationale: String) {
    if bias.explanation.is_empty() {
        bias.explanation = rationale;
    } else {
        bias.explanation = format!("{} {rationale}", bias.explanation.trim_end());
    }
}
