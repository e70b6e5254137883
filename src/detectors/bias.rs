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

//! Keyword-based political bias detection.
//!
//! Each side's score is its total number of keyword occurrences. The imbalance
//! `|left - right| / (left + right)` selects one of four bands on the leading
//! side, and the keyword density per 100 characters nudges the confidence.

use crate::detector::VeriDetector;
use crate::detectors::lexicon::{LEFT_TERMS, RIGHT_TERMS};
use crate::detectors::VeriTermMatcher;
use crate::errors::Result;
use crate::normalize::VeriDocument;
use crate::result::{VeriBiasAnalysis, VeriBiasScores, VeriBiasType};

pub const NO_SIGNAL_CONFIDENCE: f64 = 0.5;
pub const BASE_CONFIDENCE_BOOST: f64 = 0.3;
pub const MAX_CONFIDENCE: f64 = 0.95;
pub const SLIGHT_BAND: f64 = 0.25;
pub const MODERATE_BAND: f64 = 0.5;
pub const STRONG_BAND: f64 = 0.75;
/// Keyword hits per 100 characters.
pub const LOW_DENSITY: f64 = 0.2;
pub const HIGH_DENSITY: f64 = 0.5;
pub const LOW_DENSITY_ADJUSTMENT: f64 = -0.2;
pub const HIGH_DENSITY_ADJUSTMENT: f64 = 0.1;

/// Outcome of mapping two keyword counts onto the nine-point scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VeriBiasReading {
    pub bias_type: VeriBiasType,
    pub confidence: f64,
    pub strength: f64,
    pub scores: VeriBiasScores,
}

fn band(strength: f64) -> i8 {
    if strength < SLIGHT_BAND {
        1
    } else if strength < MODERATE_BAND {
        2
    } else if strength < STRONG_BAND {
        3
    } else {
        4
    }
}

/// Density adjustment for `hits` keyword matches over `chars` characters.
pub fn density_adjustment(hits: usize, chars: usize) -> f64 {
    if chars == 0 {
        return LOW_DENSITY_ADJUSTMENT;
    }
    let density = hits as f64 * 100.0 / chars as f64;
    if density < LOW_DENSITY {
        LOW_DENSITY_ADJUSTMENT
    } else if density > HIGH_DENSITY {
        HIGH_DENSITY_ADJUSTMENT
    } else {
        0.0
    }
}

/// Maps left/right keyword counts over a text of `chars` characters.
pub fn classify_counts(left: usize, right: usize, chars: usize) -> VeriBiasReading {
    let total = left + right;
    if total == 0 {
        return VeriBiasReading {
            bias_type: VeriBiasType::Center,
            confidence: NO_SIGNAL_CONFIDENCE,
            strength: 0.0,
            scores: VeriBiasScores::default(),
        };
    }

    let total_f = total as f64;
    let strength = (left as f64 - right as f64).abs() / total_f;
    let scores = VeriBiasScores {
        left: left as f64 / total_f * strength,
        center: 1.0 - strength,
        right: right as f64 / total_f * strength,
    };
    let bias_type = if left == right {
        VeriBiasType::Center
    } else if right > left {
        VeriBiasType::from_ordinal(band(strength))
    } else {
        VeriBiasType::from_ordinal(-band(strength))
    };
    let confidence = (strength + BASE_CONFIDENCE_BOOST + density_adjustment(total, chars))
        .min(MAX_CONFIDENCE)
        .max(0.0);

    VeriBiasReading {
        bias_type,
        confidence,
        strength,
        scores,
    }
}

fn explain(reading: &VeriBiasReading, left: &[String], right: &[String]) -> String {
    if left.is_empty() && right.is_empty() {
        return "No politically charged keywords detected; content appears balanced.".to_string();
    }
    if reading.bias_type.is_center() {
        return format!(
            "Balanced use of left-leaning ({}) and right-leaning ({}) language.",
            left.len(),
            right.len()
        );
    }
    let (side, terms) = if reading.bias_type.ordinal() < 0 {
        ("left", left)
    } else {
        ("right", right)
    };
    let shown: Vec<&str> = terms.iter().take(5).map(String::as_str).collect();
    format!(
        "Leans {side} ({}), based on terms such as: {}.",
        reading.bias_type.as_str(),
        shown.join(", ")
    )
}

#[derive(Debug, Clone)]
pub struct VeriBiasDetector {
    left: VeriTermMatcher,
    right: VeriTermMatcher,
}

impl VeriBiasDetector {
    pub fn new() -> Result<Self> {
        Self::with_terms(LEFT_TERMS, RIGHT_TERMS)
    }

    pub fn with_terms<L, R>(left: &[L], right: &[R]) -> Result<Self>
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        Ok(Self {
            left: VeriTermMatcher::new("detect.bias", left)?,
            right: VeriTermMatcher::new("detect.bias", right)?,
        })
    }

    pub fn analyze(&self, text: &str) -> VeriBiasAnalysis {
        let left_hits = self.left.count(text);
        let right_hits = self.right.count(text);
        let reading = classify_counts(left_hits, right_hits, text.chars().count());
        let left_indicators = self.left.matched_terms(text);
        let right_indicators = self.right.matched_terms(text);
        log::debug!(
            "veri.bias: left={left_hits} right={right_hits} -> {} ({:.2})",
            reading.bias_type,
            reading.confidence
        );
        VeriBiasAnalysis {
            bias_type: reading.bias_type,
            confidence: reading.confidence,
            explanation: explain(&reading, &left_indicators, &right_indicators),
            left_indicators,
            right_indicators,
            scores: reading.scores,
        }
    }
}

impl VeriDetector for VeriBiasDetector {
    type Output = VeriBiasAnalysis;

    fn name(&self) -> &'static str {
        "detect.bias"
    }

    fn detect(&self, document: &VeriDocument) -> Result<VeriBiasAnalysis> {
        Ok(self.analyze(&document.text))
    }
}
