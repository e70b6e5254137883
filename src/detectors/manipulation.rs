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

//! Doomscroll and outrage-bait indicators.

use crate::detector::VeriDetector;
use crate::detectors::lexicon::{DOOMSCROLL_TERMS, OUTRAGE_TERMS};
use crate::detectors::VeriTermMatcher;
use crate::errors::Result;
use crate::normalize::VeriDocument;
use crate::result::{VeriDoomscroll, VeriOutrageBait};

pub const DOOMSCROLL_DIVISOR: f64 = 10.0;
pub const OUTRAGE_DIVISOR: f64 = 8.0;
/// Scores strictly above this set the `is_*` flag.
pub const FLAG_THRESHOLD: f64 = 0.4;
pub const HIGH_BAND: f64 = 0.7;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VeriManipulationSignals {
    pub doomscroll: VeriDoomscroll,
    pub outrage_bait: VeriOutrageBait,
}

/// Distinct matches over a divisor, capped at 1.
pub fn term_score(matched: usize, divisor: f64) -> f64 {
    (matched as f64 / divisor).min(1.0)
}

fn doomscroll_explanation(score: f64) -> &'static str {
    if score > HIGH_BAND {
        "Heavy focus on catastrophic themes likely to fuel anxious, compulsive reading."
    } else if score > FLAG_THRESHOLD {
        "Noticeable emphasis on crisis and disaster framing."
    } else if score > 0.0 {
        "Some negative or alarming themes present."
    } else {
        "No doomscroll indicators detected."
    }
}

fn outrage_explanation(score: f64) -> &'static str {
    if score > HIGH_BAND {
        "Inflammatory language designed to provoke anger-driven engagement."
    } else if score > FLAG_THRESHOLD {
        "Several outrage triggers present."
    } else if score > 0.0 {
        "Mildly provocative language present."
    } else {
        "No outrage-bait indicators detected."
    }
}

#[derive(Debug, Clone)]
pub struct VeriManipulationDetector {
    doomscroll: VeriTermMatcher,
    outrage: VeriTermMatcher,
}

impl VeriManipulationDetector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            doomscroll: VeriTermMatcher::new("detect.manipulation", DOOMSCROLL_TERMS)?,
            outrage: VeriTermMatcher::new("detect.manipulation", OUTRAGE_TERMS)?,
        })
    }

    pub fn doomscroll(&self, text: &str) -> VeriDoomscroll {
        let topics = self.doomscroll.matched_terms(text);
        let score = term_score(topics.len(), DOOMSCROLL_DIVISOR);
        VeriDoomscroll {
            is_doomscroll: score > FLAG_THRESHOLD,
            score,
            explanation: doomscroll_explanation(score).to_string(),
            topics,
        }
    }

    pub fn outrage_bait(&self, text: &str) -> VeriOutrageBait {
        let triggers = self.outrage.matched_terms(text);
        let score = term_score(triggers.len(), OUTRAGE_DIVISOR);
        VeriOutrageBait {
            is_outrage_bait: score > FLAG_THRESHOLD,
            score,
            explanation: outrage_explanation(score).to_string(),
            triggers,
        }
    }
}

impl VeriDetector for VeriManipulationDetector {
    type Output = VeriManipulationSignals;

    fn name(&self) -> &'static str {
        "detect.manipulation"
    }

    fn detect(&self, document: &VeriDocument) -> Result<VeriManipulationSignals> {
        Ok(VeriManipulationSignals {
            doomscroll: self.doomscroll(&document.text),
            outrage_bait: self.outrage_bait(&document.text),
        })
    }
}
