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

use regex::Regex;

use crate::detector::VeriDetector;
use crate::errors::{Result, VeriError};
use crate::normalize::{sentence_spans, VeriDocument};
use crate::result::{VeriDetectionSource, VeriFallacy, VeriFallacyType, VeriSpan};

/// Confidence for matches longer than [`LONG_MATCH_CHARS`].
pub const LONG_MATCH_CONFIDENCE: f64 = 0.8;
pub const SHORT_MATCH_CONFIDENCE: f64 = 0.65;
pub const LONG_MATCH_CHARS: usize = 10;

const MAX_EXCERPT_CHARS: usize = 200;

/// Ordered pattern list per fallacy category. Patterns are compiled
/// case-insensitively.
pub const FALLACY_PATTERNS: &[(VeriFallacyType, &[&str])] = &[
    (
        VeriFallacyType::AdHominem,
        &[
            r"\b(?:idiot|moron|fool|clown|liar|crook|loser)s?\b.{0,40}\b(?:says?|claims?|argues?|thinks?|wants?)\b",
            r"\b(?:who|why) (?:would|should|could) (?:anyone|you) (?:trust|listen to|believe)\b",
            r"\b(?:typical|of course,?) (?:liberal|conservative|leftist|right-winger|politician)s?\b",
            r"\b(?:can't|cannot) be trusted because (?:he|she|they) (?:is|are|was|were)\b",
        ],
    ),
    (
        VeriFallacyType::StrawMan,
        &[
            r"\b(?:so|basically) (?:you're|you are|they're|they are|he's|she's) saying\b",
            r"\b(?:they|opponents|critics|democrats|republicans) (?:want|wants) to (?:destroy|abolish|ban|eliminate|take away)\b",
            r"\bwhat (?:they|he|she) really (?:mean|means|want|wants) is\b",
        ],
    ),
    (
        VeriFallacyType::AppealToAuthority,
        &[
            r"\bexperts? (?:say|says|agree|agrees|claim|claims|believe|believes|insist|insists)\b",
            r"\bscientists? (?:say|says|agree|agrees|have proven|proved)\b",
            r"\bscience (?:says|tells us|has proven|proves|is settled)\b",
            r"\b(?:doctors|authorities|officials) (?:say|agree|recommend)\b",
            r"\baccording to (?:experts|top experts|leading experts|many experts)\b",
        ],
    ),
    (
        VeriFallacyType::FalseDichotomy,
        &[
            r"\beither (?:you|we|they)\b.{0,60}\bor\b",
            r"\b(?:you're|you are) (?:either )?with us or (?:you're |you are )?against us\b",
            r"\b(?:only|just) two (?:options|choices|ways)\b",
            r"\bthere is no (?:other|middle) (?:option|choice|ground|way)\b",
        ],
    ),
    (
        VeriFallacyType::SlipperySlope,
        &[
            r"\bif we (?:allow|let|accept|permit)\b.{0,80}\b(?:next|then|soon|eventually)\b",
            r"\b(?:will|would) (?:inevitably|eventually|ultimately) lead to\b",
            r"\bslippery slope\b",
            r"\bbefore (?:you|we) know it\b",
        ],
    ),
    (
        VeriFallacyType::HastyGeneralization,
        &[
            r"\b(?:all|every|no) (?:\w+ )?(?:people|politicians|immigrants|liberals|conservatives|democrats|republicans|journalists) (?:are|is|will|do)\b",
            r"\bthey (?:always|never)\b",
            r"\bone (?:example|case|study) (?:proves|shows) (?:that )?(?:all|every)\b",
        ],
    ),
    (
        VeriFallacyType::AppealToEmotion,
        &[
            r"\bthink (?:of|about) the children\b",
            r"\b(?:imagine|picture) (?:how|the) (?:horror|pain|fear|suffering)\b",
            r"\bhow (?:would|will) you feel (?:if|when)\b",
            r"\b(?:heartbreaking|terrifying|horrifying) (?:truth|reality)\b",
            r"\bif you (?:care|cared) about\b",
        ],
    ),
    (
        VeriFallacyType::Bandwagon,
        &[
            r"\beveryone (?:knows|agrees|is|believes)\b",
            r"\b(?:millions|most people|the majority) (?:of \w+ )?(?:agree|believe|know|support)\b",
            r"\bdon't be left behind\b",
            r"\bnobody (?:believes|thinks|wants)\b",
        ],
    ),
    (
        VeriFallacyType::RedHerring,
        &[
            r"\bthe real (?:issue|question|problem|story) (?:is|here)\b",
            r"\blet's not forget\b",
            r"\binstead of (?:talking|worrying) about\b",
        ],
    ),
    (
        VeriFallacyType::CircularReasoning,
        &[
            r"\b(?:is|are) (?:true|right|correct) because (?:it|they) (?:is|are) (?:true|right|correct)\b",
            r"\bbecause (?:it|the \w+) says so\b",
            r"\bby definition\b",
        ],
    ),
    (
        VeriFallacyType::TuQuoque,
        &[
            r"\b(?:you|they|he|she) (?:did|do|does) (?:it|the same thing) too\b",
            r"\blook who's talking\b",
            r"\bwho are (?:you|they) to (?:judge|criticize|talk)\b",
        ],
    ),
    (
        VeriFallacyType::FalseCause,
        &[
            r"\b(?:ever )?since\b.{0,60}\b(?:has|have) (?:risen|increased|fallen|dropped|skyrocketed|plummeted)\b",
            r"\b(?:right|shortly|just) after\b.{0,60}\b(?:so|therefore|which proves)\b",
            r"\b(?:no|not a) coincidence\b",
        ],
    ),
    (
        VeriFallacyType::AppealToIgnorance,
        &[
            r"\b(?:no one|nobody) (?:has|can|could) (?:prove|proven|disprove|disproven)\b",
            r"\b(?:there is|there's) no (?:proof|evidence) (?:that )?(?:it|this|they) (?:isn't|is not|doesn't|does not|aren't|are not|didn't|did not)\b",
            r"\bhasn't been (?:proven|disproven) (?:false|wrong|otherwise)\b",
        ],
    ),
    (
        VeriFallacyType::LoadedQuestion,
        &[
            r"\b(?:why|when) (?:did|does|do|is|are) (?:\w+ ){0,3}(?:still|continue to|keep) \w+",
            r"\bhave you stopped\b",
            r"\bwhy (?:do|does) \w+ (?:hate|despise|ignore)\b",
        ],
    ),
    (
        VeriFallacyType::NoTrueScotsman,
        &[
            r"\bno (?:true|real) (?:\w+ ){0,2}(?:would|could|does|ever)\b",
            r"\b(?:real|true) (?:americans|patriots|christians|conservatives|progressives|scientists|fans) (?:don't|do not|would never|never)\b",
        ],
    ),
    (
        VeriFallacyType::AppealToTradition,
        &[
            r"\b(?:it's|it has|we've) always been (?:done )?(?:this|that) way\b",
            r"\b(?:for|since) (?:centuries|generations|time immemorial)\b.{0,40}\b(?:so|therefore|must|should)\b",
            r"\btime-honou?red tradition\b",
            r"\bthe way (?:it's|it has|things have) always been\b",
        ],
    ),
    (
        VeriFallacyType::AppealToNature,
        &[
            r"\b(?:it's|it is) (?:natural|unnatural)\b",
            r"\b(?:all-natural|100% natural|natural remedy|chemical-free)\b",
            r"\bgoes against nature\b",
            r"\bnature intended\b",
        ],
    ),
    (
        VeriFallacyType::Whataboutism,
        &[
            r"\bwhat about\b.{0,60}\?",
            r"\bbut (?:what about|how about)\b",
            r"\b(?:they|the other side|democrats|republicans) (?:did|do|does) (?:worse|the same)\b",
        ],
    ),
];

#[derive(Debug, Clone)]
pub struct VeriFallacyDetector {
    rules: Vec<(VeriFallacyType, Vec<Regex>)>,
}

impl VeriFallacyDetector {
    /// Detector over [`FALLACY_PATTERNS`].
    pub fn new() -> Result<Self> {
        Self::from_table(
            FALLACY_PATTERNS
                .iter()
                .map(|(kind, patterns)| (*kind, patterns.iter().map(|p| p.to_string()).collect())),
        )
    }

    /// Detector over a caller-supplied table; patterns gain `(?i)`.
    pub fn from_table<I>(table: I) -> Result<Self>
    where
        I: IntoIterator<Item = (VeriFallacyType, Vec<String>)>,
    {
        let mut rules = Vec::new();
        for (kind, patterns) in table {
            let compiled = patterns
                .iter()
                .map(|p| {
                    Regex::new(&format!("(?i){p}")).map_err(|e| {
                        VeriError::pattern(
                            "detect.fallacy",
                            format!("{} pattern '{p}': {e}", kind.as_str()),
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rules.push((kind, compiled));
        }
        Ok(Self { rules })
    }

    pub fn categories(&self) -> Vec<VeriFallacyType> {
        self.rules.iter().map(|(kind, _)| *kind).collect()
    }

    /// Runs every pattern against every sentence of `text`.
    pub fn scan(&self, text: &str) -> Vec<VeriFallacy> {
        let mut found = Vec::new();
        for (s_start, s_end) in sentence_spans(text) {
            let sentence = &text[s_start..s_end];
            for (kind, patterns) in &self.rules {
                for pattern in patterns {
                    let Some(m) = pattern.find(sentence) else {
                        continue;
                    };
                    let confidence = if m.as_str().chars().count() > LONG_MATCH_CHARS {
                        LONG_MATCH_CONFIDENCE
                    } else {
                        SHORT_MATCH_CONFIDENCE
                    };
                    found.push(VeriFallacy {
                        fallacy_type: *kind,
                        confidence,
                        explanation: kind.explanation().to_string(),
                        excerpt: excerpt(sentence),
                        span: VeriSpan::new(s_start + m.start(), s_start + m.end()),
                        source: VeriDetectionSource::Rule,
                    });
                }
            }
        }
        found
    }
}

fn excerpt(sentence: &str) -> String {
    if sentence.chars().count() <= MAX_EXCERPT_CHARS {
        return sentence.to_string();
    }
    let mut cut: String = sentence.chars().take(MAX_EXCERPT_CHARS).collect();
    cut.push_str("...");
    cut
}

impl VeriDetector for VeriFallacyDetector {
    type Output = Vec<VeriFallacy>;

    fn name(&self) -> &'static str {
        "detect.fallacy"
    }

    fn detect(&self, document: &VeriDocument) -> Result<Vec<VeriFallacy>> {
        Ok(self.scan(&document.text))
    }
}
