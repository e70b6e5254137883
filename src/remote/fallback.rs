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

//! Deterministic local stand-ins for the remote tasks. None of these can fail
//! once constructed, and the same input always gives the same answer.

use crate::detectors::lexicon::{EMOTION_TERMS, NEGATIVE_WORDS, POSITIVE_WORDS};
use crate::detectors::VeriTermMatcher;
use crate::errors::Result;
use crate::normalize::sentence_spans;
use crate::remote::VeriLabelScore;
use crate::result::{
    VeriEmotionAnalysisResult, VeriEmotionScore, VeriEmotionType, VeriSentiment, VeriSentimentLabel,
};

/// Builds an emotion result from per-emotion scores. Missing emotions score 0.
pub fn emotion_result(scores: &[(VeriEmotionType, f64)]) -> VeriEmotionAnalysisResult {
    let mut emotions: Vec<VeriEmotionScore> = VeriEmotionType::ALL
        .iter()
        .map(|kind| {
            let score = scores
                .iter()
                .filter(|(k, _)| k == kind)
                .map(|(_, s)| *s)
                .fold(0.0_f64, f64::max)
                .clamp(0.0, 1.0);
            VeriEmotionScore {
                emotion_type: *kind,
                score,
                label: kind.display_name().to_string(),
            }
        })
        .collect();
    if emotions.iter().all(|e| e.score == 0.0) {
        return VeriEmotionAnalysisResult::default();
    }
    // stable: ties keep ALL order
    emotions.sort_by(|a, b| b.score.total_cmp(&a.score));

    let neutral = emotions
        .iter()
        .find(|e| e.emotion_type == VeriEmotionType::Neutral)
        .map(|e| e.score)
        .unwrap_or(0.0);
    VeriEmotionAnalysisResult {
        dominant_emotion: emotions[0].emotion_type,
        emotional_appeal: ((1.0 - neutral) * 100.0).round().clamp(0.0, 100.0) as u8,
        emotions,
    }
}

#[derive(Debug, Clone)]
pub struct VeriLocalFallback {
    positive: VeriTermMatcher,
    negative: VeriTermMatcher,
    emotions: Vec<(VeriEmotionType, VeriTermMatcher)>,
}

impl VeriLocalFallback {
    pub fn new() -> Result<Self> {
        let emotions = EMOTION_TERMS
            .iter()
            .map(|(kind, terms)| Ok((*kind, VeriTermMatcher::new("fallback.emotion", *terms)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            positive: VeriTermMatcher::new("fallback.sentiment", POSITIVE_WORDS)?,
            negative: VeriTermMatcher::new("fallback.sentiment", NEGATIVE_WORDS)?,
            emotions,
        })
    }

    /// Keyword sentiment: the side with more hits wins, scaled by the margin.
    pub fn sentiment(&self, text: &str) -> VeriSentiment {
        let p = self.positive.count(text) as f64;
        let n = self.negative.count(text) as f64;
        if p == n {
            return VeriSentiment::default();
        }
        let margin = (p - n).abs() / (p + n);
        VeriSentiment {
            label: if p > n {
                VeriSentimentLabel::Positive
            } else {
                VeriSentimentLabel::Negative
            },
            score: 0.5 + 0.5 * margin,
            polarity: (p - n) / (p + n),
        }
    }

    /// Keyword emotion distribution; every hit shares mass with neutral.
    pub fn emotion(&self, text: &str) -> VeriEmotionAnalysisResult {
        let counts: Vec<(VeriEmotionType, usize)> = self
            .emotions
            .iter()
            .map(|(kind, matcher)| (*kind, matcher.count(text)))
            .collect();
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        if total == 0 {
            return VeriEmotionAnalysisResult::default();
        }
        let denom = (total + 1) as f64;
        let mut scores: Vec<(VeriEmotionType, f64)> = counts
            .into_iter()
            .map(|(kind, count)| (kind, count as f64 / denom))
            .collect();
        scores.push((VeriEmotionType::Neutral, 1.0 / denom));
        emotion_result(&scores)
    }

    /// Uniform distribution over the candidate labels.
    pub fn zero_shot(&self, labels: &[String]) -> Vec<VeriLabelScore> {
        if labels.is_empty() {
            return Vec::new();
        }
        let share = 1.0 / labels.len() as f64;
        labels
            .iter()
            .map(|label| VeriLabelScore::new(label.clone(), share))
            .collect()
    }

    /// Leading sentences up to `max_words` words.
    pub fn summary(&self, text: &str, max_words: usize) -> String {
        let mut picked: Vec<&str> = Vec::new();
        let mut words = 0;
        for (start, end) in sentence_spans(text) {
            let sentence = &text[start..end];
            let count = sentence.split_whitespace().count();
            if words + count > max_words {
                if picked.is_empty() {
                    return sentence
                        .split_whitespace()
                        .take(max_words)
                        .collect::<Vec<_>>()
                        .join(" ");
                }
                break;
            }
            words += count;
            picked.push(sentence);
        }
        picked.join(" ")
    }
}
