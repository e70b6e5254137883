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

//! # Veri Result Module
//!
//! Data structures produced by one call to
//! [`crate::VeriAnalyzer::analyze_content`].
//!
//! ## Shape Guarantees
//!
//! - Every struct implements `Default`, and every default is a valid, fully
//!   populated value. The composer starts from these defaults and overwrites
//!   what each stage produces, so no field is ever left unset.
//! - Every confidence and score field lies in `[0, 1]`;
//!   `emotionalAppeal` lies in `0..=100`.
//! - Serialization uses camelCase field names and SCREAMING_SNAKE_CASE enum
//!   values; `Option` is never used for output leaves.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Logical fallacy categories recognized by the rule tables and the
/// zero-shot classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VeriFallacyType {
    AdHominem,
    StrawMan,
    AppealToAuthority,
    FalseDichotomy,
    SlipperySlope,
    HastyGeneralization,
    AppealToEmotion,
    Bandwagon,
    RedHerring,
    CircularReasoning,
    TuQuoque,
    FalseCause,
    AppealToIgnorance,
    LoadedQuestion,
    NoTrueScotsman,
    AppealToTradition,
    AppealToNature,
    Whataboutism,
}

impl VeriFallacyType {
    pub const ALL: [VeriFallacyType; 18] = [
        VeriFallacyType::AdHominem,
        VeriFallacyType::StrawMan,
        VeriFallacyType::AppealToAuthority,
        VeriFallacyType::FalseDichotomy,
        VeriFallacyType::SlipperySlope,
        VeriFallacyType::HastyGeneralization,
        VeriFallacyType::AppealToEmotion,
        VeriFallacyType::Bandwagon,
        VeriFallacyType::RedHerring,
        VeriFallacyType::CircularReasoning,
        VeriFallacyType::TuQuoque,
        VeriFallacyType::FalseCause,
        VeriFallacyType::AppealToIgnorance,
        VeriFallacyType::LoadedQuestion,
        VeriFallacyType::NoTrueScotsman,
        VeriFallacyType::AppealToTradition,
        VeriFallacyType::AppealToNature,
        VeriFallacyType::Whataboutism,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VeriFallacyType::AdHominem => "AD_HOMINEM",
            VeriFallacyType::StrawMan => "STRAW_MAN",
            VeriFallacyType::AppealToAuthority => "APPEAL_TO_AUTHORITY",
            VeriFallacyType::FalseDichotomy => "FALSE_DICHOTOMY",
            VeriFallacyType::SlipperySlope => "SLIPPERY_SLOPE",
            VeriFallacyType::HastyGeneralization => "HASTY_GENERALIZATION",
            VeriFallacyType::AppealToEmotion => "APPEAL_TO_EMOTION",
            VeriFallacyType::Bandwagon => "BANDWAGON",
            VeriFallacyType::RedHerring => "RED_HERRING",
            VeriFallacyType::CircularReasoning => "CIRCULAR_REASONING",
            VeriFallacyType::TuQuoque => "TU_QUOQUE",
            VeriFallacyType::FalseCause => "FALSE_CAUSE",
            VeriFallacyType::AppealToIgnorance => "APPEAL_TO_IGNORANCE",
            VeriFallacyType::LoadedQuestion => "LOADED_QUESTION",
            VeriFallacyType::NoTrueScotsman => "NO_TRUE_SCOTSMAN",
            VeriFallacyType::AppealToTradition => "APPEAL_TO_TRADITION",
            VeriFallacyType::AppealToNature => "APPEAL_TO_NATURE",
            VeriFallacyType::Whataboutism => "WHATABOUTISM",
        }
    }

    /// Static explanation attached to every detection of this category.
    pub fn explanation(&self) -> &'static str {
        match self {
            VeriFallacyType::AdHominem => "Attacks the person making the argument instead of the argument itself.",
            VeriFallacyType::StrawMan => "Misrepresents an opposing position to make it easier to attack.",
            VeriFallacyType::AppealToAuthority => "Treats a claim as true because an unnamed or irrelevant authority endorses it.",
            VeriFallacyType::FalseDichotomy => "Presents two options as the only possibilities when more exist.",
            VeriFallacyType::SlipperySlope => "Claims one step will inevitably trigger a chain of extreme consequences.",
            VeriFallacyType::HastyGeneralization => "Draws a sweeping conclusion from too little evidence.",
            VeriFallacyType::AppealToEmotion => "Uses emotional manipulation in place of evidence.",
            VeriFallacyType::Bandwagon => "Argues a claim is true because many people believe it.",
            VeriFallacyType::RedHerring => "Introduces an irrelevant topic to divert attention from the issue.",
            VeriFallacyType::CircularReasoning => "Uses the conclusion as a premise of the argument.",
            VeriFallacyType::TuQuoque => "Deflects criticism by accusing the critic of the same behavior.",
            VeriFallacyType::FalseCause => "Assumes that correlation or sequence implies causation.",
            VeriFallacyType::AppealToIgnorance => "Claims something is true because it has not been proven false.",
            VeriFallacyType::LoadedQuestion => "Asks a question that presupposes an unproven claim.",
            VeriFallacyType::NoTrueScotsman => "Redefines a group to dismiss counterexamples.",
            VeriFallacyType::AppealToTradition => "Argues something is right because it has always been done that way.",
            VeriFallacyType::AppealToNature => "Argues something is good because it is natural, or bad because it is not.",
            VeriFallacyType::Whataboutism => "Answers criticism by pointing at someone else's wrongdoing.",
        }
    }

    /// Candidate label used for zero-shot classification.
    pub fn label(&self) -> &'static str {
        match self {
            VeriFallacyType::AdHominem => "ad hominem attack",
            VeriFallacyType::StrawMan => "straw man argument",
            VeriFallacyType::AppealToAuthority => "appeal to authority",
            VeriFallacyType::FalseDichotomy => "false dichotomy",
            VeriFallacyType::SlipperySlope => "slippery slope",
            VeriFallacyType::HastyGeneralization => "hasty generalization",
            VeriFallacyType::AppealToEmotion => "appeal to emotion",
            VeriFallacyType::Bandwagon => "bandwagon appeal",
            VeriFallacyType::RedHerring => "red herring",
            VeriFallacyType::CircularReasoning => "circular reasoning",
            VeriFallacyType::TuQuoque => "tu quoque",
            VeriFallacyType::FalseCause => "false cause",
            VeriFallacyType::AppealToIgnorance => "appeal to ignorance",
            VeriFallacyType::LoadedQuestion => "loaded question",
            VeriFallacyType::NoTrueScotsman => "no true scotsman",
            VeriFallacyType::AppealToTradition => "appeal to tradition",
            VeriFallacyType::AppealToNature => "appeal to nature",
            VeriFallacyType::Whataboutism => "whataboutism",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let needle = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.label() == needle)
    }
}

impl fmt::Display for VeriFallacyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VeriDetectionSource {
    #[default]
    Rule,
    Model,
}

/// Byte range into the normalized plain text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VeriSpan {
    pub start: usize,
    pub end: usize,
}

impl VeriSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriFallacy {
    #[serde(rename = "type")]
    pub fallacy_type: VeriFallacyType,
    pub confidence: f64,
    pub explanation: String,
    pub excerpt: String,
    pub span: VeriSpan,
    pub source: VeriDetectionSource,
}

/// Nine-point political lean scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VeriBiasType {
    LeftExtreme,
    LeftStrong,
    LeftModerate,
    LeftSlight,
    #[default]
    Center,
    RightSlight,
    RightModerate,
    RightStrong,
    RightExtreme,
}

impl VeriBiasType {
    /// Signed position on the scale: -4 (LEFT_EXTREME) .. 4 (RIGHT_EXTREME).
    pub fn ordinal(&self) -> i8 {
        match self {
            VeriBiasType::LeftExtreme => -4,
            VeriBiasType::LeftStrong => -3,
            VeriBiasType::LeftModerate => -2,
            VeriBiasType::LeftSlight => -1,
            VeriBiasType::Center => 0,
            VeriBiasType::RightSlight => 1,
            VeriBiasType::RightModerate => 2,
            VeriBiasType::RightStrong => 3,
            VeriBiasType::RightExtreme => 4,
        }
    }

    pub fn from_ordinal(ordinal: i8) -> Self {
        match ordinal.clamp(-4, 4) {
            -4 => VeriBiasType::LeftExtreme,
            -3 => VeriBiasType::LeftStrong,
            -2 => VeriBiasType::LeftModerate,
            -1 => VeriBiasType::LeftSlight,
            1 => VeriBiasType::RightSlight,
            2 => VeriBiasType::RightModerate,
            3 => VeriBiasType::RightStrong,
            4 => VeriBiasType::RightExtreme,
            _ => VeriBiasType::Center,
        }
    }

    pub fn is_center(&self) -> bool {
        *self == VeriBiasType::Center
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VeriBiasType::LeftExtreme => "LEFT_EXTREME",
            VeriBiasType::LeftStrong => "LEFT_STRONG",
            VeriBiasType::LeftModerate => "LEFT_MODERATE",
            VeriBiasType::LeftSlight => "LEFT_SLIGHT",
            VeriBiasType::Center => "CENTER",
            VeriBiasType::RightSlight => "RIGHT_SLIGHT",
            VeriBiasType::RightModerate => "RIGHT_MODERATE",
            VeriBiasType::RightStrong => "RIGHT_STRONG",
            VeriBiasType::RightExtreme => "RIGHT_EXTREME",
        }
    }
}

impl fmt::Display for VeriBiasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Share of the text leaning left, centre and right. Sums to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VeriBiasScores {
    pub left: f64,
    pub center: f64,
    pub right: f64,
}

impl Default for VeriBiasScores {
    fn default() -> Self {
        Self {
            left: 0.0,
            center: 1.0,
            right: 0.0,
        }
    }
}

impl VeriBiasScores {
    /// `right - left`; its sign matches the direction of the bias ordinal.
    pub fn signed(&self) -> f64 {
        self.right - self.left
    }

    /// Same total lean mass split evenly, used when a reading is reclassified
    /// as CENTER.
    pub fn centered(&self) -> Self {
        let side = (self.left + self.right) / 2.0;
        Self {
            left: side,
            center: (1.0 - 2.0 * side).max(0.0),
            right: side,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriBiasAnalysis {
    #[serde(rename = "type")]
    pub bias_type: VeriBiasType,
    pub confidence: f64,
    pub explanation: String,
    pub left_indicators: Vec<String>,
    pub right_indicators: Vec<String>,
    pub scores: VeriBiasScores,
}

impl Default for VeriBiasAnalysis {
    fn default() -> Self {
        Self {
            bias_type: VeriBiasType::Center,
            confidence: 0.0,
            explanation: "Bias analysis unavailable.".to_string(),
            left_indicators: Vec::new(),
            right_indicators: Vec::new(),
            scores: VeriBiasScores::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VeriSentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// Where an inference-backed value came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VeriInferenceSource {
    Remote,
    Cache,
    #[default]
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriSentiment {
    pub label: VeriSentimentLabel,
    pub score: f64,
    /// Signed polarity in `[-1, 1]`; positive is favourable.
    pub polarity: f64,
}

impl Default for VeriSentiment {
    fn default() -> Self {
        Self {
            label: VeriSentimentLabel::Neutral,
            score: 0.5,
            polarity: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VeriEmotionType {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    #[default]
    Neutral,
}

impl VeriEmotionType {
    pub const ALL: [VeriEmotionType; 7] = [
        VeriEmotionType::Joy,
        VeriEmotionType::Sadness,
        VeriEmotionType::Anger,
        VeriEmotionType::Fear,
        VeriEmotionType::Surprise,
        VeriEmotionType::Disgust,
        VeriEmotionType::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VeriEmotionType::Joy => "joy",
            VeriEmotionType::Sadness => "sadness",
            VeriEmotionType::Anger => "anger",
            VeriEmotionType::Fear => "fear",
            VeriEmotionType::Surprise => "surprise",
            VeriEmotionType::Disgust => "disgust",
            VeriEmotionType::Neutral => "neutral",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VeriEmotionType::Joy => "Joy",
            VeriEmotionType::Sadness => "Sadness",
            VeriEmotionType::Anger => "Anger",
            VeriEmotionType::Fear => "Fear",
            VeriEmotionType::Surprise => "Surprise",
            VeriEmotionType::Disgust => "Disgust",
            VeriEmotionType::Neutral => "Neutral",
        }
    }

    /// Maps model labels (including common aliases) to an emotion.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "joy" | "happiness" | "happy" | "love" | "optimism" => Some(VeriEmotionType::Joy),
            "sadness" | "sad" | "grief" => Some(VeriEmotionType::Sadness),
            "anger" | "angry" | "annoyance" => Some(VeriEmotionType::Anger),
            "fear" | "nervousness" | "anxiety" => Some(VeriEmotionType::Fear),
            "surprise" => Some(VeriEmotionType::Surprise),
            "disgust" => Some(VeriEmotionType::Disgust),
            "neutral" | "others" => Some(VeriEmotionType::Neutral),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriEmotionScore {
    #[serde(rename = "type")]
    pub emotion_type: VeriEmotionType,
    pub score: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriEmotionAnalysisResult {
    pub emotions: Vec<VeriEmotionScore>,
    pub dominant_emotion: VeriEmotionType,
    /// 0..=100, the share of non-neutral emotion.
    pub emotional_appeal: u8,
}

impl Default for VeriEmotionAnalysisResult {
    fn default() -> Self {
        Self {
            emotions: vec![VeriEmotionScore {
                emotion_type: VeriEmotionType::Neutral,
                score: 1.0,
                label: VeriEmotionType::Neutral.display_name().to_string(),
            }],
            dominant_emotion: VeriEmotionType::Neutral,
            emotional_appeal: 0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriDoomscroll {
    pub is_doomscroll: bool,
    pub score: f64,
    pub topics: Vec<String>,
    pub explanation: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriOutrageBait {
    pub is_outrage_bait: bool,
    pub score: f64,
    pub triggers: Vec<String>,
    pub explanation: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VeriDarkPatternType {
    Urgency,
    ForcedContinuity,
    HiddenCosts,
    Misdirection,
    Confirmshaming,
    DisguisedAds,
    ForcedAccount,
    PrivacyZuckering,
    FriendSpam,
    TrickQuestions,
}

impl VeriDarkPatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VeriDarkPatternType::Urgency => "URGENCY",
            VeriDarkPatternType::ForcedContinuity => "FORCED_CONTINUITY",
            VeriDarkPatternType::HiddenCosts => "HIDDEN_COSTS",
            VeriDarkPatternType::Misdirection => "MISDIRECTION",
            VeriDarkPatternType::Confirmshaming => "CONFIRMSHAMING",
            VeriDarkPatternType::DisguisedAds => "DISGUISED_ADS",
            VeriDarkPatternType::ForcedAccount => "FORCED_ACCOUNT",
            VeriDarkPatternType::PrivacyZuckering => "PRIVACY_ZUCKERING",
            VeriDarkPatternType::FriendSpam => "FRIEND_SPAM",
            VeriDarkPatternType::TrickQuestions => "TRICK_QUESTIONS",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriDarkPattern {
    #[serde(rename = "type")]
    pub pattern_type: VeriDarkPatternType,
    pub description: String,
    pub confidence: f64,
    pub evidence: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriTactic {
    pub name: String,
    pub description: String,
    pub confidence: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VeriRecommendedAction {
    #[default]
    ReadNormally,
    ReadCritically,
    TakeBreak,
    Avoid,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriManipulationAnalysis {
    pub doomscroll: VeriDoomscroll,
    pub outrage_bait: VeriOutrageBait,
    pub dark_patterns: Vec<VeriDarkPattern>,
    pub tactics: Vec<VeriTactic>,
    pub recommended_action: VeriRecommendedAction,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VeriStageStatus {
    Complete,
    Error,
    #[default]
    Incomplete,
}

/// Per-dimension completion markers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriLoadingState {
    pub fallacies: VeriStageStatus,
    pub bias: VeriStageStatus,
    pub sentiment: VeriStageStatus,
    pub emotion: VeriStageStatus,
    pub manipulation: VeriStageStatus,
    pub dark_patterns: VeriStageStatus,
    pub entities: VeriStageStatus,
    pub topic: VeriStageStatus,
    pub summary: VeriStageStatus,
    pub scores: VeriStageStatus,
}

impl VeriLoadingState {
    pub fn all(status: VeriStageStatus) -> Self {
        Self {
            fallacies: status,
            bias: status,
            sentiment: status,
            emotion: status,
            manipulation: status,
            dark_patterns: status,
            entities: status,
            topic: status,
            summary: status,
            scores: status,
        }
    }

    pub fn entries(&self) -> [(&'static str, VeriStageStatus); 10] {
        [
            ("fallacies", self.fallacies),
            ("bias", self.bias),
            ("sentiment", self.sentiment),
            ("emotion", self.emotion),
            ("manipulation", self.manipulation),
            ("darkPatterns", self.dark_patterns),
            ("entities", self.entities),
            ("topic", self.topic),
            ("summary", self.summary),
            ("scores", self.scores),
        ]
    }

    pub fn has_errors(&self) -> bool {
        self.entries()
            .iter()
            .any(|(_, status)| *status == VeriStageStatus::Error)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriEntity {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub score: f64,
    pub start: usize,
    pub end: usize,
}

/// Mentions of one surface form, merged case-insensitively.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriEntityGroup {
    pub entity: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriFramingScores {
    pub objectivity: f64,
    pub biased_framing: f64,
    pub emotional_language: f64,
}

impl Default for VeriFramingScores {
    fn default() -> Self {
        let third = 1.0 / 3.0;
        Self {
            objectivity: third,
            biased_framing: third,
            emotional_language: third,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriSourceMap {
    pub sentiment: VeriInferenceSource,
    pub emotion: VeriInferenceSource,
    pub framing: VeriInferenceSource,
    pub topic: VeriInferenceSource,
    pub entities: VeriInferenceSource,
    pub summary: VeriInferenceSource,
    pub fallacies: VeriInferenceSource,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriAnalysisMetadata {
    pub word_count: usize,
    pub char_count: usize,
    pub sentence_count: usize,
    pub reading_time_minutes: f64,
    pub citation_count: usize,
    pub is_html: bool,
    pub limited_analysis: bool,
    pub chunk_count: usize,
    pub topic: String,
    pub topic_confidence: f64,
    pub entities: Vec<VeriEntity>,
    pub grouped_entities: std::collections::BTreeMap<String, Vec<VeriEntityGroup>>,
    pub summary: String,
    pub framing: VeriFramingScores,
    pub sources: VeriSourceMap,
    pub warnings: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

pub const UNKNOWN_TOPIC: &str = "Unknown";

impl Default for VeriAnalysisMetadata {
    fn default() -> Self {
        Self {
            word_count: 0,
            char_count: 0,
            sentence_count: 0,
            reading_time_minutes: 0.0,
            citation_count: 0,
            is_html: false,
            limited_analysis: true,
            chunk_count: 0,
            topic: UNKNOWN_TOPIC.to_string(),
            topic_confidence: 0.0,
            entities: Vec::new(),
            grouped_entities: Default::default(),
            summary: String::new(),
            framing: VeriFramingScores::default(),
            sources: VeriSourceMap::default(),
            warnings: Vec::new(),
            analyzed_at: Utc::now(),
            processing_time_ms: 0,
        }
    }
}

/// Complete output of one analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeriContentAnalysisResult {
    pub logical_fallacies: Vec<VeriFallacy>,
    pub bias_analysis: VeriBiasAnalysis,
    pub metadata: VeriAnalysisMetadata,
    pub manipulation_score: f64,
    pub quality_score: f64,
    pub emotion_analysis: VeriEmotionAnalysisResult,
    pub sentiment: VeriSentiment,
    pub manipulation_analysis: VeriManipulationAnalysis,
    pub loading_state: VeriLoadingState,
}

impl Default for VeriContentAnalysisResult {
    fn default() -> Self {
        Self {
            logical_fallacies: Vec::new(),
            bias_analysis: VeriBiasAnalysis::default(),
            metadata: VeriAnalysisMetadata::default(),
            manipulation_score: 0.0,
            quality_score: 0.0,
            emotion_analysis: VeriEmotionAnalysisResult::default(),
            sentiment: VeriSentiment::default(),
            manipulation_analysis: VeriManipulationAnalysis::default(),
            loading_state: VeriLoadingState::default(),
        }
    }
}

impl VeriContentAnalysisResult {
    /// All-defaults result with every dimension marked `error`.
    pub fn failed(reason: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.loading_state = VeriLoadingState::all(VeriStageStatus::Error);
        result.metadata.warnings.push(reason.into());
        result
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
