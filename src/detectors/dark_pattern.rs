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

//! Deceptive UI language and markup.
//!
//! Text patterns run over the normalized text. Selector patterns are simplified
//! CSS-like checks expressed as regexes over the raw HTML, so no DOM tree is
//! needed.

use std::collections::BTreeMap;

use regex::Regex;

use crate::detector::VeriDetector;
use crate::errors::{Result, VeriError};
use crate::normalize::VeriDocument;
use crate::result::{VeriDarkPattern, VeriDarkPatternType};

pub const TEXT_MATCH_CONFIDENCE: f64 = 0.7;
pub const SELECTOR_MATCH_CONFIDENCE: f64 = 0.6;

const MAX_EVIDENCE_CHARS: usize = 120;

/// One row of the dark-pattern table.
#[derive(Clone, Copy, Debug)]
pub struct VeriDarkPatternRule {
    pub pattern_type: VeriDarkPatternType,
    pub text_description: &'static str,
    pub text_patterns: &'static [&'static str],
    pub selector_description: &'static str,
    pub selector_patterns: &'static [&'static str],
}

pub const DARK_PATTERN_RULES: &[VeriDarkPatternRule] = &[
    VeriDarkPatternRule {
        pattern_type: VeriDarkPatternType::Urgency,
        text_description: "Creates artificial time pressure",
        text_patterns: &[
            r"\b(?:only|just) \d+ (?:left|remaining)\b",
            r"\b(?:offer|sale|deal) ends (?:soon|today|tonight|in)\b",
            r"\b(?:limited time|act now|hurry|last chance|don't miss out)\b",
            r"\b\d+ (?:people|others) (?:are )?(?:viewing|looking at) this\b",
        ],
        selector_description: "Countdown timer element",
        selector_patterns: &[
            r#"<[^>]+(?:class|id)\s*=\s*["'][^"']*(?:countdown|timer|urgency)[^"']*["']"#,
        ],
    },
    VeriDarkPatternRule {
        pattern_type: VeriDarkPatternType::ForcedContinuity,
        text_description: "Free trial silently converts to a paid plan",
        text_patterns: &[
            r"\bfree trial\b.{0,80}\b(?:automatically|auto-?renew|will be charged|billed)\b",
            r"\b(?:auto-?renews?|automatically renews?)\b",
            r"\bcancel anytime\b.{0,40}\b(?:fee|charge)\b",
        ],
        selector_description: "Pre-checked auto-renew control",
        selector_patterns: &[
            r#"<input[^>]+(?:name|id)\s*=\s*["'][^"']*(?:auto-?renew|subscription)[^"']*["'][^>]*\bchecked\b"#,
        ],
    },
    VeriDarkPatternRule {
        pattern_type: VeriDarkPatternType::HiddenCosts,
        text_description: "Additional fees revealed late",
        text_patterns: &[
            r"\b(?:service|processing|handling|convenience|booking) fees? (?:apply|applies|added|not included)\b",
            r"\b(?:taxes|fees) (?:and (?:taxes|fees) )?(?:calculated|added) at checkout\b",
            r"\bexcludes? (?:taxes|shipping|fees)\b",
        ],
        selector_description: "Fine-print price element",
        selector_patterns: &[
            r#"<[^>]+(?:class|id)\s*=\s*["'][^"']*(?:fine-?print|hidden-fee|small-print)[^"']*["']"#,
        ],
    },
    VeriDarkPatternRule {
        pattern_type: VeriDarkPatternType::Misdirection,
        text_description: "Draws attention away from the relevant choice",
        text_patterns: &[
            r"\b(?:recommended|most popular|best value)\b.{0,40}\b(?:plan|option|choice)\b",
            r"\bskip (?:this|offer)\b",
        ],
        selector_description: "Visually de-emphasized decline option",
        selector_patterns: &[
            r#"<(?:a|button)[^>]+(?:class|id)\s*=\s*["'][^"']*(?:decline|no-thanks|skip)[^"']*["'][^>]*style\s*=\s*["'][^"']*(?:font-size:\s*(?:[0-9]|1[01])px|color:\s*#(?:ccc|ddd|eee))"#,
        ],
    },
    VeriDarkPatternRule {
        pattern_type: VeriDarkPatternType::Confirmshaming,
        text_description: "Shames the user for declining",
        text_patterns: &[
            r"\bno,? thanks?,? i (?:don't|do not|prefer not to|hate|like)\b",
            r"\bi (?:don't|do not) (?:want|like|care about) (?:to )?(?:save|saving|free|deals|being informed)\b",
            r"\bi'd rather (?:pay full price|stay uninformed|miss out)\b",
        ],
        selector_description: "Guilt-laden decline link",
        selector_patterns: &[
            r#"<(?:a|button)[^>]*>\s*no,? thanks?,? i\b"#,
        ],
    },
    VeriDarkPatternRule {
        pattern_type: VeriDarkPatternType::DisguisedAds,
        text_description: "Advertising presented as content",
        text_patterns: &[
            r"\b(?:sponsored content|paid content|promoted stories|partner content)\b",
            r"\b(?:around the web|you may also like|recommended for you)\b",
        ],
        selector_description: "Ad container styled as content",
        selector_patterns: &[
            r#"<[^>]+(?:class|id)\s*=\s*["'][^"']*(?:sponsored|native-ad|promoted|taboola|outbrain)[^"']*["']"#,
        ],
    },
    VeriDarkPatternRule {
        pattern_type: VeriDarkPatternType::ForcedAccount,
        text_description: "Requires an account to continue",
        text_patterns: &[
            r"\b(?:sign up|register|create an account|log in) to (?:continue|read|view|see|access)\b",
            r"\b(?:subscribe|register) to (?:keep|continue) reading\b",
        ],
        selector_description: "Registration wall overlay",
        selector_patterns: &[
            r#"<[^>]+(?:class|id)\s*=\s*["'][^"']*(?:paywall|regwall|signup-wall|login-wall)[^"']*["']"#,
        ],
    },
    VeriDarkPatternRule {
        pattern_type: VeriDarkPatternType::PrivacyZuckering,
        text_description: "Nudges toward sharing more personal data",
        text_patterns: &[
            r"\b(?:share|sell) (?:your )?(?:data|information) with (?:our )?(?:partners|third parties)\b",
            r"\bby continuing,? you (?:agree|consent) to\b",
            r"\b(?:accept all|allow all) cookies\b",
        ],
        selector_description: "Pre-checked data sharing consent",
        selector_patterns: &[
            r#"<input[^>]+(?:name|id)\s*=\s*["'][^"']*(?:consent|share|marketing|newsletter)[^"']*["'][^>]*\bchecked\b"#,
        ],
    },
    VeriDarkPatternRule {
        pattern_type: VeriDarkPatternType::FriendSpam,
        text_description: "Requests contacts to message on the user's behalf",
        text_patterns: &[
            r"\b(?:invite|import) (?:your )?(?:friends|contacts)\b",
            r"\bshare (?:this )?with (?:\d+ )?friends to (?:unlock|get|continue)\b",
        ],
        selector_description: "Contact import widget",
        selector_patterns: &[
            r#"<[^>]+(?:class|id)\s*=\s*["'][^"']*(?:invite-friends|contact-import|share-to-unlock)[^"']*["']"#,
        ],
    },
    VeriDarkPatternRule {
        pattern_type: VeriDarkPatternType::TrickQuestions,
        text_description: "Confusing wording hides the real choice",
        text_patterns: &[
            r"\buncheck (?:this|the) box (?:if you (?:do not|don't)|to not)\b",
            r"\b(?:do not|don't) (?:un)?check (?:this|the) box if you (?:do not|don't)\b",
            r"\bopt out of not\b",
        ],
        selector_description: "Double-negative checkbox label",
        selector_patterns: &[
            r#"<label[^>]*>[^<]*\b(?:do not|don't)\b[^<]*\bnot\b[^<]*</label>"#,
        ],
    },
];

#[derive(Debug, Clone)]
struct CompiledRule {
    pattern_type: VeriDarkPatternType,
    text_description: String,
    text: Vec<Regex>,
    selector_description: String,
    selectors: Vec<Regex>,
}

#[derive(Debug, Clone)]
pub struct VeriDarkPatternDetector {
    rules: Vec<CompiledRule>,
}

fn compile(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(&format!("(?is){p}"))
                .map_err(|e| VeriError::pattern("detect.dark_patterns", format!("'{p}': {e}")))
        })
        .collect()
}

fn evidence(matched: &str) -> String {
    let collapsed = matched.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_EVIDENCE_CHARS {
        collapsed
    } else {
        collapsed.chars().take(MAX_EVIDENCE_CHARS).collect()
    }
}

impl VeriDarkPatternDetector {
    pub fn new() -> Result<Self> {
        Self::from_rules(DARK_PATTERN_RULES)
    }

    pub fn from_rules(rules: &[VeriDarkPatternRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    pattern_type: rule.pattern_type,
                    text_description: rule.text_description.to_string(),
                    text: compile(rule.text_patterns)?,
                    selector_description: rule.selector_description.to_string(),
                    selectors: compile(rule.selector_patterns)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Scans `text` and, when given, the raw `html`.
    pub fn scan(&self, text: &str, html: Option<&str>) -> Vec<VeriDarkPattern> {
        let mut found: BTreeMap<(VeriDarkPatternType, String), VeriDarkPattern> = BTreeMap::new();
        let mut record = |pattern: VeriDarkPattern| {
            let key = (pattern.pattern_type, pattern.description.clone());
            match found.get(&key) {
                Some(existing) if existing.confidence >= pattern.confidence => {}
                _ => {
                    found.insert(key, pattern);
                }
            }
        };

        for rule in &self.rules {
            for re in &rule.text {
                if let Some(m) = re.find(text) {
                    record(VeriDarkPattern {
                        pattern_type: rule.pattern_type,
                        description: rule.text_description.clone(),
                        confidence: TEXT_MATCH_CONFIDENCE,
                        evidence: evidence(m.as_str()),
                    });
                }
            }
            let Some(html) = html else { continue };
            for re in &rule.selectors {
                if let Some(m) = re.find(html) {
                    record(VeriDarkPattern {
                        pattern_type: rule.pattern_type,
                        description: rule.selector_description.clone(),
                        confidence: SELECTOR_MATCH_CONFIDENCE,
                        evidence: evidence(m.as_str()),
                    });
                }
            }
        }

        let mut patterns: Vec<VeriDarkPattern> = found.into_values().collect();
        patterns.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        patterns
    }
}

impl VeriDetector for VeriDarkPatternDetector {
    type Output = Vec<VeriDarkPattern>;

    fn name(&self) -> &'static str {
        "detect.dark_patterns"
    }

    fn detect(&self, document: &VeriDocument) -> Result<Vec<VeriDarkPattern>> {
        Ok(self.scan(&document.text, document.html()))
    }
}
