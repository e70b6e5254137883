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
use crate::normalize::VeriDocument;

pub const ATTRIBUTION_PATTERNS: &[&str] = &[
    r"\baccording to\b",
    r"\b(?:said|says|told|stated|reported|wrote|announced|confirmed)\b",
    r"\b(?:a|the) (?:study|report|survey|analysis) (?:by|from|published)\b",
    r"\bcited by\b",
];
pub const REFERENCE_PATTERN: &str = r"\[\d{1,3}\]";
pub const URL_PATTERN: &str = r#"\bhttps?://[^\s<>"')\]]+"#;
pub const LINK_PATTERN: &str = r#"<a\s[^>]*\bhref\s*=\s*["']?[^"'\s>]+"#;

/// Counts attribution phrases, bracketed references, bare URLs and, for
/// HTML input, anchor links.
#[derive(Debug, Clone)]
pub struct VeriCitationDetector {
    attribution: Vec<Regex>,
    reference: Regex,
    url: Regex,
    link: Regex,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("(?i){pattern}"))
        .map_err(|e| VeriError::pattern("detect.citations", e.to_string()))
}

impl VeriCitationDetector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            attribution: ATTRIBUTION_PATTERNS
                .iter()
                .map(|p| compile(p))
                .collect::<Result<Vec<_>>>()?,
            reference: compile(REFERENCE_PATTERN)?,
            url: compile(URL_PATTERN)?,
            link: compile(LINK_PATTERN)?,
        })
    }

    pub fn count(&self, text: &str, html: Option<&str>) -> usize {
        let attributions: usize = self
            .attribution
            .iter()
            .map(|re| re.find_iter(text).count())
            .sum();
        let references = self.reference.find_iter(text).count();
        let urls = self.url.find_iter(text).count();
        let links = html.map(|h| self.link.find_iter(h).count()).unwrap_or(0);
        attributions + references + urls + links
    }
}

impl VeriDetector for VeriCitationDetector {
    type Output = usize;

    fn name(&self) -> &'static str {
        "detect.citations"
    }

    fn detect(&self, document: &VeriDocument) -> Result<usize> {
        Ok(self.count(&document.text, document.html()))
    }
}
