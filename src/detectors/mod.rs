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

//! # Detectors Module
//!
//! Rule-based analyzers. Each one pairs a data table (patterns or term lists)
//! with a small amount of matching logic, so tables can be tested and
//! swapped independently of the pipeline.
//!
//! ## Detector Categories
//!
//! - **fallacy**: regex tables per logical fallacy, applied per sentence
//! - **bias**: left/right keyword counts mapped onto the nine-point scale
//! - **dark_pattern**: deceptive UI language and markup
//! - **manipulation**: doomscroll and outrage-bait term density
//! - **citation**: attribution phrases, references and links
//! - **lexicon**: the shared term lists

pub mod bias;
pub mod citation;
pub mod dark_pattern;
pub mod fallacy;
pub mod lexicon;
pub mod manipulation;

use std::collections::BTreeSet;

use regex::Regex;

use crate::errors::{Result, VeriError};

pub use bias::VeriBiasDetector;
pub use citation::VeriCitationDetector;
pub use dark_pattern::VeriDarkPatternDetector;
pub use fallacy::VeriFallacyDetector;
pub use manipulation::{VeriManipulationDetector, VeriManipulationSignals};

/// Case-insensitive, word-bounded matcher over a term list.
#[derive(Debug, Clone)]
pub struct VeriTermMatcher {
    terms: Vec<(String, Regex)>,
}

impl VeriTermMatcher {
    pub fn new<I, S>(detector: &str, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|term| {
                let term = term.as_ref().trim().to_lowercase();
                let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&term)))
                    .map_err(|e| VeriError::pattern(detector, e.to_string()))?;
                Ok((term, re))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { terms })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total occurrences across all terms.
    pub fn count(&self, text: &str) -> usize {
        self.terms.iter().map(|(_, re)| re.find_iter(text).count()).sum()
    }

    /// Distinct terms present in `text`, in table order.
    pub fn matched_terms(&self, text: &str) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.terms
            .iter()
            .filter(|(term, re)| re.is_match(text) && seen.insert(term.clone()))
            .map(|(term, _)| term.clone())
            .collect()
    }
}
