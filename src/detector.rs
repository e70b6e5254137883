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

//! # Veri Detector Module
//!
//! Rule-based analyzers implement [`VeriDetector`]. A detector reads a
//! normalized [`VeriDocument`] and returns one analysis dimension.
//!
//! ## Implementing Custom Detectors
//!
//! ```rust
//! use veri::detector::VeriDetector;
//! use veri::errors::Result;
//! use veri::normalize::VeriDocument;
//!
//! #[derive(Debug)]
//! struct ExclamationCounter;
//!
//! impl VeriDetector for ExclamationCounter {
//!     type Output = usize;
//!
//!     fn name(&self) -> &'static str {
//!         "detect.exclamations"
//!     }
//!
//!     fn detect(&self, document: &VeriDocument) -> Result<usize> {
//!         Ok(document.text.matches('!').count())
//!     }
//! }
//! ```
//!
//! The composer holds detectors as `Arc<dyn VeriDetector<Output = _>>`, so any
//! dimension can be swapped for a custom implementation.

use crate::errors::{Result, VeriError};
use crate::normalize::VeriDocument;

/// Contract shared by every rule-based analyzer.
///
/// Detectors are stateless and deterministic: the same document always
/// yields the same output.
pub trait VeriDetector: std::fmt::Debug + Send + Sync {
    type Output: Send + 'static;

    /// Unique, human-readable name used in logs and stage errors.
    fn name(&self) -> &'static str;

    fn detect(&self, document: &VeriDocument) -> Result<Self::Output>;
}

/// Runs a detector and tags any error with the detector name.
pub fn execute_detector<D>(detector: &D, document: &VeriDocument) -> Result<D::Output>
where
    D: VeriDetector + ?Sized,
{
    detector.detect(document).map_err(|err| match err {
        VeriError::Stage { .. } => err,
        other => VeriError::stage(detector.name(), other.to_string()),
    })
}
