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

//! # Veri Error Module
//!
//! This module defines the error types used throughout the Veri analysis
//! pipeline.
//!
//! ## Error Categories
//!
//! - **RemoteUnavailable / RemoteTimeout / RemoteBadResponse**: inference
//!   endpoint failures. These never reach the caller of
//!   [`crate::VeriAnalyzer::analyze_content`]; the inference adapter recovers
//!   from them with a deterministic local fallback.
//! - **Parse**: HTML could not be turned into text through the DOM parser.
//!   Recovered by regex tag stripping.
//! - **ShortInput**: not a failure. Recorded as a warning while the pipeline
//!   proceeds with `limitedAnalysis` set.
//! - **Pattern**: a data-driven detector table contained an invalid regex.
//! - **Stage**: a pipeline stage failed or panicked; the composer substitutes
//!   the stage default and marks the dimension as `error`.
//! - **Validation / Config / Io / Serde / Internal**: the usual suspects.
//!
//! ## Usage
//!
//! ```rust
//! use veri::errors::{Result, VeriError};
//!
//! fn chunk_size(value: usize) -> Result<usize> {
//!     if value == 0 {
//!         return Err(VeriError::validation("chunk size must be positive"));
//!     }
//!     Ok(value)
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Veri.
pub type Result<T> = std::result::Result<T, VeriError>;

/// Canonical error enumeration for Veri.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq)]
pub enum VeriError {
    /// Endpoint refused or could not be reached (includes HTTP 503 "model loading").
    #[error("inference task '{task}' unavailable (status {status:?}): {message}")]
    RemoteUnavailable {
        task: String,
        status: Option<u16>,
        message: String,
    },

    /// Endpoint did not answer within the task timeout.
    #[error("inference task '{task}' timed out after {timeout_ms}ms")]
    RemoteTimeout { task: String, timeout_ms: u64 },

    /// Endpoint answered with a payload of the wrong shape.
    #[error("inference task '{task}' returned a malformed response: {message}")]
    RemoteBadResponse { task: String, message: String },

    /// HTML could not be converted to text through the DOM parser.
    #[error("parse error: {0}")]
    Parse(String),

    /// Input shorter than the analysis threshold. Informational only.
    #[error("short input: {chars} chars is below the {threshold} char threshold")]
    ShortInput { chars: usize, threshold: usize },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Invalid regex in a detector table.
    #[error("detector '{detector}' has an invalid pattern: {message}")]
    Pattern { detector: String, message: String },

    /// Failure of one analysis stage.
    #[error("analysis stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },

    /// Invalid configuration values or unreadable configuration sources.
    #[error("config error: {0}")]
    Config(String),

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for VeriError {
    fn from(err: io::Error) -> Self {
        VeriError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VeriError {
    fn from(err: serde_json::Error) -> Self {
        VeriError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for VeriError {
    fn from(err: serde_yaml::Error) -> Self {
        VeriError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for VeriError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        VeriError::RemoteUnavailable {
            task: "http".to_string(),
            status,
            message: err.to_string(),
        }
    }
}

impl VeriError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        VeriError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct stage errors.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        VeriError::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct pattern table errors.
    pub fn pattern(detector: impl Into<String>, message: impl Into<String>) -> Self {
        VeriError::Pattern {
            detector: detector.into(),
            message: message.into(),
        }
    }

    pub fn unavailable(task: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        VeriError::RemoteUnavailable {
            task: task.into(),
            status,
            message: message.into(),
        }
    }

    pub fn bad_response(task: impl Into<String>, message: impl Into<String>) -> Self {
        VeriError::RemoteBadResponse {
            task: task.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        VeriError::Internal(message.into())
    }

    /// HTTP 503 from an inference endpoint: the model is still loading and
    /// the call may be retried.
    pub fn is_model_loading(&self) -> bool {
        matches!(self, VeriError::RemoteUnavailable { status: Some(503), .. })
    }

    /// Errors that the inference adapter always recovers from locally.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            VeriError::RemoteUnavailable { .. }
                | VeriError::RemoteTimeout { .. }
                | VeriError::RemoteBadResponse { .. }
        )
    }
}
