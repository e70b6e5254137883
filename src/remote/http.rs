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

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::VeriConfig;
use crate::errors::{Result, VeriError};
use crate::remote::{VeriInferenceBackend, VeriInferenceRequest, VeriTask};

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Posts inference requests to `<inference_url>/<model>` over HTTP.
#[derive(Debug, Clone)]
pub struct VeriHttpBackend {
    client: reqwest::Client,
    config: VeriConfig,
}

impl VeriHttpBackend {
    pub fn new(config: &VeriConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("veri/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VeriError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn has_token(&self) -> bool {
        self.config
            .api_token
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
    }
}

#[async_trait]
impl VeriInferenceBackend for VeriHttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn infer(&self, task: VeriTask, request: &VeriInferenceRequest) -> Result<Value> {
        let Some(token) = self.config.api_token.as_deref().filter(|t| !t.trim().is_empty()) else {
            return Err(VeriError::unavailable(
                task.as_str(),
                None,
                "no API token configured",
            ));
        };

        let settings = self.config.task(task);
        let response = self
            .client
            .post(self.config.endpoint(task))
            .bearer_auth(token)
            .json(&request.to_payload())
            .timeout(Duration::from_millis(settings.timeout_ms))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VeriError::RemoteTimeout {
                        task: task.as_str().to_string(),
                        timeout_ms: settings.timeout_ms,
                    }
                } else {
                    VeriError::unavailable(task.as_str(), None, e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(VeriError::unavailable(
                task.as_str(),
                Some(status.as_u16()),
                format!("endpoint returned {status}: {body}"),
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| VeriError::bad_response(task.as_str(), format!("body is not JSON: {e}")))
    }
}
