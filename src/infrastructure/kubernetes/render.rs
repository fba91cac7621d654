// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Manifest serialization

use crate::domain::config::OutputFormat;
use crate::shared::error::Result;
use k8s_openapi::api::apps::v1::Deployment;

pub fn render_deployment(deployment: &Deployment, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(deployment)?),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(deployment)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Parse a rendered manifest back into a Deployment. JSON is a subset of
/// YAML, so both formats go through the YAML parser.
pub fn parse_deployment(text: &str) -> Result<Deployment> {
    Ok(serde_yaml::from_str(text)?)
}
