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

//! TOML configuration file for manifest generation

use crate::domain::config::build::{BuildConfig, ContainerNaming, OutputFormat, OutputProfile, PullPolicy};
use crate::shared::error::{ManifestError, Result};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

/// Settings loaded from a `--config-file`. Every field is optional; unset
/// fields leave the profile defaults in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConf {
    pub profile: Option<String>,
    pub container_naming: Option<String>,
    pub output_format: Option<String>,
    pub deployment: DeploymentConf,
    pub container: ContainerConf,
    pub resources: ResourcesConf,
    pub rollout: RolloutConf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentConf {
    pub namespace: Option<String>,
    pub replicas: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConf {
    pub port: Option<u16>,
    pub pull_policy: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConf {
    pub requests_cpu: Option<String>,
    pub requests_memory: Option<String>,
    pub limits_cpu: Option<String>,
    pub limits_memory: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloutConf {
    pub max_surge: Option<String>,
    pub max_unavailable: Option<String>,
    pub progress_deadline_seconds: Option<i32>,
    pub revision_history_limit: Option<i32>,
}

impl ManifestConf {
    /// Load configuration from a TOML file
    pub fn from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path).map_err(|e| {
            ManifestError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn profile(&self) -> Result<Option<OutputProfile>> {
        self.profile
            .as_deref()
            .map(str::parse::<OutputProfile>)
            .transpose()
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.output_format
            .as_deref()
            .map(str::parse::<OutputFormat>)
            .transpose()
    }

    /// Overlay the file settings onto `config`.
    pub fn apply_to(&self, config: &mut BuildConfig) -> Result<()> {
        if let Some(ref naming) = self.container_naming {
            config.naming = naming.parse::<ContainerNaming>()?;
        }

        if let Some(ref namespace) = self.deployment.namespace {
            let namespace = namespace.trim();
            config.namespace = (!namespace.is_empty()).then(|| namespace.to_string());
        }
        if let Some(replicas) = self.deployment.replicas {
            config.replicas = replicas;
        }

        if let Some(port) = self.container.port {
            config.container_port = Some(port);
        }
        if let Some(ref policy) = self.container.pull_policy {
            config.pull_policy = policy.parse::<PullPolicy>()?;
        }

        let resources = &mut config.resources;
        overlay(&mut resources.requests_cpu, &self.resources.requests_cpu);
        overlay(&mut resources.requests_memory, &self.resources.requests_memory);
        overlay(&mut resources.limits_cpu, &self.resources.limits_cpu);
        overlay(&mut resources.limits_memory, &self.resources.limits_memory);

        let rollout = &mut config.rollout;
        if let Some(ref surge) = self.rollout.max_surge {
            rollout.max_surge = surge.clone();
        }
        if let Some(ref unavailable) = self.rollout.max_unavailable {
            rollout.max_unavailable = unavailable.clone();
        }
        if let Some(deadline) = self.rollout.progress_deadline_seconds {
            rollout.progress_deadline_seconds = deadline;
        }
        if let Some(limit) = self.rollout.revision_history_limit {
            rollout.revision_history_limit = limit;
        }

        Ok(())
    }
}

fn overlay(target: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value {
        *target = Some(v.clone());
    }
}
