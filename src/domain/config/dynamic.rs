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

//! `-D key=value` overrides applied after flags and the config file

use crate::domain::config::build::{BuildConfig, ContainerNaming, PullPolicy};
use crate::shared::error::{ManifestError, Result};
use std::collections::HashMap;
use std::str::FromStr;

pub const KNOWN_KEYS: &[&str] = &[
    "deployment.namespace",
    "deployment.replicas",
    "container.port",
    "container.pull-policy",
    "container.naming",
    "resources.requests.cpu",
    "resources.requests.memory",
    "resources.limits.cpu",
    "resources.limits.memory",
    "rollout.max-surge",
    "rollout.max-unavailable",
    "rollout.progress-deadline",
    "rollout.revision-history",
];

pub fn parse_dynamic_configs(configs: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();

    for config in configs {
        let Some((key, value)) = config.split_once('=') else {
            return Err(ManifestError::ConfigError(format!(
                "Invalid property format: '{}'. Expected 'key=value'",
                config
            )));
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(ManifestError::ConfigError(format!(
                "Empty key in property: '{}'",
                config
            )));
        }

        map.insert(key.to_string(), value.trim().to_string());
    }

    Ok(map)
}

pub fn apply_to_build_config(
    configs: &HashMap<String, String>,
    config: &mut BuildConfig,
) -> Result<()> {
    for key in configs.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "ignoring unknown property");
        }
    }

    if let Some(namespace) = configs.get("deployment.namespace") {
        config.namespace = if namespace.is_empty() {
            None
        } else {
            Some(namespace.clone())
        };
    }

    if let Some(replicas) = configs.get("deployment.replicas") {
        config.replicas = parse_value("deployment.replicas", replicas)?;
    }

    if let Some(port) = configs.get("container.port") {
        config.container_port = if port.is_empty() {
            None
        } else {
            Some(parse_value("container.port", port)?)
        };
    }

    if let Some(policy) = configs.get("container.pull-policy") {
        config.pull_policy = policy.parse::<PullPolicy>()?;
    }

    if let Some(naming) = configs.get("container.naming") {
        config.naming = naming.parse::<ContainerNaming>()?;
    }

    let resources = &mut config.resources;
    set_optional(configs, "resources.requests.cpu", &mut resources.requests_cpu);
    set_optional(configs, "resources.requests.memory", &mut resources.requests_memory);
    set_optional(configs, "resources.limits.cpu", &mut resources.limits_cpu);
    set_optional(configs, "resources.limits.memory", &mut resources.limits_memory);

    if let Some(surge) = configs.get("rollout.max-surge") {
        config.rollout.max_surge = surge.clone();
    }

    if let Some(unavailable) = configs.get("rollout.max-unavailable") {
        config.rollout.max_unavailable = unavailable.clone();
    }

    if let Some(deadline) = configs.get("rollout.progress-deadline") {
        config.rollout.progress_deadline_seconds =
            parse_value("rollout.progress-deadline", deadline)?;
    }

    if let Some(history) = configs.get("rollout.revision-history") {
        config.rollout.revision_history_limit = parse_value("rollout.revision-history", history)?;
    }

    Ok(())
}

/// Empty value clears the field.
fn set_optional(configs: &HashMap<String, String>, key: &str, target: &mut Option<String>) {
    if let Some(value) = configs.get(key) {
        *target = if value.is_empty() {
            None
        } else {
            Some(value.clone())
        };
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        ManifestError::ConfigError(format!("Invalid value for {}: '{}'", key, value))
    })
}
