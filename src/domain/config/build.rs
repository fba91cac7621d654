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

use crate::infrastructure::constants::*;
use crate::shared::error::ManifestError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullPolicy {
    #[default]
    Always,
    IfNotPresent,
    Never,
}

impl PullPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullPolicy::Always => "Always",
            PullPolicy::IfNotPresent => "IfNotPresent",
            PullPolicy::Never => "Never",
        }
    }
}

impl std::str::FromStr for PullPolicy {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Always" => Ok(PullPolicy::Always),
            "IfNotPresent" => Ok(PullPolicy::IfNotPresent),
            "Never" => Ok(PullPolicy::Never),
            _ => Err(ManifestError::ConfigError(format!(
                "Invalid image pull policy: {} (expected Always, IfNotPresent or Never)",
                s
            ))),
        }
    }
}

/// How container names are chosen for each image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerNaming {
    /// Row `name` column, else derived from the image.
    Explicit,
    DeriveFromImage,
    /// Every container is named after the Deployment.
    ReuseDeploymentName,
}

impl ContainerNaming {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerNaming::Explicit => "explicit",
            ContainerNaming::DeriveFromImage => "derive-from-image",
            ContainerNaming::ReuseDeploymentName => "reuse-deployment-name",
        }
    }
}

impl std::str::FromStr for ContainerNaming {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explicit" => Ok(ContainerNaming::Explicit),
            "derive-from-image" => Ok(ContainerNaming::DeriveFromImage),
            "reuse-deployment-name" => Ok(ContainerNaming::ReuseDeploymentName),
            _ => Err(ManifestError::ConfigError(format!(
                "Invalid container naming: {} (expected explicit, derive-from-image or reuse-deployment-name)",
                s
            ))),
        }
    }
}

/// Field set and defaults of the emitted manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputProfile {
    #[default]
    Minimal,
    /// Adds rollout tuning, metadata labels and a security context.
    Extended,
}

impl OutputProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputProfile::Minimal => "minimal",
            OutputProfile::Extended => "extended",
        }
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, OutputProfile::Extended)
    }

    /// Baseline configuration for a deployment named `name`.
    pub fn default_config(&self, name: impl Into<String>) -> BuildConfig {
        let name = name.into();
        match self {
            OutputProfile::Minimal => BuildConfig {
                name,
                namespace: None,
                replicas: 1,
                container_port: None,
                pull_policy: PullPolicy::Always,
                resources: ResourceSpec::default(),
                rollout: RolloutSpec::default(),
                naming: ContainerNaming::Explicit,
                profile: *self,
            },
            OutputProfile::Extended => BuildConfig {
                name,
                namespace: None,
                replicas: 1,
                container_port: Some(EXTENDED_CONTAINER_PORT),
                pull_policy: PullPolicy::Always,
                resources: ResourceSpec {
                    requests_cpu: Some(EXTENDED_REQUESTS_CPU.to_string()),
                    requests_memory: Some(EXTENDED_REQUESTS_MEMORY.to_string()),
                    limits_cpu: Some(EXTENDED_LIMITS_CPU.to_string()),
                    limits_memory: Some(EXTENDED_LIMITS_MEMORY.to_string()),
                },
                rollout: RolloutSpec::default(),
                naming: ContainerNaming::ReuseDeploymentName,
                profile: *self,
            },
        }
    }
}

impl std::str::FromStr for OutputProfile {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(OutputProfile::Minimal),
            "extended" => Ok(OutputProfile::Extended),
            _ => Err(ManifestError::ConfigError(format!(
                "Invalid output profile: {} (expected minimal or extended)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ManifestError::ConfigError(format!(
                "Invalid output format: {} (expected yaml or json)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSpec {
    pub requests_cpu: Option<String>,
    pub requests_memory: Option<String>,
    pub limits_cpu: Option<String>,
    pub limits_memory: Option<String>,
}

impl ResourceSpec {
    pub fn is_empty(&self) -> bool {
        self.requests_cpu.is_none()
            && self.requests_memory.is_none()
            && self.limits_cpu.is_none()
            && self.limits_memory.is_none()
    }
}

/// Rolling update tuning. Only emitted by the extended profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloutSpec {
    pub max_surge: String,
    pub max_unavailable: String,
    pub progress_deadline_seconds: i32,
    pub revision_history_limit: i32,
}

impl Default for RolloutSpec {
    fn default() -> Self {
        Self {
            max_surge: EXTENDED_MAX_SURGE.to_string(),
            max_unavailable: EXTENDED_MAX_UNAVAILABLE.to_string(),
            progress_deadline_seconds: EXTENDED_PROGRESS_DEADLINE_SECONDS,
            revision_history_limit: EXTENDED_REVISION_HISTORY_LIMIT,
        }
    }
}

/// Resolved, validated deployment-level options handed to the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub name: String,
    pub namespace: Option<String>,
    pub replicas: i32,
    pub container_port: Option<u16>,
    pub pull_policy: PullPolicy,
    pub resources: ResourceSpec,
    pub rollout: RolloutSpec,
    pub naming: ContainerNaming,
    pub profile: OutputProfile,
}

impl BuildConfig {
    /// True when rollout settings differ from the defaults but the profile
    /// will not emit them.
    pub fn ignores_rollout(&self) -> bool {
        !self.profile.is_extended() && self.rollout != RolloutSpec::default()
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        if !is_valid_k8s_name(&self.name) {
            return Err(ManifestError::ConfigError(format!(
                "Invalid deployment name: '{}' (must be lowercase alphanumeric, '-' or '.', starting and ending with an alphanumeric)",
                self.name
            )));
        }

        if let Some(ref namespace) = self.namespace {
            if !is_valid_k8s_label(namespace) {
                return Err(ManifestError::ConfigError(format!(
                    "Invalid namespace: '{}'",
                    namespace
                )));
            }
        }

        if self.replicas < 0 {
            return Err(ManifestError::ConfigError(format!(
                "replicas must be >= 0, got {}",
                self.replicas
            )));
        }

        if self.container_port == Some(0) {
            return Err(ManifestError::ConfigError(
                "container port must be between 1 and 65535".to_string(),
            ));
        }

        if self.profile.is_extended() {
            if self.rollout.progress_deadline_seconds <= 0 {
                return Err(ManifestError::ConfigError(format!(
                    "progress deadline must be > 0, got {}",
                    self.rollout.progress_deadline_seconds
                )));
            }
            if self.rollout.revision_history_limit < 0 {
                return Err(ManifestError::ConfigError(format!(
                    "revision history limit must be >= 0, got {}",
                    self.rollout.revision_history_limit
                )));
            }
        }

        Ok(())
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (profile={}, naming={}, replicas={})",
            self.name,
            self.profile.as_str(),
            self.naming.as_str(),
            self.replicas
        )
    }
}

/// DNS-1123 subdomain check used for object names.
pub(crate) fn is_valid_k8s_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 253 {
        return false;
    }

    if !name.chars().next().unwrap_or(' ').is_ascii_alphanumeric() {
        return false;
    }
    if !name.chars().last().unwrap_or(' ').is_ascii_alphanumeric() {
        return false;
    }

    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
}

/// DNS-1123 label check used for namespaces.
pub(crate) fn is_valid_k8s_label(name: &str) -> bool {
    name.len() <= 63 && !name.contains('.') && is_valid_k8s_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignores_rollout_only_for_minimal() {
        let mut minimal = OutputProfile::Minimal.default_config("app");
        assert!(!minimal.ignores_rollout());
        minimal.rollout.max_surge = "1".to_string();
        assert!(minimal.ignores_rollout());

        let mut extended = OutputProfile::Extended.default_config("app");
        extended.rollout.max_surge = "1".to_string();
        assert!(!extended.ignores_rollout());
    }

    #[test]
    fn test_minimal_defaults() {
        let config = OutputProfile::Minimal.default_config("ibm-cp4d");
        assert_eq!(config.replicas, 1);
        assert_eq!(config.container_port, None);
        assert_eq!(config.pull_policy, PullPolicy::Always);
        assert!(config.resources.is_empty());
        assert_eq!(config.naming, ContainerNaming::Explicit);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_extended_defaults() {
        let config = OutputProfile::Extended.default_config("ibm-cp4d");
        assert_eq!(config.container_port, Some(8080));
        assert_eq!(config.resources.requests_cpu.as_deref(), Some("450m"));
        assert_eq!(config.resources.limits_cpu.as_deref(), Some("500m"));
        assert_eq!(config.resources.requests_memory.as_deref(), Some("512Mi"));
        assert_eq!(config.rollout.progress_deadline_seconds, 600);
        assert_eq!(config.rollout.revision_history_limit, 10);
        assert_eq!(config.naming, ContainerNaming::ReuseDeploymentName);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("IfNotPresent".parse::<PullPolicy>().unwrap(), PullPolicy::IfNotPresent);
        assert!("ifnotpresent".parse::<PullPolicy>().is_err());
        assert_eq!(
            "derive-from-image".parse::<ContainerNaming>().unwrap(),
            ContainerNaming::DeriveFromImage
        );
        assert_eq!("extended".parse::<OutputProfile>().unwrap(), OutputProfile::Extended);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let mut config = OutputProfile::Minimal.default_config("My_App");
        assert!(config.validate().is_err());

        config.name = "my-app".to_string();
        config.namespace = Some("team.a".to_string());
        assert!(config.validate().is_err());

        config.namespace = Some("team-a".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let mut config = OutputProfile::Extended.default_config("app");
        config.replicas = -1;
        assert!(config.validate().is_err());

        config.replicas = 0;
        config.container_port = Some(0);
        assert!(config.validate().is_err());

        config.container_port = Some(80);
        config.rollout.progress_deadline_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_k8s_name_rules() {
        assert!(is_valid_k8s_name("olm-utils.v3"));
        assert!(!is_valid_k8s_name("-leading"));
        assert!(!is_valid_k8s_name("trailing."));
        assert!(!is_valid_k8s_name(""));
        assert!(!is_valid_k8s_label(&"a".repeat(64)));
    }
}
