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

use crate::domain::config::{BuildConfig, ContainerNaming};
use crate::domain::image::ImageRecord;
use crate::infrastructure::constants::*;
use crate::infrastructure::kubernetes::resources::container::{make_unique_names, ContainerBuilder};
use crate::infrastructure::kubernetes::resources::traits::LabeledResourceBuilder;
use crate::shared::error::{ManifestError, Result};
use k8s_openapi::api::apps::v1::{
    Deployment, DeploymentSpec, DeploymentStrategy, RollingUpdateDeployment,
};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use std::collections::BTreeMap;

pub struct DeploymentBuilder {
    config: BuildConfig,
}

impl LabeledResourceBuilder for DeploymentBuilder {
    fn get_labels(&self) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::new();
        labels.insert(LABEL_APP.to_string(), self.config.name.clone());
        labels
    }
}

impl DeploymentBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn build(&self, records: &[ImageRecord]) -> Result<Deployment> {
        if records.is_empty() {
            return Err(ManifestError::ValidationError(
                "A Deployment needs at least one image".to_string(),
            ));
        }

        let extended = self.config.profile.is_extended();
        let containers = self.build_containers(records);

        let metadata = ObjectMeta {
            name: Some(self.config.name.clone()),
            namespace: self.config.namespace.clone(),
            labels: extended.then(|| self.get_labels()),
            ..Default::default()
        };

        let deployment = Deployment {
            metadata,
            spec: Some(DeploymentSpec {
                replicas: Some(self.config.replicas),
                selector: LabelSelector {
                    match_labels: Some(self.get_selector_labels()),
                    ..Default::default()
                },
                template: PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        labels: Some(self.get_labels()),
                        ..Default::default()
                    }),
                    spec: Some(PodSpec {
                        containers,
                        ..Default::default()
                    }),
                },
                strategy: Some(self.build_strategy()),
                progress_deadline_seconds: extended
                    .then_some(self.config.rollout.progress_deadline_seconds),
                revision_history_limit: extended
                    .then_some(self.config.rollout.revision_history_limit),
                ..Default::default()
            }),
            ..Default::default()
        };

        Ok(deployment)
    }

    fn build_containers(&self, records: &[ImageRecord]) -> Vec<Container> {
        let builder = ContainerBuilder::new(&self.config);
        let base_names: Vec<String> = records.iter().map(|r| builder.base_name(r)).collect();

        if self.config.naming == ContainerNaming::ReuseDeploymentName && records.len() > 1 {
            tracing::warn!(
                deployment = %self.config.name,
                containers = records.len(),
                "every container reuses the deployment name; suffixing duplicates to keep names unique"
            );
        }

        let names = make_unique_names(base_names);
        records
            .iter()
            .zip(names)
            .map(|(record, name)| builder.build(record, name))
            .collect()
    }

    fn build_strategy(&self) -> DeploymentStrategy {
        let rolling_update = self
            .config
            .profile
            .is_extended()
            .then(|| RollingUpdateDeployment {
                max_surge: Some(int_or_string(&self.config.rollout.max_surge)),
                max_unavailable: Some(int_or_string(&self.config.rollout.max_unavailable)),
            });

        DeploymentStrategy {
            rolling_update,
            type_: Some(STRATEGY_TYPE_ROLLING_UPDATE.to_string()),
        }
    }
}

/// `"2"` becomes an integer, `"25%"` stays a string.
fn int_or_string(value: &str) -> IntOrString {
    value
        .trim()
        .parse::<i32>()
        .map(IntOrString::Int)
        .unwrap_or_else(|_| IntOrString::String(value.trim().to_string()))
}
