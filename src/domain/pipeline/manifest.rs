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

use crate::domain::config::{BuildConfig, OutputFormat};
use crate::domain::image::ImageRecord;
use crate::infrastructure::csv::read_image_records;
use crate::infrastructure::kubernetes::render_deployment;
use crate::infrastructure::kubernetes::resources::DeploymentBuilder;
use crate::infrastructure::output::OutputTarget;
use crate::shared::error::Result;
use k8s_openapi::api::apps::v1::Deployment;
use std::path::Path;

/// One emitted container, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    pub name: String,
    pub image: String,
    pub port: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub deployment: String,
    pub target: OutputTarget,
    pub containers: Vec<ContainerSummary>,
}

/// CSV image list to rendered Deployment manifest.
pub struct ManifestPipeline {
    builder: DeploymentBuilder,
    format: OutputFormat,
}

impl ManifestPipeline {
    /// Validates `config` up front so nothing is read with a bad config.
    pub fn new(config: BuildConfig, format: OutputFormat) -> Result<Self> {
        config.validate()?;
        tracing::debug!(config = %config, "manifest pipeline configured");
        Ok(Self {
            builder: DeploymentBuilder::new(config),
            format,
        })
    }

    pub fn config(&self) -> &BuildConfig {
        self.builder.config()
    }

    pub fn build(&self, records: &[ImageRecord]) -> Result<Deployment> {
        self.builder.build(records)
    }

    pub fn build_from_csv<P: AsRef<Path>>(&self, csv_path: P) -> Result<Deployment> {
        let records = read_image_records(csv_path)?;
        self.build(&records)
    }

    pub fn render(&self, deployment: &Deployment) -> Result<String> {
        render_deployment(deployment, self.format)
    }

    /// Read, build, render, then write. Nothing reaches `target` unless every
    /// earlier step succeeded.
    pub fn run<P: AsRef<Path>>(&self, csv_path: P, target: &OutputTarget) -> Result<GenerationReport> {
        let deployment = self.build_from_csv(csv_path)?;
        let text = self.render(&deployment)?;
        target.write(text.as_bytes())?;

        tracing::info!(target = %target.describe(), "manifest written");
        Ok(GenerationReport {
            deployment: self.config().name.clone(),
            target: target.clone(),
            containers: summarize(&deployment),
        })
    }
}

pub fn summarize(deployment: &Deployment) -> Vec<ContainerSummary> {
    deployment
        .spec
        .as_ref()
        .and_then(|spec| spec.template.spec.as_ref())
        .map(|pod| {
            pod.containers
                .iter()
                .map(|c| ContainerSummary {
                    name: c.name.clone(),
                    image: c.image.clone().unwrap_or_default(),
                    port: c
                        .ports
                        .as_ref()
                        .and_then(|ports| ports.first())
                        .map(|p| p.container_port),
                })
                .collect()
        })
        .unwrap_or_default()
}
