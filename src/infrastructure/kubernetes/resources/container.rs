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
use k8s_openapi::api::core::v1::{Container, ContainerPort, ResourceRequirements, SecurityContext};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use std::collections::{BTreeMap, HashMap, HashSet};

pub struct ContainerBuilder<'a> {
    config: &'a BuildConfig,
}

impl<'a> ContainerBuilder<'a> {
    pub fn new(config: &'a BuildConfig) -> Self {
        Self { config }
    }

    /// Name before de-duplication, per the configured naming strategy.
    pub fn base_name(&self, record: &ImageRecord) -> String {
        match self.config.naming {
            ContainerNaming::Explicit => record.explicit_or_derived_name(),
            ContainerNaming::DeriveFromImage => record.derived_name(),
            ContainerNaming::ReuseDeploymentName => self.config.name.clone(),
        }
    }

    pub fn build(&self, record: &ImageRecord, name: String) -> Container {
        let extended = self.config.profile.is_extended();

        Container {
            name,
            image: Some(record.image.clone()),
            image_pull_policy: Some(self.config.pull_policy.as_str().to_string()),
            ports: self.build_ports(record),
            resources: self.build_resources(),
            security_context: extended.then(|| SecurityContext {
                privileged: Some(SECURITY_PRIVILEGED),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn build_ports(&self, record: &ImageRecord) -> Option<Vec<ContainerPort>> {
        let port = record.port.or(self.config.container_port)?;
        Some(vec![ContainerPort {
            container_port: i32::from(port),
            protocol: Some(PROTOCOL_TCP.to_string()),
            ..Default::default()
        }])
    }

    fn build_resources(&self) -> Option<ResourceRequirements> {
        let spec = &self.config.resources;
        if spec.is_empty() {
            return None;
        }

        let requests = quantities(&spec.requests_cpu, &spec.requests_memory);
        let limits = quantities(&spec.limits_cpu, &spec.limits_memory);

        Some(ResourceRequirements {
            limits,
            requests,
            ..Default::default()
        })
    }
}

/// `None` rather than an empty map when neither value is set.
fn quantities(
    cpu: &Option<String>,
    memory: &Option<String>,
) -> Option<BTreeMap<String, Quantity>> {
    let mut map = BTreeMap::new();
    if let Some(cpu) = cpu {
        map.insert(RESOURCE_CPU.to_string(), Quantity(cpu.clone()));
    }
    if let Some(memory) = memory {
        map.insert(RESOURCE_MEMORY.to_string(), Quantity(memory.clone()));
    }
    (!map.is_empty()).then_some(map)
}

/// Make names unique in order: the first occurrence keeps its name and the
/// N-th repeat becomes `<name>-N`, skipping any suffix already taken.
pub fn make_unique_names(names: Vec<String>) -> Vec<String> {
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    names
        .into_iter()
        .map(|base| {
            let name = if taken.contains(&base) {
                let counter = counters.entry(base.clone()).or_insert(1);
                let mut candidate = format!("{}-{}", base, counter);
                while taken.contains(&candidate) {
                    *counter += 1;
                    candidate = format!("{}-{}", base, counter);
                }
                *counter += 1;
                candidate
            } else {
                base
            };
            taken.insert(name.clone());
            name
        })
        .collect()
}
