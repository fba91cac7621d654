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

use crate::domain::config::build::is_valid_k8s_label;
use crate::domain::image::sanitizer::sanitize_name;

/// One usable row of an image list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub image: String,
    pub name: Option<String>,
    pub port: Option<u16>,
}

impl ImageRecord {
    /// Returns `None` when the image is blank after trimming.
    pub fn new(image: &str) -> Option<Self> {
        let image = image.trim();
        if image.is_empty() {
            return None;
        }
        Some(Self {
            image: image.to_string(),
            name: None,
            port: None,
        })
    }

    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        if let Some(ref name) = self.name {
            if !is_valid_k8s_label(name) {
                tracing::warn!(
                    "Container name '{}' for image {} is not a valid DNS-1123 label; the API server will reject it",
                    name,
                    self.image
                );
            }
        }
        self
    }

    /// Whether the row's name can be used as a container name as given.
    pub fn has_valid_name(&self) -> bool {
        self.name.as_deref().map_or(true, is_valid_k8s_label)
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    /// Container name derived from the image reference.
    pub fn derived_name(&self) -> String {
        sanitize_name(&self.image)
    }

    /// Name from the row, or the derived name when the row has none.
    pub fn explicit_or_derived_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.derived_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image_is_rejected() {
        assert!(ImageRecord::new("").is_none());
        assert!(ImageRecord::new("   \t").is_none());
    }

    #[test]
    fn test_image_is_trimmed() {
        let record = ImageRecord::new("  icr.io/cpopen/cpd/olm-utils-v3:latest ").unwrap();
        assert_eq!(record.image, "icr.io/cpopen/cpd/olm-utils-v3:latest");
        assert_eq!(record.name, None);
        assert_eq!(record.port, None);
    }

    #[test]
    fn test_blank_name_falls_back_to_derived() {
        let record = ImageRecord::new("quay.io/org/db2u:11.5")
            .unwrap()
            .with_name(Some("  "));
        assert_eq!(record.name, None);
        assert_eq!(record.explicit_or_derived_name(), "db2u");

        let record = record.with_name(Some(" primary-db "));
        assert_eq!(record.explicit_or_derived_name(), "primary-db");
    }

    #[test]
    fn test_invalid_row_names_are_flagged() {
        let image = "icr.io/cpopen/cpd/olm-utils-v3:latest";
        assert!(ImageRecord::new(image).unwrap().has_valid_name());
        assert!(ImageRecord::new(image).unwrap().with_name(Some("utils-2")).has_valid_name());

        let record = ImageRecord::new(image).unwrap().with_name(Some("My_App"));
        assert_eq!(record.name.as_deref(), Some("My_App"));
        assert!(!record.has_valid_name());
        assert!(!ImageRecord::new(image).unwrap().with_name(Some("a.b")).has_valid_name());
    }
}
