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

use crate::infrastructure::constants::UNGROUPED_BUCKET;
use crate::shared::error::{ManifestError, Result};
use regex::Regex;
use std::sync::LazyLock;

static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("static pattern is valid"));

/// Rule assigning each image to a named bucket.
#[derive(Debug, Clone)]
pub enum GroupingStrategy {
    /// N-th `/` separated segment of the image reference, 0-based.
    Segment(usize),
    /// Ordered `needle -> group` pairs; first contained needle wins.
    Contains(Vec<(String, String)>),
    /// First capture group of the first match.
    Regex(Regex),
}

impl GroupingStrategy {
    /// Build a strategy from the mutually exclusive command-line options.
    pub fn from_options(
        segment: Option<usize>,
        contains: Option<&str>,
        regex: Option<&str>,
    ) -> Result<Self> {
        match (segment, contains, regex) {
            (Some(index), None, None) => Ok(Self::Segment(index)),
            (None, Some(spec), None) => Ok(Self::Contains(parse_contains_mapping(spec)?)),
            (None, None, Some(pattern)) => Self::regex(pattern),
            _ => Err(ManifestError::ConfigError(
                "Choose exactly one of --segment, --contains, or --regex".to_string(),
            )),
        }
    }

    pub fn regex(pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern).map_err(|e| {
            ManifestError::ConfigError(format!("Invalid --regex '{}': {}", pattern, e))
        })?;
        if re.captures_len() < 2 {
            return Err(ManifestError::ConfigError(format!(
                "--regex '{}' must contain a capture group",
                pattern
            )));
        }
        Ok(Self::Regex(re))
    }

    pub fn key_for(&self, image: &str) -> String {
        let key = match self {
            Self::Segment(index) => image.split('/').nth(*index),
            Self::Contains(mapping) => mapping
                .iter()
                .find(|(needle, _)| image.contains(needle.as_str()))
                .map(|(_, group)| group.as_str()),
            Self::Regex(re) => re
                .captures(image)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str()),
        };
        key.unwrap_or(UNGROUPED_BUCKET).to_string()
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Segment(index) => format!("segment {}", index),
            Self::Contains(mapping) => format!("contains ({} rules)", mapping.len()),
            Self::Regex(re) => format!("regex {}", re.as_str()),
        }
    }
}

/// Parse `needle=group,needle=group`, keeping the given order.
pub fn parse_contains_mapping(spec: &str) -> Result<Vec<(String, String)>> {
    spec.split(',')
        .map(|pair| match pair.split_once('=') {
            Some((needle, group)) => Ok((needle.trim().to_string(), group.trim().to_string())),
            None => Err(ManifestError::ConfigError(format!(
                "Bad --contains pair: {} (use needle=group)",
                pair
            ))),
        })
        .collect()
}

/// File-system safe form of a bucket key.
pub fn safe_file_key(key: &str) -> String {
    UNSAFE_FILE_CHARS.replace_all(key, "_").into_owned()
}
