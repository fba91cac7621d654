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

use crate::domain::image::ImageRecord;
use crate::domain::partition::{partition, safe_file_key, GroupingStrategy};
use crate::infrastructure::csv::{read_image_records, render_group_csv};
use crate::infrastructure::output::{ensure_dir, write_atomic};
use crate::shared::error::{ManifestError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenGroup {
    pub key: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// Master image list to one CSV per group.
pub struct SplitPipeline {
    strategy: GroupingStrategy,
    out_dir: PathBuf,
    prefix: String,
}

impl SplitPipeline {
    pub fn new(strategy: GroupingStrategy, out_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            strategy,
            out_dir: out_dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn group_path(&self, key: &str) -> PathBuf {
        self.out_dir
            .join(format!("{}{}.csv", self.prefix, safe_file_key(key)))
    }

    /// Render every group file in memory. Fails if two groups would share a
    /// file name.
    pub fn plan(&self, records: &[ImageRecord]) -> Result<Vec<(WrittenGroup, Vec<u8>)>> {
        let buckets = partition(records.iter().map(|r| r.image.as_str()), &self.strategy);

        let mut owners: HashMap<PathBuf, String> = HashMap::new();
        let mut planned = Vec::with_capacity(buckets.len());
        for bucket in buckets {
            let path = self.group_path(&bucket.key);
            if let Some(previous) = owners.insert(path.clone(), bucket.key.clone()) {
                return Err(ManifestError::ValidationError(format!(
                    "Groups '{}' and '{}' both map to {}",
                    previous,
                    bucket.key,
                    path.display()
                )));
            }

            let content = render_group_csv(&bucket.images)?;
            planned.push((
                WrittenGroup {
                    key: bucket.key,
                    path,
                    rows: bucket.images.len(),
                },
                content,
            ));
        }

        Ok(planned)
    }

    pub fn run<P: AsRef<Path>>(&self, csv_path: P) -> Result<Vec<WrittenGroup>> {
        let records = read_image_records(csv_path)?;
        tracing::info!(strategy = %self.strategy.describe(), images = records.len(), "splitting image list");

        let planned = self.plan(&records)?;
        ensure_dir(&self.out_dir)?;

        let mut written = Vec::with_capacity(planned.len());
        for (group, content) in planned {
            write_atomic(&group.path, &content)?;
            written.push(group);
        }
        Ok(written)
    }
}
