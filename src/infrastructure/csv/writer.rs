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

//! Group CSV rendering

use crate::infrastructure::constants::GROUP_CSV_HEADER;
use crate::shared::error::{ManifestError, Result};
use csv::WriterBuilder;

/// Render a single-column CSV with an `image` header.
pub fn render_group_csv(images: &[String]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record([GROUP_CSV_HEADER])?;
    for image in images {
        writer.write_record([image.as_str()])?;
    }
    writer
        .into_inner()
        .map_err(|e| ManifestError::OutputError(format!("Failed to flush CSV buffer: {}", e)))
}
