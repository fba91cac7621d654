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

//! Image list CSV reader

use crate::domain::image::ImageRecord;
use crate::infrastructure::constants::{CSV_CANDIDATE_DELIMITERS, CSV_SNIFF_BYTES};
use crate::shared::error::{ManifestError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;

const SNIFF_MAX_LINES: usize = 10;

/// Column positions taken from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    image: usize,
    name: Option<usize>,
    port: Option<usize>,
}

impl ColumnLayout {
    /// `None` unless the row has an `image` column.
    fn from_header(row: &StringRecord) -> Option<Self> {
        let position = |wanted: &str| {
            row.iter()
                .position(|cell| cell.trim().eq_ignore_ascii_case(wanted))
        };
        Some(Self {
            image: position("image")?,
            name: position("name"),
            port: position("port"),
        })
    }

    fn record(&self, row: &StringRecord) -> Option<ImageRecord> {
        let record = ImageRecord::new(row.get(self.image)?)?;
        let name = self.name.and_then(|i| row.get(i));
        let port = self.port.and_then(|i| row.get(i)).and_then(parse_port);
        Some(record.with_name(name).with_port(port))
    }
}

/// Read the image list at `path`. Fails when no usable row is found.
pub fn read_image_records<P: AsRef<Path>>(path: P) -> Result<Vec<ImageRecord>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        ManifestError::InputError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let content = String::from_utf8(bytes).map_err(|_| {
        ManifestError::InputError(format!("{} is not valid UTF-8", path.display()))
    })?;

    let records = parse_image_records(&content)?;
    if records.is_empty() {
        return Err(ManifestError::InputError(format!(
            "No images found in {}",
            path.display()
        )));
    }

    tracing::info!(path = %path.display(), count = records.len(), "read image list");
    Ok(records)
}

/// Parse CSV text into image records, preserving row order.
pub fn parse_image_records(content: &str) -> Result<Vec<ImageRecord>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let delimiter = sniff_delimiter(content);
    tracing::debug!(delimiter = %(delimiter as char).escape_default(), "detected CSV delimiter");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut rows = reader.records();
    let Some(first) = rows.next().transpose()? else {
        return Ok(Vec::new());
    };

    let mut records = Vec::new();
    let layout = ColumnLayout::from_header(&first);
    match layout {
        Some(layout) => {
            tracing::debug!(?layout, "using header row");
            for row in rows {
                let row = row?;
                records.extend(layout.record(&row));
            }
        }
        None => {
            records.extend(first_column_record(&first));
            for row in rows {
                let row = row?;
                records.extend(first_column_record(&row));
            }
        }
    }

    Ok(records)
}

fn first_column_record(row: &StringRecord) -> Option<ImageRecord> {
    ImageRecord::new(row.get(0)?)
}

fn parse_port(cell: &str) -> Option<u16> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<u16>() {
        Ok(port) if port > 0 => Some(port),
        _ => {
            tracing::debug!(value = cell, "ignoring invalid port");
            None
        }
    }
}

/// Pick the delimiter among comma, semicolon, tab and pipe that splits the
/// leading lines most consistently. Falls back to comma.
pub fn sniff_delimiter(content: &str) -> u8 {
    let mut end = content.len().min(CSV_SNIFF_BYTES);
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    let sample = &content[..end];

    let mut lines: Vec<&str> = sample.lines().filter(|l| !l.trim().is_empty()).collect();
    // last line may be cut off by the sample window
    if end < content.len() && lines.len() > 1 {
        lines.pop();
    }
    lines.truncate(SNIFF_MAX_LINES);

    let Some(first_line) = lines.first() else {
        return b',';
    };

    let mut best: Option<(bool, usize, u8)> = None;
    for &candidate in CSV_CANDIDATE_DELIMITERS.iter() {
        let first_count = count_unquoted(first_line, candidate);
        if first_count == 0 {
            continue;
        }
        let consistent = lines
            .iter()
            .all(|line| count_unquoted(line, candidate) == first_count);
        let score = (consistent, first_count, candidate);
        if best.map_or(true, |(c, n, _)| (consistent, first_count) > (c, n)) {
            best = Some(score);
        }
    }

    best.map_or(b',', |(_, _, delimiter)| delimiter)
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    line.bytes()
        .filter(|&b| {
            if b == b'"' {
                in_quotes = !in_quotes;
            }
            !in_quotes && b == delimiter
        })
        .count()
}
