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

//! Container name derivation from image references

use crate::infrastructure::constants::CONTAINER_NAME_FALLBACK;
use regex::Regex;
use std::sync::LazyLock;

static INVALID_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9.-]+").expect("static pattern is valid"));

/// Derive a DNS-1123 compatible container name from an image reference.
///
/// Uses the repository part of the final path segment (tag and digest
/// removed). Never fails: a reference without usable characters yields
/// [`CONTAINER_NAME_FALLBACK`].
pub fn sanitize_name(image: &str) -> String {
    let segment = image.rsplit('/').next().unwrap_or_default();
    let segment = segment.split('@').next().unwrap_or_default();
    let segment = segment.split(':').next().unwrap_or_default();

    let lowered = segment.to_lowercase();
    let replaced = INVALID_NAME_CHARS.replace_all(&lowered, "-");
    let trimmed = replaced.trim_matches(|c: char| !c.is_ascii_alphanumeric());

    if trimmed.is_empty() {
        CONTAINER_NAME_FALLBACK.to_string()
    } else {
        trimmed.to_string()
    }
}
