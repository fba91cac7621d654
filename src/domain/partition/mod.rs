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

//! Image list partitioning

pub mod strategy;

pub use self::strategy::{parse_contains_mapping, safe_file_key, GroupingStrategy};

use std::collections::HashMap;

/// Images sharing one grouping key, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub key: String,
    pub images: Vec<String>,
}

/// Split `images` into buckets, ordered by first appearance of each key.
pub fn partition<'a, I>(images: I, strategy: &GroupingStrategy) -> Vec<Bucket>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for image in images {
        let key = strategy.key_for(image);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(Bucket {
                key,
                images: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[slot].images.push(image.to_string());
    }

    buckets
}
