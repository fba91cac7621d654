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

/// Deployment resource
pub const API_VERSION_APPS_V1: &str = "apps/v1";
pub const KIND_DEPLOYMENT: &str = "Deployment";

/// Resource labels
pub const LABEL_APP: &str = "app";

/// Deployment strategy
pub const STRATEGY_TYPE_ROLLING_UPDATE: &str = "RollingUpdate";

/// Container ports
pub const PROTOCOL_TCP: &str = "TCP";

/// Resource quantity keys
pub const RESOURCE_CPU: &str = "cpu";
pub const RESOURCE_MEMORY: &str = "memory";

/// Extended profile defaults
pub const EXTENDED_CONTAINER_PORT: u16 = 8080;
pub const EXTENDED_PROGRESS_DEADLINE_SECONDS: i32 = 600;
pub const EXTENDED_REVISION_HISTORY_LIMIT: i32 = 10;
pub const EXTENDED_MAX_SURGE: &str = "25%";
pub const EXTENDED_MAX_UNAVAILABLE: &str = "25%";
pub const EXTENDED_REQUESTS_CPU: &str = "450m";
pub const EXTENDED_REQUESTS_MEMORY: &str = "512Mi";
pub const EXTENDED_LIMITS_CPU: &str = "500m";
pub const EXTENDED_LIMITS_MEMORY: &str = "512Mi";

/// Security context
pub const SECURITY_PRIVILEGED: bool = false;

/// Container name fallback when an image yields no usable characters
pub const CONTAINER_NAME_FALLBACK: &str = "ctr";

/// Partitioner
pub const UNGROUPED_BUCKET: &str = "ungrouped";
pub const DEFAULT_GROUP_PREFIX: &str = "images_";
pub const DEFAULT_GROUP_DIR: &str = "groups";
pub const GROUP_CSV_HEADER: &str = "image";

/// CSV sniffing
pub const CSV_SNIFF_BYTES: usize = 2048;
pub const CSV_CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];
