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

//! Output destinations

use crate::shared::error::{ManifestError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_path(path: Option<&str>) -> Self {
        match path {
            Some(p) if p != "-" => OutputTarget::File(PathBuf::from(p)),
            _ => OutputTarget::Stdout,
        }
    }

    pub fn write(&self, content: &[u8]) -> Result<()> {
        match self {
            OutputTarget::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(content)
                    .and_then(|_| stdout.flush())
                    .map_err(|e| {
                        ManifestError::OutputError(format!("Failed to write to stdout: {}", e))
                    })
            }
            OutputTarget::File(path) => write_atomic(path, content),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            OutputTarget::Stdout => "<stdout>".to_string(),
            OutputTarget::File(path) => path.display().to_string(),
        }
    }
}

/// Write `content` to a temporary file next to `path`, then rename it into
/// place. `path` is left untouched on failure.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let output_error = |e: std::io::Error| {
        ManifestError::OutputError(format!("Failed to write {}: {}", path.display(), e))
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(output_error)?;
    tmp.write_all(content).map_err(output_error)?;
    tmp.as_file().sync_all().map_err(output_error)?;
    tmp.persist(path).map_err(|e| output_error(e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        ManifestError::OutputError(format!(
            "Failed to create directory {}: {}",
            dir.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(OutputTarget::from_path(None), OutputTarget::Stdout);
        assert_eq!(OutputTarget::from_path(Some("-")), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_path(Some("deployment.yaml")),
            OutputTarget::File(PathBuf::from("deployment.yaml"))
        );
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployment.yaml");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, b"kind: Deployment\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kind: Deployment\n");
        // no stray temp files left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_dir_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("deployment.yaml");
        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, ManifestError::OutputError(_)));
        assert!(!path.exists());
    }
}
