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

use image2deploy::*;
use std::path::{Path, PathBuf};

mod test_utils {
    use super::*;

    pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).expect("write test csv");
        path
    }

    pub fn container_names(deployment: &k8s_openapi::api::apps::v1::Deployment) -> Vec<String> {
        deployment
            .spec
            .as_ref()
            .and_then(|s| s.template.spec.as_ref())
            .map(|p| p.containers.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn container_images(deployment: &k8s_openapi::api::apps::v1::Deployment) -> Vec<String> {
        deployment
            .spec
            .as_ref()
            .and_then(|s| s.template.spec.as_ref())
            .map(|p| {
                p.containers
                    .iter()
                    .map(|c| c.image.clone().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }
}

use test_utils::*;

const HEADER_CSV: &str = "\
image,name,port
icr.io/cpopen/cpd/olm-utils-v3:latest,olm-utils,8080
cp.icr.io/cp/cpd/edb-postgres-license-provider@sha256:abcd,,not-a-port
  ,ignored,1
cp.icr.io/cp/cpd/zen-core:4.8,,9443
";

const PLAIN_CSV: &str = "\
icr.io/cpopen/cpd/olm-utils-v3:latest

cp.icr.io/cp/cpd/edb-postgres-license-provider@sha256:abcd
";

#[test]
fn test_header_csv_yields_image_column_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "images.csv", HEADER_CSV);

    let records = read_image_records(&path).unwrap();
    let images: Vec<&str> = records.iter().map(|r| r.image.as_str()).collect();
    assert_eq!(
        images,
        vec![
            "icr.io/cpopen/cpd/olm-utils-v3:latest",
            "cp.icr.io/cp/cpd/edb-postgres-license-provider@sha256:abcd",
            "cp.icr.io/cp/cpd/zen-core:4.8",
        ]
    );
    assert_eq!(records[1].port, None);
    assert_eq!(records[2].port, Some(9443));
}

#[test]
fn test_headerless_csv_includes_first_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "images.csv", PLAIN_CSV);

    let records = read_image_records(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].image, "icr.io/cpopen/cpd/olm-utils-v3:latest");
}

#[test]
fn test_minimal_manifest_from_header_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "images.csv", HEADER_CSV);

    let pipeline = ManifestPipeline::new(
        OutputProfile::Minimal.default_config("ibm-cp4d"),
        OutputFormat::Yaml,
    )
    .unwrap();
    let deployment = pipeline.build_from_csv(&path).unwrap();

    assert_eq!(
        container_names(&deployment),
        vec!["olm-utils", "edb-postgres-license-provider", "zen-core"]
    );

    let containers = &deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap().containers;
    assert_eq!(containers[0].ports.as_ref().unwrap()[0].container_port, 8080);
    assert!(containers[1].ports.is_none());
    assert!(containers.iter().all(|c| c.resources.is_none()));
}

#[test]
fn test_no_resources_key_when_unconfigured() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "images.csv", PLAIN_CSV);

    let pipeline = ManifestPipeline::new(
        OutputProfile::Minimal.default_config("app"),
        OutputFormat::Yaml,
    )
    .unwrap();
    let yaml = pipeline.render(&pipeline.build_from_csv(&path).unwrap()).unwrap();

    assert!(!yaml.contains("resources"));
    assert!(!yaml.contains("namespace"));
}

#[test]
fn test_colliding_names_get_suffixes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "images.csv",
        "image,name\nr.io/a/db2:1,db2\nr.io/b/db2:2,db2\nr.io/c/other:3,db2\n",
    );

    let pipeline = ManifestPipeline::new(
        OutputProfile::Minimal.default_config("db"),
        OutputFormat::Yaml,
    )
    .unwrap();
    let deployment = pipeline.build_from_csv(&path).unwrap();
    assert_eq!(container_names(&deployment), vec!["db2", "db2-1", "db2-2"]);
}

#[test]
fn test_yaml_round_trip_preserves_containers() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "images.csv", HEADER_CSV);
    let out = dir.path().join("deployment.yaml");

    let mut config = OutputProfile::Extended.default_config("ibm-cp4d");
    config.namespace = Some("cp4d".to_string());
    config.naming = ContainerNaming::Explicit;

    let pipeline = ManifestPipeline::new(config, OutputFormat::Yaml).unwrap();
    let report = pipeline
        .run(&csv, &OutputTarget::File(out.clone()))
        .unwrap();
    assert_eq!(report.containers.len(), 3);

    let text = std::fs::read_to_string(&out).unwrap();
    let parsed = parse_deployment(&text).unwrap();
    assert_eq!(parsed.metadata.namespace.as_deref(), Some("cp4d"));
    assert_eq!(
        container_images(&parsed),
        read_image_records(&csv)
            .unwrap()
            .into_iter()
            .map(|r| r.image)
            .collect::<Vec<_>>()
    );
    assert_eq!(
        container_names(&parsed),
        vec!["olm-utils", "edb-postgres-license-provider", "zen-core"]
    );

    let spec = parsed.spec.unwrap();
    assert_eq!(spec.progress_deadline_seconds, Some(600));
    let pod = spec.template.spec.unwrap();
    // row port wins over the 8080 profile default
    assert_eq!(pod.containers[2].ports.as_ref().unwrap()[0].container_port, 9443);
    assert_eq!(pod.containers[1].ports.as_ref().unwrap()[0].container_port, 8080);
    let resources = pod.containers[0].resources.as_ref().unwrap();
    assert!(resources.limits.is_some() && resources.requests.is_some());
}

#[test]
fn test_empty_csv_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "empty.csv", "image\n  \n,\n");
    let out = dir.path().join("deployment.yaml");

    let pipeline = ManifestPipeline::new(
        OutputProfile::Minimal.default_config("app"),
        OutputFormat::Yaml,
    )
    .unwrap();
    let err = pipeline
        .run(&csv, &OutputTarget::File(out.clone()))
        .unwrap_err();

    assert!(matches!(err, ManifestError::InputError(_)));
    assert_ne!(err.exit_code(), 0);
    assert!(!out.exists());
}

#[test]
fn test_missing_csv_is_input_error() {
    let err = read_image_records("/nonexistent/images.csv").unwrap_err();
    assert!(matches!(err, ManifestError::InputError(_)));
}

#[test]
fn test_invalid_config_rejected_before_reading() {
    let config = OutputProfile::Minimal.default_config("Not_Valid");
    let err = ManifestPipeline::new(config, OutputFormat::Yaml).err().unwrap();
    assert!(matches!(err, ManifestError::ConfigError(_)));
}

#[test]
fn test_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "images.csv", PLAIN_CSV);

    let pipeline = ManifestPipeline::new(
        OutputProfile::Minimal.default_config("app"),
        OutputFormat::Json,
    )
    .unwrap();
    let json = pipeline.render(&pipeline.build_from_csv(&csv).unwrap()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["kind"], "Deployment");
    assert_eq!(value["spec"]["template"]["spec"]["containers"].as_array().unwrap().len(), 2);
}

mod cli {
    use super::test_utils::write_csv;
    use std::process::Command;

    fn image2deploy() -> Command {
        Command::new(env!("CARGO_BIN_EXE_image2deploy"))
    }

    #[test]
    fn test_generate_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(dir.path(), "images.csv", "nginx:1.25\nredis:7\n");

        let output = image2deploy()
            .args(["generate", "--csv"])
            .arg(&csv)
            .args(["--name", "web", "--namespace", "apps"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.starts_with("apiVersion: apps/v1\nkind: Deployment\n"));
        assert!(stdout.contains("namespace: apps"));
        assert!(stdout.contains("name: nginx"));
        assert!(stdout.contains("name: redis"));
    }

    #[test]
    fn test_empty_csv_exits_non_zero() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(dir.path(), "images.csv", "");
        let out = dir.path().join("deployment.yaml");

        let output = image2deploy()
            .args(["generate", "--csv"])
            .arg(&csv)
            .args(["--name", "web", "--out"])
            .arg(&out)
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(3));
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.contains("No images found"));
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_required_argument() {
        let output = image2deploy().args(["generate", "--name", "web"]).output().unwrap();
        assert!(!output.status.success());
    }

    #[test]
    fn test_split_with_two_modes_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_csv(dir.path(), "images.csv", "nginx\n");

        let output = image2deploy()
            .args(["split", "--in"])
            .arg(&csv)
            .args(["--segment", "0", "--contains", "nginx=web"])
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(2));
    }
}
