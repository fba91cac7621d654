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

const MASTER_CSV: &str = "\
image
cp.icr.io/cp/cpd/db2u-operator:11.5
icr.io/cpopen/opensearch/opensearch-operator@sha256:ab12
cp.icr.io/cp/cpd/db2u-instdb:11.5
docker.io/library/busybox:1.36
";

fn write_master(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("master.csv");
    std::fs::write(&path, MASTER_CSV).unwrap();
    path
}

#[test]
fn test_split_by_regex_writes_one_csv_per_group() {
    let dir = tempfile::tempdir().unwrap();
    let master = write_master(dir.path());
    let out_dir = dir.path().join("groups");

    let strategy = GroupingStrategy::regex("(db2u|opensearch)").unwrap();
    let written = SplitPipeline::new(strategy, &out_dir, "images_")
        .run(&master)
        .unwrap();

    let summary: Vec<(&str, usize)> = written.iter().map(|g| (g.key.as_str(), g.rows)).collect();
    assert_eq!(summary, vec![("db2u", 2), ("opensearch", 1), ("ungrouped", 1)]);

    let db2u = std::fs::read_to_string(out_dir.join("images_db2u.csv")).unwrap();
    assert_eq!(
        db2u,
        "image\ncp.icr.io/cp/cpd/db2u-operator:11.5\ncp.icr.io/cp/cpd/db2u-instdb:11.5\n"
    );

    // group files feed straight back into the generator
    let records = read_image_records(out_dir.join("images_ungrouped.csv")).unwrap();
    assert_eq!(records[0].image, "docker.io/library/busybox:1.36");
}

#[test]
fn test_split_by_segment() {
    let dir = tempfile::tempdir().unwrap();
    let master = write_master(dir.path());

    let written = SplitPipeline::new(GroupingStrategy::Segment(1), dir.path(), "seg_")
        .run(&master)
        .unwrap();

    let keys: Vec<&str> = written.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["cp", "cpopen", "library"]);
    assert!(dir.path().join("seg_cpopen.csv").exists());
}

#[test]
fn test_split_by_contains_with_unsafe_group_name() {
    let dir = tempfile::tempdir().unwrap();
    let master = write_master(dir.path());

    let strategy =
        GroupingStrategy::from_options(None, Some("db2u=data/db2,busybox=tools"), None).unwrap();
    let pipeline = SplitPipeline::new(strategy, dir.path(), "images_");
    let written = pipeline.run(&master).unwrap();

    assert_eq!(written[0].key, "data/db2");
    assert_eq!(written[0].path, dir.path().join("images_data_db2.csv"));
    assert!(written.iter().any(|g| g.key == "ungrouped"));
}

#[test]
fn test_colliding_file_names_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let master = write_master(dir.path());
    let out_dir = dir.path().join("groups");

    let strategy =
        GroupingStrategy::from_options(None, Some("db2u=a b,opensearch=a/b"), None).unwrap();
    let err = SplitPipeline::new(strategy, &out_dir, "images_")
        .run(&master)
        .unwrap_err();

    assert!(matches!(err, ManifestError::ValidationError(_)));
    assert!(!out_dir.exists());
}

#[test]
fn test_split_empty_master_is_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("master.csv");
    std::fs::write(&master, "image\n").unwrap();

    let err = SplitPipeline::new(GroupingStrategy::Segment(0), dir.path(), "images_")
        .run(&master)
        .unwrap_err();
    assert_eq!(err.exit_code(), 3);
}
