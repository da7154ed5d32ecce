//! End-to-end pipeline builds over temporary source trees with stub
//! renderers.

mod common;

use std::fs;
use std::path::Path;

use plantpress::config::PipelineConfig;
use plantpress::pipeline::Pipeline;

fn config_from(yaml: &str) -> PipelineConfig {
    serde_yaml::from_str(yaml).expect("test config parses")
}

fn write_source(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[tokio::test]
async fn build_renders_matched_diagrams_with_derived_names() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let stub = common::identity_stub(root);

    write_source(root, "diagrams/deploy.puml", "@startuml deploy");
    write_source(root, "diagrams/flow.puml", "@startuml flow");
    write_source(root, "diagrams/notes.txt", "not a diagram");

    let config = config_from(&format!(
        r"
output:
  dir: out
rules:
  - test: 'diagrams/*.puml'
options:
  plantuml:
    renderer: '{}'
",
        stub.display()
    ));

    let report = Pipeline::new(config, root).build().await.unwrap();
    assert_eq!(report.rendered.len(), 2);
    assert!(report.failures.is_empty());

    assert_eq!(
        fs::read_to_string(root.join("out/deploy.svg")).unwrap(),
        "@startuml deploy"
    );
    assert_eq!(
        fs::read_to_string(root.join("out/flow.svg")).unwrap(),
        "@startuml flow"
    );
    assert!(!root.join("out/notes.svg").exists());
}

#[tokio::test]
async fn query_format_flows_into_artifact_names() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let stub = common::identity_stub(root);

    write_source(root, "arch.puml", "@startuml arch");

    let config = config_from(&format!(
        r"
output:
  dir: out
rules:
  - test: '*.puml'
    query: 'format=png'
options:
  plantuml:
    format: svg
    renderer: '{}'
",
        stub.display()
    ));

    let report = Pipeline::new(config, root).build().await.unwrap();
    assert_eq!(report.rendered.len(), 1);
    assert!(root.join("out/arch.png").exists());
    assert!(!root.join("out/arch.svg").exists());
}

#[tokio::test]
async fn first_matching_rule_wins() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let stub = common::identity_stub(root);

    write_source(root, "arch.puml", "@startuml arch");

    let config = config_from(&format!(
        r"
output:
  dir: out
rules:
  - test: 'arch.puml'
    query: 'format=eps'
  - test: '*.puml'
    query: 'format=png'
options:
  plantuml:
    renderer: '{}'
",
        stub.display()
    ));

    let report = Pipeline::new(config, root).build().await.unwrap();
    assert_eq!(report.rendered.len(), 1);
    assert!(root.join("out/arch.eps").exists());
    assert!(!root.join("out/arch.png").exists());
}

#[tokio::test]
async fn per_artifact_failures_do_not_stop_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let identity = common::identity_stub(root);
    let failing = common::failing_stub(root, "no such shape");

    write_source(root, "good/ok.puml", "@startuml ok");
    write_source(root, "bad/broken.puml", "@startuml broken");

    let config = config_from(&format!(
        r"
output:
  dir: out
rules:
  - test: 'good/*.puml'
  - test: 'bad/*.puml'
    options: failing
options:
  plantuml:
    renderer: '{}'
  failing:
    renderer: '{}'
",
        identity.display(),
        failing.display()
    ));

    let report = Pipeline::new(config, root).build().await.unwrap();
    assert_eq!(report.rendered.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert!(root.join("out/ok.svg").exists());
    assert!(!root.join("out/broken.svg").exists());

    let failure = &report.failures[0];
    assert!(failure.to_string().contains("broken.puml"), "{failure}");
    assert!(report.into_result().is_err());
}
