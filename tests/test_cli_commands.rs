//! Binary-level tests: subcommand behavior and exit codes.

mod common;

use std::fs;

#[test]
fn version_prints_name_and_version() {
    let output = common::spawn_cli(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("plantpress"), "stdout: {stdout}");
}

#[test]
fn version_json_output_parses() {
    let output = common::spawn_cli(&["version", "--format", "json"]);
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("version --format json emits JSON");
    assert_eq!(parsed["name"], "plantpress");
}

#[test]
fn completions_emit_a_script() {
    let output = common::spawn_cli(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("plantpress"));
}

#[test]
fn validate_accepts_a_valid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("plantpress.yaml");
    fs::write(
        &config,
        "rules:\n  - test: '**/*.puml'\noptions:\n  plantuml:\n    format: svg\n",
    )
    .unwrap();

    let output = common::spawn_cli(&["validate", config.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn validate_rejects_an_invalid_config_with_config_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("plantpress.yaml");
    fs::write(&config, "jobs: 0\n").unwrap();

    let output = common::spawn_cli(&["validate", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).contains("invalid"));
}

#[test]
fn validate_json_reports_issues() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("plantpress.yaml");
    fs::write(&config, "jobs: 0\n").unwrap();

    let output = common::spawn_cli(&["validate", "--format", "json", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("validate --format json emits JSON");
    assert_eq!(parsed["valid"], false);
    assert!(!parsed["errors"].as_array().unwrap().is_empty());
}

#[test]
fn render_writes_rendered_bytes_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let stub = common::identity_stub(root);

    let config = root.join("plantpress.yaml");
    fs::write(
        &config,
        format!("options:\n  plantuml:\n    renderer: '{}'\n", stub.display()),
    )
    .unwrap();

    let input = root.join("seq.puml");
    fs::write(&input, "@startuml\nAlice -> Bob\n@enduml\n").unwrap();

    let output = common::spawn_cli(&[
        "render",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(output.stdout, b"@startuml\nAlice -> Bob\n@enduml\n");
}

#[test]
fn render_spawn_failure_maps_to_render_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let config = root.join("plantpress.yaml");
    fs::write(
        &config,
        "options:\n  plantuml:\n    renderer: plantpress-test-missing-renderer\n",
    )
    .unwrap();

    let input = root.join("seq.puml");
    fs::write(&input, "@startuml\n@enduml\n").unwrap();

    let output = common::spawn_cli(&[
        "render",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(4));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("failed to spawn"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn build_renders_a_source_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let stub = common::identity_stub(root);

    fs::create_dir_all(root.join("diagrams")).unwrap();
    fs::write(root.join("diagrams/deploy.puml"), "@startuml deploy").unwrap();

    let config = root.join("plantpress.yaml");
    fs::write(
        &config,
        format!(
            "output:\n  dir: out\nrules:\n  - test: 'diagrams/*.puml'\noptions:\n  plantuml:\n    renderer: '{}'\n",
            stub.display()
        ),
    )
    .unwrap();

    let output = common::spawn_cli_in(root, &["build", "--config", config.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        fs::read_to_string(root.join("out/deploy.svg")).unwrap(),
        "@startuml deploy"
    );
}

#[test]
fn build_fails_when_an_artifact_fails() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let failing = common::failing_stub(root, "syntax error");

    fs::create_dir_all(root.join("diagrams")).unwrap();
    fs::write(root.join("diagrams/broken.puml"), "@startuml broken").unwrap();

    let config = root.join("plantpress.yaml");
    fs::write(
        &config,
        format!(
            "output:\n  dir: out\nrules:\n  - test: 'diagrams/*.puml'\noptions:\n  plantuml:\n    renderer: '{}'\n",
            failing.display()
        ),
    )
    .unwrap();

    let output = common::spawn_cli_in(root, &["build", "--config", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(4));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("failed to render"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
