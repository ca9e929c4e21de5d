use assert_cmd::Command;
use hclgen::test_utils::TestProject;
use predicates::prelude::*;

fn hclgen(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("hclgen").unwrap();
    cmd.current_dir(project.path())
        .env_remove("HCLGEN_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

const BUCKET_TEMPLATE: &str = r#"resource "google_storage_bucket" "{{ resourceName(m=bucket, key="name") }}" {
  {{ hclField(m=bucket, key="location") }}
  {{ hclField(m=bucket, key="force_destroy") }}
}
"#;

/// Test listing every registered function
#[test]
fn test_functions_lists_registry() {
    let project = TestProject::new().unwrap();

    hclgen(&project)
        .arg("functions")
        .assert()
        .success()
        .stdout(predicate::str::contains("get(m, key, default?)"))
        .stdout(predicate::str::contains("merge(sources...)"))
        .stdout(predicate::str::contains("regexReplaceAll(regex, s, repl)"))
        .stdout(predicate::str::contains("uuid()"));
}

#[test]
fn test_functions_names_only() {
    let project = TestProject::new().unwrap();

    let output = hclgen(&project).args(["functions", "--names-only"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(names.len(), 16);
    assert!(names.contains(&"getEncodedEscapedJSON"));
    assert!(names.contains(&"trimSpace"));
}

/// Test rendering with two data files where the later file wins
#[test]
fn test_render_merges_data_files_in_order() {
    let project = TestProject::new().unwrap();
    project.write("bucket.tf.tmpl", BUCKET_TEMPLATE).unwrap();
    project
        .write("defaults.yaml", "bucket:\n  location: EU\n  force_destroy: false\n")
        .unwrap();
    project.write("prod.json", r#"{"bucket": {"name": "Prod Logs", "force_destroy": true}}"#).unwrap();

    hclgen(&project)
        .args(["render", "bucket.tf.tmpl", "--data", "defaults.yaml", "--data", "prod.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"resource "google_storage_bucket" "prod_logs" {"#))
        .stdout(predicate::str::contains(r#"location = "EU""#))
        .stdout(predicate::str::contains("force_destroy = true"));
}

/// Test that `hclgen.toml` supplies data files and the output path
#[test]
fn test_render_uses_config_file() {
    let project = TestProject::new().unwrap();
    project.write("bucket.tf.tmpl", BUCKET_TEMPLATE).unwrap();
    project.write("data/bucket.toml", "[bucket]\nname = \"Archive\"\nlocation = \"US\"\n").unwrap();
    project
        .write("hclgen.toml", "data = [\"data/bucket.toml\"]\noutput = \"out/main.tf\"\n")
        .unwrap();

    hclgen(&project).args(["render", "bucket.tf.tmpl"]).assert().success().stdout("");

    let rendered = project.read("out/main.tf").unwrap();
    assert!(rendered.contains(r#""archive""#));
    assert!(rendered.contains(r#"location = "US""#));
    assert!(!rendered.contains("force_destroy"));
}

/// Test that `--data` replaces the configured data list
#[test]
fn test_render_data_flag_overrides_config() {
    let project = TestProject::new().unwrap();
    project.write("bucket.tf.tmpl", BUCKET_TEMPLATE).unwrap();
    project.write("config-data.yaml", "bucket:\n  name: From Config\n").unwrap();
    project.write("flag-data.yaml", "bucket:\n  name: From Flag\n").unwrap();
    project.write("settings.toml", "data = [\"config-data.yaml\"]\n").unwrap();

    hclgen(&project)
        .args(["--config", "settings.toml", "render", "bucket.tf.tmpl", "--data", "flag-data.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from_flag"))
        .stdout(predicate::str::contains("from_config").not());
}

/// Test that a failing function aborts the render with its context
#[test]
fn test_render_function_failure_reports_context() {
    let project = TestProject::new().unwrap();
    project.write("bucket.tf.tmpl", BUCKET_TEMPLATE).unwrap();
    project.write("data.yaml", "bucket:\n  location: EU\n").unwrap();

    hclgen(&project)
        .args(["render", "bucket.tf.tmpl", "--data", "data.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("Failed to render bucket.tf.tmpl"))
        .stderr(predicate::str::contains(r#""resource_name" nor "name""#))
        .stderr(predicate::str::contains("Add one of the listed keys"));
}

#[test]
fn test_render_missing_data_file() {
    let project = TestProject::new().unwrap();
    project.write("bucket.tf.tmpl", BUCKET_TEMPLATE).unwrap();

    hclgen(&project)
        .args(["render", "bucket.tf.tmpl", "--data", "absent.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load data files"))
        .stderr(predicate::str::contains("absent.yaml"));
}

#[test]
fn test_render_rejects_non_mapping_data() {
    let project = TestProject::new().unwrap();
    project.write("bucket.tf.tmpl", BUCKET_TEMPLATE).unwrap();
    project.write("list.yaml", "- a\n- b\n").unwrap();

    hclgen(&project)
        .args(["render", "bucket.tf.tmpl", "--data", "list.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must contain a mapping at its root"));
}

#[test]
fn test_invalid_config_is_reported() {
    let project = TestProject::new().unwrap();
    project.write("bucket.tf.tmpl", BUCKET_TEMPLATE).unwrap();
    project.write("hclgen.toml", "unknown_key = 1\n").unwrap();

    hclgen(&project)
        .args(["render", "bucket.tf.tmpl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"))
        .stderr(predicate::str::contains("Check the TOML syntax"));
}
