use hclgen::core::{CallError, FuncError};
use hclgen::funcs::{Mapping, merge};
use hclgen::templating::{TemplateError, TemplateRenderer};
use hclgen::test_utils::{
    FIXED_NOW, FIXED_UUID, TestProject, fixed_registry, init_test_logging, sample_service,
};
use serde_json::json;
use std::sync::Arc;

fn renderer() -> TemplateRenderer {
    init_test_logging(None);
    TemplateRenderer::new(Arc::new(fixed_registry()))
}

fn context() -> Mapping {
    let mut data = Mapping::new();
    data.insert("service".to_string(), serde_json::Value::Object(sample_service()));
    data
}

fn squash(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn test_render_storage_bucket_resource() {
    let template = r#"resource "google_storage_bucket" "{{ resourceName(m=service, key="name") }}" {
  {{ hclField(m=service.storage, key="location") }}
  {{ hclField(m=service.storage, key="force_destroy") }}
  {{ hclField(m=service.storage, key="retention") }}
  description = {{ schemaDescription(s=service.description) }}
}"#;

    let out = renderer().render_str(template, &context()).unwrap();

    assert!(out.starts_with(r#"resource "google_storage_bucket" "my_service_" {"#));
    assert!(out.contains(r#"location = "EU""#));
    assert!(out.contains("force_destroy = true"));
    assert!(!out.contains("retention"));
    assert!(out.contains(r#"description = "Primary API service""#));
}

#[test]
fn test_render_resource_with_mapping_field_is_valid_hcl() {
    let mut data = context();
    data.insert(
        "iam".to_string(),
        json!({"members": ["serviceAccount:${google_service_account.api.email}"]}),
    );

    let template = r#"resource "google_storage_bucket" "{{ resourceName(m=service, key="name") }}" {
  {{ hclField(m=service, key="labels") }}
  {{ hclField(m=service.storage, key="versioning") }}
  {{ hclField(m=iam, key="members") }}
}"#;

    let out = renderer().render_str(template, &data).unwrap();
    assert!(out.contains("${google_service_account.api.email}"), "{out}");
    assert!(!out.contains("$${"), "{out}");

    let body = hcl::parse(&out).unwrap();
    let block = body.blocks().next().unwrap();
    let names: Vec<&str> = block.body().attributes().map(|attr| attr.key()).collect();
    assert_eq!(names, ["labels", "versioning", "members"]);
}

#[test]
fn test_render_merged_labels_as_hcl() {
    let defaults = json!({"labels": {"team": "platform", "managed_by": "hclgen"}});
    let mut data = context();
    data.insert("defaults".to_string(), defaults);

    let out = renderer()
        .render_str(
            r#"{% set merged = merge(sources=[defaults, service]) %}{{ hcl(value=merged) }}"#,
            &data,
        )
        .unwrap();
    let out = squash(&out);

    // service.labels.team overrides the default; managed_by survives.
    assert!(out.contains(r#""core""#), "{out}");
    assert!(out.contains(r#""hclgen""#), "{out}");
    assert!(!out.contains("platform"), "{out}");
}

#[test]
fn test_render_json_helpers() {
    let mut data = Mapping::new();
    data.insert("policy".to_string(), json!({"role": "viewer", "note": "say \"hi\""}));

    let out = renderer()
        .render_str(
            r#"{{ getEncodedJSON(m=policy) }}|{{ getEncodedEscapedJSON(m=policy) }}"#,
            &data,
        )
        .unwrap();

    let (plain, escaped) = out.split_once('|').unwrap();
    let parsed: serde_json::Value = serde_json::from_str(plain).unwrap();
    assert_eq!(parsed, json!({"role": "viewer", "note": "say \"hi\""}));
    assert!(escaped.starts_with(r#"{\"note\""#) || escaped.starts_with(r#"{\"role\""#));
    assert!(escaped.contains(r#"\\\"hi\\\""#));
}

#[test]
fn test_render_string_helpers() {
    let mut data = Mapping::new();
    data.insert("image".to_string(), json!("  gcr.io/demo/api:1.2.3  "));

    let template = concat!(
        r#"{% set image = trimSpace(s=image) %}{{ image }}|"#,
        r#"{{ regexReplaceAll(regex=":(\d+)\.\d+\.\d+", s=image, repl=":v$1") }}|"#,
        r#"{{ replace(s="a-b-c", old="-", new="_") }}|"#,
        r#"{{ substr(s="abcdef", start=2, length=10) }}"#,
    );
    let out = renderer().render_str(template, &data).unwrap();
    assert_eq!(out, "gcr.io/demo/api:1.2.3|gcr.io/demo/api:v1|a_b_c|cdef");
}

#[test]
fn test_render_make_slice_in_loop() {
    let out = renderer()
        .render_str(
            r#"{% for z in makeSlice(args=["a", "b", "c"]) %}{{ z }}{% endfor %}"#,
            &Mapping::new(),
        )
        .unwrap();
    assert_eq!(out, "abc");
}

#[test]
fn test_render_now_and_uuid_are_injected() {
    let out = renderer().render_str("{{ now() }} {{ uuid() }}", &Mapping::new()).unwrap();
    assert_eq!(out, format!("{FIXED_NOW} {FIXED_UUID}"));
}

#[test]
fn test_render_get_through_scalar_fails() {
    let err = renderer()
        .render_str(r#"{{ get(m=service, key="name.first") }}"#, &context())
        .unwrap_err();

    let causes = err.causes().join("\n");
    assert!(causes.contains("get("), "{causes}");
    assert!(causes.contains("path 'name'"), "{causes}");

    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(&err);
    let mut found = false;
    while let Some(e) = current {
        if let Some(call) = e.downcast_ref::<CallError>() {
            found = matches!(call.func_error(), Some(FuncError::TypeMismatch { .. }));
            break;
        }
        current = e.source();
    }
    assert!(found, "expected a TypeMismatch in {causes}");
}

#[test]
fn test_render_missing_resource_name_fails() {
    let mut data = Mapping::new();
    data.insert("thing".to_string(), json!({"id": 1}));

    let err = renderer()
        .render_str(r#"{{ resourceName(m=thing, key="name") }}"#, &data)
        .unwrap_err();
    let causes = err.causes().join("\n");
    assert!(causes.contains(r#""resource_name" nor "name""#), "{causes}");
}

#[test]
fn test_render_file_from_project() {
    let project = TestProject::new().unwrap();
    let path = project
        .write(
            "templates/topic.tf.tmpl",
            r#"resource "google_pubsub_topic" "{{ resourceName(m=topic, key="name") }}" {}"#,
        )
        .unwrap();

    let mut data = Mapping::new();
    data.insert("topic".to_string(), json!({"name": "Orders-Events"}));

    let out = renderer().render_file(&path, &data).unwrap();
    assert_eq!(out, r#"resource "google_pubsub_topic" "orders_events" {}"#);
}

#[test]
fn test_render_file_missing_is_read_error() {
    let project = TestProject::new().unwrap();
    let err = renderer().render_file(&project.join("absent.tmpl"), &Mapping::new()).unwrap_err();
    assert!(matches!(err, TemplateError::Read { .. }));
}

#[test]
fn test_merge_is_usable_outside_templates() {
    let service = sample_service();
    let override_map: Mapping =
        serde_json::from_value(json!({"storage": {"location": "US"}})).unwrap();

    let merged = merge([&service, &override_map]);
    assert_eq!(merged["storage"]["location"], json!("US"));
    assert_eq!(merged["storage"]["force_destroy"], json!(true));
    assert_eq!(service["storage"]["location"], json!("EU"));
}
