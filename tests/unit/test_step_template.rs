use insta::assert_snapshot;
use pipeline_fixtures::core::document::{parse_document, Value};
use pipeline_fixtures::core::transform::{
    apply_transform, locate_first_step, rewrite_step_as_template, DocumentTransform,
    RewriteOutcome, StepLookup, StepTemplateTransform,
};
use pipeline_fixtures::core::types::{DocumentFormat, ErrorCategory};
use serde_yaml::value::Tag;

const HTTP_PIPELINE: &str = r#"
pipeline:
  identifier: http_pipeline
  name: http pipeline
  stages:
    - stage:
        identifier: call
        type: Custom
        spec:
          execution:
            steps:
              - step:
                  identifier: s1
                  type: Http
                  spec:
                    url: https://x
              - step:
                  identifier: s2
                  type: ShellScript
"#;

fn yaml(text: &str) -> Value {
    parse_document(text, DocumentFormat::Yaml).expect("parse yaml")
}

fn first_step(doc: &Value) -> Value {
    match locate_first_step(doc) {
        StepLookup::Found { node, .. } => Value::Mapping(node.clone()),
        StepLookup::Missing(missing) => panic!("no step: {}", missing),
    }
}

#[test]
fn identifier_is_hoisted_and_fields_are_wrapped() {
    let rewritten = rewrite_step_as_template(&yaml(HTTP_PIPELINE)).expect("rewrite");
    let expected = yaml(
        r#"
identifier: s1
template:
  templateInputs:
    type: Http
    spec:
      url: https://x
"#,
    );
    assert_eq!(first_step(&rewritten), expected);

    let inputs = first_step(&rewritten)["template"]["templateInputs"].clone();
    assert!(inputs.get("identifier").is_none());
}

#[test]
fn rewriting_twice_equals_rewriting_once() {
    let once = rewrite_step_as_template(&yaml(HTTP_PIPELINE)).expect("first rewrite");
    let twice = rewrite_step_as_template(&once).expect("second rewrite");
    assert_eq!(once, twice);
}

#[test]
fn already_templated_step_is_reported() {
    let once = rewrite_step_as_template(&yaml(HTTP_PIPELINE)).expect("rewrite");
    let outcome = StepTemplateTransform.rewrite(&once).expect("outcome");
    assert_eq!(outcome, RewriteOutcome::AlreadyTemplated);
}

#[test]
fn input_document_is_left_untouched() {
    let original = yaml(HTTP_PIPELINE);
    let snapshot = original.clone();
    let rewritten = rewrite_step_as_template(&original).expect("rewrite");
    assert_eq!(original, snapshot);
    assert_ne!(original, rewritten);
}

#[test]
fn only_the_first_step_changes() {
    let original = yaml(HTTP_PIPELINE);
    let rewritten = rewrite_step_as_template(&original).expect("rewrite");
    let steps = "pipeline.stages[0].stage.spec.execution.steps";
    let original_steps = &original["pipeline"]["stages"][0]["stage"]["spec"]["execution"]["steps"];
    let rewritten_steps = &rewritten["pipeline"]["stages"][0]["stage"]["spec"]["execution"]["steps"];
    assert_eq!(original_steps[1], rewritten_steps[1], "{}[1] changed", steps);
    assert_eq!(original["pipeline"]["name"], rewritten["pipeline"]["name"]);
}

#[test]
fn missing_step_path_is_a_shape_mismatch() {
    let doc = yaml(
        r#"
pipeline:
  identifier: empty
  stages:
    - stage:
        identifier: build
        spec:
          execution:
            steps: []
"#,
    );
    let err = rewrite_step_as_template(&doc).expect_err("no steps should fail");
    assert_eq!(err.category, ErrorCategory::ShapeMismatch);
    assert_eq!(err.code, "FIX-SHAPE-001");
    assert_snapshot!(
        err.message,
        @"pipeline document has no step at pipeline.stages[0].stage.spec.execution.steps[0].step: expected non-empty sequence at 'pipeline.stages[0].stage.spec.execution.steps'"
    );
}

#[test]
fn empty_document_is_a_shape_mismatch() {
    let err = rewrite_step_as_template(&yaml("{}")).expect_err("empty should fail");
    assert_eq!(err.code, "FIX-SHAPE-001");
    assert!(err.message.contains("expected key 'pipeline' at '<root>'"));
}

#[test]
fn step_without_identifier_is_rejected() {
    let doc = yaml(
        r#"
pipeline:
  stages:
    - stage:
        spec:
          execution:
            steps:
              - step:
                  type: Http
"#,
    );
    let err = rewrite_step_as_template(&doc).expect_err("identifier required");
    assert_eq!(err.category, ErrorCategory::ShapeMismatch);
    assert_eq!(err.code, "FIX-SHAPE-002");
}

#[test]
fn step_with_only_identifier_gets_empty_inputs() {
    let doc = yaml(
        r#"
pipeline:
  stages:
    - stage:
        spec:
          execution:
            steps:
              - step:
                  identifier: bare
"#,
    );
    let rewritten = rewrite_step_as_template(&doc).expect("rewrite");
    assert_eq!(
        first_step(&rewritten),
        yaml("identifier: bare\ntemplate:\n  templateInputs: {}\n")
    );
}

#[test]
fn transform_trait_and_span_wrapper_agree() {
    let doc = yaml(HTTP_PIPELINE);
    let transform = StepTemplateTransform;
    assert_eq!(transform.name(), "StepTemplateTransform");
    assert_eq!(
        apply_transform(&doc, &transform).expect("apply"),
        transform.transform(&doc).expect("transform")
    );
}

#[test]
fn tagged_step_keeps_its_tag() {
    let doc = yaml(
        r#"
pipeline:
  stages:
    - stage:
        spec:
          execution:
            steps:
              - step: !s {identifier: s1, type: Http}
"#,
    );
    let rewritten = rewrite_step_as_template(&doc).expect("rewrite");
    let step = &rewritten["pipeline"]["stages"][0]["stage"]["spec"]["execution"]["steps"][0]["step"];
    match step {
        Value::Tagged(tagged) => {
            assert_eq!(tagged.tag, Tag::new("!s"));
            assert_eq!(tagged.value["identifier"].as_str(), Some("s1"));
            assert_eq!(
                tagged.value["template"]["templateInputs"]["type"].as_str(),
                Some("Http")
            );
            assert!(tagged.value["template"]["templateInputs"].get("identifier").is_none());
        }
        other => panic!("step lost its tag: {:?}", other),
    }
    assert_eq!(rewrite_step_as_template(&rewritten).expect("second rewrite"), rewritten);
}
