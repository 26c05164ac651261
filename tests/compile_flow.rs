use saywhat_rust::model::{self, Project, Sequence};
use saywhat_rust::processor::{self, ErrorKind};
use saywhat_rust::writer;

const SCRIPT: &str = "Character: Hello!\n\
    [if has_met_character] Character: It's nice to meet you.\n\
    # This is a comment\n\
    [do has_met_character = true]\n\
    \n\
    Can you repeat that? -> Start\n\
    That's all for now -> END";

#[test]
fn lint_then_compile_then_export() {
    // a clean script lints clean
    assert!(processor::validate(SCRIPT).is_empty());

    let node = processor::compile(SCRIPT, "Start").expect("script compiles");
    assert_eq!(node.lines.len(), 4);
    assert_eq!(node.responses.len(), 2);

    let node_id = node.id.clone();
    let project = Project {
        saved_with_version: model::SAVED_WITH_VERSION,
        sequences: vec![Sequence {
            id: model::new_id(),
            name: "Generated Sequence".to_string(),
            updated_at: None,
            nodes: vec![node],
        }],
    };

    let document: serde_json::Value =
        serde_json::from_str(&writer::json::emit(&project, false)).unwrap();
    let sequence_id = project.sequences[0].id.as_str();
    let nodes = &document[sequence_id]["nodes"];

    // the compiled node's id addresses its first line
    let entry = &nodes[node_id.as_str()];
    assert_eq!(entry["type"], "dialogue");
    assert_eq!(entry["dialogue"], "Hello!");

    // "-> Start" resolved against the node itself while compiling
    let responses_unit = nodes
        .as_object()
        .unwrap()
        .values()
        .find(|unit| unit["type"] == "responses")
        .expect("one responses unit");
    assert_eq!(responses_unit["responses"][0]["prompt"], "Can you repeat that?");
    assert_eq!(responses_unit["responses"][0]["nextNodeId"], node_id.as_str());
    assert!(responses_unit["responses"][1]["nextNodeId"].is_null());

    // the comment line exports nowhere
    assert_eq!(nodes.as_object().unwrap().len(), 4);
}

#[test]
fn broken_scripts_report_positions_not_panics() {
    let script = "Character: Hello!\n[if broken\n\nok -> Somewhere\n[do broken";

    let diagnostics = processor::validate(script);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].line, 2);
    assert_eq!(diagnostics[0].kind, ErrorKind::MalformedConditional);
    assert_eq!(diagnostics[1].line, 5);
    assert_eq!(diagnostics[1].kind, ErrorKind::MalformedMutation);

    // compile stops at the first error and keeps the script's numbering
    let err = processor::compile(script, "Broken").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedConditional);
    assert_eq!(err.line, 2);
    assert_eq!(err.to_string(), "Malformed conditional on line 2");
}

#[test]
fn compile_errors_in_the_response_block_keep_script_lines() {
    let script = "Character: Hello!\n\nFine -> END\n[if broken";
    let err = processor::compile(script, "Start").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedConditional);
    assert_eq!(err.line, 4);
}
