//! Emit the XML export: one `<sequence>` element per sequence, one
//! `<node>` element per unit.

use crate::model::{Project, non_empty};
use crate::processor::export::{self, ExportUnit, UnitKind};
use crate::writer::XML_DECLARATION;

/// Render a project as the XML document.
pub fn emit(project: &Project) -> String {
    let mut body = String::new();
    for sequence in export::build_project(project) {
        body.push_str(&format!("<sequence id=\"{}\">", sequence.id));
        for unit in &sequence.units {
            body.push_str(&render_unit(unit));
        }
        body.push_str("</sequence>");
    }
    format!("{XML_DECLARATION}\n<sequences>{body}</sequences>")
}

fn render_unit(unit: &ExportUnit) -> String {
    if unit.kind == UnitKind::Responses {
        return render_responses(unit);
    }

    let next = unit.next_node_id.as_deref().unwrap_or_default();
    let inner = match unit.kind {
        UnitKind::Mutation => format!(
            "<mutation do=\"{}\" nextNodeId=\"{}\" />",
            unit.mutation.as_deref().unwrap_or_default(),
            next
        ),
        UnitKind::Goto => format!(
            "<goto if=\"{}\" goToNodeId=\"{}\" nextNodeId=\"{}\" />",
            unit.condition.as_deref().unwrap_or_default(),
            unit.goto_node_id
                .as_ref()
                .and_then(|target| target.as_deref())
                .unwrap_or_default(),
            next
        ),
        _ => format!(
            "<dialogue {} character=\"{}\" nextNodeId=\"{}\">{}</dialogue>",
            condition_attribute(&unit.condition),
            unit.character.as_deref().unwrap_or_default(),
            next,
            unit.dialogue.as_deref().unwrap_or_default()
        ),
    };
    format!(
        "<node id=\"{}\" type=\"{}\">{}</node>",
        unit.id,
        unit.kind.tag(),
        inner
    )
}

fn render_responses(unit: &ExportUnit) -> String {
    let mut entries = String::new();
    for branch in &unit.responses {
        entries.push_str(&format!(
            "<response {} nextNodeId=\"{}\">{}</response>",
            condition_attribute(&branch.condition),
            branch.next_node_id.as_deref().unwrap_or_default(),
            branch.prompt.as_deref().unwrap_or_default()
        ));
    }
    format!(
        "\n              <node id=\"{}\" type=\"responses\">\n                  <responses>\n                    {}\n                  </responses>\n                </node>",
        unit.id, entries
    )
}

fn condition_attribute(condition: &Option<String>) -> String {
    match non_empty(condition) {
        Some(condition) => format!("if=\"{condition}\""),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Node, Response, Sequence};

    fn sample_project() -> Project {
        Project {
            saved_with_version: 1.7,
            sequences: vec![Sequence {
                id: "s1".to_string(),
                name: "Chapter One".to_string(),
                updated_at: None,
                nodes: vec![Node {
                    id: "n1".to_string(),
                    name: "Intro".to_string(),
                    updated_at: None,
                    lines: vec![
                        Line {
                            id: "l1".to_string(),
                            character: Some("Ann".to_string()),
                            dialogue: Some("Hi".to_string()),
                            ..Default::default()
                        },
                        Line {
                            id: "l2".to_string(),
                            mutation: Some("seen = true".to_string()),
                            ..Default::default()
                        },
                    ],
                    responses: vec![Response {
                        id: "r1".to_string(),
                        prompt: Some("Bye".to_string()),
                        go_to_node_name: Some("END".to_string()),
                        ..Default::default()
                    }],
                }],
            }],
        }
    }

    #[test]
    fn test_emit() {
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "\n",
            "<sequences><sequence id=\"s1\">",
            "<node id=\"n1\" type=\"dialogue\"><dialogue  character=\"Ann\" nextNodeId=\"l2\">Hi</dialogue></node>",
            "<node id=\"l2\" type=\"mutation\"><mutation do=\"seen = true\" nextNodeId=\"r1\" /></node>",
            "\n              <node id=\"r1\" type=\"responses\">",
            "\n                  <responses>",
            "\n                    <response  nextNodeId=\"\">Bye</response>",
            "\n                  </responses>",
            "\n                </node>",
            "</sequence></sequences>"
        );
        assert_eq!(emit(&sample_project()), expected);
    }

    #[test]
    fn test_conditioned_dialogue_has_if_attribute() {
        let mut project = sample_project();
        project.sequences[0].nodes[0].lines[0].condition = Some("met".to_string());

        let document = emit(&project);
        assert!(document.contains("<dialogue if=\"met\" character=\"Ann\""));
    }

    #[test]
    fn test_goto_element() {
        let project = Project {
            saved_with_version: 1.7,
            sequences: vec![Sequence {
                id: "s1".to_string(),
                name: "Seq".to_string(),
                updated_at: None,
                nodes: vec![
                    Node {
                        id: "n1".to_string(),
                        name: "Start".to_string(),
                        updated_at: None,
                        lines: vec![Line {
                            id: "l1".to_string(),
                            go_to_node_name: Some("Cave".to_string()),
                            go_to_node_id: Some("n2".to_string()),
                            ..Default::default()
                        }],
                        responses: Vec::new(),
                    },
                    Node {
                        id: "n2".to_string(),
                        name: "Cave".to_string(),
                        updated_at: None,
                        lines: Vec::new(),
                        responses: Vec::new(),
                    },
                ],
            }],
        };

        let document = emit(&project);
        assert!(document.contains(
            "<node id=\"n1\" type=\"goto\"><goto if=\"\" goToNodeId=\"n2\" nextNodeId=\"\" /></node>"
        ));
    }
}
