//! Emit the .resx translation sheet.
//!
//! One `<data>` entry per distinct character name plus one per unit
//! with spoken dialogue, keyed by the exported unit id so translations
//! survive node edits.

use std::collections::HashSet;

use crate::model::Project;
use crate::processor::export;
use crate::writer::XML_DECLARATION;

const RESX_HEADER: &str = r#"    <root>
      <resheader name="resmimetype">
          <value>text/microsoft-resx</value>
      </resheader>
      <resheader name="version">
          <value>2.0</value>
      </resheader>
      <resheader name="reader">
          <value>System.Resources.ResXResourceReader, System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089</value>
      </resheader>
      <resheader name="writer">
          <value>System.Resources.ResXResourceWriter, System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089</value>
      </resheader>
      "#;

/// Render a project's translatable strings as a resx document.
pub fn emit(project: &Project) -> String {
    let sequences = export::build_project(project);
    let mut seen_characters: HashSet<&str> = HashSet::new();
    let mut entries = String::new();

    for sequence in &sequences {
        for unit in &sequence.units {
            if let Some(character) = unit.character.as_deref().filter(|c| !c.is_empty()) {
                if seen_characters.insert(character) {
                    entries.push_str(&format!(
                        "<data name=\"{character}\"><value>{character}</value><comment>Character name</comment></data>\n"
                    ));
                }
            }
            if let Some(dialogue) = unit.dialogue.as_deref().filter(|d| !d.is_empty()) {
                entries.push_str(&format!(
                    "<data name=\"{}\"><value>{}</value><comment>{} ({} / {})</comment></data>\n",
                    unit.id, dialogue, sequence.name, sequence.id, unit.node_id
                ));
            }
        }
    }

    format!("{XML_DECLARATION}\n\n{RESX_HEADER}{entries}\n    </root>")
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
            "\n",
            "    <root>\n",
            "      <resheader name=\"resmimetype\">\n",
            "          <value>text/microsoft-resx</value>\n",
            "      </resheader>\n",
            "      <resheader name=\"version\">\n",
            "          <value>2.0</value>\n",
            "      </resheader>\n",
            "      <resheader name=\"reader\">\n",
            "          <value>System.Resources.ResXResourceReader, System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089</value>\n",
            "      </resheader>\n",
            "      <resheader name=\"writer\">\n",
            "          <value>System.Resources.ResXResourceWriter, System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089</value>\n",
            "      </resheader>\n",
            "      <data name=\"Ann\"><value>Ann</value><comment>Character name</comment></data>\n",
            "<data name=\"n1\"><value>Hi</value><comment>Chapter One (s1 / n1)</comment></data>\n",
            "\n",
            "    </root>"
        );
        assert_eq!(emit(&sample_project()), expected);
    }

    #[test]
    fn test_character_entries_are_deduplicated() {
        let mut project = sample_project();
        project.sequences[0].nodes[0].lines.push(Line {
            id: "l3".to_string(),
            character: Some("Ann".to_string()),
            dialogue: Some("Still me".to_string()),
            ..Default::default()
        });

        let document = emit(&project);
        assert_eq!(document.matches("<comment>Character name</comment>").count(), 1);
        assert_eq!(document.matches("Still me").count(), 1);
    }
}
