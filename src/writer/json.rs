//! Emit the generic JSON export: sequences keyed by id, each holding
//! its units keyed by unit id.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::Project;
use crate::processor::export::{self, ExportBranch, ExportSequence, ExportUnit, UnitKind};

#[derive(Serialize)]
struct JsonSequence<'a> {
    id: &'a str,
    nodes: BTreeMap<&'a str, JsonUnit<'a>>,
}

/// Field order here is field order in the output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonUnit<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: UnitKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    character: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dialogue: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mutation: Option<&'a str>,
    /// `Some(None)` serializes as an explicit null: the unit redirects,
    /// but nowhere that still exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    goto_node_id: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_node_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    responses: Option<Vec<JsonBranch<'a>>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonBranch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<&'a str>,
    next_node_id: Option<&'a str>,
}

/// Render a project as the generic JSON document. Pretty output
/// (2-space indent) is meant for terminals, compact output for files.
pub fn emit(project: &Project, pretty: bool) -> String {
    let sequences = export::build_project(project);
    let document: BTreeMap<&str, JsonSequence> = sequences
        .iter()
        .map(|sequence| (sequence.id.as_str(), render_sequence(sequence)))
        .collect();

    if pretty {
        serde_json::to_string_pretty(&document).expect("export graph serializes")
    } else {
        serde_json::to_string(&document).expect("export graph serializes")
    }
}

fn render_sequence(sequence: &ExportSequence) -> JsonSequence<'_> {
    JsonSequence {
        id: &sequence.id,
        nodes: sequence
            .units
            .iter()
            .map(|unit| (unit.id.as_str(), render_unit(unit)))
            .collect(),
    }
}

fn render_unit(unit: &ExportUnit) -> JsonUnit<'_> {
    let responses = match unit.kind {
        UnitKind::Responses => Some(unit.responses.iter().map(render_branch).collect()),
        _ => None,
    };

    JsonUnit {
        id: &unit.id,
        kind: unit.kind,
        condition: unit.condition.as_deref(),
        character: unit.character.as_deref(),
        dialogue: unit.dialogue.as_deref(),
        mutation: unit.mutation.as_deref(),
        goto_node_id: unit.goto_node_id.as_ref().map(|target| target.as_deref()),
        next_node_id: unit.next_node_id.as_deref(),
        responses,
    }
}

fn render_branch(branch: &ExportBranch) -> JsonBranch<'_> {
    JsonBranch {
        condition: branch.condition.as_deref(),
        prompt: branch.prompt.as_deref(),
        next_node_id: branch.next_node_id.as_deref(),
    }
}
