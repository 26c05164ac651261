//! Emit the Godot `.tres` resource consumed by the runtime addon.
//!
//! The resource body is one flat JSON map of every unit across all
//! sequences, with snake_case field names and empty strings where the
//! JSON export would use null or omit the field.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::Project;
use crate::processor::export::{self, ExportBranch, ExportUnit, UnitKind};

#[derive(Serialize)]
struct GodotUnit<'a> {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    go_to_node_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_node_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    responses: Option<Vec<GodotBranch<'a>>>,
}

#[derive(Serialize)]
struct GodotBranch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<&'a str>,
    next_node_id: &'a str,
}

/// Render a project as a Godot resource.
pub fn emit(project: &Project) -> String {
    let sequences = export::build_project(project);
    let units: BTreeMap<&str, GodotUnit> = sequences
        .iter()
        .flat_map(|sequence| sequence.units.iter())
        .map(|unit| (unit.id.as_str(), render_unit(unit)))
        .collect();
    let lines = serde_json::to_string(&units).expect("export graph serializes");

    format!(
        "[gd_resource type=\"Resource\" load_steps=2 format=2]\n\n[ext_resource path=\"res://addons/saywhat_godot/dialogue_resource.gd\" type=\"Script\" id=1]\n\n[resource]\nscript = ExtResource( 1 )\nlines = {lines}"
    )
}

fn render_unit(unit: &ExportUnit) -> GodotUnit<'_> {
    if unit.kind == UnitKind::Responses {
        return GodotUnit {
            id: &unit.id,
            kind: unit.kind,
            condition: None,
            character: None,
            dialogue: None,
            mutation: None,
            go_to_node_id: None,
            next_node_id: None,
            responses: Some(unit.responses.iter().map(render_branch).collect()),
        };
    }

    GodotUnit {
        id: &unit.id,
        kind: unit.kind,
        condition: unit.condition.as_deref(),
        character: unit.character.as_deref(),
        dialogue: unit.dialogue.as_deref(),
        mutation: unit.mutation.as_deref(),
        // line units always carry the field; broken targets come out ""
        go_to_node_id: Some(
            unit.goto_node_id
                .as_ref()
                .and_then(|target| target.as_deref())
                .unwrap_or_default(),
        ),
        next_node_id: unit.next_node_id.as_deref(),
        responses: None,
    }
}

fn render_branch(branch: &ExportBranch) -> GodotBranch<'_> {
    GodotBranch {
        condition: branch.condition.as_deref(),
        prompt: branch.prompt.as_deref(),
        next_node_id: branch.next_node_id.as_deref().unwrap_or_default(),
    }
}
