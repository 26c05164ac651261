//! Shared export traversal.
//!
//! Every output format renders the same flattened view of a project:
//! per node, the blank- and comment-filtered lines with their computed
//! next-unit links, then one responses unit when the node branches.
//! The node's own id replaces the first emitted unit's id exactly once,
//! so external references to the node land on its entry point.

use serde::Serialize;

use crate::model::{self, Line, NodeIndex, Project, Sequence};

/// Export classification of a line, and the tag of every exported unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Dialogue,
    Mutation,
    Goto,
    Responses,
}

impl UnitKind {
    pub fn tag(self) -> &'static str {
        match self {
            UnitKind::Dialogue => "dialogue",
            UnitKind::Mutation => "mutation",
            UnitKind::Goto => "goto",
            UnitKind::Responses => "responses",
        }
    }
}

/// Classify a line by which of its fields are populated.
///
/// Precedence is fixed: an authored redirect name wins, then a mutation,
/// then a bare redirect id. Everything else, blank lines included, is
/// dialogue. Empty strings count as unset.
pub fn classify(line: &Line) -> UnitKind {
    if model::non_empty(&line.go_to_node_name).is_some() {
        UnitKind::Goto
    } else if model::non_empty(&line.mutation).is_some() {
        UnitKind::Mutation
    } else if model::non_empty(&line.go_to_node_id).is_some() {
        UnitKind::Goto
    } else {
        UnitKind::Dialogue
    }
}

/// ─────────────────────────────────────────────────────
/// Flattened units
/// ─────────────────────────────────────────────────────

/// One sequence's export units, in playback order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSequence {
    pub id: String,
    pub name: String,
    pub units: Vec<ExportUnit>,
}

/// One address-linked unit of the export graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportUnit {
    pub id: String,
    /// Id of the node this unit came from.
    pub node_id: String,
    pub kind: UnitKind,
    pub condition: Option<String>,
    pub character: Option<String>,
    pub dialogue: Option<String>,
    pub mutation: Option<String>,
    /// `None`: no redirect on the line. `Some(None)`: a redirect whose
    /// target is not a live node (END included). `Some(Some(id))`: a
    /// verified target.
    pub goto_node_id: Option<Option<String>>,
    /// Unit to play next. `None` on responses units, `Some("")` when
    /// the stream ends without responses.
    pub next_node_id: Option<String>,
    pub responses: Vec<ExportBranch>,
}

/// One branch of a responses unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBranch {
    pub condition: Option<String>,
    pub prompt: Option<String>,
    /// Verified target id. `None` covers both END and broken links.
    pub next_node_id: Option<String>,
}

/// Build the export units for every sequence of a project.
pub fn build_project(project: &Project) -> Vec<ExportSequence> {
    project.sequences.iter().map(build_sequence).collect()
}

/// Build one sequence's unit list.
pub fn build_sequence(sequence: &Sequence) -> ExportSequence {
    let index = NodeIndex::new(&sequence.nodes);
    let mut units = Vec::new();

    for node in &sequence.nodes {
        // consumed by the first unit this node emits
        let mut entry_point = Some(node.id.clone());

        let lines: Vec<&Line> = node.lines.iter().filter(|line| exported(line)).collect();
        for (position, &line) in lines.iter().enumerate() {
            let next = match lines.get(position + 1) {
                Some(following) => following.id.clone(),
                None => node
                    .responses
                    .first()
                    .map(|response| response.id.clone())
                    .unwrap_or_default(),
            };
            let goto = if line.go_to_node_name.is_some() || line.go_to_node_id.is_some() {
                Some(verify(&line.go_to_node_id, &index))
            } else {
                None
            };

            units.push(ExportUnit {
                id: entry_point.take().unwrap_or_else(|| line.id.clone()),
                node_id: node.id.clone(),
                kind: classify(line),
                condition: line.condition.clone(),
                character: line.character.clone(),
                dialogue: line.dialogue.clone(),
                mutation: line.mutation.clone(),
                goto_node_id: goto,
                next_node_id: Some(next),
                responses: Vec::new(),
            });
        }

        if !node.responses.is_empty() {
            let branches = node
                .responses
                .iter()
                .map(|response| ExportBranch {
                    condition: response.condition.clone(),
                    prompt: response.prompt.clone(),
                    next_node_id: verify(&response.go_to_node_id, &index),
                })
                .collect();

            units.push(ExportUnit {
                id: entry_point.take().unwrap_or_else(|| node.responses[0].id.clone()),
                node_id: node.id.clone(),
                kind: UnitKind::Responses,
                condition: None,
                character: None,
                dialogue: None,
                mutation: None,
                goto_node_id: None,
                next_node_id: None,
                responses: branches,
            });
        }
    }

    ExportSequence {
        id: sequence.id.clone(),
        name: sequence.name.clone(),
        units,
    }
}

/// Lines the exports keep: not comments, not blanks.
fn exported(line: &Line) -> bool {
    line.comment.is_none() && line.dialogue.as_deref() != Some("")
}

/// Check a recorded target id against the live node set.
fn verify(target: &Option<String>, index: &NodeIndex) -> Option<String> {
    target
        .as_deref()
        .and_then(|id| index.by_id(id))
        .map(|node| node.id.clone())
}
