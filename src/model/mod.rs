use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version stamped onto projects this tool generates itself.
pub const SAVED_WITH_VERSION: f64 = 1.7;

/// Redirect target that ends the conversation instead of naming a node.
/// It is stored verbatim and never resolved to an id.
pub const END_SENTINEL: &str = "END";

/// Mint a fresh globally-unique id.
///
/// The script parsers are the only production call sites; validation and
/// export never allocate ids.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// `None` and `Some("")` both mean "not authored".
pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Entire project as the editor saves it.
///
/// Everything stays in very “raw” form so later stages (validator,
/// export graph, emitters) can decide what they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub saved_with_version: f64,
    pub sequences: Vec<Sequence>,
}

/// ─────────────────────────────────────────────────────
/// Individual document types
/// ─────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    pub id: String,
    pub name: String,
    /// Editor metadata, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// One branch point of a sequence: a linear stream of lines plus the
/// player-facing responses leaving it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub responses: Vec<Response>,
}

/// One physical line of a node's dialogue stream.
///
/// Every content field is optional; which ones are set decides how the
/// line behaves on export. A blank authored line is `dialogue: Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialogue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_to_node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_to_node_id: Option<String>,
}

/// One player choice leaving a node. A response with no authored
/// redirect targets [`END_SENTINEL`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_to_node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_to_node_id: Option<String>,
}

/// Symbol table over a set of sibling nodes.
///
/// Built once per sequence (or per compile) and passed by reference
/// wherever redirect targets need resolving: name to id while parsing,
/// id to node while rendering and exporting.
#[derive(Debug, Default)]
pub struct NodeIndex<'a> {
    by_name: HashMap<&'a str, &'a Node>,
    by_id: HashMap<&'a str, &'a Node>,
}

impl<'a> NodeIndex<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        let mut by_name = HashMap::with_capacity(nodes.len());
        let mut by_id = HashMap::with_capacity(nodes.len());
        for node in nodes {
            by_name.insert(node.name.as_str(), node);
            by_id.insert(node.id.as_str(), node);
        }
        Self { by_name, by_id }
    }

    pub fn by_name(&self, name: &str) -> Option<&'a Node> {
        self.by_name.get(name).copied()
    }

    pub fn by_id(&self, id: &str) -> Option<&'a Node> {
        self.by_id.get(id).copied()
    }

    /// Resolve an authored redirect target to a node id. [`END_SENTINEL`]
    /// never resolves; unknown names resolve to `None`.
    pub fn resolve_target(&self, name: &str) -> Option<String> {
        if name == END_SENTINEL {
            return None;
        }
        self.by_name(name).map(|node| node.id.clone())
    }
}
