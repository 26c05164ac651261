//! The text⇄structure passes for one node's script.
//!
//! `parse_lines`/`parse_responses` turn script text into the node's
//! records, `lines_to_text`/`responses_to_text` render them back, and
//! `compile` runs the whole pipeline over a standalone script.

use crate::model::{self, END_SENTINEL, Line, Node, NodeIndex, Response};
use crate::processor::grammar::{self, ErrorKind, ParseError};

/// Parse script text into one `Line` per physical line.
///
/// Sibling nodes resolve `-> name` targets to ids; unknown names leave
/// the id unset rather than failing. The first malformed marker aborts
/// the whole parse.
pub fn parse_lines(text: &str, siblings: &NodeIndex) -> Result<Vec<Line>, ParseError> {
    text.split('\n')
        .enumerate()
        .map(|(index, raw)| {
            parse_line(raw.trim(), siblings).map_err(|kind| ParseError {
                kind,
                line: index + 1,
            })
        })
        .collect()
}

fn parse_line(text: &str, siblings: &NodeIndex) -> Result<Line, ErrorKind> {
    let mut line = Line {
        id: model::new_id(),
        ..Default::default()
    };

    // blank lines survive as empty dialogue so authored spacing is kept
    if text.is_empty() {
        line.dialogue = Some(String::new());
        return Ok(line);
    }
    if let Some(comment) = grammar::comment(text) {
        line.comment = Some(comment.to_string());
        return Ok(line);
    }

    let mut rest = text.to_string();
    if let Some((condition, after)) = grammar::leading_condition(&rest)? {
        line.condition = Some(condition);
        rest = after;
    }
    if let Some((mutation, after)) = grammar::leading_mutation(&rest)? {
        line.mutation = Some(mutation);
        rest = after;
    }
    if let Some((character, spoken)) = grammar::dialogue(&rest)? {
        line.character = Some(character);
        line.dialogue = Some(spoken);
        rest = String::new();
    }
    // text left of the arrow is not content on a line
    if let Some((target, _)) = grammar::redirect(&rest)? {
        line.go_to_node_id = siblings.resolve_target(&target);
        line.go_to_node_name = Some(target);
    }

    Ok(line)
}

/// Parse script text into responses, one per non-blank line.
pub fn parse_responses(text: &str, siblings: &NodeIndex) -> Result<Vec<Response>, ParseError> {
    let mut responses = Vec::new();
    for (index, raw) in text.split('\n').enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let response = parse_response(trimmed, siblings).map_err(|kind| ParseError {
            kind,
            line: index + 1,
        })?;
        responses.push(response);
    }
    Ok(responses)
}

fn parse_response(text: &str, siblings: &NodeIndex) -> Result<Response, ErrorKind> {
    let mut response = Response {
        id: model::new_id(),
        ..Default::default()
    };

    let mut rest = text.to_string();
    if let Some((condition, after)) = grammar::embedded_condition(&rest)? {
        response.condition = Some(condition);
        rest = after;
    }
    match grammar::redirect(&rest)? {
        Some((target, before)) => {
            response.go_to_node_id = siblings.resolve_target(&target);
            response.go_to_node_name = Some(target);
            rest = before;
        }
        // no arrow ends the conversation
        None => {
            response.go_to_node_name = Some(END_SENTINEL.to_string());
        }
    }
    response.prompt = Some(rest);

    Ok(response)
}

/// Render lines back to editable script text.
///
/// Only authored content survives: ids never appear, and re-parsing the
/// result mints fresh ones.
pub fn lines_to_text(lines: &[Line]) -> String {
    lines
        .iter()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(line: &Line) -> String {
    if let Some(comment) = model::non_empty(&line.comment) {
        return format!("# {comment}");
    }
    if let Some(mutation) = model::non_empty(&line.mutation) {
        return format!("[do {mutation}]");
    }

    let mut text = String::new();
    if let Some(condition) = model::non_empty(&line.condition) {
        text.push_str(&format!("[if {condition}] "));
    }
    if let Some(dialogue) = model::non_empty(&line.dialogue) {
        let character = line.character.as_deref().unwrap_or_default();
        text.push_str(&format!("{character}: {dialogue}"));
    }
    if let Some(target) = model::non_empty(&line.go_to_node_name) {
        text.push_str(&format!("-> {target}"));
    }
    text
}

/// Render responses back to editable script text.
///
/// The redirect prints the target's *current* name when the stored id
/// still resolves, falling back to the name as authored: renames
/// propagate, broken links keep what was written.
pub fn responses_to_text(responses: &[Response], siblings: &NodeIndex) -> String {
    responses
        .iter()
        .map(|response| render_response(response, siblings))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_response(response: &Response, siblings: &NodeIndex) -> String {
    let target = response
        .go_to_node_id
        .as_deref()
        .and_then(|id| siblings.by_id(id))
        .map(|node| node.name.as_str())
        .or(response.go_to_node_name.as_deref())
        .unwrap_or(END_SENTINEL);

    let prompt = model::non_empty(&response.prompt).unwrap_or_default();
    match model::non_empty(&response.condition) {
        Some(condition) => format!("[if {condition}] {prompt} -> {target}"),
        None if prompt.is_empty() => format!("-> {target}"),
        None => format!("{prompt} -> {target}"),
    }
}

/// Compile one standalone script into a node.
///
/// The text above the *last* blank line is the dialogue stream (interior
/// blanks stay blank lines), the text below it is the response block.
/// The node under construction is its own sibling, so a script may
/// redirect to its own name.
pub fn compile(text: &str, name: &str) -> Result<Node, ParseError> {
    let (line_text, response_text, response_offset) = split_script(text);

    let node = Node {
        id: model::new_id(),
        name: name.to_string(),
        updated_at: None,
        lines: Vec::new(),
        responses: Vec::new(),
    };
    let siblings = NodeIndex::new(std::slice::from_ref(&node));

    let lines = if line_text.is_empty() {
        Vec::new()
    } else {
        parse_lines(line_text, &siblings)?
    };
    let responses = parse_responses(response_text, &siblings).map_err(|err| ParseError {
        line: err.line + response_offset,
        ..err
    })?;

    Ok(Node {
        lines,
        responses,
        ..node
    })
}

/// Split a script into its lines block and its trailing response block,
/// plus the response block's physical line offset for error reporting.
fn split_script(text: &str) -> (&str, &str, usize) {
    let body = text.trim_end();
    if body.is_empty() {
        return ("", "", 0);
    }

    // byte span and line index of the last blank line
    let mut blank: Option<(usize, usize, usize)> = None;
    let mut start = 0;
    for (index, line) in body.split('\n').enumerate() {
        if line.trim().is_empty() {
            blank = Some((start, start + line.len(), index));
        }
        start += line.len() + 1;
    }

    match blank {
        Some((span_start, span_end, index)) => (
            &body[..span_start.saturating_sub(1)],
            &body[(span_end + 1).min(body.len())..],
            index + 1,
        ),
        None => (body, "", 0),
    }
}
