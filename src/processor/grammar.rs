//! Hand-rolled recognisers for the script line grammar.
//!
//  Marker shapes (informal):
//
//      comment    ::= '# ' text
//      condition  ::= '[if ' expr ']'
//      mutation   ::= '[do ' expr ']'
//      dialogue   ::= character ':' ' '? text
//      redirect   ::= text '->' ' '? target
//
//  A line is scanned in that fixed order. Each recogniser that fires
//  strips its marker from the working text, so later recognisers only
//  see the leftovers. Bracketed expressions are opaque: captured
//  verbatim up to the first ']', never evaluated.

use thiserror::Error;

/// The four syntax errors a script line can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Malformed conditional")]
    MalformedConditional,
    #[error("Malformed mutation")]
    MalformedMutation,
    #[error("Malformed dialogue")]
    MalformedDialogue,
    #[error("Malformed redirection")]
    MalformedRedirection,
}

/// A fatal parse failure: the first malformed marker on the compile
/// path, with the 1-based line it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} on line {line}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub line: usize,
}

/// `# ` marker. The entire rest of the line is comment text and no
/// other marker is read from it.
pub fn comment(text: &str) -> Option<&str> {
    text.strip_prefix("# ")
}

/// `[if expr]` at the start of the working text. Returns the captured
/// expression and the trimmed leftover.
pub fn leading_condition(text: &str) -> Result<Option<(String, String)>, ErrorKind> {
    match text.strip_prefix("[if ") {
        Some(after) => bracket_body(after, ErrorKind::MalformedConditional).map(Some),
        None => Ok(None),
    }
}

/// `[do expr]` at the start of the working text.
pub fn leading_mutation(text: &str) -> Result<Option<(String, String)>, ErrorKind> {
    match text.strip_prefix("[do ") {
        Some(after) => bracket_body(after, ErrorKind::MalformedMutation).map(Some),
        None => Ok(None),
    }
}

/// `[if expr]` anywhere in the working text. The response grammar
/// accepts its condition in any position and splices it out.
pub fn embedded_condition(text: &str) -> Result<Option<(String, String)>, ErrorKind> {
    let Some(start) = text.find("[if ") else {
        return Ok(None);
    };
    let after = &text[start + "[if ".len()..];
    let close = after.find(']').ok_or(ErrorKind::MalformedConditional)?;
    let rest = format!("{}{}", &text[..start], &after[close + 1..]);
    Ok(Some((after[..close].to_string(), rest.trim().to_string())))
}

fn bracket_body(after: &str, kind: ErrorKind) -> Result<(String, String), ErrorKind> {
    let close = after.find(']').ok_or(kind)?;
    Ok((
        after[..close].to_string(),
        after[close + 1..].trim().to_string(),
    ))
}

/// `character: text` split at the first colon. The whole rest of the
/// line belongs to the dialogue, so an arrow after a colon is spoken
/// text, not a redirect. An empty speaker is malformed.
pub fn dialogue(text: &str) -> Result<Option<(String, String)>, ErrorKind> {
    let Some((character, spoken)) = text.split_once(':') else {
        return Ok(None);
    };
    if character.is_empty() {
        return Err(ErrorKind::MalformedDialogue);
    }
    Ok(Some((
        character.to_string(),
        strip_one_space(spoken).to_string(),
    )))
}

/// Trailing `-> target` redirect, split at the first arrow. Returns the
/// target and the text left of the arrow; the caller decides whether
/// that text is a prompt or discard. An empty target is malformed.
pub fn redirect(text: &str) -> Result<Option<(String, String)>, ErrorKind> {
    let Some((before, after)) = text.split_once("->") else {
        return Ok(None);
    };
    let target = strip_one_space(after);
    if target.trim().is_empty() {
        return Err(ErrorKind::MalformedRedirection);
    }
    Ok(Some((target.to_string(), before.trim().to_string())))
}

/// At most one whitespace character is eaten after `:` and after `->`;
/// any further whitespace is content.
fn strip_one_space(text: &str) -> &str {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_whitespace() => chars.as_str(),
        _ => text,
    }
}
