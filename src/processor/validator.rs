//! Syntax checking without construction.
//!
//! Re-runs the line grammar over every physical line and collects one
//! positioned diagnostic per offending line instead of aborting at the
//! first. No records are built and no ids are minted.

use std::fmt;

use crate::processor::grammar::{self, ErrorKind};

/// One collected syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based physical line number.
    pub line: usize,
    /// Column of the failing marker. Always 0 for now; markers are not
    /// position-tracked within a line.
    pub character: usize,
    pub kind: ErrorKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.character, self.kind)
    }
}

/// Check every line of a script against the line grammar.
///
/// Well-formed lines contribute nothing. A malformed line contributes
/// exactly one diagnostic (its first broken marker) and checking moves
/// on to the next line.
pub fn validate(text: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for (index, raw) in text.split('\n').enumerate() {
        if let Err(kind) = check_line(raw.trim()) {
            diagnostics.push(Diagnostic {
                line: index + 1,
                character: 0,
                kind,
            });
        }
    }
    diagnostics
}

/// Run the marker passes over one line, discarding everything but the
/// verdict.
fn check_line(line: &str) -> Result<(), ErrorKind> {
    if line.is_empty() || grammar::comment(line).is_some() {
        return Ok(());
    }

    let mut rest = line.to_string();
    if let Some((_, after)) = grammar::leading_condition(&rest)? {
        rest = after;
    }
    if let Some((_, after)) = grammar::leading_mutation(&rest)? {
        rest = after;
    }
    if grammar::dialogue(&rest)?.is_some() {
        rest.clear();
    }
    grammar::redirect(&rest)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_clean_script() {
        let script = "Character: Hello!\n\
            [if has_met_character] Character: It's nice to meet you.\n\
            # This is a comment\n\
            [do has_met_character = true]\n\
            \n\
            Can you repeat that? -> Start\n\
            That's all for now -> END";
        assert_eq!(validate(script), Vec::new());
    }

    #[test]
    fn test_validate_reports_each_kind() {
        let test_cases = vec![
            ("[if broken", ErrorKind::MalformedConditional),
            ("[do broken", ErrorKind::MalformedMutation),
            (": no speaker", ErrorKind::MalformedDialogue),
            ("dangling ->", ErrorKind::MalformedRedirection),
        ];
        for (script, expected) in test_cases {
            let diagnostics = validate(script);
            assert_eq!(diagnostics.len(), 1, "script: {script}");
            assert_eq!(diagnostics[0].kind, expected, "script: {script}");
        }
    }

    #[test]
    fn test_validate_collects_across_lines() {
        let diagnostics = validate("[if broken\nNils: fine\n[do broken");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].line, 1);
        assert_eq!(diagnostics[0].kind, ErrorKind::MalformedConditional);
        assert_eq!(diagnostics[1].line, 3);
        assert_eq!(diagnostics[1].kind, ErrorKind::MalformedMutation);
        assert!(diagnostics.iter().all(|d| d.character == 0));
    }

    #[test]
    fn test_validate_one_diagnostic_per_line() {
        // the line also has a broken mutation, but the conditional fails first
        let diagnostics = validate("[if broken [do broken");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, ErrorKind::MalformedConditional);
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic {
            line: 2,
            character: 0,
            kind: ErrorKind::MalformedRedirection,
        };
        assert_eq!(diagnostic.to_string(), "2:0: Malformed redirection");
    }
}
