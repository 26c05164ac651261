pub mod cli;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use std::path::Path;

use anyhow::Context;
use clap::Parser;

use cli::{Command, Format, OutputOpts};
use model::{Node, NodeIndex, Project, Sequence};

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    match args.command {
        Command::Export {
            project_file,
            output,
        } => {
            // 1. ── Parse ──────────────────────────────────────────────
            let json = std::fs::read_to_string(&project_file)
                .with_context(|| format!("Reading {}", project_file.display()))?;
            let project = parser::load(&json).with_context(|| "Parsing project JSON")?;

            // 2. ── Write output ───────────────────────────────────────
            write_output(&project, &output)
        }
        Command::Compile {
            sequence_file,
            name,
            output,
        } => {
            let script = read_script(sequence_file.as_deref())?;
            let node = processor::compile(&script, &name)
                .with_context(|| "Compiling sequence script")?;
            write_output(&generated_project(node), &output)
        }
        Command::Lint {
            sequence_file,
            pretty,
        } => {
            let script = read_script(sequence_file.as_deref())?;
            lint(&script, pretty)
        }
    }
}

/// Script text from a file, or stdin when no path was given.
fn read_script(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).with_context(|| "Reading stdin"),
    }
}

/// Wrap one compiled node the way the editor would save it.
fn generated_project(node: Node) -> Project {
    Project {
        saved_with_version: model::SAVED_WITH_VERSION,
        sequences: vec![Sequence {
            id: model::new_id(),
            name: "Generated Sequence".to_string(),
            updated_at: None,
            nodes: vec![node],
        }],
    }
}

fn write_output(project: &Project, output: &OutputOpts) -> anyhow::Result<()> {
    let to_file = output.write.is_some();
    let text = match output.format() {
        Format::Json => writer::json::emit(project, !to_file),
        Format::Xml => writer::xml::emit(project),
        Format::Resx => writer::resx::emit(project),
        Format::Tres => writer::tres::emit(project),
    };

    match &output.write {
        Some(path) => {
            std::fs::write(path, &text).with_context(|| format!("Writing {}", path.display()))
        }
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

/// Report every syntax error in the script, or on a clean pass
/// optionally reprint the script from its parsed form.
fn lint(script: &str, pretty: bool) -> anyhow::Result<()> {
    let diagnostics = processor::validate(script);
    if !diagnostics.is_empty() {
        for diagnostic in &diagnostics {
            eprintln!("{diagnostic}");
        }
        anyhow::bail!("script has {} syntax error(s)", diagnostics.len());
    }

    if pretty {
        let node = processor::compile(script, "Generated Node")
            .with_context(|| "Compiling sequence script")?;
        let siblings = NodeIndex::new(std::slice::from_ref(&node));
        let rendered = format!(
            "{}\n\n{}",
            processor::script_parser::lines_to_text(&node.lines),
            processor::script_parser::responses_to_text(&node.responses, &siblings)
        );
        println!("{}", rendered.trim_end());
    }
    Ok(())
}
