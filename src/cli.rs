use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export a .saywhat project file
    Export {
        /// Input .saywhat project file
        project_file: PathBuf,
        #[command(flatten)]
        output: OutputOpts,
    },
    /// Compile a sequence script into a generated project
    Compile {
        /// Input script file; stdin when omitted
        sequence_file: Option<PathBuf>,
        /// Name for the compiled node
        #[arg(short, long, default_value = "Generated Node")]
        name: String,
        #[command(flatten)]
        output: OutputOpts,
    },
    /// Check a sequence script for syntax errors
    Lint {
        /// Input script file; stdin when omitted
        sequence_file: Option<PathBuf>,
        /// Reprint the script from what was parsed
        #[arg(short, long)]
        pretty: bool,
    },
}

/// Output selection shared by the exporting subcommands.
#[derive(Args, Debug, Default)]
pub struct OutputOpts {
    /// Export JSON
    #[arg(short, long, group = "format")]
    pub json: bool,
    /// Export XML
    #[arg(short, long, group = "format")]
    pub xml: bool,
    /// Export resx translation strings
    #[arg(short, long, group = "format")]
    pub resx: bool,
    /// Export a Godot dialogue resource
    #[arg(short, long, short_alias = 'g', visible_alias = "godot", group = "format")]
    pub tres: bool,
    /// Write the output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub write: Option<PathBuf>,
}

/// Which emitter to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
    Resx,
    Tres,
}

impl OutputOpts {
    /// The format flags are exclusive; no flag means JSON.
    pub fn format(&self) -> Format {
        if self.xml {
            Format::Xml
        } else if self.resx {
            Format::Resx
        } else if self.tres {
            Format::Tres
        } else {
            Format::Json
        }
    }
}
