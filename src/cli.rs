//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// termbundle - FHIR terminology bundle assembler
#[derive(Parser, Debug)]
#[command(
    name = "termbundle",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Assemble FHIR terminology resources into a portable bundle",
    long_about = "termbundle collects FHIR R4 ValueSet and CodeSystem resources from local \
                  files (FHIR JSON, OMOP Atlas concept CSVs, ZIP exports) and remote FHIR \
                  terminology servers into a deduplicated collection bundle, then submits \
                  the bundle to a target server in one transaction.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  termbundle ingest ValueSet.json exportedConceptSet.zip\n    \
                  termbundle search --from vsac --name diabetes\n    \
                  termbundle add 2.16.840.1.113762.1.4.1096.109 --from vsac\n    \
                  termbundle list\n    \
                  termbundle submit --to local"
)]
pub struct Cli {
    /// Bundle file to read and write
    #[arg(
        long,
        short = 'b',
        global = true,
        default_value = "Terminology.bundle.json"
    )]
    pub bundle: PathBuf,

    /// Connections file with named FHIR server endpoints
    #[arg(long, short = 'c', global = true, default_value = "connections.yaml")]
    pub connections: PathBuf,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest local files into the bundle
    Ingest(IngestArgs),

    /// List bundle entries
    List,

    /// Remove a bundle entry by index
    Remove(RemoveArgs),

    /// Search value sets on a FHIR server
    Search(SearchArgs),

    /// Add a value set from a FHIR server by id
    Add(AddArgs),

    /// Expand a value set on a FHIR server and print its codes
    Expand(ExpandArgs),

    /// Write the bundle to a named file
    Export(ExportArgs),

    /// Submit the bundle to a FHIR server
    Submit(SubmitArgs),
}

/// Arguments for the ingest command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Ingest FHIR JSON documents:\n    termbundle ingest ValueSet.json Bundle.json\n\n\
                  Ingest an OMOP Atlas concept export:\n    termbundle ingest mappedConcepts.csv\n\n\
                  Ingest an Atlas ZIP export:\n    termbundle ingest exportedConceptSet.zip\n\n\
                  Resolve dependencies from a server while ingesting:\n    termbundle ingest ValueSet.json --from vsac")]
pub struct IngestArgs {
    /// Input files (FHIR JSON, concept CSV, or ZIP export)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Connection to resolve value set dependencies from
    #[arg(long = "from", value_name = "CONNECTION")]
    pub from: Option<String>,
}

/// Arguments for the remove command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Entry index as shown by `termbundle list`
    pub index: usize,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Search by name:\n    termbundle search --from vsac --name diabetes\n\n\
                  Search by canonical URL:\n    termbundle search --from vsac --url http://example.org/fhir/ValueSet/dm2\n\n\
                  Search by identifier (e.g. an OID):\n    termbundle search --from vsac --identifier 2.16.840.1.113762.1.4.1096.109")]
pub struct SearchArgs {
    /// Connection to search on
    #[arg(long = "from", value_name = "CONNECTION")]
    pub from: String,

    /// Canonical URL to match
    #[arg(long)]
    pub url: Option<String>,

    /// Value set name to match
    #[arg(long)]
    pub name: Option<String>,

    /// Identifier value to match, e.g. an OID
    #[arg(long)]
    pub identifier: Option<String>,
}

/// Arguments for the add command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Add a value set and its dependencies:\n    termbundle add dm2-snomed --from vsac")]
pub struct AddArgs {
    /// Server-assigned value set id
    pub id: String,

    /// Connection to fetch from
    #[arg(long = "from", value_name = "CONNECTION")]
    pub from: String,
}

/// Arguments for the expand command
#[derive(Parser, Debug)]
pub struct ExpandArgs {
    /// Server-assigned value set id
    pub id: String,

    /// Connection to expand on
    #[arg(long = "from", value_name = "CONNECTION")]
    pub from: String,
}

/// Arguments for the export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output file for the exported bundle
    pub output: PathBuf,
}

/// Arguments for the submit command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Submit the bundle:\n    termbundle submit --to local")]
pub struct SubmitArgs {
    /// Connection to submit to
    #[arg(long = "to", value_name = "CONNECTION")]
    pub to: String,
}
