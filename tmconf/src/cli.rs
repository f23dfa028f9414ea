use std::path::PathBuf;

use clap::Parser;
use tmconf::settings::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "tmconf", version)]
#[command(about = "Parse BIG-IP tmconf configuration files into JSON")]
pub struct Cli {
    /// Log parser progress to stderr (RUST_LOG refines further).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Parse one tmconf file (or stdin) and print it as JSON.
    Parse(ParseArgs),
    /// Parse several tmconf files and print one JSON array of results.
    Files(FilesArgs),
    /// Show the object key tree and diagnostics of a tmconf file.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Path to tmconf file to read. Use - for stdin.
    pub file: Option<PathBuf>,
    /// Output format. Defaults to the settings file value, then object.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// File to write output to instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Sort object keys and list elements recursively.
    #[arg(long)]
    pub sort: bool,
    /// Settings TOML file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct FilesArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    #[arg(long)]
    pub sort: bool,
    /// Settings TOML file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    #[arg(long, default_value_t = 2)]
    pub depth: usize,
    /// Settings TOML file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}
