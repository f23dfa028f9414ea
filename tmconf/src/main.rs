use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tmconf::inspect::{render_diagnostics, render_tree};
use tmconf::settings::{default_settings, load_settings, OutputFormat, Settings};
use tmconf_core::format::to_json_string;
use tmconf_core::{
    parse_file, parse_with_options, Diagnostics, Document, ParseOptions, ParsedConfig,
};
use tracing::{debug, warn, Level};
use tracing_subscriber::EnvFilter;

mod cli;
mod input;
mod path_guard;

use cli::{Cli, Command, FilesArgs, InspectArgs, ParseArgs};
use input::Input;

const EMPTY_INPUT: &str = "No file_path given or input is empty. Use -h|--help for help.";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Files(args) => run_files(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn settings_from(config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings {}", path.display())),
        None => Ok(default_settings()),
    }
}

fn parse_options(settings: &Settings, sort: bool) -> ParseOptions {
    let mut opts = settings.parse.to_options();
    opts.sort |= sort;
    opts
}

fn log_diagnostics(source: &str, diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        warn!(source, line = ?diagnostic.line, "{diagnostic}");
    }
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let settings = settings_from(args.config.as_deref())?;
    let input = Input::from_arg(args.file);

    let text = input.read()?;
    if text.trim().is_empty() {
        bail!(EMPTY_INPUT);
    }

    let opts = parse_options(&settings, args.sort);
    let parsed = parse_with_options(&text, &opts)
        .with_context(|| format!("failed to parse {}", input.name()))?;
    log_diagnostics(&input.name(), parsed.diagnostics());

    let format = args.format.unwrap_or(settings.output.format);
    debug!(?format, objects = parsed.document().len(), "rendering output");
    let rendered = render(&parsed, format);

    match args.output {
        Some(out_path) => {
            if let Some(in_path) = input.path() {
                path_guard::ensure_output_not_input(&out_path, in_path)?;
            }
            fs::write(&out_path, rendered)
                .with_context(|| format!("failed to write output {}", out_path.display()))?;
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn render(parsed: &ParsedConfig, format: OutputFormat) -> &str {
    match format {
        OutputFormat::Object => parsed.json(),
        OutputFormat::Tabular => parsed.tabular_json(),
        OutputFormat::Jsonl => parsed.jsonl(),
    }
}

#[derive(Serialize)]
struct FileOutput<'a> {
    filename: String,
    output: &'a Document,
}

fn run_files(args: FilesArgs) -> Result<()> {
    let settings = settings_from(args.config.as_deref())?;
    let opts = parse_options(&settings, args.sort);

    let mut results = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let parsed = parse_file(path, &opts)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        log_diagnostics(&path.display().to_string(), parsed.diagnostics());
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        results.push((filename, parsed));
    }
    results.sort_by(|a, b| a.0.cmp(&b.0));

    let outputs: Vec<FileOutput<'_>> = results
        .iter()
        .map(|(filename, parsed)| FileOutput {
            filename: filename.clone(),
            output: parsed.document(),
        })
        .collect();
    println!("{}", to_json_string(&outputs)?);
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let opts = settings_from(args.config.as_deref())?.parse.to_options();
    let parsed = parse_file(&args.file, &opts)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    print!("{}", render_tree(parsed.document(), args.depth));
    println!("{}", render_diagnostics(parsed.diagnostics()));
    Ok(())
}
