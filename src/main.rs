//! @ai:module:intent CLI entry point for generating Go struct tags
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on config, walk, rewriter, output

use clap::{Parser, ValueEnum};
use easytags::{
    output, parse_list, resolve_paths, rewrite_files, CasePolicy, Config, OutputFormat,
    RewriteOptions,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "easytags")]
#[command(author, version, about = "Generate and update struct field tags in Go source files")]
#[command(after_help = "Examples:\n  easytags file.go json,xml\n  easytags ./models json:camel,db\n  easytags -r 'pkg/**/*.go'")]
struct Cli {
    /// Go file, directory or glob pattern
    path: String,

    /// Comma-separated tags with an optional case each, e.g. json:camel,xml
    tags: Option<String>,

    /// Remove all tags from exported fields
    #[arg(short, long)]
    remove: bool,

    /// Case for tags given without one: snake, camel or pascal
    #[arg(short, long)]
    case: Option<String>,

    /// Show what would change without writing files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Like --dry-run, but exit with code 1 if any tag would change
    #[arg(long)]
    check: bool,

    /// Run gofmt -w on every rewritten file
    #[arg(long)]
    gofmt: bool,

    /// Only rewrite outermost struct types, not structs nested in field types
    #[arg(long)]
    no_nested: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: Format,

    /// Path to a TOML config file (defaults to ./.easytags.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("easytags={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match Config::discover(cli.config.as_deref(), Path::new(".")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let case: CasePolicy = match &cli.case {
        Some(case) => case.parse::<CasePolicy>().unwrap_or_default(),
        None => config.case_policy(),
    };

    let mut requests = cli
        .tags
        .as_deref()
        .map(|tags| parse_list(tags, &case))
        .unwrap_or_default();
    if requests.is_empty() && !cli.remove {
        requests = config.default_requests(&case);
    }

    let options = RewriteOptions {
        requests,
        remove: cli.remove,
        nested: config.nested && !cli.no_nested,
    };

    let files = match resolve_paths(&cli.path, &config.skip_dirs) {
        Ok(files) if files.is_empty() => {
            eprintln!("Error: no files matched `{}`", cli.path);
            return ExitCode::from(2);
        }
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let write = !(cli.dry_run || cli.check);
    let report = rewrite_files(&files, &options, write, cli.gofmt || config.gofmt);

    let rendered = output::format_run_report(&report, cli.format.into());
    println!("{}", rendered.trim_end());

    if !report.passed() {
        ExitCode::from(2)
    } else if cli.check && report.has_changes() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
