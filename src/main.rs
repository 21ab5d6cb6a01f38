use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use mp3dur::analyzer::{collect_inputs, Analyzer};
use mp3dur::report::{self, Format};
use mp3dur::{logging, Config};

/// Print the playback length and byte size of MP3 files
#[derive(Parser, Debug)]
#[command(name = "mp3dur", version, about, long_about = None)]
struct Cli {
    /// Files or directories to analyze
    #[arg(required_unless_present = "completions")]
    paths: Vec<PathBuf>,

    /// Report format (default: from the --output extension, else pretty)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Ignore Xing/Info frame counts and sum every frame
    #[arg(long)]
    no_vbr_fast_path: bool,

    /// Accept files that end in the middle of a frame or tag
    #[arg(long)]
    allow_truncated: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Pretty,
    Json,
    Csv,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pretty => Format::Pretty,
            FormatArg::Json => Format::Json,
            FormatArg::Csv => Format::Csv,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "mp3dur", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    logging::init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every file was analyzed successfully
fn run(cli: &Cli) -> Result<bool> {
    let mut config = Config::load_optional(cli.config.as_deref())?;
    if cli.recursive {
        config.recursive = true;
    }
    if cli.no_vbr_fast_path {
        config.scan.vbr_fast_path = false;
    }
    if cli.allow_truncated {
        config.scan.allow_truncated_tail = true;
    }

    let files = collect_inputs(&cli.paths, &config.extensions, config.recursive)
        .context("cannot list inputs")?;
    if files.is_empty() {
        bail!("no MP3 files found");
    }

    let entries = Analyzer::new().with_options(config.scan).analyze_all(&files);

    let format = cli.format.map(Format::from);
    match &cli.output {
        Some(path) => report::generate(path, format, &entries)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            report::write(&mut stdout, format.unwrap_or_default(), &entries)
                .and_then(|()| stdout.flush())
                .context("cannot write report")?;
        }
    }

    Ok(entries.iter().all(|e| e.is_ok()))
}
