use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use solution_fmt::{Config, Error, OutputFormat, SolutionRecord};

const DEFAULT_CONFIG_FILE: &str = "solution-fmt.toml";

#[derive(Parser)]
#[command(name = "solution-fmt")]
#[command(about = "Format plain-text helpdesk solutions into structured documents")]
struct Cli {
    /// Input file containing the solution text, or - for stdin
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config file (defaults to solution-fmt.toml in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat the input as a ticket JSON record and format its solution
    #[arg(long)]
    ticket: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    if cli.format.needs_output_file() && cli.output.is_none() {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "PDF output needs --output")
            .exit();
    }
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load(Path::new(DEFAULT_CONFIG_FILE)),
    };

    let input = solution_fmt::read_input(&cli.input, io::stdin())?;

    let (caption, blocks) = if cli.ticket {
        let record = SolutionRecord::from_json(&input)?;
        tracing::info!(
            ticket = record.ticket_id.as_deref().unwrap_or("-"),
            source = ?record.source,
            "formatting ticket solution"
        );
        (Some(record.caption()), record.blocks_with_config(&config.formatter))
    } else {
        (None, solution_fmt::format_with_config(&input, &config.formatter))
    };
    tracing::info!(blocks = blocks.len(), "formatted solution");

    let bytes = solution_fmt::render(cli.format, caption.as_deref(), &blocks, &config)?;
    write_output(cli.output.as_deref(), &bytes)
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<(), Error> {
    match output {
        Some(path) => {
            fs::write(path, bytes).map_err(|source| Error::Write {
                path: path.to_path_buf(),
                source,
            })?;
            println!("Created {}", path.display());
            Ok(())
        }
        None => io::stdout()
            .write_all(bytes)
            .map_err(|source| Error::Write {
                path: PathBuf::from("<stdout>"),
                source,
            }),
    }
}
