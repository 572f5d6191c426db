//! orgshell CLI entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use orgshell_parser::{DEFAULT_FUZZY_THRESHOLD, InMemoryDirectory, ParserConfig};
use orgshell_runtime::{LinesEditor, Repl, ReplConfig, Session};
use tracing_subscriber::{EnvFilter, fmt};

/// Forgiving command shell for managing companies and their brands.
#[derive(Debug, Parser)]
#[command(name = "orgshell", version, about)]
struct Cli {
    /// Minimum similarity (0-100) for a typo to count as a word.
    #[arg(long, default_value_t = DEFAULT_FUZZY_THRESHOLD, env = "ORGSHELL_THRESHOLD")]
    threshold: f64,

    /// Do not expand shortcuts such as `cc`.
    #[arg(long)]
    no_shortcuts: bool,

    /// Organization that exists at startup (repeatable).
    #[arg(long = "org", value_name = "NAME")]
    orgs: Vec<String>,

    /// Print each evaluation as JSON.
    #[arg(long)]
    json: bool,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Read commands from stdin without prompting.
    #[arg(short, long)]
    batch: bool,

    /// Run a single command and exit.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every evaluated line succeeded.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config = ParserConfig::default()
        .with_fuzzy_threshold(cli.threshold)
        .with_shortcuts(!cli.no_shortcuts);
    let directory = cli
        .orgs
        .iter()
        .fold(InMemoryDirectory::new(), |dir, name| dir.with_organization(name.as_str()));
    let session = Session::new(config, directory)?;
    let repl_config = ReplConfig::default().with_json(cli.json);

    if !cli.command.is_empty() {
        let mut repl = Repl::with_editor(LinesEditor::new(io::empty()), session)
            .with_config(repl_config.without_banner());
        if let Some(output) = repl.eval_line(&cli.command.join(" "))? {
            println!("{output}");
        }
        return Ok(repl.failures() == 0);
    }

    if cli.batch {
        let mut repl = Repl::with_editor(LinesEditor::new(io::stdin().lock()), session)
            .with_config(repl_config.without_banner());
        repl.run()?;
        return Ok(repl.failures() == 0);
    }

    let mut repl = Repl::new(session)?.with_config(repl_config);
    repl.run()?;
    Ok(true)
}
