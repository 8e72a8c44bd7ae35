use minipl::driver::{Config, Pipeline};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use ftlog::info;
use log::LevelFilter;

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

/// Runs a MiniPL program.
#[derive(Parser, Debug)]
#[command(name = "minipl", version, about)]
struct Args {
    /// Source file to run.
    source: PathBuf,

    /// Maximum level written to the diagnostic log on stderr.
    #[arg(long, env = "MINIPL_LOG", default_value = "warn")]
    log_level: LevelFilter,

    /// Colouring of the error reports on stderr.
    #[arg(long, env = "MINIPL_COLOR", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let pipeline = Pipeline::new(Config {
        source_name: args.source.display().to_string(),
        color: args.color.enabled(),
        log_level: args.log_level,
    });

    let _guard = ftlog::Builder::new()
        .max_log_level(pipeline.config().log_level)
        .root(io::stderr())
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialise logging: {err}"))?;

    let source = fs::read_to_string(&args.source)
        .with_context(|| format!("failed to read `{}`", args.source.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = pipeline.run(&source, stdin.lock(), stdout.lock());

    if !outcome.diagnostics().is_empty() {
        eprint!("{}", pipeline.render_reports(&source, &outcome));
    }
    info!("{} finished with exit code {}", args.source.display(), outcome.exit_code());

    Ok(ExitCode::from(outcome.exit_code()))
}
