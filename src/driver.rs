use crate::diagnostic::{self, Diagnostic, Stage};
use crate::interpreter::{self, RuntimeError};
use crate::lexer::Lexer;
use crate::{parser, scope, typechecker};

use ftlog::{debug, error};
use log::LevelFilter;

use std::io::{BufRead, Write};

/// Settings shared by the binary and library users.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name shown in rendered reports.
    pub source_name: String,
    pub color: bool,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_name: "<input>".to_string(),
            color: false,
            log_level: LevelFilter::Warn,
        }
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    Success,
    /// Every diagnostic of the first stage that reported any.
    CompileErrors(Stage, Vec<Diagnostic>),
    RuntimeFailure(RuntimeError),
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::CompileErrors(..) | Outcome::RuntimeFailure(_) => 1,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Outcome::CompileErrors(_, diagnostics) => diagnostics,
            _ => &[],
        }
    }
}

/// Lexer, parser, scope analysis, type checking and execution, in order.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs `source` to completion. Diagnostics and runtime failures are
    /// written to `output` one per line, after whatever the program printed.
    pub fn run<R: BufRead, W: Write>(&self, source: &str, input: R, mut output: W) -> Outcome {
        debug!("running {} ({} bytes)", self.config.source_name, source.len());

        // lexical errors arrive through the parser, interleaved with syntax errors
        let (program, errors) = parser::parse(Lexer::new(source));
        if !errors.is_empty() {
            let stage = errors
                .iter()
                .find(|diagnostic| diagnostic.stage == Stage::Lexical)
                .map_or(Stage::Syntax, |_| Stage::Lexical);
            return self.fail(stage, errors, &mut output);
        }

        let (symbols, errors) = scope::build(&program);
        if !errors.is_empty() {
            return self.fail(Stage::Scope, errors, &mut output);
        }

        let errors = typechecker::check(&program, &symbols);
        if !errors.is_empty() {
            return self.fail(Stage::Type, errors, &mut output);
        }

        match interpreter::run(&program, input, &mut output) {
            Ok(()) => Outcome::Success,
            Err(failure) => {
                debug!("run stopped: {}", failure);
                self.emit(&failure, &mut output);
                Outcome::RuntimeFailure(failure)
            }
        }
    }

    /// Renders the diagnostics of `outcome` as ariadne reports.
    pub fn render_reports(&self, source: &str, outcome: &Outcome) -> String {
        diagnostic::render_reports(
            outcome.diagnostics(),
            &self.config.source_name,
            source,
            self.config.color,
        )
    }

    fn fail<W: Write>(&self, stage: Stage, errors: Vec<Diagnostic>, output: &mut W) -> Outcome {
        debug!("{} stage reported {} errors", stage, errors.len());
        for diagnostic in &errors {
            self.emit(diagnostic, output);
        }
        Outcome::CompileErrors(stage, errors)
    }

    fn emit<W: Write>(&self, line: &dyn std::fmt::Display, output: &mut W) {
        if let Err(err) = writeln!(output, "{}", line).and_then(|_| output.flush()) {
            error!("could not write to the output: {}", err);
        }
    }
}
