use crate::lexer::Position;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use yansi::Paint;

use std::fmt;
use std::ops::Range;

/// Which pipeline stage found a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexical,
    Syntax,
    Scope,
    Type,
}

impl Stage {
    fn color(self) -> Color {
        match self {
            Stage::Lexical => Color::Magenta,
            Stage::Syntax => Color::Red,
            Stage::Scope => Color::Yellow,
            Stage::Type => Color::Cyan,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Lexical => "lexical",
            Stage::Syntax => "syntax",
            Stage::Scope => "scope",
            Stage::Type => "type",
        };
        f.write_str(name)
    }
}

/// A compile-time problem. Stages collect these instead of stopping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub position: Position,
    pub message: String,
}

impl Diagnostic {
    pub fn new(stage: Stage, position: Position, message: impl Into<String>) -> Self {
        Diagnostic {
            stage,
            position,
            message: message.into(),
        }
    }

    pub fn lexical(position: Position, message: impl Into<String>) -> Self {
        Self::new(Stage::Lexical, position, message)
    }

    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        Self::new(Stage::Syntax, position, message)
    }

    pub fn scope(position: Position, message: impl Into<String>) -> Self {
        Self::new(Stage::Scope, position, message)
    }

    pub fn type_error(position: Position, message: impl Into<String>) -> Self {
        Self::new(Stage::Type, position, message)
    }

    pub fn to_report(
        &self,
        file: &str,
        source: &str,
        color: bool,
    ) -> Report<'static, (String, Range<usize>)> {
        let span = char_span(source, self.position);

        Report::build(ReportKind::Error, (file.to_string(), span.clone()))
            .with_config(Config::default().with_color(color))
            .with_code(format!("{} error", self.stage))
            .with_label(
                Label::new((file.to_string(), span))
                    .with_message(self.message.clone())
                    .with_color(self.stage.color()),
            )
            .with_message(format!(
                "{} at {}",
                self.stage.bold(),
                self.position.to_string().bold()
            ))
            .finish()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} error: {}", self.position, self.stage, self.message)
    }
}

/// Renders diagnostics as ariadne reports, one after another.
pub fn render_reports(diagnostics: &[Diagnostic], file: &str, source: &str, color: bool) -> String {
    let mut out = Vec::new();
    for diagnostic in diagnostics {
        let report = diagnostic.to_report(file, source, color);
        // writing into a Vec cannot fail
        let _ = report.write((file.to_string(), Source::from(source)), &mut out);
    }
    String::from_utf8_lossy(&out).into_owned()
}

// ariadne spans count characters, and so do our columns
fn char_span(source: &str, position: Position) -> Range<usize> {
    let total = source.chars().count();
    let mut offset = 0;
    for (index, line) in source.split('\n').enumerate() {
        if index + 1 == position.line {
            let line_len = line.chars().count();
            offset += position.column.saturating_sub(1).min(line_len);
            break;
        }
        offset += line.chars().count() + 1;
    }
    // end-of-input positions point at the last character
    let start = offset.min(total.saturating_sub(1));
    start..(start + 1).min(total)
}
