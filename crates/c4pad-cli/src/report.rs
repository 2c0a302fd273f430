//! Terminal reports for lint findings and failed commands.
//!
//! A lint finding (E100 unclosed boundary, E101 unmatched `}`, E200 repeated
//! alias) points into the diagram source, so it is rendered as an annotated
//! snippet of the offending lines. Every other failure, such as a rejected
//! edit or an unreadable config, becomes a one-line report with a `c4pad::*`
//! code and, where the fix is known, a hint.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity as MietteSeverity,
    SourceCode, SourceSpan,
};

use c4pad::{C4padError, EditError};
use c4pad_parser::{Span, error::Diagnostic};

/// One lint finding together with the diagram text it was found in.
pub struct FindingReport<'a> {
    finding: &'a Diagnostic,
    diagram: &'a str,
}

impl<'a> FindingReport<'a> {
    pub fn new(finding: &'a Diagnostic, diagram: &'a str) -> Self {
        Self { finding, diagram }
    }
}

impl fmt::Debug for FindingReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.finding, f)
    }
}

impl fmt::Display for FindingReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.finding.message())
    }
}

impl std::error::Error for FindingReport<'_> {}

impl MietteDiagnostic for FindingReport<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let code = self.finding.code()?;
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<MietteSeverity> {
        let severity = self.finding.severity();
        Some(if severity.is_warning() {
            MietteSeverity::Warning
        } else {
            MietteSeverity::Error
        })
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let help = self.finding.help()?;
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.diagram)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.finding.labels();
        if labels.is_empty() {
            return None;
        }

        // The primary label marks the offending line; secondary labels mark
        // related declarations such as the first use of a repeated alias.
        let spans = labels.iter().map(|label| {
            let text = Some(label.message().to_owned());
            let at = source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(text, at)
            } else {
                LabeledSpan::new_with_span(text, at)
            }
        });
        Some(Box::new(spans))
    }
}

/// A failed command that has no position in the diagram.
pub struct FailureReport<'a>(&'a C4padError);

impl fmt::Debug for FailureReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0, f)
    }
}

impl fmt::Display for FailureReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for FailureReport<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for FailureReport<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let code = match self.0 {
            C4padError::Io(_) => "c4pad::io",
            C4padError::Edit(_) => "c4pad::edit",
            C4padError::Config(_) => "c4pad::config",
            C4padError::Lint { .. } => return None,
        };
        Some(Box::new(code))
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        let C4padError::Edit(edit) = self.0 else {
            return None;
        };
        let hint = match edit {
            EditError::KindNotAllowed { diagram, .. } => {
                let kinds: Vec<&str> = diagram.element_kinds().iter().map(|k| k.as_str()).collect();
                format!("{diagram} diagrams accept: {}", kinds.join(", "))
            }
            EditError::DuplicateAlias(_) => {
                "run `c4pad outline` to list the aliases already in use".to_string()
            }
            EditError::LineBreak(_) => "put the text on a single line".to_string(),
            EditError::Splice(_) => "run `c4pad check` to find the unclosed boundary".to_string(),
            _ => return None,
        };
        Some(Box::new(hint))
    }
}

/// Anything the CLI prints when a command fails.
#[derive(Debug)]
pub enum Report<'a> {
    Finding(FindingReport<'a>),
    Failure(FailureReport<'a>),
}

impl<'a> Report<'a> {
    fn inner(&self) -> &(dyn MietteDiagnostic + 'a) {
        match self {
            Report::Finding(finding) => finding,
            Report::Failure(failure) => failure,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

impl std::error::Error for Report<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner().source()
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.inner().code()
    }

    fn severity(&self) -> Option<MietteSeverity> {
        self.inner().severity()
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.inner().help()
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.inner().source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.inner().labels()
    }
}

fn source_span(span: Span) -> SourceSpan {
    (span.start()..span.end()).into()
}

/// Split `err` into the reports the CLI prints.
///
/// A failed `check` yields one report per lint finding so each gets its own
/// snippet; any other error yields a single report.
pub fn reports(err: &C4padError) -> Vec<Report<'_>> {
    match err {
        C4padError::Lint { err: findings, src } => findings
            .diagnostics()
            .iter()
            .map(|finding| Report::Finding(FindingReport::new(finding, src)))
            .collect(),
        _ => vec![Report::Failure(FailureReport(err))],
    }
}

/// Render one report with miette's graphical handler.
pub fn render(report: &dyn MietteDiagnostic) -> String {
    let mut rendered = String::new();
    match GraphicalReportHandler::new().render_report(&mut rendered, report) {
        Ok(()) => rendered,
        Err(err) => format!("{report} (report rendering failed: {err})"),
    }
}
