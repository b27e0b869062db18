use std::fmt;

use crate::{AnalysisStep, FileCandidate, JobMatch};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a file through the browse dialog (`None` when the dialog was cancelled).
    FileInputChanged(Option<FileCandidate>),
    /// A drag is hovering over the upload area.
    DragEntered,
    /// The drag left the upload area without dropping.
    DragLeft,
    /// User dropped files onto the upload area; only the first one is considered.
    FilesDropped(Vec<FileCandidate>),
    /// User clicked the remove button on the selected-file summary.
    RemoveFileClicked,
    /// User clicked Analyze.
    AnalyzeClicked,
    /// Loading animation reached the given marker.
    AnalysisStepReached(AnalysisStep),
    /// Submission pipeline finished.
    AnalysisFinished(AnalysisOutcome),
    /// User clicked New Search.
    NewSearchClicked,
    /// User pressed Escape.
    EscapePressed,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Matches(Vec<JobMatch>),
    /// The server answered with a redirect the page must follow.
    Redirect(String),
    Failed(AnalysisError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisErrorKind {
    /// No endpoint could be reached.
    Transport,
    /// Non-success status, with the server's reason when it gave one.
    DeclaredFailure,
    /// Neither structured data nor a redirect.
    UnexpectedFormat,
    /// Structured data that could not be read as a result set.
    MalformedResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisError {
    pub kind: AnalysisErrorKind,
    pub message: String,
}

impl AnalysisError {
    pub fn new(kind: AnalysisErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AnalysisError {}
