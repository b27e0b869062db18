//! Matcher core: pure upload/analyze/results state machine and view-model helpers.
mod effect;
mod file;
mod matches;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use file::{
    format_file_size, validate_file, FileCandidate, FileRejection, SelectedFile,
    ACCEPTED_MEDIA_TYPE, MAX_FILE_SIZE,
};
pub use matches::{demo_matches, match_label, match_percentage, JobMatch};
pub use msg::{AnalysisError, AnalysisErrorKind, AnalysisOutcome, Msg};
pub use state::{AnalysisStep, AppState, FailurePolicy, Phase, ResultSource};
pub use update::update;
pub use view_model::{
    safe_apply_link, AppViewModel, JobCardView, SelectedFileView, StepView, CARD_REVEAL_STEP_MS,
};
