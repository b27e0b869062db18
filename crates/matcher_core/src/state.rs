use crate::view_model::AppViewModel;
use crate::{JobMatch, SelectedFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Upload,
    Loading,
    Results,
}

/// Loading animation markers, in activation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum AnalysisStep {
    #[default]
    Step1,
    Step2,
    Step3,
}

impl AnalysisStep {
    pub const ALL: [AnalysisStep; 3] = [Self::Step1, Self::Step2, Self::Step3];
}

/// What to do when an analysis fails after Loading has begun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Report the error, then show the fixed demonstration results.
    #[default]
    FallbackToDemoData,
    /// Report the error and go back to Upload with the file still selected.
    SurfaceError,
}

/// Where the displayed result set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Service,
    Demo,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    phase: Phase,
    selected_file: Option<SelectedFile>,
    /// Highest active marker; every earlier marker is active too.
    progress: AnalysisStep,
    results: Vec<JobMatch>,
    result_source: Option<ResultSource>,
    failure_policy: FailurePolicy,
    drag_over: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure_policy(failure_policy: FailurePolicy) -> Self {
        Self {
            failure_policy,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(
            self.phase,
            self.selected_file.as_ref(),
            self.progress,
            &self.results,
            self.result_source,
            self.drag_over,
            self.dirty,
        )
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn results(&self) -> &[JobMatch] {
        &self.results
    }

    pub fn result_source(&self) -> Option<ResultSource> {
        self.result_source
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_drag_over(&mut self, drag_over: bool) {
        if self.drag_over != drag_over {
            self.drag_over = drag_over;
            self.dirty = true;
        }
    }

    pub(crate) fn select_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
        self.dirty = true;
    }

    pub(crate) fn clear_file(&mut self) {
        self.selected_file = None;
        self.dirty = true;
    }

    pub(crate) fn begin_loading(&mut self) {
        self.phase = Phase::Loading;
        self.progress = AnalysisStep::Step1;
        self.drag_over = false;
        self.dirty = true;
    }

    /// Markers never move backwards while loading.
    pub(crate) fn advance_progress(&mut self, step: AnalysisStep) {
        if step > self.progress {
            self.progress = step;
            self.dirty = true;
        }
    }

    pub(crate) fn show_results(&mut self, results: Vec<JobMatch>, source: ResultSource) {
        self.phase = Phase::Results;
        self.results = results;
        self.result_source = Some(source);
        self.dirty = true;
    }

    /// Back to Upload. `keep_file` preserves the selection for a retry.
    pub(crate) fn return_to_upload(&mut self, keep_file: bool) {
        self.phase = Phase::Upload;
        if !keep_file {
            self.selected_file = None;
        }
        self.progress = AnalysisStep::Step1;
        self.results.clear();
        self.result_source = None;
        self.dirty = true;
    }
}
