use url::Url;

use crate::{
    format_file_size, match_label, AnalysisStep, JobMatch, Phase, ResultSource, SelectedFile,
};

/// Per-card reveal stagger.
pub const CARD_REVEAL_STEP_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub selected_file: Option<SelectedFileView>,
    pub analyze_enabled: bool,
    /// A drag is hovering over the upload area.
    pub upload_highlighted: bool,
    pub steps: Vec<StepView>,
    pub cards: Vec<JobCardView>,
    pub result_source: Option<ResultSource>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFileView {
    pub name: String,
    pub size_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepView {
    pub step: AnalysisStep,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCardView {
    pub company: String,
    pub role: String,
    pub description: String,
    pub match_label: String,
    pub apply_link: String,
    pub reveal_delay_ms: u64,
}

impl AppViewModel {
    pub(crate) fn build(
        phase: Phase,
        selected_file: Option<&SelectedFile>,
        progress: AnalysisStep,
        results: &[JobMatch],
        result_source: Option<ResultSource>,
        drag_over: bool,
        dirty: bool,
    ) -> Self {
        let steps = AnalysisStep::ALL
            .iter()
            .map(|&step| StepView {
                step,
                active: step <= progress,
            })
            .collect();

        let cards = results
            .iter()
            .enumerate()
            .map(|(index, job)| JobCardView {
                company: job.company.clone(),
                role: job.role.clone(),
                description: job.description.clone(),
                match_label: match_label(job.similarity),
                apply_link: safe_apply_link(&job.apply_link),
                reveal_delay_ms: index as u64 * CARD_REVEAL_STEP_MS,
            })
            .collect();

        Self {
            phase,
            selected_file: selected_file.map(|file| SelectedFileView {
                name: file.name().to_string(),
                size_label: format_file_size(file.size()),
            }),
            analyze_enabled: selected_file.is_some(),
            upload_highlighted: drag_over && phase == Phase::Upload,
            steps,
            cards,
            result_source,
            dirty,
        }
    }
}

/// Keeps absolute http(s) links and root-relative paths; anything else becomes `#`.
pub fn safe_apply_link(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('/') && !trimmed.starts_with("//") {
        return trimmed.to_string();
    }
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => trimmed.to_string(),
        _ => "#".to_string(),
    }
}
