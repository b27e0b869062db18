use crate::{
    demo_matches, validate_file, AnalysisOutcome, AppState, Effect, FailurePolicy, FileCandidate,
    Msg, Phase, ResultSource,
};

const FALLBACK_NOTICE: &str = "\n\nUsing mock data for demonstration...";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileInputChanged(Some(candidate)) => offer_file(&mut state, candidate),
        Msg::DragEntered => {
            if state.phase() == Phase::Upload {
                state.set_drag_over(true);
            }
            Vec::new()
        }
        Msg::DragLeft => {
            state.set_drag_over(false);
            Vec::new()
        }
        Msg::FilesDropped(files) => {
            state.set_drag_over(false);
            match files.into_iter().next() {
                Some(candidate) => offer_file(&mut state, candidate),
                None => Vec::new(),
            }
        }
        Msg::RemoveFileClicked => {
            if state.phase() == Phase::Upload && state.selected_file().is_some() {
                state.clear_file();
                vec![Effect::ClearFileInput]
            } else {
                Vec::new()
            }
        }
        Msg::AnalyzeClicked => match (state.phase(), state.selected_file().cloned()) {
            (Phase::Upload, Some(file)) => {
                state.begin_loading();
                vec![Effect::StartAnalysis { file }]
            }
            _ => Vec::new(),
        },
        Msg::AnalysisStepReached(step) => {
            if state.phase() == Phase::Loading {
                state.advance_progress(step);
            }
            Vec::new()
        }
        Msg::AnalysisFinished(outcome) => {
            if state.phase() == Phase::Loading {
                finish_analysis(&mut state, outcome)
            } else {
                Vec::new()
            }
        }
        Msg::NewSearchClicked | Msg::EscapePressed => {
            if state.phase() == Phase::Results {
                state.return_to_upload(false);
                vec![Effect::ClearFileInput, Effect::ScrollToTop]
            } else {
                Vec::new()
            }
        }
        Msg::FileInputChanged(None) | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn offer_file(state: &mut AppState, candidate: FileCandidate) -> Vec<Effect> {
    if state.phase() != Phase::Upload {
        return Vec::new();
    }
    match validate_file(candidate) {
        Ok(file) => {
            state.select_file(file);
            Vec::new()
        }
        // Rejections leave any previous selection in place.
        Err(rejection) => vec![Effect::Notify {
            message: rejection.to_string(),
        }],
    }
}

fn finish_analysis(state: &mut AppState, outcome: AnalysisOutcome) -> Vec<Effect> {
    match outcome {
        AnalysisOutcome::Matches(matches) => {
            state.show_results(matches, ResultSource::Service);
            Vec::new()
        }
        // The server-rendered page takes over; state is left as is.
        AnalysisOutcome::Redirect(url) => vec![Effect::Navigate { url }],
        AnalysisOutcome::Failed(error) => {
            let reason = format!("Error analyzing CV: {error}");
            match state.failure_policy() {
                FailurePolicy::FallbackToDemoData => {
                    state.show_results(demo_matches(), ResultSource::Demo);
                    vec![Effect::Notify {
                        message: format!("{reason}{FALLBACK_NOTICE}"),
                    }]
                }
                FailurePolicy::SurfaceError => {
                    state.return_to_upload(true);
                    vec![Effect::Notify { message: reason }]
                }
            }
        }
    }
}
