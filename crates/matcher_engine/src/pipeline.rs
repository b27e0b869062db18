use matcher_logging::{matcher_info, matcher_warn};

use crate::{
    run_animation, AnimationSchedule, EngineEvent, EventSink, SubmitOutcome, Submitter, UploadFile,
};

/// Runs one analysis: the whole animation first, then the submission.
///
/// The request is not issued until the last animation delay has elapsed, so
/// the total wait is the animation length plus the network latency.
pub async fn run_analysis(
    schedule: &AnimationSchedule,
    submitter: &dyn Submitter,
    file: &UploadFile,
    sink: &dyn EventSink,
) {
    run_animation(schedule, sink).await;

    let result = submitter.submit(file).await;
    match &result {
        Ok(outcome) => matcher_info!("Analysis of {} finished: {}", file.name, summary(outcome)),
        Err(err) => matcher_warn!(
            "Analysis of {} failed ({}): {}",
            file.name,
            err.kind,
            err.message
        ),
    }
    sink.emit(EngineEvent::AnalysisCompleted(result));
}

fn summary(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Matches(records) => format!("{} matches", records.len()),
        SubmitOutcome::Redirect { url } => format!("redirect to {url}"),
    }
}
