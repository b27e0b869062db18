use std::io;
use std::sync::{mpsc, Arc};

use bytes::Bytes;
use matcher_core::{
    AnalysisError, AnalysisErrorKind, AnalysisOutcome, AnalysisStep, Effect, JobMatch, Msg,
    SelectedFile,
};
use matcher_engine::{
    AnimationSchedule, EngineEvent, EngineHandle, EventSink, FailureKind, Marker, MatchRecord,
    SubmitError, SubmitOutcome, Submitter, UploadFile,
};
use matcher_logging::{matcher_info, matcher_warn};

use super::document::Document;
use super::ui::constants::INPUT_FILE;
use super::ui::dom::DomCommand;

/// Executes core effects against the page and the engine.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        submitter: Arc<dyn Submitter>,
        schedule: AnimationSchedule,
        msg_tx: mpsc::Sender<Msg>,
    ) -> io::Result<Self> {
        let sink = Arc::new(MsgSink { tx: msg_tx });
        let engine = EngineHandle::new(submitter, schedule, sink)?;
        Ok(Self { engine })
    }

    /// Runs effects in order. Returns the navigation target if the page was handed over.
    pub fn run(&self, effects: Vec<Effect>, document: &mut dyn Document) -> Option<String> {
        let mut navigated = None;
        for effect in effects {
            match effect {
                Effect::Notify { message } => {
                    matcher_info!("Notify: {}", message.replace('\n', " "));
                    document.apply(DomCommand::Alert { message });
                }
                Effect::ClearFileInput => {
                    document.apply(DomCommand::ClearFileInput {
                        element: INPUT_FILE,
                    });
                }
                Effect::StartAnalysis { file } => {
                    matcher_info!("StartAnalysis file={} size={}", file.name(), file.size());
                    self.engine.analyze(upload_file(&file));
                }
                Effect::Navigate { url } => {
                    matcher_info!("Navigate url={}", url);
                    document.apply(DomCommand::Navigate { url: url.clone() });
                    navigated = Some(url);
                }
                Effect::ScrollToTop => document.apply(DomCommand::ScrollToTop),
            }
        }
        navigated
    }
}

/// Feeds engine events back into the controller's message queue.
struct MsgSink {
    tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::MarkerActivated(marker) => Msg::AnalysisStepReached(map_marker(marker)),
            EngineEvent::AnalysisCompleted(result) => Msg::AnalysisFinished(map_result(result)),
        };
        let _ = self.tx.send(msg);
    }
}

fn upload_file(file: &SelectedFile) -> UploadFile {
    UploadFile {
        name: file.name().to_string(),
        media_type: file.media_type().to_string(),
        content: Bytes::copy_from_slice(file.content()),
    }
}

fn map_marker(marker: Marker) -> AnalysisStep {
    match marker {
        Marker::Step2 => AnalysisStep::Step2,
        Marker::Step3 => AnalysisStep::Step3,
    }
}

fn map_result(result: Result<SubmitOutcome, SubmitError>) -> AnalysisOutcome {
    match result {
        Ok(SubmitOutcome::Matches(records)) => {
            AnalysisOutcome::Matches(records.into_iter().map(map_record).collect())
        }
        Ok(SubmitOutcome::Redirect { url }) => AnalysisOutcome::Redirect(url),
        Err(err) => {
            matcher_warn!("Analysis failed: {}", err.kind);
            AnalysisOutcome::Failed(AnalysisError::new(map_failure(&err.kind), err.message))
        }
    }
}

fn map_record(record: MatchRecord) -> JobMatch {
    JobMatch::new(
        record.company,
        record.role,
        record.description,
        record.job_link,
        record.similarity,
    )
}

fn map_failure(kind: &FailureKind) -> AnalysisErrorKind {
    match kind {
        FailureKind::Transport | FailureKind::Network | FailureKind::InvalidRequest => {
            AnalysisErrorKind::Transport
        }
        FailureKind::DeclaredFailure { .. } => AnalysisErrorKind::DeclaredFailure,
        FailureKind::UnexpectedFormat => AnalysisErrorKind::UnexpectedFormat,
        FailureKind::MalformedBody | FailureKind::TooLarge { .. } => {
            AnalysisErrorKind::MalformedResponse
        }
    }
}
