use std::io;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use matcher_core::{update, AppState, FailurePolicy, FileCandidate, Msg, Phase};
use matcher_engine::{AnimationSchedule, ReqwestSubmitter, Submitter};
use matcher_logging::{matcher_debug, matcher_warn};
use thiserror::Error;

use super::config::{AppConfig, ConfigError};
use super::document::Document;
use super::effects::EffectRunner;
use super::ui;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not start the analysis engine: {0}")]
    Engine(#[from] io::Error),
}

/// Raw page interactions, before they become core messages.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    FileInputChanged(Option<FileCandidate>),
    DragOver,
    DragLeave,
    FilesDropped(Vec<FileCandidate>),
    RemoveFileClicked,
    AnalyzeClicked,
    NewSearchClicked,
    KeyDown { key: String },
}

impl PageEvent {
    fn into_msg(self) -> Msg {
        match self {
            PageEvent::FileInputChanged(file) => Msg::FileInputChanged(file),
            PageEvent::DragOver => Msg::DragEntered,
            PageEvent::DragLeave => Msg::DragLeft,
            PageEvent::FilesDropped(files) => Msg::FilesDropped(files),
            PageEvent::RemoveFileClicked => Msg::RemoveFileClicked,
            PageEvent::AnalyzeClicked => Msg::AnalyzeClicked,
            PageEvent::NewSearchClicked => Msg::NewSearchClicked,
            PageEvent::KeyDown { key } if key == "Escape" => Msg::EscapePressed,
            PageEvent::KeyDown { .. } => Msg::NoOp,
        }
    }
}

/// One per page session: owns the state, the page and the engine.
pub struct UploadFlowController<D: Document> {
    state: AppState,
    document: D,
    effects: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    navigated_to: Option<String>,
}

impl<D: Document> UploadFlowController<D> {
    pub fn new(document: D, config: &AppConfig) -> Result<Self, ControllerError> {
        let submitter = Arc::new(ReqwestSubmitter::new(config.submit_settings()?));
        Self::with_submitter(
            document,
            config.failure_policy(),
            submitter,
            config.animation_schedule(),
        )
    }

    pub fn with_submitter(
        document: D,
        policy: FailurePolicy,
        submitter: Arc<dyn Submitter>,
        schedule: AnimationSchedule,
    ) -> Result<Self, ControllerError> {
        let (msg_tx, msg_rx) = mpsc::channel();
        let effects = EffectRunner::new(submitter, schedule, msg_tx)?;
        let mut controller = Self {
            state: AppState::with_failure_policy(policy),
            document,
            effects,
            msg_rx,
            navigated_to: None,
        };
        controller.render();
        Ok(controller)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    /// Set once the page has been handed to a server-rendered location.
    pub fn navigated_to(&self) -> Option<&str> {
        self.navigated_to.as_deref()
    }

    pub fn handle_event(&mut self, event: PageEvent) {
        self.process_pending_messages();
        self.dispatch_msg(event.into_msg());
    }

    /// Applies engine messages that have arrived so far.
    pub fn process_pending_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch_msg(msg);
        }
    }

    /// Blocks until the flow leaves Loading or the page navigates away.
    /// Returns `false` on timeout.
    pub fn run_until_settled(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.process_pending_messages();
            if self.is_settled() {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                matcher_warn!("Analysis did not settle within {:?}", timeout);
                return false;
            }
            match self.msg_rx.recv_timeout(remaining) {
                Ok(msg) => self.dispatch_msg(msg),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => return self.is_settled(),
            }
        }
    }

    fn is_settled(&self) -> bool {
        self.state.phase() != Phase::Loading || self.navigated_to.is_some()
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        if self.navigated_to.is_some() {
            // The page is gone.
            return;
        }
        matcher_debug!("dispatch {:?}", MsgName(&msg));
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        if let Some(url) = self.effects.run(effects, &mut self.document) {
            self.navigated_to = Some(url);
        }
        if self.state.consume_dirty() {
            self.render();
        }
    }

    fn render(&mut self) {
        for command in ui::render::render(&self.state.view()) {
            self.document.apply(command);
        }
    }
}

/// Message name without file contents, for logging.
struct MsgName<'a>(&'a Msg);

impl std::fmt::Debug for MsgName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            Msg::FileInputChanged(_) => "FileInputChanged",
            Msg::DragEntered => "DragEntered",
            Msg::DragLeft => "DragLeft",
            Msg::FilesDropped(_) => "FilesDropped",
            Msg::RemoveFileClicked => "RemoveFileClicked",
            Msg::AnalyzeClicked => "AnalyzeClicked",
            Msg::AnalysisStepReached(_) => "AnalysisStepReached",
            Msg::AnalysisFinished(_) => "AnalysisFinished",
            Msg::NewSearchClicked => "NewSearchClicked",
            Msg::EscapePressed => "EscapePressed",
            Msg::NoOp => "NoOp",
        };
        f.write_str(name)
    }
}
