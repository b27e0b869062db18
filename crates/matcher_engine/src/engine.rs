use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use matcher_logging::matcher_info;

use crate::{run_analysis, AnimationSchedule, EventSink, Submitter, UploadFile};

enum EngineCommand {
    Analyze { file: UploadFile },
}

/// Runs analyses on a background tokio runtime and reports through an [`EventSink`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        submitter: Arc<dyn Submitter>,
        schedule: AnimationSchedule,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let schedule = Arc::new(schedule);

        thread::Builder::new()
            .name("matcher-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let submitter = submitter.clone();
                    let schedule = schedule.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(&schedule, submitter.as_ref(), sink.as_ref(), command).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn analyze(&self, file: UploadFile) {
        let _ = self.cmd_tx.send(EngineCommand::Analyze { file });
    }
}

async fn handle_command(
    schedule: &AnimationSchedule,
    submitter: &dyn Submitter,
    sink: &dyn EventSink,
    command: EngineCommand,
) {
    match command {
        EngineCommand::Analyze { file } => {
            matcher_info!("Analysis started for {} ({} bytes)", file.name, file.content.len());
            run_analysis(schedule, submitter, &file, sink).await;
        }
    }
}
