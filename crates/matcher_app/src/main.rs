use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use matcher_app::platform::{file_source, logging};
use matcher_app::{
    AppConfig, FailurePolicySetting, PageEvent, TerminalDocument, UploadFlowController,
};
use matcher_core::{Phase, ResultSource};

/// Upload a CV to the job matcher and print the suggested jobs.
#[derive(Parser, Debug)]
#[command(name = "matcher_app", version, about)]
struct Cli {
    /// PDF document to analyze.
    file: PathBuf,
    /// RON config file (defaults to ./matcher.ron when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Server to submit to, overriding the config.
    #[arg(long)]
    base_url: Option<String>,
    /// Report failures instead of showing demonstration results.
    #[arg(long, default_value_t = false)]
    surface_errors: bool,
    /// Skip the loading animation delays.
    #[arg(long, default_value_t = false)]
    no_animation: bool,
    /// Write the rendered result cards to this HTML file.
    #[arg(long)]
    html_out: Option<PathBuf>,
    /// Log file (defaults to ./matcher.log).
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Also log to the terminal, at debug level.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
    /// Give up waiting for the server after this many seconds.
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if cli.surface_errors {
        config.failure_policy = FailurePolicySetting::SurfaceError;
    }
    if cli.no_animation {
        config.animation.step2_delay_ms = 0;
        config.animation.step3_delay_ms = 0;
        config.animation.settle_ms = 0;
    }
    logging::initialize(cli.verbose, cli.log_file.or_else(|| config.log_file.clone()));

    let candidate = file_source::load_candidate(&cli.file)
        .with_context(|| format!("could not read {}", cli.file.display()))?;

    let mut controller = UploadFlowController::new(TerminalDocument::new(cli.html_out), &config)?;
    controller.handle_event(PageEvent::FileInputChanged(Some(candidate)));
    let Some(file) = controller.state().view().selected_file else {
        bail!("{} was not accepted", cli.file.display());
    };
    println!("Selected {} ({})", file.name, file.size_label);

    controller.handle_event(PageEvent::AnalyzeClicked);
    if !controller.run_until_settled(Duration::from_secs(cli.timeout_secs)) {
        bail!("no answer from {} within {}s", config.base_url, cli.timeout_secs);
    }

    let phase = controller.state().phase();
    let source = controller.state().result_source();
    let navigated = controller.navigated_to().is_some();
    let no_matches = controller.state().results().is_empty();
    if let Some(path) = controller.into_document().finish()? {
        println!("Wrote {}", path.display());
    }

    match (phase, source) {
        _ if navigated => Ok(()),
        (Phase::Results, Some(ResultSource::Demo)) => {
            println!("(demonstration results; the analysis itself failed)");
            Ok(())
        }
        (Phase::Results, _) => {
            if no_matches {
                println!("No matching jobs found.");
            }
            Ok(())
        }
        _ => bail!("analysis failed"),
    }
}
