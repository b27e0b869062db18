use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use matcher_app::platform::ui::constants::*;
use matcher_app::{DomCommand, PageEvent, RecordingDocument, UploadFlowController};
use matcher_core::{FailurePolicy, FileCandidate, Phase, ResultSource, MAX_FILE_SIZE};
use matcher_engine::{
    AnimationSchedule, FailureKind, MatchRecord, SubmitError, SubmitOutcome, Submitter,
    UploadFile,
};
use pretty_assertions::assert_eq;

const SETTLE: Duration = Duration::from_secs(5);

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(matcher_logging::initialize_for_tests);
}

/// Answers every submission with a fixed result and remembers what it was sent.
struct StubSubmitter {
    result: Result<SubmitOutcome, SubmitError>,
    received: Mutex<Vec<UploadFile>>,
}

impl StubSubmitter {
    fn new(result: Result<SubmitOutcome, SubmitError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            received: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl Submitter for StubSubmitter {
    async fn submit(&self, file: &UploadFile) -> Result<SubmitOutcome, SubmitError> {
        self.received.lock().unwrap().push(file.clone());
        self.result.clone()
    }
}

fn controller(
    submitter: Arc<StubSubmitter>,
    policy: FailurePolicy,
) -> UploadFlowController<RecordingDocument> {
    init_logging();
    UploadFlowController::with_submitter(
        RecordingDocument::new(),
        policy,
        submitter,
        AnimationSchedule::instant(),
    )
    .expect("controller")
}

fn no_matches() -> Arc<StubSubmitter> {
    StubSubmitter::new(Ok(SubmitOutcome::Matches(Vec::new())))
}

fn pdf() -> FileCandidate {
    FileCandidate::from_bytes("cv.pdf", "application/pdf", b"%PDF-1.7 test".to_vec())
}

fn record(company: &str, similarity: f64) -> MatchRecord {
    MatchRecord {
        company: company.to_string(),
        role: "Engineer".to_string(),
        description: "Build <things>".to_string(),
        job_link: format!("https://{}.test/apply", company.to_lowercase()),
        similarity,
    }
}

fn analyze(ctrl: &mut UploadFlowController<RecordingDocument>) {
    ctrl.handle_event(PageEvent::FileInputChanged(Some(pdf())));
    ctrl.handle_event(PageEvent::AnalyzeClicked);
    assert!(ctrl.run_until_settled(SETTLE), "analysis settled");
}

#[test]
fn initial_render_shows_upload_only() {
    let ctrl = controller(no_matches(), FailurePolicy::default());
    let doc = ctrl.document();

    assert_eq!(doc.is_visible(SECTION_UPLOAD), Some(true));
    assert_eq!(doc.is_visible(SECTION_LOADING), Some(false));
    assert_eq!(doc.is_visible(SECTION_RESULTS), Some(false));
    assert_eq!(doc.is_visible(UPLOAD_AREA), Some(true));
    assert_eq!(doc.is_enabled(BUTTON_ANALYZE), Some(false));
    assert!(doc.has_class("step1", CLASS_ACTIVE));
    assert!(!doc.has_class("step2", CLASS_ACTIVE));
}

#[test]
fn selecting_a_file_shows_summary_and_enables_analyze() {
    let mut ctrl = controller(no_matches(), FailurePolicy::default());

    ctrl.handle_event(PageEvent::FileInputChanged(Some(pdf())));

    let doc = ctrl.document();
    assert_eq!(doc.is_visible(UPLOAD_AREA), Some(false));
    assert_eq!(doc.is_visible(PANEL_SELECTED_FILE), Some(true));
    assert_eq!(doc.text(LABEL_FILE_NAME), Some("cv.pdf"));
    assert_eq!(doc.text(LABEL_FILE_SIZE), Some("13 Bytes"));
    assert_eq!(doc.is_enabled(BUTTON_ANALYZE), Some(true));
}

#[test]
fn rejected_file_alerts_and_keeps_analyze_disabled() {
    let mut ctrl = controller(no_matches(), FailurePolicy::default());
    let mut huge = pdf();
    huge.size = MAX_FILE_SIZE + 1;

    ctrl.handle_event(PageEvent::FilesDropped(vec![huge]));
    ctrl.handle_event(PageEvent::FileInputChanged(Some(FileCandidate::from_bytes(
        "cv.txt",
        "text/plain",
        b"hello".to_vec(),
    ))));

    let doc = ctrl.document();
    assert_eq!(
        doc.alerts(),
        vec!["File size must be less than 10MB.", "Please upload a PDF file."]
    );
    assert_eq!(doc.is_enabled(BUTTON_ANALYZE), Some(false));
    assert!(ctrl.state().selected_file().is_none());
}

#[test]
fn remove_clears_the_file_input() {
    let mut ctrl = controller(no_matches(), FailurePolicy::default());
    ctrl.handle_event(PageEvent::FileInputChanged(Some(pdf())));

    ctrl.handle_event(PageEvent::RemoveFileClicked);

    let doc = ctrl.document();
    assert!(doc.commands().contains(&DomCommand::ClearFileInput {
        element: INPUT_FILE
    }));
    assert_eq!(doc.is_visible(UPLOAD_AREA), Some(true));
    assert_eq!(doc.is_enabled(BUTTON_ANALYZE), Some(false));
}

#[test]
fn successful_analysis_renders_cards_in_order() {
    let submitter = StubSubmitter::new(Ok(SubmitOutcome::Matches(vec![
        record("Acme", 0.92),
        record("Globex", 0.885),
    ])));
    let mut ctrl = controller(submitter.clone(), FailurePolicy::default());

    analyze(&mut ctrl);

    assert_eq!(ctrl.state().phase(), Phase::Results);
    assert_eq!(ctrl.state().result_source(), Some(ResultSource::Service));
    let doc = ctrl.document();
    assert_eq!(doc.is_visible(SECTION_LOADING), Some(false));
    assert_eq!(doc.is_visible(SECTION_RESULTS), Some(true));
    assert!(doc.alerts().is_empty());
    let cards: Vec<_> = doc
        .cards(GRID_RESULTS)
        .into_iter()
        .map(|c| (c.company.as_str(), c.match_label.as_str(), c.reveal_delay_ms))
        .collect();
    assert_eq!(cards, vec![("Acme", "92% Match", 0), ("Globex", "89% Match", 100)]);

    let received = submitter.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].name, "cv.pdf");
    assert_eq!(received[0].media_type, "application/pdf");
    assert_eq!(&received[0].content[..], b"%PDF-1.7 test");
}

#[test]
fn all_step_markers_are_active_after_loading() {
    let mut ctrl = controller(no_matches(), FailurePolicy::default());

    analyze(&mut ctrl);

    let doc = ctrl.document();
    for step in STEP_MARKERS {
        assert!(doc.has_class(step, CLASS_ACTIVE), "{step} active");
    }
    assert!(doc.cards(GRID_RESULTS).is_empty());
}

#[test]
fn failure_falls_back_to_five_demo_cards() {
    let submitter = StubSubmitter::new(Err(SubmitError {
        kind: FailureKind::Transport,
        message: "error sending request".to_string(),
    }));
    let mut ctrl = controller(submitter, FailurePolicy::FallbackToDemoData);

    analyze(&mut ctrl);

    assert_eq!(ctrl.state().phase(), Phase::Results);
    assert_eq!(ctrl.state().result_source(), Some(ResultSource::Demo));
    let doc = ctrl.document();
    assert_eq!(
        doc.alerts(),
        vec!["Error analyzing CV: error sending request\n\nUsing mock data for demonstration..."]
    );
    let companies: Vec<_> = doc
        .cards(GRID_RESULTS)
        .into_iter()
        .map(|c| c.company.as_str())
        .collect();
    assert_eq!(
        companies,
        vec![
            "TechCorp Solutions",
            "DataFlow Analytics",
            "CloudTech Innovations",
            "StartupHub Inc",
            "Enterprise Solutions Ltd",
        ]
    );
}

#[test]
fn surface_error_policy_returns_to_upload() {
    let submitter = StubSubmitter::new(Err(SubmitError {
        kind: FailureKind::DeclaredFailure { status: 400 },
        message: "No text found in PDF".to_string(),
    }));
    let mut ctrl = controller(submitter, FailurePolicy::SurfaceError);

    analyze(&mut ctrl);

    assert_eq!(ctrl.state().phase(), Phase::Upload);
    let doc = ctrl.document();
    assert_eq!(doc.alerts(), vec!["Error analyzing CV: No text found in PDF"]);
    assert_eq!(doc.is_visible(SECTION_UPLOAD), Some(true));
    assert_eq!(doc.is_enabled(BUTTON_ANALYZE), Some(true));
}

#[test]
fn redirect_hands_the_page_over() {
    let submitter = StubSubmitter::new(Ok(SubmitOutcome::Redirect {
        url: "http://matcher.test/success".to_string(),
    }));
    let mut ctrl = controller(submitter, FailurePolicy::default());

    analyze(&mut ctrl);

    assert_eq!(ctrl.navigated_to(), Some("http://matcher.test/success"));
    assert_eq!(ctrl.document().navigated_to(), Some("http://matcher.test/success"));
    assert_eq!(ctrl.state().phase(), Phase::Loading);
}

#[test]
fn new_search_resets_the_page() {
    let submitter = StubSubmitter::new(Ok(SubmitOutcome::Matches(vec![record("Acme", 0.5)])));
    let mut ctrl = controller(submitter, FailurePolicy::default());
    analyze(&mut ctrl);

    ctrl.handle_event(PageEvent::NewSearchClicked);

    assert_eq!(ctrl.state().phase(), Phase::Upload);
    assert!(ctrl.state().selected_file().is_none());
    let doc = ctrl.document();
    assert_eq!(doc.is_visible(SECTION_UPLOAD), Some(true));
    assert_eq!(doc.is_visible(SECTION_RESULTS), Some(false));
    assert_eq!(doc.is_enabled(BUTTON_ANALYZE), Some(false));
    assert!(doc.has_class("step1", CLASS_ACTIVE));
    assert!(!doc.has_class("step2", CLASS_ACTIVE));
    assert!(!doc.has_class("step3", CLASS_ACTIVE));
    assert_eq!(
        doc.commands().last(),
        Some(&DomCommand::ClearChildren {
            element: GRID_RESULTS
        })
    );
    assert_eq!(doc.count(|cmd| *cmd == DomCommand::ScrollToTop), 1);
}

#[test]
fn escape_resets_only_from_results() {
    let submitter = StubSubmitter::new(Ok(SubmitOutcome::Matches(Vec::new())));
    let mut ctrl = controller(submitter, FailurePolicy::default());
    ctrl.handle_event(PageEvent::FileInputChanged(Some(pdf())));

    ctrl.handle_event(PageEvent::KeyDown {
        key: "Escape".to_string(),
    });
    assert!(ctrl.state().selected_file().is_some());

    ctrl.handle_event(PageEvent::AnalyzeClicked);
    assert!(ctrl.run_until_settled(SETTLE));
    ctrl.handle_event(PageEvent::KeyDown {
        key: "Enter".to_string(),
    });
    assert_eq!(ctrl.state().phase(), Phase::Results);

    ctrl.handle_event(PageEvent::KeyDown {
        key: "Escape".to_string(),
    });
    assert_eq!(ctrl.state().phase(), Phase::Upload);
}

#[test]
fn second_analysis_replaces_previous_cards() {
    let submitter = StubSubmitter::new(Ok(SubmitOutcome::Matches(vec![
        record("Acme", 0.5),
        record("Globex", 0.4),
    ])));
    let mut ctrl = controller(submitter, FailurePolicy::default());

    analyze(&mut ctrl);
    ctrl.handle_event(PageEvent::NewSearchClicked);
    analyze(&mut ctrl);

    assert_eq!(ctrl.document().cards(GRID_RESULTS).len(), 2);
}

#[test]
fn drag_over_highlights_upload_area_until_drop() {
    let mut ctrl = controller(no_matches(), FailurePolicy::default());
    assert!(!ctrl.document().has_class(UPLOAD_AREA, CLASS_DRAGOVER));

    ctrl.handle_event(PageEvent::DragOver);
    assert!(ctrl.document().has_class(UPLOAD_AREA, CLASS_DRAGOVER));

    ctrl.handle_event(PageEvent::DragLeave);
    assert!(!ctrl.document().has_class(UPLOAD_AREA, CLASS_DRAGOVER));

    ctrl.handle_event(PageEvent::DragOver);
    ctrl.handle_event(PageEvent::FilesDropped(vec![pdf()]));
    let doc = ctrl.document();
    assert!(!doc.has_class(UPLOAD_AREA, CLASS_DRAGOVER));
    assert_eq!(doc.text(LABEL_FILE_NAME), Some("cv.pdf"));
    assert_eq!(doc.is_enabled(BUTTON_ANALYZE), Some(true));
}
