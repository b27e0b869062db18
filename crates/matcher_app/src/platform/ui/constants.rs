//! Element identifiers of the matcher page.

pub const SECTION_UPLOAD: &str = "uploadSection";
pub const SECTION_LOADING: &str = "loadingSection";
pub const SECTION_RESULTS: &str = "resultsSection";

pub const UPLOAD_AREA: &str = "uploadArea";
pub const CLASS_DRAGOVER: &str = "dragover";
pub const INPUT_FILE: &str = "fileInput";
pub const PANEL_SELECTED_FILE: &str = "selectedFile";
pub const LABEL_FILE_NAME: &str = "fileName";
pub const LABEL_FILE_SIZE: &str = "fileSize";
pub const BUTTON_REMOVE_FILE: &str = "removeFile";
pub const BUTTON_ANALYZE: &str = "analyzeBtn";

pub const STEP_MARKERS: [&str; 3] = ["step1", "step2", "step3"];
pub const CLASS_ACTIVE: &str = "active";

pub const GRID_RESULTS: &str = "resultsGrid";
pub const BUTTON_NEW_SEARCH: &str = "newSearchBtn";
