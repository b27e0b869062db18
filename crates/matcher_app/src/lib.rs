//! Page shell for the CV matcher: DOM rendering, event wiring and configuration.
pub mod platform;

pub use platform::config::{AppConfig, ConfigError, FailurePolicySetting};
pub use platform::controller::{ControllerError, PageEvent, UploadFlowController};
pub use platform::document::{Document, RecordingDocument, TerminalDocument};
pub use platform::ui::dom::DomCommand;
