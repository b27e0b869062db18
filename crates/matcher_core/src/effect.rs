use crate::SelectedFile;

/// Side effects requested by [`crate::update`]; executed by the app shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Show a blocking message to the user.
    Notify { message: String },
    /// Reset the underlying file input control so the same file can be re-picked.
    ClearFileInput,
    /// Run the loading animation and then submit the file.
    StartAnalysis { file: SelectedFile },
    /// Hand the page over to a server-rendered location.
    Navigate { url: String },
    ScrollToTop,
}
