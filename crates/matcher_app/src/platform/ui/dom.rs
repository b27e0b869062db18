use matcher_core::JobCardView;

/// One mutation of the page. Element arguments are ids from [`super::constants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomCommand {
    SetVisible {
        element: &'static str,
        visible: bool,
    },
    SetText {
        element: &'static str,
        text: String,
    },
    SetEnabled {
        element: &'static str,
        enabled: bool,
    },
    SetClass {
        element: &'static str,
        class: &'static str,
        present: bool,
    },
    ClearChildren {
        element: &'static str,
    },
    AppendCard {
        element: &'static str,
        card: JobCardView,
    },
    ClearFileInput {
        element: &'static str,
    },
    Alert {
        message: String,
    },
    Navigate {
        url: String,
    },
    ScrollToTop,
}
