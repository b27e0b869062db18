//! Page collaborators that receive [`DomCommand`]s.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use matcher_core::JobCardView;

use super::ui::constants::{CLASS_ACTIVE, GRID_RESULTS, SECTION_RESULTS, STEP_MARKERS};
use super::ui::dom::DomCommand;
use super::ui::render::card_html;

/// The page the controller drives.
pub trait Document {
    fn apply(&mut self, command: DomCommand);
}

/// Keeps every command and answers questions about the resulting page.
#[derive(Debug, Default)]
pub struct RecordingDocument {
    commands: Vec<DomCommand>,
}

impl RecordingDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DomCommand] {
        &self.commands
    }

    pub fn is_visible(&self, element: &str) -> Option<bool> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            DomCommand::SetVisible { element: e, visible } if *e == element => Some(*visible),
            _ => None,
        })
    }

    pub fn is_enabled(&self, element: &str) -> Option<bool> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            DomCommand::SetEnabled { element: e, enabled } if *e == element => Some(*enabled),
            _ => None,
        })
    }

    pub fn text(&self, element: &str) -> Option<&str> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            DomCommand::SetText { element: e, text } if *e == element => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_class(&self, element: &str, class: &str) -> bool {
        self.commands
            .iter()
            .rev()
            .find_map(|cmd| match cmd {
                DomCommand::SetClass {
                    element: e,
                    class: c,
                    present,
                } if *e == element && *c == class => Some(*present),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Cards appended to `element` since it was last cleared.
    pub fn cards(&self, element: &str) -> Vec<&JobCardView> {
        let mut cards = Vec::new();
        for cmd in &self.commands {
            match cmd {
                DomCommand::ClearChildren { element: e } if *e == element => cards.clear(),
                DomCommand::AppendCard { element: e, card } if *e == element => cards.push(card),
                _ => {}
            }
        }
        cards
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DomCommand::Alert { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn navigated_to(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            DomCommand::Navigate { url } => Some(url.as_str()),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&DomCommand) -> bool) -> usize {
        self.commands.iter().filter(|cmd| pred(cmd)).count()
    }
}

impl Document for RecordingDocument {
    fn apply(&mut self, command: DomCommand) {
        self.commands.push(command);
    }
}

/// Prints page changes for the headless driver and can snapshot the result grid.
#[derive(Debug, Default)]
pub struct TerminalDocument {
    visible: HashMap<&'static str, bool>,
    active_steps: HashMap<&'static str, bool>,
    grid_html: Vec<String>,
    html_out: Option<PathBuf>,
}

impl TerminalDocument {
    pub fn new(html_out: Option<PathBuf>) -> Self {
        Self {
            html_out,
            ..Self::default()
        }
    }

    /// Writes the result grid snapshot, if one was requested.
    pub fn finish(self) -> io::Result<Option<PathBuf>> {
        let Some(path) = self.html_out else {
            return Ok(None);
        };
        let html = format!(
            "<div id=\"{GRID_RESULTS}\" class=\"results-grid\">\n{}\n</div>\n",
            self.grid_html.join("\n")
        );
        fs::write(&path, html)?;
        Ok(Some(path))
    }

    fn results_visible(&self) -> bool {
        self.visible.get(SECTION_RESULTS).copied().unwrap_or(false)
    }
}

impl Document for TerminalDocument {
    fn apply(&mut self, command: DomCommand) {
        match command {
            DomCommand::SetVisible { element, visible } => {
                self.visible.insert(element, visible);
            }
            DomCommand::SetClass {
                element,
                class,
                present,
            } if class == CLASS_ACTIVE => {
                let was_active = self.active_steps.insert(element, present).unwrap_or(false);
                if present && !was_active {
                    if let Some(index) = STEP_MARKERS.iter().position(|s| *s == element) {
                        println!("[{}/{}] analyzing...", index + 1, STEP_MARKERS.len());
                    }
                }
            }
            DomCommand::ClearChildren { element } if element == GRID_RESULTS => {
                self.grid_html.clear();
            }
            DomCommand::AppendCard { element, card } if element == GRID_RESULTS => {
                if self.results_visible() {
                    println!(
                        "{:>10}  {} @ {}\n            {}",
                        card.match_label, card.role, card.company, card.apply_link
                    );
                }
                self.grid_html.push(card_html(&card));
            }
            DomCommand::Alert { message } => eprintln!("! {message}"),
            DomCommand::Navigate { url } => println!("Redirected to {url}"),
            _ => {}
        }
    }
}
