// Page collaborator: everything the user sees as a result of an action

use crate::project_form::FieldId;
use crate::routes::cell_element_id;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use log::info;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

pub trait Presenter {
    /// Highlight (or un-highlight) the `cell_{row}_{col}` element
    fn set_cell_highlight(&mut self, row: usize, col: usize, selected: bool);

    /// Set or clear the "invalid" marker of a form field
    fn set_field_invalid(&mut self, field: FieldId, invalid: bool);

    fn show_toast(&mut self, toast: Toast);

    /// Leave the current page for `path`
    fn navigate(&mut self, path: &str);
}

/// Terminal presenter used by the command-line client
pub struct ConsolePresenter {
    base_url: String,
    use_color: bool,
}

impl ConsolePresenter {
    pub fn new(base_url: impl Into<String>, use_color: bool) -> Self {
        Self {
            base_url: base_url.into(),
            use_color,
        }
    }

    fn print_line(&self, color: Color, line: String) {
        let printed = if self.use_color {
            execute!(
                io::stdout(),
                SetForegroundColor(color),
                Print(&line),
                ResetColor,
                Print("\n")
            )
        } else {
            execute!(io::stdout(), Print(&line), Print("\n"))
        };
        if printed.is_err() {
            println!("{}", line);
        }
    }
}

impl Presenter for ConsolePresenter {
    fn set_cell_highlight(&mut self, row: usize, col: usize, selected: bool) {
        log::debug!(
            "🎨 {} {}",
            cell_element_id(row, col),
            if selected { "highlighted" } else { "cleared" }
        );
    }

    fn set_field_invalid(&mut self, field: FieldId, invalid: bool) {
        if invalid {
            self.print_line(
                Color::Yellow,
                format!("   ✗ field '{}' is invalid", field.element_id()),
            );
        }
    }

    fn show_toast(&mut self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => self.print_line(Color::Green, format!("✅ {}", toast.message)),
            ToastKind::Error => self.print_line(Color::Red, format!("❌ {}", toast.message)),
        }
    }

    fn navigate(&mut self, path: &str) {
        info!("➡️ Navigating to {}{}", self.base_url, path);
    }
}

/// Presenter call, as recorded by `RecordingPresenter`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    CellHighlight { row: usize, col: usize, selected: bool },
    FieldInvalid { field: FieldId, invalid: bool },
    Toast(Toast),
    Navigate(String),
}

/// Keeps every call in order; for headless use and tests
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<&Toast> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Toast(toast) => Some(toast),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Navigate(path) => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Latest marker state of a field, if it was ever touched
    pub fn field_invalid(&self, field: FieldId) -> Option<bool> {
        self.events.iter().rev().find_map(|event| match event {
            PresenterEvent::FieldInvalid {
                field: marked,
                invalid,
            } if *marked == field => Some(*invalid),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn set_cell_highlight(&mut self, row: usize, col: usize, selected: bool) {
        self.events.push(PresenterEvent::CellHighlight { row, col, selected });
    }

    fn set_field_invalid(&mut self, field: FieldId, invalid: bool) {
        self.events.push(PresenterEvent::FieldInvalid { field, invalid });
    }

    fn show_toast(&mut self, toast: Toast) {
        self.events.push(PresenterEvent::Toast(toast));
    }

    fn navigate(&mut self, path: &str) {
        self.events.push(PresenterEvent::Navigate(path.to_string()));
    }
}
