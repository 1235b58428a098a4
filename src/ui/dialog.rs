//! Confirmation dialog for a pending cell change.

use crate::models::change::PendingChange;
use crate::models::column::ColumnDescriptor;
use crate::ui::messages::warning;
use crate::utils::formatting::Formatter;
use ansi_term::Colour;
use std::io::{self, BufRead, Write};

const WRAP_WIDTH: usize = 72;

/// Old and new value, formatted exactly as the grid formats that column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub row_id: String,
    pub old_display: String,
    pub new_display: String,
}

impl ConfirmDialog {
    pub fn for_change(change: &PendingChange, column: &ColumnDescriptor, formatter: &Formatter) -> Self {
        Self {
            title: column.title.clone(),
            row_id: change.row_id.to_string(),
            old_display: formatter.display(column.kind, &change.old_value),
            new_display: formatter.display(column.kind, &change.new_value),
        }
    }

    pub fn prompt(&self) -> String {
        format!("Update {} of row #{}?", self.title, self.row_id)
    }

    /// Old value in red, new value in green. `colored = false` for plain text.
    pub fn render(&self, colored: bool) -> String {
        let wrap = |s: &str| textwrap::fill(s, WRAP_WIDTH - 8);
        let (old, new) = (wrap(&self.old_display), wrap(&self.new_display));

        let (old, new) = if colored {
            (
                Colour::Red.paint(old).to_string(),
                Colour::Green.paint(new).to_string(),
            )
        } else {
            (old, new)
        };

        format!("  from: {old}\n  to:   {new}")
    }
}

/// Asks the user to accept or reject a change.
pub trait Confirmer {
    fn confirm(&mut self, dialog: &ConfirmDialog) -> bool;
}

/// Always answers the same way (`--yes`, tests).
pub struct AutoConfirm(pub bool);

impl Confirmer for AutoConfirm {
    fn confirm(&mut self, _dialog: &ConfirmDialog) -> bool {
        self.0
    }
}

/// Yes/no on stdin. Anything but `y`/`yes` is a no.
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&mut self, dialog: &ConfirmDialog) -> bool {
        warning(dialog.prompt());
        println!("{}", dialog.render(true));
        print!("Confirm [y/N]: ");
        let _ = io::stdout().flush();

        let mut s = String::new();
        if io::stdin().lock().read_line(&mut s).is_ok() {
            matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
        } else {
            false
        }
    }
}
