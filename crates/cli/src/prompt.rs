//! Interactive confirmation prompt

use catalogctl_adapter::ConfirmationGate;
use colored::*;
use std::io::{self, BufRead, Write};

/// Terminal y/N gate for mutating operations.
///
/// Declines on anything but an explicit `y`/`yes`, including EOF.
pub struct InteractivePrompt;

impl ConfirmationGate for InteractivePrompt {
    fn confirm(&self, action: &str, target: &str) -> bool {
        print!(
            "{} {} will modify '{}'. Proceed? [y/N] ",
            "?".yellow(),
            action.bold(),
            target.cyan()
        );
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
