//! Terminal confirmation for destructive commands.

use registry_core::ConfirmGate;
use std::io::{self, BufRead, Write};

/// Asks on stdout, reads one line from stdin. Anything but yes declines.
pub struct StdinGate;

impl ConfirmGate for StdinGate {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => is_yes(&line),
            Err(_) => false,
        }
    }
}

/// `--yes`: every prompt is accepted.
pub struct AssumeYes;

impl ConfirmGate for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "c" | "có")
}
