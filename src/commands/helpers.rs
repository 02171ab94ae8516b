//! Shared helpers for command implementations

use std::io::Read;

use solace_core::error::{Result, SolaceError};

/// Resolve input text from an argument or stdin.
///
/// `force_stdin` reads stdin even when an argument was given. The result
/// is trimmed; empty input is a usage error naming `what`.
pub fn resolve_input(text: Option<&str>, force_stdin: bool, what: &str) -> Result<String> {
    let raw = match text {
        Some(text) if !force_stdin => text.to_string(),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let trimmed = raw.trim().to_string();
    if trimmed.is_empty() {
        return Err(SolaceError::UsageError(format!(
            "no {} provided (pass it as an argument or pipe it via stdin)",
            what
        )));
    }
    Ok(trimmed)
}
