use crate::errors::SsmError;

/// Asks whether a mutating operation may go ahead.
pub trait Confirm {
    fn confirm(&mut self, operation: &str, target: &str) -> Result<bool, SsmError>;
}

/// Interactive yes/no on the terminal, defaulting to no.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, operation: &str, target: &str) -> Result<bool, SsmError> {
        dialoguer::Confirm::new()
            .with_prompt(prompt_text(operation, target))
            .default(false)
            .interact()
            .map_err(|e| SsmError::Prompt { message: format!("{} (use --force when not on a terminal)", e) })
    }
}

pub fn prompt_text(operation: &str, target: &str) -> String {
    format!("Performing the operation \"{}\" on target \"{}\". Continue?", operation, target)
}
