use crate::cli_utils::{CliError, CliResult};
use crate::store::validate_document_id;
use dialoguer::Input as DialoguerInput;

pub struct Input;

impl Input {
    pub fn get_string(prompt: &str) -> CliResult<String> {
        let value = DialoguerInput::new().with_prompt(prompt).interact_text()?;
        Ok(value)
    }

    /// Amounts are kept as typed; parsing happens in the processors
    pub fn get_amount(prompt: &str) -> CliResult<String> {
        let value: String = DialoguerInput::new().with_prompt(prompt).interact_text()?;
        Ok(value.trim().to_string())
    }

    /// A category usable as a budget document id
    pub fn get_budget_category(prompt: &str) -> CliResult<String> {
        let value: String = DialoguerInput::new().with_prompt(prompt).interact_text()?;
        validate_document_id(&value).map_err(|e| CliError::ValidationError(e.to_string()))?;
        Ok(value)
    }
}
