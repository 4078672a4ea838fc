//! Prompt normalisation for single and multi-line submissions.

use crate::error::CoreError;

/// Maximum prompt length in characters, matching `generated_images.prompt`.
pub const MAX_PROMPT_LEN: usize = 255;

/// Message returned when a multi-line submission contains no prompts.
pub const EMPTY_BATCH_MESSAGE: &str = "Please provide prompts.";

/// Message returned when a single-prompt submission is empty.
pub const EMPTY_PROMPT_MESSAGE: &str = "Please provide a prompt.";

/// Split newline-separated input into trimmed, non-empty prompts.
///
/// Lines are returned in input order. Both `\n` and `\r\n` line endings are
/// accepted. Fails with [`CoreError::Validation`] only when nothing remains
/// after trimming. Length is not checked here: every non-blank line becomes
/// a job, and an over-long prompt fails its own job via [`check_length`].
pub fn parse_prompt_batch(input: &str) -> Result<Vec<String>, CoreError> {
    let prompts: Vec<String> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if prompts.is_empty() {
        return Err(CoreError::Validation(EMPTY_BATCH_MESSAGE.to_string()));
    }
    Ok(prompts)
}

/// Trim a single prompt and check it is non-empty and within bounds.
pub fn normalize_prompt(input: &str) -> Result<String, CoreError> {
    let prompt = input.trim();
    if prompt.is_empty() {
        return Err(CoreError::Validation(EMPTY_PROMPT_MESSAGE.to_string()));
    }
    check_length(prompt)?;
    Ok(prompt.to_string())
}

/// Reject prompts longer than [`MAX_PROMPT_LEN`] characters.
pub fn check_length(prompt: &str) -> Result<(), CoreError> {
    let len = prompt.chars().count();
    if len > MAX_PROMPT_LEN {
        return Err(CoreError::Validation(format!(
            "Prompt is {len} characters long; the maximum is {MAX_PROMPT_LEN}"
        )));
    }
    Ok(())
}
