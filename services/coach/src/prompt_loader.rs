use anyhow::{Context, Result, bail};
use coach_core::request::TRANSCRIPT_PLACEHOLDER;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Prompt file (without extension) that overrides the built-in summary template.
pub const SUMMARY_PROMPT_KEY: &str = "session_summary";

/// Reads every `.md` file in `dir_path`, keyed by file stem.
pub fn load_prompts(dir_path: &Path) -> Result<HashMap<String, String>> {
    let mut prompts = HashMap::new();

    for entry in fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read prompts directory: {}", dir_path.display()))?
    {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("md") {
            continue;
        }

        let key = path
            .file_stem()
            .and_then(|s| s.to_str())
            .context("Could not get file stem for prompt file")?
            .to_string();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read prompt file: {}", path.display()))?;

        tracing::debug!("loaded prompt '{}' from {}", key, path.display());
        prompts.insert(key, content);
    }

    Ok(prompts)
}

/// The summary template override among `prompts`, if there is one.
///
/// A template that has nowhere to put the transcript is rejected rather than
/// silently sending the model an empty conversation.
pub fn summary_template(prompts: &HashMap<String, String>) -> Result<Option<String>> {
    let Some(template) = prompts.get(SUMMARY_PROMPT_KEY) else {
        return Ok(None);
    };
    if !template.contains(TRANSCRIPT_PLACEHOLDER) {
        bail!(
            "Prompt '{}' must contain the {} placeholder",
            SUMMARY_PROMPT_KEY,
            TRANSCRIPT_PLACEHOLDER
        );
    }
    Ok(Some(template.clone()))
}
