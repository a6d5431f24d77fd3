use std::io::Read;

use anyhow::Context;

use super::TextInput;

/// Resolve the text to check: the argument, then `--file`, then stdin.
pub fn read(input: &TextInput) -> anyhow::Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }
    if let Some(path) = &input.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}
