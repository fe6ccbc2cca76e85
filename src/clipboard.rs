use anyhow::{Context, Result};

/// Write text to the system clipboard. Fire-and-forget from the caller's
/// perspective; failures are surfaced as warnings, never as fatal errors.
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("opening system clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("writing to clipboard")?;
    Ok(())
}
