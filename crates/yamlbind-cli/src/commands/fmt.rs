//! Format document command

use std::path::Path;

use anyhow::{Context, Result};

use super::DocumentCodec;

/// Run the fmt command
///
/// Comments do not survive a rewrite, so a commented document is only
/// rewritten when `strip_comments` is set.
pub fn run(file: &Path, output: Option<&Path>, check: bool, strip_comments: bool) -> Result<()> {
    let codec = DocumentCodec::new();
    let current = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let document = codec
        .parse(&current)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    if check {
        let canonical = codec.write_to_string(&document)?;
        if current != canonical {
            anyhow::bail!("{} is not formatted", file.display());
        }
        tracing::info!("✓ {} is formatted", file.display());
        return Ok(());
    }

    if has_comments(&current) {
        if !strip_comments {
            anyhow::bail!(
                "{} contains comments, which formatting would remove; \
                 pass --strip-comments to format it anyway",
                file.display()
            );
        }
        tracing::warn!("Removing comments from {}", file.display());
    }

    let target = output.unwrap_or(file);
    codec
        .write_file(&document, target)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    tracing::info!("Formatted {} -> {}", file.display(), target.display());
    Ok(())
}

/// Whether `text` looks like it carries a YAML comment
///
/// A `#` at the start of a line or after whitespace starts a comment. A `#`
/// inside a quoted scalar also matches, so this errs towards refusing.
fn has_comments(text: &str) -> bool {
    text.lines().any(|line| {
        let mut previous = None;
        for c in line.chars() {
            if c == '#' && previous.is_none_or(char::is_whitespace) {
                return true;
            }
            previous = Some(c);
        }
        false
    })
}
