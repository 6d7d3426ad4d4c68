//! Check documents command

use std::path::PathBuf;

use anyhow::Result;

use super::DocumentCodec;

/// Run the check command
pub fn run(files: &[PathBuf]) -> Result<()> {
    let codec = DocumentCodec::new();
    let mut failed = 0;

    for file in files {
        match codec.parse_file(file) {
            Ok(_) => tracing::info!("✓ {}", file.display()),
            Err(e) => {
                tracing::error!("✗ {}: {}", file.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} documents failed", failed, files.len());
    }
    Ok(())
}
