use std::path::Path;

use anyhow::{bail, Context, Result};

/// Refuse an `--output` path that names the file being parsed.
pub fn ensure_output_not_input(output: &Path, input: &Path) -> Result<()> {
    // An output that does not exist yet cannot be the input.
    if !output.exists() {
        return Ok(());
    }

    let out_real = output
        .canonicalize()
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;
    let in_real = input
        .canonicalize()
        .with_context(|| format!("failed to resolve input path {}", input.display()))?;
    if out_real == in_real {
        bail!(
            "refusing to overwrite input file: output {} is the same file as {}",
            output.display(),
            input.display()
        );
    }
    Ok(())
}
