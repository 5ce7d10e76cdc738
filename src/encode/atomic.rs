use std::{io::Write as _, path::Path};

use anyhow::Context as _;

use crate::foundation::error::{HueloopError, HueloopResult};

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> HueloopResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write `bytes` to `path` so that readers only ever observe the old file or the complete new one.
///
/// The data goes to a temporary file next to `path` and is renamed over it once flushed. On any
/// failure the temporary file is removed and `path` is left as it was.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> HueloopResult<()> {
    ensure_parent_dir(path)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".hueloop-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .with_context(|| format!("failed to create temporary file in '{}'", dir.display()))?;

    tmp.write_all(bytes)
        .with_context(|| format!("failed to write '{}'", tmp.path().display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("failed to sync '{}'", tmp.path().display()))?;

    tmp.persist(path).map_err(|e| {
        HueloopError::encode(format!(
            "failed to move output into place at '{}': {}",
            path.display(),
            e.error
        ))
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote artifact");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/atomic.rs"]
mod tests;
