//! Output persistence for generated scripts
//!
//! Scripts are staged in a temporary file next to the destination and
//! renamed into place. The temporary file is created owner read/write only
//! and is deleted on every path that does not reach the rename.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

/// Write `text` to `dest` through a restrictive temporary file
pub fn write_script(dest: &Path, text: &str) -> Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // NamedTempFile removes the file when dropped, including on early return
    let mut staged = tempfile::Builder::new()
        .prefix(".json2robot-")
        .suffix(".robot.tmp")
        .tempfile_in(dir)?;
    restrict_permissions(&staged)?;

    staged.write_all(text.as_bytes())?;
    staged.as_file().sync_all()?;

    staged.persist(dest).map_err(|e| e.error)?;
    tracing::debug!(path = %dest.display(), bytes = text.len(), "wrote script");
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(file: &NamedTempFile) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.as_file()
        .set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &NamedTempFile) -> Result<()> {
    Ok(())
}
