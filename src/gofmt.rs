//! @ai:module:intent Hand rewritten files to the external gofmt formatter
//! @ai:module:layer infrastructure
//! @ai:module:public_api format_file

use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;

/// @ai:intent Reformat a Go file in place so rewritten tags line up again
/// @ai:pre gofmt is on PATH
/// @ai:effects fs:write, process
pub fn format_file(path: &Path) -> Result<()> {
    let output = Command::new("gofmt").arg("-w").arg(path).output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Gofmt {
            path: path.to_path_buf(),
            message: stderr.trim().to_string(),
        });
    }

    tracing::debug!("Formatted {}", path.display());
    Ok(())
}
