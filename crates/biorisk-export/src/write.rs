use std::path::Path;

use tracing::info;

use crate::error::ExportError;

/// Write a rendered report, replacing any existing file atomically.
pub fn write_report(path: &Path, contents: &str) -> Result<(), ExportError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    std::fs::write(tmp_path, contents.as_bytes())?;
    std::fs::rename(tmp_path, path)?;

    info!(path = %path.display(), bytes = contents.len(), "report written");
    Ok(())
}
