use crate::error::GeneratorError;
use std::fs;
use std::path::{Component, Path};

/// Write a generated file, creating its parent directories first
pub fn write_output_file(path: &Path, content: &str) -> Result<(), GeneratorError> {
    let creation_error = |source| GeneratorError::OutputCreation {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            log::debug!("Creating output directory {}", parent.display());
            fs::create_dir_all(parent).map_err(creation_error)?;
        }
    }

    fs::write(path, content).map_err(creation_error)?;
    log::debug!("Wrote {} bytes to {}", content.len(), path.display());

    Ok(())
}

/// True if `name` can be used as a single file name component without
/// escaping the output directory
pub fn is_safe_file_component(name: &str) -> bool {
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return false;
    }

    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Checks if a file exists and is readable
pub fn is_readable_file(path: &Path) -> bool {
    path.is_file() && fs::metadata(path).is_ok()
}
