use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Find `{stem}.RRF` or `{stem}.RRF.gz` in `base_path` or up to two directory levels below it.
/// If `base_path` is itself that file it is returned as is. Any other file is searched
/// for from its parent directory.
pub fn find_rrf_file(base_path: &Path, stem: &str) -> Result<PathBuf> {
    let search_dir = if base_path.is_file() {
        if is_rrf_file_for(base_path, stem) {
            return Ok(base_path.to_path_buf());
        }

        match base_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    } else {
        base_path.to_path_buf()
    };

    let found = recurse_dirs(search_dir, stem, 0)?;
    found.ok_or_else(|| Error::NotFound {
        base: base_path.to_path_buf(),
        stem: stem.to_string(),
    })
}

fn is_rrf_file_for(path: &Path, stem: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    name == format!("{stem}.RRF") || name == format!("{stem}.RRF.gz")
}

fn recurse_dirs(base_dir: PathBuf, stem: &str, current_depth: usize) -> Result<Option<PathBuf>> {
    if let Some(path) = rrf_file_in(&base_dir, stem)? {
        return Ok(Some(path));
    }

    if current_depth >= 2 {
        return Ok(None);
    }

    let contents = std::fs::read_dir(&base_dir).map_err(|e| Error::source_file(&base_dir, e))?;
    for entry in contents.flatten() {
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            if let Some(path) = recurse_dirs(entry.path(), stem, current_depth + 1)? {
                return Ok(Some(path));
            }
        }
    }

    Ok(None)
}

fn rrf_file_in(dir: &Path, stem: &str) -> Result<Option<PathBuf>> {
    let plain = format!("{stem}.RRF");
    let gz = format!("{stem}.RRF.gz");

    // Prefer the uncompressed file when both are present.
    for name in [plain, gz] {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
    }

    if !dir.is_dir() {
        return Err(Error::source_file(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    Ok(None)
}
