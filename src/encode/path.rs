use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::RainResult;

/// First path in `p`, `stem_1.ext`, `stem_2.ext`, … that does not exist yet.
pub fn unique_output_path(p: &Path) -> PathBuf {
    if !p.exists() {
        return p.to_path_buf();
    }
    let mut counter: u64 = 1;
    loop {
        let candidate = suffixed(p, counter);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Create a new file at the first free name in the [`unique_output_path`] sequence.
///
/// The file is opened with `create_new`, so a name taken between the check and the open moves on
/// to the next suffix instead of being truncated.
pub fn create_unique_file(p: &Path) -> RainResult<(PathBuf, File)> {
    let mut counter: u64 = 0;
    loop {
        let candidate = if counter == 0 {
            p.to_path_buf()
        } else {
            suffixed(p, counter)
        };
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => counter += 1,
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("create '{}'", candidate.display()))
                    .into());
            }
        }
    }
}

fn suffixed(p: &Path, counter: u64) -> PathBuf {
    let stem = p
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match p.extension() {
        Some(ext) => format!("{stem}_{counter}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{counter}"),
    };
    p.with_file_name(name)
}

/// Create the parent directory of `path` when it is missing.
pub fn ensure_parent_dir(path: &Path) -> RainResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/path.rs"]
mod tests;
