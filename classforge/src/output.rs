//! Artifact output. Files are written next to their destination and renamed
//! into place, so a failed run never leaves a partial artifact behind.

use miette::Diagnostic;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum OutputError {
    #[error("Could not write {}", path.display())]
    #[diagnostic(
        code(classforge::output::write),
        help("Check that the destination directory exists and is writable")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not move the generated registry into {}", path.display())]
    #[diagnostic(code(classforge::output::persist))]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// `-` means standard output
pub fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

pub fn write_output(path: &Path, contents: &str) -> Result<(), OutputError> {
    let write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    if is_stdout(path) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(contents.as_bytes()).map_err(write_error)?;
        return stdout.flush().map_err(write_error);
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.flush().map_err(write_error)?;
    file.persist(path).map_err(|source| OutputError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
