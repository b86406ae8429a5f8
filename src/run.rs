//! Per-file driver.
//!
//! Reads each discovered file, runs it through a fresh
//! [`DocumentProcessor`], and either writes the cleaned text back (clean
//! mode) or hands the removed comments to the caller (audit mode). Files
//! share no state, so a directory is processed on a rayon pool.

use crate::discover;
use crate::error::{Error, Result};
use crate::process::{CommentRecord, DocumentProcessor, ProcessOptions};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// What to do with each processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Overwrite the file with its cleaned text.
    #[default]
    Clean,
    /// Leave the file alone and report its comments.
    Audit,
}

/// Run configuration assembled from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub mode: Mode,
    pub options: ProcessOptions,
    /// Worker threads for directory mode; `None` uses rayon's default.
    pub jobs: Option<usize>,
}

/// Result of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub comments: Vec<CommentRecord>,
}

/// Process every source file under `target`.
///
/// Outcomes come back in discovery order regardless of which worker
/// finished first. The first failing file aborts the run.
pub fn run(target: &Path, config: &RunConfig) -> Result<Vec<FileOutcome>> {
    let files = discover::discover(target)?;
    log::info!("processing {} file(s) under {}", files.len(), target.display());

    let work = || {
        files
            .par_iter()
            .map(|path| process_file(path, config))
            .collect::<Result<Vec<_>>>()
    };

    match config.jobs {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()?
            .install(work),
        None => work(),
    }
}

/// Process a single file according to `config.mode`.
pub fn process_file(path: &Path, config: &RunConfig) -> Result<FileOutcome> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let result = DocumentProcessor::new(config.options).process(&content);
    log::debug!(
        "{}: {} comment(s) found",
        path.display(),
        result.comments.len()
    );

    if config.mode == Mode::Clean {
        if result.cleaned == content {
            log::debug!("{}: unchanged", path.display());
        } else {
            fs::write(path, &result.cleaned).map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(FileOutcome {
        path: path.to_path_buf(),
        comments: result.comments,
    })
}
