// WHY: Turns CLI inputs (files and directories) into the list of essays to segment
// Directories are searched recursively for *.txt, skipping our own *_segmented.* outputs

use anyhow::Result;
use futures::stream::{Stream, StreamExt};
use glob::glob;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Marker in file stems written by `--write-aux`
pub const GENERATED_MARKER: &str = "_segmented";

/// Configuration for file discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
}

/// Result of file discovery validation
#[derive(Debug, Clone)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

impl FileValidation {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Whether a path is an output of this tool rather than an essay
pub fn is_generated_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(GENERATED_MARKER))
}

/// Streams every `**/*.txt` essay under `root_dir` with its validation result
pub fn discover_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let root_path = root_dir.as_ref().to_path_buf();

    futures::stream::unfold(
        DiscoveryState::new(root_path, config),
        |mut state| async move { state.next_file().await.map(|result| (result, state)) },
    )
}

/// Internal state for file discovery iteration
struct DiscoveryState {
    root_dir: PathBuf,
    config: DiscoveryConfig,
    glob_iter: Option<glob::Paths>,
}

impl DiscoveryState {
    fn new(root_dir: PathBuf, config: DiscoveryConfig) -> Self {
        Self {
            root_dir,
            config,
            glob_iter: None,
        }
    }

    async fn next_file(&mut self) -> Option<Result<FileValidation>> {
        if self.glob_iter.is_none() {
            let pattern = format!("{}/**/*.txt", self.root_dir.display());
            debug!("Starting essay discovery with pattern: {}", pattern);

            match glob(&pattern) {
                Ok(paths) => self.glob_iter = Some(paths),
                Err(e) => return Some(Err(anyhow::anyhow!("Failed to create glob pattern: {}", e))),
            }
        }

        let glob_iter = self.glob_iter.as_mut()?;
        loop {
            match glob_iter.next()? {
                Ok(path) if is_generated_file(&path) => {
                    debug!("Skipping generated file: {}", path.display());
                }
                Ok(path) => return Some(validate_file(path, &self.config).await),
                Err(e) => {
                    let error_msg = format!("Glob iteration error: {e}");
                    warn!("{}", error_msg);
                    if self.config.fail_fast {
                        return Some(Err(anyhow::anyhow!(error_msg)));
                    }
                }
            }
        }
    }
}

/// Check that a path is an accessible regular file.
///
/// Under `fail_fast` an inaccessible file is an error; otherwise it is
/// reported through `FileValidation::error`.
pub async fn validate_file(path: PathBuf, config: &DiscoveryConfig) -> Result<FileValidation> {
    match fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => Ok(FileValidation { path, error: None }),
        Ok(_) => {
            let error = format!("Path is not a file: {}", path.display());
            warn!("{}", error);
            Ok(FileValidation {
                path,
                error: Some(error),
            })
        }
        Err(e) => {
            let error = format!("Cannot access file {}: {}", path.display(), e);
            warn!("{}", error);
            if config.fail_fast {
                Err(anyhow::anyhow!(error))
            } else {
                Ok(FileValidation {
                    path,
                    error: Some(error),
                })
            }
        }
    }
}

/// Collect all essays under one directory
pub async fn collect_discovered_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    let mut files = Vec::new();
    let mut stream = Box::pin(discover_files(root_dir, config));

    while let Some(result) = stream.next().await {
        files.push(result?);
    }

    let valid_count = files.iter().filter(|f| f.is_valid()).count();
    let invalid_count = files.len() - valid_count;
    if invalid_count > 0 {
        warn!("Found {} files with validation issues", invalid_count);
    }
    info!("File discovery summary: {} valid, {} invalid", valid_count, invalid_count);

    Ok(files)
}

/// Expand CLI inputs: directories are searched, files are taken as given.
///
/// Results are sorted and deduplicated so output order does not depend on
/// the order the filesystem returns entries.
pub async fn expand_inputs(inputs: &[PathBuf], config: DiscoveryConfig) -> Result<Vec<FileValidation>> {
    let mut files = Vec::new();

    for input in inputs {
        if fs::metadata(input).await.is_ok_and(|metadata| metadata.is_dir()) {
            info!("Discovering essays in: {}", input.display());
            files.extend(collect_discovered_files(input, config.clone()).await?);
        } else {
            files.push(validate_file(input.clone(), &config).await?);
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files.dedup_by(|a, b| a.path == b.path);
    info!("Expanded {} inputs into {} files", inputs.len(), files.len());
    Ok(files)
}
