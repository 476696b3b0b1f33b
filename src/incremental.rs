// WHY: Helpers for the auxiliary output files written next to each essay
// An existing aux file means the essay was already segmented and can be skipped

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::discovery::GENERATED_MARKER;
use crate::segmentation::SegmentationResult;

/// `dir/essay.txt` -> `dir/essay_segmented.json`
pub fn generate_aux_file_path(source_path: &Path) -> PathBuf {
    let file_stem = source_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    source_path.with_file_name(format!("{file_stem}{GENERATED_MARKER}.json"))
}

pub fn aux_file_exists<P: AsRef<Path>>(source_path: P) -> bool {
    generate_aux_file_path(source_path.as_ref()).exists()
}

/// Whether an essay still needs segmenting
pub fn should_process_file<P: AsRef<Path>>(source_path: P, overwrite_all: bool) -> bool {
    overwrite_all || !aux_file_exists(source_path)
}

/// Write a segmentation as pretty JSON with a trailing newline next to its source
pub async fn write_aux_file<P: AsRef<Path>>(source_path: P, result: &SegmentationResult) -> Result<PathBuf> {
    let aux_path = generate_aux_file_path(source_path.as_ref());
    let mut content = serde_json::to_string_pretty(result)?;
    content.push('\n');
    tokio::fs::write(&aux_path, content)
        .await
        .with_context(|| format!("Failed to write aux file {}", aux_path.display()))?;
    Ok(aux_path)
}

/// Load a previously written segmentation for `source_path`
pub async fn read_aux_file<P: AsRef<Path>>(source_path: P) -> Result<SegmentationResult> {
    let aux_path = generate_aux_file_path(source_path.as_ref());
    let content = tokio::fs::read_to_string(&aux_path)
        .await
        .with_context(|| format!("Failed to read aux file {}", aux_path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Malformed aux file {}", aux_path.display()))
}
